use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use beautyai::cli::Cli;
use beautyai::config::Config;
use beautyai::utils::OutputStyle;
use beautyai::utils::error::{AppError, report_error};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        match err.downcast_ref::<AppError>() {
            Some(app_err) => {
                if err.chain().count() > 1 {
                    eprintln!("{}", OutputStyle::muted(&err.to_string()));
                }
                report_error(app_err);
            }
            None => eprintln!("❌ {}", OutputStyle::error(&format!("{:#}", err))),
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with command output
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install log subscriber")?;

    // Ensure configuration exists and load it
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => {
            Config::ensure_config_exists()?;
            Config::config_file_path()
        }
    };
    let config = Config::load_custom(&config_path)?;

    if !config.general.color {
        colored::control::set_override(false);
    }

    cli.command.execute(config, &config_path).await
}
