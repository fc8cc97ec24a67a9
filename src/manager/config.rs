// Configuration operations

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;

use crate::cli::ConfigCommands;
use crate::config::{ANON_KEY_ENV, Config};
use crate::utils::error::{FlowResult, handle_flow};
use crate::utils::print_success;

pub fn handle_config_command(
    config: Config,
    config_path: &Path,
    command: Option<ConfigCommands>,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) => handle_show_command(&config, config_path),
        Some(ConfigCommands::Path) => {
            println!("{}", config_path.display());
            Ok(())
        }
        Some(ConfigCommands::Reset) => handle_reset_command(config_path),
        None => handle_config_help(config_path),
    }
}

fn handle_show_command(config: &Config, config_path: &Path) -> Result<()> {
    println!("⚙️  BeautyAI Configuration");
    println!("==========================");
    println!("File: {}", config_path.display());

    println!("General:");
    println!("  Data dir: {}", config.general.data_dir.display());
    println!("  Color: {}", config.general.color);
    println!("  Analysis delay: {} ms", config.general.analysis_delay_ms);
    if let Some(format) = &config.general.format {
        println!("  Default format: {:?}", format);
    }

    match &config.backend {
        Some(backend) => {
            println!("Backend:");
            println!("  URL: {}", backend.url);
            if backend.anon_key.as_deref().is_some_and(|k| !k.is_empty()) {
                println!("  Anon key: ✓");
            } else if backend.resolve_anon_key().is_some() {
                println!("  Anon key: ✓ (from {})", ANON_KEY_ENV);
            }
        }
        None => println!("Backend: local store"),
    }

    Ok(())
}

fn handle_config_help(config_path: &Path) -> Result<()> {
    println!("⚙️  Configuration Management");
    println!("==========================");
    println!("Available configuration commands:");
    println!("  beautyai config show    - Show current configuration");
    println!("  beautyai config path    - Print the configuration file path");
    println!("  beautyai config reset   - Reset configuration to defaults");
    println!();
    println!("Configuration file location: {}", config_path.display());
    Ok(())
}

fn handle_reset_command(config_path: &Path) -> Result<()> {
    if prompt_yes_no(
        "Are you sure you want to reset configuration to defaults? This will overwrite your current settings.",
    )? {
        Config::default()
            .save_to(config_path)
            .context("Failed to write default configuration")?;
        print_success("Configuration reset to defaults!");
    } else {
        handle_flow(FlowResult::Cancelled("Reset cancelled".to_string()));
    }
    Ok(())
}

fn prompt_yes_no(question: &str) -> Result<bool> {
    print!("{} [y/N]: ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(is_yes(&input))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
