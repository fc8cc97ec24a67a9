use crate::analysis::AnalysisFeature;
use crate::config::Config;
use crate::manager;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "beautyai")]
#[command(about = "Match your features to beauty standards and shop the looks")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Print debug logs to stderr")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List beauty standards
    Standards(StandardsArgs),

    /// Show one beauty standard
    Standard(StandardArgs),

    /// Rank standards against features you describe
    Match(MatchArgs),

    /// Analyze a photo and rank standards against the detected features
    Analyze(AnalyzeArgs),

    /// Run one of the AI beauty features
    Feature(FeatureArgs),

    /// Browse products by beauty standard
    Shop(ShopArgs),

    /// Manage your cart
    Cart(CartArgs),

    /// Check out the current cart
    Checkout,

    /// Sign in
    Login(AuthArgs),

    /// Create an account
    Signup(AuthArgs),

    /// Sign out
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Show your saved matches
    History,

    /// Configuration management
    Config(ConfigArgs),
}

impl Commands {
    pub async fn execute(self, config: Config, config_path: &Path) -> Result<()> {
        match self {
            Commands::Standards(args) => {
                manager::handle_standards_command(config, &args).await?;
            }
            Commands::Standard(args) => {
                manager::handle_standard_command(config, &args).await?;
            }
            Commands::Match(args) => {
                manager::handle_match_command(config, &args).await?;
            }
            Commands::Analyze(args) => {
                manager::handle_analyze_command(config, &args).await?;
            }
            Commands::Feature(args) => {
                manager::handle_feature_command(config, &args).await?;
            }
            Commands::Shop(args) => {
                manager::handle_shop_command(config, &args).await?;
            }
            Commands::Cart(args) => {
                manager::handle_cart_command(config, &args).await?;
            }
            Commands::Checkout => {
                manager::handle_checkout_command(config).await?;
            }
            Commands::Login(args) => {
                manager::handle_login_command(config, &args).await?;
            }
            Commands::Signup(args) => {
                manager::handle_signup_command(config, &args).await?;
            }
            Commands::Logout => {
                manager::handle_logout_command(config)?;
            }
            Commands::Whoami => {
                manager::handle_whoami_command(config)?;
            }
            Commands::History => {
                manager::handle_history_command(config).await?;
            }
            Commands::Config(args) => {
                manager::handle_config_command(config, config_path, args.command.clone())?;
            }
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct StandardsArgs {
    #[arg(short, long)]
    pub format: Option<ListFormat>,
}

#[derive(Args)]
pub struct StandardArgs {
    #[arg(help = "Standard ID or part of its name")]
    pub query: String,
}

#[derive(Args)]
pub struct MatchArgs {
    #[arg(short = 'F', long = "feature", required = true, help = "Observed feature, repeatable")]
    pub features: Vec<String>,

    #[arg(long, help = "Save the matches to your account")]
    pub save: bool,

    #[arg(short, long)]
    pub format: Option<ListFormat>,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    #[arg(help = "Photo to analyze")]
    pub photo: PathBuf,

    #[arg(long, help = "Do not save results even when signed in")]
    pub no_save: bool,

    #[arg(short, long)]
    pub format: Option<ListFormat>,
}

#[derive(Args)]
pub struct FeatureArgs {
    #[arg(value_enum)]
    pub feature: AnalysisFeature,

    #[arg(short, long)]
    pub photo: Option<PathBuf>,

    #[arg(long = "hint", help = "Feature or style preference, repeatable")]
    pub hints: Vec<String>,
}

#[derive(Args)]
pub struct ShopArgs {
    #[arg(short, long, help = "Standard ID or part of its name")]
    pub standard: Option<String>,
}

#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommands>,
}

#[derive(Subcommand, Clone)]
pub enum CartCommands {
    /// Show the cart
    Show,

    /// Add one unit of a product
    Add { product_id: String },

    /// Remove a product line
    Remove { product_id: String },

    /// Set a product's quantity (0 removes it)
    Set { product_id: String, quantity: u32 },

    /// Empty the cart
    Clear,
}

#[derive(Args)]
pub struct AuthArgs {
    #[arg(short, long)]
    pub email: String,

    #[arg(short, long, help = "Required for the hosted backend")]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    Simple,
    Detailed,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_args_collect_repeated_features() {
        let cli = Cli::try_parse_from([
            "beautyai",
            "match",
            "-F",
            "Oval face shape",
            "--feature",
            "Clear complexion",
            "--save",
        ])
        .unwrap();

        match cli.command {
            Commands::Match(args) => {
                assert_eq!(args.features, vec!["Oval face shape", "Clear complexion"]);
                assert!(args.save);
                assert!(args.format.is_none());
            }
            _ => panic!("expected match command"),
        }
    }

    #[test]
    fn test_match_requires_a_feature() {
        assert!(Cli::try_parse_from(["beautyai", "match"]).is_err());
    }

    #[test]
    fn test_feature_names_are_kebab_case() {
        let cli = Cli::try_parse_from(["beautyai", "feature", "k-beauty", "--photo", "me.png"]).unwrap();
        match cli.command {
            Commands::Feature(args) => {
                assert_eq!(args.feature, AnalysisFeature::KBeauty);
                assert_eq!(args.photo, Some(PathBuf::from("me.png")));
            }
            _ => panic!("expected feature command"),
        }
    }

    #[test]
    fn test_cart_set_parses_quantity() {
        let cli = Cli::try_parse_from(["beautyai", "--debug", "cart", "set", "kgs-tint", "3"]).unwrap();
        assert!(cli.debug);
        match cli.command {
            Commands::Cart(CartArgs {
                command: Some(CartCommands::Set { product_id, quantity }),
            }) => {
                assert_eq!(product_id, "kgs-tint");
                assert_eq!(quantity, 3);
            }
            _ => panic!("expected cart set"),
        }
    }
}
