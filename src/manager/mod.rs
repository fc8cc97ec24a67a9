// Command handlers, one module per area of the CLI
pub mod account;   // Sign in, sign up, history
pub mod analysis;  // Photo analysis and AI features
pub mod catalog;   // Standards and feature matching
pub mod config;    // Configuration management
pub mod shop;      // Products, cart and checkout

pub use account::{
    handle_history_command, handle_login_command, handle_logout_command, handle_signup_command,
    handle_whoami_command,
};
pub use analysis::{handle_analyze_command, handle_feature_command};
pub use catalog::{handle_match_command, handle_standard_command, handle_standards_command};
pub use config::handle_config_command;
pub use shop::{handle_cart_command, handle_checkout_command, handle_shop_command};

use crate::analysis::SimulatedAnalyzer;
use crate::cli::ListFormat;
use crate::config::Config;
use crate::core::operations::Storefront;
use crate::session::{Session, SessionStore};
use crate::store::open_store;
use anyhow::{Context, Result};

/// Build the storefront for the configured backend
pub(crate) fn open_storefront(config: &Config) -> Result<Storefront> {
    let store = open_store(config).context("Failed to open store")?;
    let analyzer = SimulatedAnalyzer::new(config.general.analysis_delay());
    Ok(Storefront::new(store, Box::new(analyzer)))
}

pub(crate) fn current_session(config: &Config) -> Result<Option<Session>> {
    SessionStore::new(&config.general.data_dir)
        .load()
        .context("Failed to read session")
}

/// Command-line format wins over the configured default
pub(crate) fn resolve_format(requested: Option<ListFormat>, config: &Config) -> ListFormat {
    requested.or(config.general.format).unwrap_or(ListFormat::Simple)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_format_precedence() {
        let mut config = Config::default();
        assert_eq!(resolve_format(None, &config), ListFormat::Simple);

        config.general.format = Some(ListFormat::Detailed);
        assert_eq!(resolve_format(None, &config), ListFormat::Detailed);
        assert_eq!(resolve_format(Some(ListFormat::Json), &config), ListFormat::Json);
    }

    #[test]
    fn test_current_session_is_none_without_login() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.general.data_dir = dir.path().to_path_buf();

        assert!(current_session(&config).unwrap().is_none());
    }
}
