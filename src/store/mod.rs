pub mod local;
pub mod rest;
pub mod seed;

use crate::config::Config;
use crate::core::traits::Store;
use crate::utils::error::AppResult;
use tracing::debug;

pub use local::LocalStore;
pub use rest::RestClient;

/// Pick the hosted store when one is configured, otherwise the local one
pub fn open_store(config: &Config) -> AppResult<Box<dyn Store>> {
    let store: Box<dyn Store> = match &config.backend {
        Some(backend) => Box::new(RestClient::new(backend)?),
        None => Box::new(LocalStore::new(&config.general.data_dir)),
    };
    debug!(store = %store.describe(), "opened store");
    Ok(store)
}
