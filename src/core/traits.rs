//! Adapter trait definitions
//!
//! The hosted store and the local store both implement these, so the rest
//! of the application never knows which one it is talking to.

use crate::core::data::{AnalysisSnapshot, BeautyMatch, BeautyProduct, BeautyStandard, MatchRecord};
use crate::session::Session;
use crate::utils::error::AppResult;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Read access to beauty standards
#[async_trait]
pub trait StandardCatalog: Send + Sync {
    /// Every standard, in catalog order
    async fn list_standards(&self) -> AppResult<Vec<BeautyStandard>>;

    /// Find a standard by exact id, falling back to a case-insensitive name match
    async fn find_standard(&self, query: &str) -> AppResult<Option<BeautyStandard>> {
        let standards = self.list_standards().await?;
        Ok(crate::core::data::find_standard(&standards, query).cloned())
    }
}

/// Read access to products
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Products for one standard, or all products
    async fn list_products(&self, standard_id: Option<&str>) -> AppResult<Vec<BeautyProduct>>;

    /// Products grouped under every standard id
    async fn products_by_standard(&self) -> AppResult<BTreeMap<String, Vec<BeautyProduct>>>;

    async fn find_product(&self, id: &str) -> AppResult<Option<BeautyProduct>> {
        let products = self.list_products(None).await?;
        Ok(products.into_iter().find(|p| p.id == id))
    }
}

/// Persistence of match results for a signed-in user
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Store one row per match; an empty slice is a no-op
    async fn save_matches(&self, session: &Session, matches: &[BeautyMatch]) -> AppResult<()>;

    async fn save_analysis(&self, session: &Session, snapshot: &AnalysisSnapshot) -> AppResult<()>;

    async fn list_matches(&self, session: &Session) -> AppResult<Vec<MatchRecord>>;
}

/// Account sign-in and sign-up
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: Option<&str>) -> AppResult<Session>;

    /// Create an account. Returns a session when the backend signs the user in immediately
    async fn sign_up(&self, email: &str, password: Option<&str>) -> AppResult<Option<Session>>;
}

/// Everything a storefront backend provides
pub trait Store: StandardCatalog + ProductCatalog + MatchStore + AuthProvider {
    /// Short label for status output
    fn describe(&self) -> String;
}
