//! Storefront operations
//!
//! Ties the store, the analyzer and the match engine together. Identity is
//! always passed in by the caller.

use crate::analysis::{
    AnalysisFeature, AnalysisReport, AnalysisRequest, Analyzer, FacialAnalysis, PhotoInput,
};
use crate::core::data::{AnalysisSnapshot, BeautyMatch, BeautyProduct, BeautyStandard};
use crate::core::matching::rank;
use crate::core::traits::Store;
use crate::session::Session;
use crate::utils::error::AppResult;
use serde::Serialize;
use tracing::{info, warn};

/// Result of analysing one photo
#[derive(Debug, Clone, Serialize)]
pub struct PhotoAnalysis {
    pub analysis: FacialAnalysis,
    pub matches: Vec<BeautyMatch>,
    /// Whether results were stored for the session
    pub saved: bool,
}

/// Products grouped under one standard, in catalog order
#[derive(Debug, Clone)]
pub struct ShopSection {
    pub standard: BeautyStandard,
    pub products: Vec<BeautyProduct>,
}

pub struct Storefront {
    store: Box<dyn Store>,
    analyzer: Box<dyn Analyzer>,
}

impl Storefront {
    pub fn new(store: Box<dyn Store>, analyzer: Box<dyn Analyzer>) -> Self {
        Self { store, analyzer }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Rank the catalog against caller-supplied features
    pub async fn rank_features(&self, features: &[String]) -> AppResult<Vec<BeautyMatch>> {
        let standards = self.store.list_standards().await?;
        Ok(rank(&standards, features))
    }

    /// Analyze a photo, rank the catalog against the detected features and
    /// store the results when a session is given.
    ///
    /// Storage failures are logged and reported through `saved`; they never
    /// fail the analysis.
    pub async fn analyze_photo(
        &self,
        photo: PhotoInput,
        session: Option<&Session>,
    ) -> AppResult<PhotoAnalysis> {
        let request = AnalysisRequest::new(AnalysisFeature::Facial).with_photo(photo);
        let analysis = self.analyzer.analyze(&request).await?.into_facial()?;

        let matches = self.rank_features(&analysis.facial_features).await?;

        let saved = match session {
            Some(session) => self.persist(session, &analysis, &matches).await,
            None => false,
        };

        Ok(PhotoAnalysis {
            analysis,
            matches,
            saved,
        })
    }

    /// Store a ranking produced outside of photo analysis
    pub async fn save_matches(&self, session: &Session, matches: &[BeautyMatch]) -> AppResult<()> {
        self.store.save_matches(session, matches).await
    }

    async fn persist(&self, session: &Session, analysis: &FacialAnalysis, matches: &[BeautyMatch]) -> bool {
        let snapshot = AnalysisSnapshot::new(&session.user_id, analysis, matches);

        // Match rows are written even when the snapshot fails
        let snapshot_saved = match self.store.save_analysis(session, &snapshot).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to save analysis snapshot");
                false
            }
        };
        let matches_saved = match self.store.save_matches(session, matches).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to save beauty matches");
                false
            }
        };

        if snapshot_saved && matches_saved {
            info!(user_id = %session.user_id, "analysis saved");
        }
        snapshot_saved && matches_saved
    }

    pub async fn run_feature(&self, request: &AnalysisRequest) -> AppResult<AnalysisReport> {
        self.analyzer.analyze(request).await
    }

    /// Shop sections in catalog order; with a query, only the matching standard
    pub async fn shop(&self, standard_query: Option<&str>) -> AppResult<Vec<ShopSection>> {
        let standards = self.store.list_standards().await?;
        let mut grouped = self.store.products_by_standard().await?;

        let selected: Vec<BeautyStandard> = match standard_query {
            Some(query) => crate::core::data::find_standard(&standards, query)
                .cloned()
                .into_iter()
                .collect(),
            None => standards,
        };

        Ok(selected
            .into_iter()
            .map(|standard| ShopSection {
                products: grouped.remove(&standard.id).unwrap_or_default(),
                standard,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SimulatedAnalyzer;
    use crate::core::data::MatchRecord;
    use crate::core::traits::{AuthProvider, MatchStore, ProductCatalog, StandardCatalog};
    use crate::store::LocalStore;
    use crate::utils::error::AppError;
    use async_trait::async_trait;
    use std::collections::BTreeMap;

    fn photo(dir: &tempfile::TempDir) -> PhotoInput {
        let path = dir.path().join("me.jpg");
        std::fs::write(&path, [0xFFu8, 0xD8]).unwrap();
        PhotoInput::from_path(&path).unwrap()
    }

    fn local_storefront(dir: &tempfile::TempDir) -> Storefront {
        Storefront::new(
            Box::new(LocalStore::new(&dir.path().join("data"))),
            Box::new(SimulatedAnalyzer::instant()),
        )
    }

    #[tokio::test]
    async fn test_analyze_photo_without_session_does_not_save() {
        let dir = tempfile::tempdir().unwrap();
        let storefront = local_storefront(&dir);

        let result = storefront.analyze_photo(photo(&dir), None).await.unwrap();
        assert!(!result.saved);
        assert_eq!(result.matches.len(), 5);
        assert_eq!(result.matches[0].standard.id, "korean-glass-skin");
        assert_eq!(result.matches[0].percentage, 75);
    }

    #[tokio::test]
    async fn test_analyze_photo_with_session_saves_matches() {
        let dir = tempfile::tempdir().unwrap();
        let storefront = local_storefront(&dir);
        let session = Session::new("ada".to_string(), "ada@example.com".to_string(), None);

        let result = storefront.analyze_photo(photo(&dir), Some(&session)).await.unwrap();
        assert!(result.saved);

        let records = storefront.store().list_matches(&session).await.unwrap();
        assert_eq!(records.len(), result.matches.len());
    }

    #[tokio::test]
    async fn test_rank_features_uses_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let storefront = local_storefront(&dir);

        let ranked = storefront
            .rank_features(&["Full lips".to_string(), "radiant glow".to_string()])
            .await
            .unwrap();
        assert_eq!(ranked[0].standard.id, "african-bold-radiant");
        assert_eq!(ranked[0].percentage, 50);
    }

    #[tokio::test]
    async fn test_shop_sections_follow_catalog_order() {
        let dir = tempfile::tempdir().unwrap();
        let storefront = local_storefront(&dir);

        let all = storefront.shop(None).await.unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].standard.id, "korean-glass-skin");
        assert!(all.iter().all(|s| !s.products.is_empty()));

        let one = storefront.shop(Some("bold")).await.unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].standard.id, "african-bold-radiant");

        assert!(storefront.shop(Some("nothing-like-this")).await.unwrap().is_empty());
    }

    /// Local store with switchable write failures
    struct FlakyStore {
        inner: LocalStore,
        fail_snapshot: bool,
        fail_matches: bool,
    }

    #[async_trait]
    impl StandardCatalog for FlakyStore {
        async fn list_standards(&self) -> AppResult<Vec<BeautyStandard>> {
            self.inner.list_standards().await
        }
    }

    #[async_trait]
    impl ProductCatalog for FlakyStore {
        async fn list_products(&self, standard_id: Option<&str>) -> AppResult<Vec<BeautyProduct>> {
            self.inner.list_products(standard_id).await
        }

        async fn products_by_standard(&self) -> AppResult<BTreeMap<String, Vec<BeautyProduct>>> {
            self.inner.products_by_standard().await
        }
    }

    #[async_trait]
    impl MatchStore for FlakyStore {
        async fn save_matches(&self, session: &Session, matches: &[BeautyMatch]) -> AppResult<()> {
            if self.fail_matches {
                return Err(AppError::Network("offline".to_string()));
            }
            self.inner.save_matches(session, matches).await
        }

        async fn save_analysis(&self, session: &Session, snapshot: &AnalysisSnapshot) -> AppResult<()> {
            if self.fail_snapshot {
                return Err(AppError::Network("offline".to_string()));
            }
            self.inner.save_analysis(session, snapshot).await
        }

        async fn list_matches(&self, session: &Session) -> AppResult<Vec<MatchRecord>> {
            self.inner.list_matches(session).await
        }
    }

    #[async_trait]
    impl AuthProvider for FlakyStore {
        async fn sign_in(&self, email: &str, password: Option<&str>) -> AppResult<Session> {
            self.inner.sign_in(email, password).await
        }

        async fn sign_up(&self, email: &str, password: Option<&str>) -> AppResult<Option<Session>> {
            self.inner.sign_up(email, password).await
        }
    }

    impl Store for FlakyStore {
        fn describe(&self) -> String {
            "flaky".to_string()
        }
    }

    fn flaky_storefront(dir: &tempfile::TempDir, fail_snapshot: bool, fail_matches: bool) -> Storefront {
        Storefront::new(
            Box::new(FlakyStore {
                inner: LocalStore::new(&dir.path().join("data")),
                fail_snapshot,
                fail_matches,
            }),
            Box::new(SimulatedAnalyzer::instant()),
        )
    }

    #[tokio::test]
    async fn test_save_failure_does_not_fail_analysis() {
        let dir = tempfile::tempdir().unwrap();
        let storefront = flaky_storefront(&dir, true, true);
        let session = Session::new("ada".to_string(), "ada@example.com".to_string(), None);

        let result = storefront.analyze_photo(photo(&dir), Some(&session)).await.unwrap();
        assert!(!result.saved);
        assert_eq!(result.matches.len(), 5);
    }

    #[tokio::test]
    async fn test_failed_snapshot_still_stores_match_rows() {
        let dir = tempfile::tempdir().unwrap();
        let storefront = flaky_storefront(&dir, true, false);
        let session = Session::new("ada".to_string(), "ada@example.com".to_string(), None);

        let result = storefront.analyze_photo(photo(&dir), Some(&session)).await.unwrap();
        assert!(!result.saved);

        let rows = storefront.store().list_matches(&session).await.unwrap();
        assert_eq!(rows.len(), result.matches.len());
        assert_eq!(rows[0].standard_id, result.matches[0].standard.id);
    }
}
