use super::seed::default_catalog;
use crate::core::data::{
    AnalysisSnapshot, BeautyMatch, BeautyProduct, BeautyStandard, Catalog, MatchRecord,
    group_products,
};
use crate::core::traits::{AuthProvider, MatchStore, ProductCatalog, StandardCatalog, Store};
use crate::session::{Session, validate_email};
use crate::utils::error::{AppError, AppResult};
use crate::utils::format;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

const CATALOG_FILE: &str = "catalog.toml";
const HISTORY_FILE: &str = "history.toml";
const ACCOUNTS_FILE: &str = "accounts.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    records: Vec<MatchRecord>,
    #[serde(default)]
    analyses: Vec<AnalysisSnapshot>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AccountsFile {
    #[serde(default)]
    profiles: Vec<Profile>,
}

/// Offline identity; no password is stored
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Profile {
    user_id: String,
    email: String,
    #[serde(with = "format")]
    created_at: DateTime<Utc>,
}

/// File-backed store used when no hosted backend is configured
pub struct LocalStore {
    data_dir: PathBuf,
}

impl LocalStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
        }
    }

    fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(CATALOG_FILE)
    }

    fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE)
    }

    fn accounts_path(&self) -> PathBuf {
        self.data_dir.join(ACCOUNTS_FILE)
    }

    /// Create the data directory and seed the catalog if it is missing
    pub fn ensure_storage_exists(&self) -> AppResult<()> {
        std::fs::create_dir_all(&self.data_dir)?;

        let catalog_path = self.catalog_path();
        if !catalog_path.exists() {
            info!(path = %catalog_path.display(), "seeding local catalog");
            write_toml(&catalog_path, &default_catalog())?;
        }
        Ok(())
    }

    pub fn load_catalog(&self) -> AppResult<Catalog> {
        self.ensure_storage_exists()?;
        read_toml(&self.catalog_path())
    }

    fn load_history(&self) -> AppResult<HistoryFile> {
        read_toml(&self.history_path())
    }

    fn save_history(&self, history: &HistoryFile) -> AppResult<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        write_toml(&self.history_path(), history)
    }

    fn load_accounts(&self) -> AppResult<AccountsFile> {
        read_toml(&self.accounts_path())
    }
}

fn read_toml<T: DeserializeOwned + Default>(path: &Path) -> AppResult<T> {
    if !path.exists() {
        return Ok(T::default());
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }

    debug!(path = %path.display(), "reading local store file");
    toml::from_str(&content)
        .map_err(|e| AppError::Store(format!("Failed to parse {}: {}", path.display(), e)))
}

fn write_toml<T: Serialize>(path: &Path, value: &T) -> AppResult<()> {
    let content = toml::to_string_pretty(value)
        .map_err(|e| AppError::Store(format!("Failed to serialize {}: {}", path.display(), e)))?;
    std::fs::write(path, content)?;
    debug!(path = %path.display(), "wrote local store file");
    Ok(())
}

#[async_trait]
impl StandardCatalog for LocalStore {
    async fn list_standards(&self) -> AppResult<Vec<BeautyStandard>> {
        Ok(self.load_catalog()?.standards)
    }
}

#[async_trait]
impl ProductCatalog for LocalStore {
    async fn list_products(&self, standard_id: Option<&str>) -> AppResult<Vec<BeautyProduct>> {
        Ok(self.load_catalog()?.products_for(standard_id))
    }

    async fn products_by_standard(&self) -> AppResult<BTreeMap<String, Vec<BeautyProduct>>> {
        let catalog = self.load_catalog()?;
        Ok(group_products(&catalog.standards, &catalog.products))
    }

    async fn find_product(&self, id: &str) -> AppResult<Option<BeautyProduct>> {
        Ok(self.load_catalog()?.find_product(id).cloned())
    }
}

#[async_trait]
impl MatchStore for LocalStore {
    async fn save_matches(&self, session: &Session, matches: &[BeautyMatch]) -> AppResult<()> {
        if matches.is_empty() {
            return Ok(());
        }

        let mut history = self.load_history()?;
        history
            .records
            .extend(matches.iter().map(|m| m.to_record(&session.user_id)));
        self.save_history(&history)?;

        info!(user_id = %session.user_id, count = matches.len(), "saved matches locally");
        Ok(())
    }

    async fn save_analysis(&self, session: &Session, snapshot: &AnalysisSnapshot) -> AppResult<()> {
        let mut history = self.load_history()?;
        let mut snapshot = snapshot.clone();
        snapshot.user_id = session.user_id.clone();
        history.analyses.push(snapshot);
        self.save_history(&history)
    }

    async fn list_matches(&self, session: &Session) -> AppResult<Vec<MatchRecord>> {
        let history = self.load_history()?;
        Ok(history
            .records
            .into_iter()
            .filter(|r| r.user_id == session.user_id)
            .collect())
    }
}

#[async_trait]
impl AuthProvider for LocalStore {
    async fn sign_in(&self, email: &str, _password: Option<&str>) -> AppResult<Session> {
        validate_email(email)?;

        let accounts = self.load_accounts()?;
        let profile = accounts
            .profiles
            .iter()
            .find(|p| p.email.eq_ignore_ascii_case(email.trim()))
            .ok_or_else(|| {
                AppError::Auth(format!(
                    "No local profile for {}. Run `beautyai signup` first",
                    email
                ))
            })?;

        Ok(Session::new(profile.user_id.clone(), profile.email.clone(), None))
    }

    async fn sign_up(&self, email: &str, _password: Option<&str>) -> AppResult<Option<Session>> {
        validate_email(email)?;
        let email = email.trim().to_string();

        let mut accounts = self.load_accounts()?;
        if accounts
            .profiles
            .iter()
            .any(|p| p.email.eq_ignore_ascii_case(&email))
        {
            return Err(AppError::Auth(format!("A profile for {} already exists", email)));
        }

        let profile = Profile {
            user_id: Uuid::new_v4().to_string(),
            email: email.clone(),
            created_at: Utc::now(),
        };
        accounts.profiles.push(profile.clone());

        std::fs::create_dir_all(&self.data_dir)?;
        write_toml(&self.accounts_path(), &accounts)?;

        Ok(Some(Session::new(profile.user_id, email, None)))
    }
}

impl Store for LocalStore {
    fn describe(&self) -> String {
        format!("local store at {}", self.data_dir.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::matching::rank;

    fn store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(&dir.path().join("data"));
        (dir, store)
    }

    #[tokio::test]
    async fn test_catalog_is_seeded_on_first_use() {
        let (_dir, store) = store();
        let standards = store.list_standards().await.unwrap();
        assert_eq!(standards.len(), 5);
        assert!(store.catalog_path().exists());

        let found = store.find_standard("glass").await.unwrap().unwrap();
        assert_eq!(found.id, "korean-glass-skin");
    }

    #[tokio::test]
    async fn test_empty_catalog_file_reads_as_empty() {
        let (_dir, store) = store();
        std::fs::create_dir_all(&store.data_dir).unwrap();
        std::fs::write(store.catalog_path(), "  \n").unwrap();

        assert!(store.list_standards().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_products_by_standard_and_lookup() {
        let (_dir, store) = store();
        let grouped = store.products_by_standard().await.unwrap();
        assert_eq!(grouped.len(), 5);
        assert_eq!(grouped["korean-glass-skin"].len(), 3);

        let only_korean = store.list_products(Some("korean-glass-skin")).await.unwrap();
        assert!(only_korean.iter().all(|p| p.standard_id == "korean-glass-skin"));

        assert!(store.find_product("kgs-tint").await.unwrap().is_some());
        assert!(store.find_product("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_history_is_scoped_to_user() {
        let (_dir, store) = store();
        let standards = store.list_standards().await.unwrap();
        let matches = rank(&standards, &["High cheekbones".to_string()]);

        let ada = Session::new("ada".to_string(), "ada@example.com".to_string(), None);
        let bob = Session::new("bob".to_string(), "bob@example.com".to_string(), None);

        store.save_matches(&ada, &matches).await.unwrap();
        store.save_matches(&bob, &matches[..1]).await.unwrap();
        store.save_matches(&bob, &[]).await.unwrap();

        let ada_records = store.list_matches(&ada).await.unwrap();
        assert_eq!(ada_records.len(), 5);
        assert_eq!(ada_records[0].standard_id, matches[0].standard.id);
        assert_eq!(ada_records[0].match_percentage, matches[0].percentage);
        assert_eq!(store.list_matches(&bob).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_analysis_snapshot_is_persisted() {
        let (_dir, store) = store();
        let session = Session::new("ada".to_string(), "ada@example.com".to_string(), None);
        let snapshot = AnalysisSnapshot {
            user_id: String::new(),
            face_shape: "Oval".to_string(),
            skin_tone: "Warm".to_string(),
            recommended_style: "Modern Minimalist".to_string(),
            color_palette: "Spring Warm".to_string(),
            facial_features: vec!["Full lips".to_string()],
            beauty_matches: vec![],
        };

        store.save_analysis(&session, &snapshot).await.unwrap();
        let history = store.load_history().unwrap();
        assert_eq!(history.analyses.len(), 1);
        assert_eq!(history.analyses[0].user_id, "ada");
    }

    #[tokio::test]
    async fn test_offline_signup_then_signin() {
        let (_dir, store) = store();

        let created = store.sign_up("ada@example.com", None).await.unwrap().unwrap();
        assert!(created.is_offline());

        let signed_in = store.sign_in("ADA@example.com", Some("ignored")).await.unwrap();
        assert_eq!(signed_in.user_id, created.user_id);

        let duplicate = store.sign_up("ada@example.com", None).await.unwrap_err();
        assert!(matches!(duplicate, AppError::Auth(_)));
    }

    #[tokio::test]
    async fn test_signin_unknown_profile_fails() {
        let (_dir, store) = store();
        let err = store.sign_in("ghost@example.com", None).await.unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));

        let err = store.sign_in("not-an-email", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
