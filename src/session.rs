//! Signed-in identity
//!
//! A [`Session`] is loaded once by the command layer and passed explicitly to
//! whatever needs the user's identity. Nothing holds it globally.

use crate::utils::error::{AppError, AppResult};
use crate::utils::format;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const SESSION_FILE: &str = "session.toml";
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    /// Bearer token from the hosted auth service; offline profiles have none
    #[serde(
        default,
        serialize_with = "crate::utils::format::serialize_option_string",
        deserialize_with = "crate::utils::format::deserialize_option_string"
    )]
    pub access_token: Option<String>,
    #[serde(with = "format")]
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: String, email: String, access_token: Option<String>) -> Self {
        Self {
            user_id,
            email,
            access_token,
            created_at: Utc::now(),
        }
    }

    pub fn is_offline(&self) -> bool {
        self.access_token.is_none()
    }
}

/// Reads and writes the current session file
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    pub fn load(&self) -> AppResult<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let session: Session = toml::from_str(&content)
            .map_err(|e| AppError::System(format!("Failed to parse session file: {}", e)))?;
        debug!(user_id = %session.user_id, "loaded session");
        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(session)
            .map_err(|e| AppError::System(format!("Failed to serialize session: {}", e)))?;
        std::fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "saved session");
        Ok(())
    }

    /// Remove the session file; returns whether one existed
    pub fn clear(&self) -> AppResult<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)?;
        Ok(true)
    }
}

pub fn validate_email(email: &str) -> AppResult<()> {
    let re = Regex::new(EMAIL_PATTERN)
        .map_err(|e| AppError::System(format!("Invalid email pattern: {}", e)))?;
    if re.is_match(email.trim()) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "'{}' is not a valid email address",
            email
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        assert!(store.load().unwrap().is_none());

        let session = Session::new(
            "user-1".to_string(),
            "ada@example.com".to_string(),
            Some("token".to_string()),
        );
        store.save(&session).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.user_id, "user-1");
        assert_eq!(loaded.access_token.as_deref(), Some("token"));
        assert!(!loaded.is_offline());
    }

    #[test]
    fn test_offline_session_has_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        store
            .save(&Session::new("u".to_string(), "u@example.com".to_string(), None))
            .unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert!(loaded.is_offline());
    }

    #[test]
    fn test_clear_reports_existence() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        assert!(!store.clear().unwrap());

        store
            .save(&Session::new("u".to_string(), "u@example.com".to_string(), None))
            .unwrap();
        assert!(store.clear().unwrap());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email(" ada@example.com ").is_ok());
        assert!(validate_email("ada.example.com").is_err());
        assert!(validate_email("ada@localhost").is_err());
        assert!(validate_email("a b@example.com").is_err());
    }
}
