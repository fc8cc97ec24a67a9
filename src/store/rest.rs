use crate::config::{ANON_KEY_ENV, BackendConfig};
use crate::core::data::{
    AnalysisSnapshot, BeautyMatch, BeautyProduct, BeautyStandard, MatchRecord, group_products,
};
use crate::core::traits::{AuthProvider, MatchStore, ProductCatalog, StandardCatalog, Store};
use crate::session::{Session, validate_email};
use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

const STANDARDS_TABLE: &str = "beauty_standards";
const PRODUCTS_TABLE: &str = "beauty_products";
const MATCHES_TABLE: &str = "user_beauty_matches";
const ANALYSIS_TABLE: &str = "user_analysis";

#[derive(Debug, Serialize)]
struct MatchRow<'a> {
    user_id: &'a str,
    standard_id: &'a str,
    match_percentage: u8,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

/// Sign-up answers either with a full token response or just the new user
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Token(TokenResponse),
    User(AuthUser),
}

#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    #[serde(alias = "error_description", alias = "msg", alias = "message")]
    message: Option<String>,
}

/// Client for a PostgREST-style hosted database with password auth
pub struct RestClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl RestClient {
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        Self::with_env_key(config, std::env::var(ANON_KEY_ENV).ok())
    }

    fn with_env_key(config: &BackendConfig, env_key: Option<String>) -> AppResult<Self> {
        let anon_key = config.resolve_anon_key_with(env_key).ok_or_else(|| {
            AppError::System(format!(
                "Anon key not found. Set it in config or use the {} environment variable",
                ANON_KEY_ENV
            ))
        })?;

        Ok(Self {
            client: Client::builder()
                .user_agent(concat!("beautyai/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|e| AppError::Network(format!("Failed to create HTTP client: {}", e)))?,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    /// Attach the api key and a bearer token, preferring the session's own token
    fn authorize(&self, request: RequestBuilder, session: Option<&Session>) -> RequestBuilder {
        let token = session
            .and_then(|s| s.access_token.as_deref())
            .unwrap_or(&self.anon_key);
        request.header("apikey", &self.anon_key).bearer_auth(token)
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> AppResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Failed to {}: {}", what, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Network(format!(
                "Failed to {}: {} - {}",
                what, status, error_text
            )));
        }

        Ok(response)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
        session: Option<&Session>,
    ) -> AppResult<Vec<T>> {
        let mut query: Vec<(&str, String)> = vec![("select", "*".to_string())];
        query.extend(filters.iter().cloned());

        debug!(table, filters = filters.len(), "selecting rows");
        let request = self
            .authorize(self.client.get(self.table_url(table)), session)
            .query(&query);
        let response = self.send(request, &format!("read {}", table)).await?;

        response
            .json()
            .await
            .map_err(|e| AppError::Network(format!("Failed to parse {} response: {}", table, e)))
    }

    async fn insert<T: Serialize + ?Sized>(
        &self,
        table: &str,
        rows: &T,
        session: &Session,
    ) -> AppResult<()> {
        debug!(table, "inserting rows");
        let request = self
            .authorize(self.client.post(self.table_url(table)), Some(session))
            .header("Prefer", "return=minimal")
            .json(rows);
        self.send(request, &format!("write {}", table)).await?;
        Ok(())
    }

    async fn auth_request<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, &str)],
        credentials: &Credentials<'_>,
    ) -> AppResult<T> {
        let response = self
            .authorize(self.client.post(url), None)
            .query(query)
            .json(credentials)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Failed to reach auth service: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AuthErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("{} - {}", status, body));
            return Err(AppError::Auth(message));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Network(format!("Failed to parse auth response: {}", e)))
    }
}

fn require_password(password: Option<&str>) -> AppResult<&str> {
    password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::Validation("A password is required for the hosted backend".to_string()))
}

#[async_trait]
impl StandardCatalog for RestClient {
    async fn list_standards(&self) -> AppResult<Vec<BeautyStandard>> {
        self.select(STANDARDS_TABLE, &[], None).await
    }
}

#[async_trait]
impl ProductCatalog for RestClient {
    async fn list_products(&self, standard_id: Option<&str>) -> AppResult<Vec<BeautyProduct>> {
        let filters: Vec<(&str, String)> = standard_id
            .map(|id| vec![("standard_id", format!("eq.{}", id))])
            .unwrap_or_default();
        self.select(PRODUCTS_TABLE, &filters, None).await
    }

    async fn products_by_standard(&self) -> AppResult<BTreeMap<String, Vec<BeautyProduct>>> {
        let (standards, products) = tokio::try_join!(self.list_standards(), self.list_products(None))?;
        Ok(group_products(&standards, &products))
    }

    async fn find_product(&self, id: &str) -> AppResult<Option<BeautyProduct>> {
        let rows: Vec<BeautyProduct> = self
            .select(PRODUCTS_TABLE, &[("id", format!("eq.{}", id))], None)
            .await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl MatchStore for RestClient {
    async fn save_matches(&self, session: &Session, matches: &[BeautyMatch]) -> AppResult<()> {
        if matches.is_empty() {
            return Ok(());
        }

        let rows: Vec<MatchRow<'_>> = matches
            .iter()
            .map(|m| MatchRow {
                user_id: &session.user_id,
                standard_id: &m.standard.id,
                match_percentage: m.percentage,
            })
            .collect();
        self.insert(MATCHES_TABLE, &rows, session).await?;

        info!(user_id = %session.user_id, count = rows.len(), "saved matches to hosted store");
        Ok(())
    }

    async fn save_analysis(&self, session: &Session, snapshot: &AnalysisSnapshot) -> AppResult<()> {
        let mut snapshot = snapshot.clone();
        snapshot.user_id = session.user_id.clone();
        self.insert(ANALYSIS_TABLE, &[snapshot], session).await
    }

    async fn list_matches(&self, session: &Session) -> AppResult<Vec<MatchRecord>> {
        self.select(
            MATCHES_TABLE,
            &[("user_id", format!("eq.{}", session.user_id))],
            Some(session),
        )
        .await
    }
}

#[async_trait]
impl AuthProvider for RestClient {
    async fn sign_in(&self, email: &str, password: Option<&str>) -> AppResult<Session> {
        validate_email(email)?;
        let credentials = Credentials {
            email: email.trim(),
            password: require_password(password)?,
        };

        let token: TokenResponse = self
            .auth_request(self.auth_url("token"), &[("grant_type", "password")], &credentials)
            .await?;

        Ok(Session::new(
            token.user.id,
            token.user.email.unwrap_or_else(|| credentials.email.to_string()),
            Some(token.access_token),
        ))
    }

    async fn sign_up(&self, email: &str, password: Option<&str>) -> AppResult<Option<Session>> {
        validate_email(email)?;
        let credentials = Credentials {
            email: email.trim(),
            password: require_password(password)?,
        };

        let response: SignUpResponse = self
            .auth_request(self.auth_url("signup"), &[], &credentials)
            .await?;

        Ok(match response {
            SignUpResponse::Token(token) => Some(Session::new(
                token.user.id,
                token.user.email.unwrap_or_else(|| credentials.email.to_string()),
                Some(token.access_token),
            )),
            // Email confirmation pending
            SignUpResponse::User(_) => None,
        })
    }
}

impl Store for RestClient {
    fn describe(&self) -> String {
        format!("hosted store at {}", self.base_url)
    }
}
