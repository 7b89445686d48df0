use crate::auth::Credentials;
use crate::backend::traits::{AuthProvider, ObjectStorage, RecordStore};
use crate::backend::types::{PropertyQuery, PROPERTIES_TABLE, ROLES_TABLE, VIEWS_TABLE};
use crate::config::BackendConfig;
use crate::error::{Error, Result};
use crate::models::{Property, PropertyRecord, Session, ViewEvent};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Hosted backend reached over its REST, storage and auth endpoints
#[derive(Clone)]
pub struct RestBackend {
    client: Client,
    base_url: String,
    api_key: String,
    bucket: String,
    access_token: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

#[derive(Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl RestBackend {
    /// Build a client for the configured backend
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("property-promoter/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            bucket: config.bucket.clone(),
            access_token: None,
        })
    }

    /// Same backend, acting on behalf of a signed-in user
    pub fn with_session(&self, session: &Session) -> Self {
        Self {
            access_token: Some(session.access_token.clone()),
            ..self.clone()
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let token = self.access_token.as_deref().unwrap_or(&self.api_key);
        self.request_as(method, path, token)
    }

    fn request_as(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header("apikey", &self.api_key)
            .bearer_auth(token)
    }

    fn table(&self, method: Method, table: &str) -> RequestBuilder {
        self.request(method, &format!("/rest/v1/{}", table))
    }

    async fn is_admin(&self, user_id: &str, access_token: &str) -> Result<bool> {
        let response = self
            .request_as(
                Method::GET,
                &format!("/rest/v1/{}", ROLES_TABLE),
                access_token,
            )
            .query(&[
                ("select", "role".to_string()),
                ("user_id", format!("eq.{}", user_id)),
                ("role", "eq.admin".to_string()),
            ])
            .send()
            .await?;
        let rows: Vec<serde_json::Value> = check(response).await?.json().await?;
        Ok(!rows.is_empty())
    }
}

/// Turn a non-success response into a store error carrying the body
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    warn!("Backend returned status: {}", status);
    Err(Error::Store {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl RecordStore for RestBackend {
    async fn select_properties(&self, query: &PropertyQuery) -> Result<Vec<Property>> {
        debug!("Selecting properties: {:?}", query);

        let response = self
            .table(Method::GET, PROPERTIES_TABLE)
            .query(&query.to_query_pairs())
            .send()
            .await?;
        let properties: Vec<Property> = check(response).await?.json().await?;

        debug!("Received {} properties", properties.len());
        Ok(properties)
    }

    async fn insert_property(&self, record: &PropertyRecord) -> Result<()> {
        let response = self
            .table(Method::POST, PROPERTIES_TABLE)
            .header("Prefer", "return=minimal")
            .json(&[record])
            .send()
            .await?;
        check(response).await?;
        info!("Created property '{}'", record.title);
        Ok(())
    }

    async fn update_property(&self, id: &str, record: &PropertyRecord) -> Result<()> {
        let response = self
            .table(Method::PATCH, PROPERTIES_TABLE)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;
        check(response).await?;
        info!("Updated property {}", id);
        Ok(())
    }

    async fn delete_property(&self, id: &str) -> Result<()> {
        let response = self
            .table(Method::DELETE, PROPERTIES_TABLE)
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await?;
        check(response).await?;
        info!("Deleted property {}", id);
        Ok(())
    }

    async fn insert_view(&self, event: &ViewEvent) -> Result<()> {
        let response = self
            .table(Method::POST, VIEWS_TABLE)
            .header("Prefer", "return=minimal")
            .json(event)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn select_views(&self) -> Result<Vec<ViewEvent>> {
        let response = self
            .table(Method::GET, VIEWS_TABLE)
            .query(&[("select", "property_id")])
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }
}

#[async_trait]
impl ObjectStorage for RestBackend {
    async fn upload(&self, path: &str, content_type: &str, bytes: Vec<u8>) -> Result<()> {
        debug!("Uploading {} bytes to {}", bytes.len(), path);

        let response = self
            .request(
                Method::POST,
                &format!("/storage/v1/object/{}/{}", self.bucket, path),
            )
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }
}

#[async_trait]
impl AuthProvider for RestBackend {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        let response = self
            .request(Method::POST, "/auth/v1/token")
            .query(&[("grant_type", "password")])
            .json(&json!({
                "email": credentials.email,
                "password": credentials.password,
            }))
            .send()
            .await?;
        let token: TokenResponse = check(response).await?.json().await?;

        let is_admin = self.is_admin(&token.user.id, &token.access_token).await?;
        info!("Signed in {} (admin: {})", credentials.email, is_admin);

        Ok(Session {
            user_id: token.user.id,
            email: token.user.email.unwrap_or_else(|| credentials.email.clone()),
            access_token: token.access_token,
            is_admin,
        })
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<()> {
        let response = self
            .request(Method::POST, "/auth/v1/signup")
            .json(&json!({
                "email": credentials.email,
                "password": credentials.password,
            }))
            .send()
            .await?;
        check(response).await?;
        info!("Registered {}", credentials.email);
        Ok(())
    }

    async fn sign_out(&self, session: &Session) -> Result<()> {
        let response = self
            .request_as(Method::POST, "/auth/v1/logout", &session.access_token)
            .send()
            .await?;
        check(response).await?;
        info!("Signed out {}", session.email);
        Ok(())
    }

    async fn current_session(&self, access_token: &str) -> Result<Option<Session>> {
        let response = self
            .request_as(Method::GET, "/auth/v1/user", access_token)
            .send()
            .await?;
        if matches!(response.status(), StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            debug!("Access token rejected");
            return Ok(None);
        }
        let user: AuthUser = check(response).await?.json().await?;

        let is_admin = self.is_admin(&user.id, access_token).await?;
        Ok(Some(Session {
            user_id: user.id,
            email: user.email.unwrap_or_default(),
            access_token: access_token.to_string(),
            is_admin,
        }))
    }
}
