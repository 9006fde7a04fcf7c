//! `reqwest` client for the Admin SDK Directory API

use super::{DirectoryClient, DirectoryError, DirectoryResult};
use crate::types::{PatchPayload, SchemaDescriptor, SchemaList, UserRecord};
use async_trait::async_trait;
use log::{debug, trace};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://admin.googleapis.com/admin/directory/v1";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// Characters that would otherwise change the meaning of a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Connection settings for [`HttpDirectoryClient`]
#[derive(Clone)]
pub struct DirectoryConfig {
    pub base_url: String,
    /// OAuth2 bearer token carrying the `admin.directory.user` and
    /// `admin.directory.userschema` scopes
    pub access_token: String,
    pub timeout: Duration,
}

impl DirectoryConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            access_token: access_token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for DirectoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Google's JSON error envelope: `{"error": {"code": 412, "message": "..."}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct HttpDirectoryClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl HttpDirectoryClient {
    pub fn new(config: DirectoryConfig) -> DirectoryResult<Self> {
        if config.access_token.trim().is_empty() {
            return Err(DirectoryError::Config(
                "access token must not be empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DirectoryError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token,
        })
    }

    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.extend(utf8_percent_encode(segment, PATH_SEGMENT));
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.url(segments);
        debug!("{method} {url}");
        self.http
            .request(method, url)
            .bearer_auth(&self.access_token)
    }

    async fn execute(&self, request: RequestBuilder) -> DirectoryResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        trace!("Error body: {body}");
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|envelope| envelope.error.message)
            .unwrap_or(body);

        Err(DirectoryError::Status { status, message })
    }

    async fn execute_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> DirectoryResult<T> {
        let body = self.execute(request).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> DirectoryResult<T> {
        self.execute_json(self.request(method, segments).json(body))
            .await
    }
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    async fn get_user(&self, user_key: &str) -> DirectoryResult<UserRecord> {
        let request = self
            .request(Method::GET, &["users", user_key])
            .query(&[("projection", "full")]);
        self.execute_json(request).await
    }

    async fn patch_user(
        &self,
        user_key: &str,
        patch: &PatchPayload,
    ) -> DirectoryResult<UserRecord> {
        self.send_json(Method::PATCH, &["users", user_key], patch)
            .await
    }

    async fn list_schemas(&self, customer_id: &str) -> DirectoryResult<Vec<SchemaDescriptor>> {
        let list: SchemaList = self
            .execute_json(self.request(Method::GET, &["customer", customer_id, "schemas"]))
            .await?;
        Ok(list.schemas)
    }

    async fn get_schema(
        &self,
        customer_id: &str,
        schema_key: &str,
    ) -> DirectoryResult<SchemaDescriptor> {
        self.execute_json(self.request(
            Method::GET,
            &["customer", customer_id, "schemas", schema_key],
        ))
        .await
    }

    async fn insert_schema(
        &self,
        customer_id: &str,
        schema: &SchemaDescriptor,
    ) -> DirectoryResult<SchemaDescriptor> {
        self.send_json(Method::POST, &["customer", customer_id, "schemas"], schema)
            .await
    }

    async fn delete_schema(&self, customer_id: &str, schema_key: &str) -> DirectoryResult<()> {
        self.execute(self.request(
            Method::DELETE,
            &["customer", customer_id, "schemas", schema_key],
        ))
        .await?;
        Ok(())
    }
}
