//! Google Directory API integration: client trait and REST implementation.

pub mod http_client;

use crate::types::{PatchPayload, SchemaDescriptor, UserRecord};
use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Directory client configuration error: {0}")]
    Config(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Directory API returned {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("Failed to decode Directory API response: {0}")]
    Json(#[from] serde_json::Error),
}

impl DirectoryError {
    /// HTTP status of a rejected call, if the API answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Authenticated access to the parts of the Directory API Federator uses.
///
/// One implementation is shared by the role and schema commands. Calls are not retried;
/// a failed call is reported to the caller as is.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// `users.get` with the full projection, so custom schemas are included
    async fn get_user(&self, user_key: &str) -> DirectoryResult<UserRecord>;

    async fn patch_user(
        &self,
        user_key: &str,
        patch: &PatchPayload,
    ) -> DirectoryResult<UserRecord>;

    async fn list_schemas(&self, customer_id: &str) -> DirectoryResult<Vec<SchemaDescriptor>>;

    async fn get_schema(
        &self,
        customer_id: &str,
        schema_key: &str,
    ) -> DirectoryResult<SchemaDescriptor>;

    async fn insert_schema(
        &self,
        customer_id: &str,
        schema: &SchemaDescriptor,
    ) -> DirectoryResult<SchemaDescriptor>;

    async fn delete_schema(&self, customer_id: &str, schema_key: &str) -> DirectoryResult<()>;
}
