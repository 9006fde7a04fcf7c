//! SSO custom schema lifecycle

use super::render_json;
use crate::error::{FederatorError, FederatorResult};
use crate::google::{DirectoryClient, DirectoryError};
use crate::synthesis::sso_schema_definition;
use crate::types::SSO_SCHEMA_NAME;
use log::{info, warn};
use reqwest::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaCreateOutcome {
    Created,
    AlreadyExists,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaDeleteOutcome {
    Deleted,
    /// There was no SSO schema to delete
    Absent,
}

impl<C: DirectoryClient> super::service::FederatorService<C> {
    /// Whether the customer has a custom schema named `SSO`
    pub async fn schema_exists(&self, customer_id: &str) -> FederatorResult<bool> {
        let schemas = self.directory.list_schemas(customer_id).await?;
        Ok(schemas
            .iter()
            .any(|schema| schema.schema_name == SSO_SCHEMA_NAME))
    }

    /// Create the SSO schema unless it already exists.
    ///
    /// The API answers 412 when the schema name is taken; that is reported as
    /// `AlreadyExists` rather than as a failure.
    pub async fn create_schema(&self, customer_id: &str) -> FederatorResult<SchemaCreateOutcome> {
        if self.schema_exists(customer_id).await? {
            info!("SSO schema already present for customer {customer_id}");
            return Ok(SchemaCreateOutcome::AlreadyExists);
        }

        match self
            .directory
            .insert_schema(customer_id, &sso_schema_definition())
            .await
        {
            Ok(created) => {
                info!(
                    "Created SSO schema {} for customer {customer_id}",
                    created.schema_id.as_deref().unwrap_or("<unknown id>")
                );
                Ok(SchemaCreateOutcome::Created)
            }
            Err(DirectoryError::Status { status, message })
                if status == StatusCode::PRECONDITION_FAILED =>
            {
                warn!("Schema insert rejected as existing: {message}");
                Ok(SchemaCreateOutcome::AlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete the SSO schema if present.
    ///
    /// The API answers 400 while any user still carries values for the schema; that maps
    /// to [`FederatorError::SchemaInUse`].
    pub async fn delete_schema(&self, customer_id: &str) -> FederatorResult<SchemaDeleteOutcome> {
        if !self.schema_exists(customer_id).await? {
            info!("No SSO schema to delete for customer {customer_id}");
            return Ok(SchemaDeleteOutcome::Absent);
        }

        match self
            .directory
            .delete_schema(customer_id, SSO_SCHEMA_NAME)
            .await
        {
            Ok(()) => Ok(SchemaDeleteOutcome::Deleted),
            Err(DirectoryError::Status { status, message })
                if status == StatusCode::BAD_REQUEST =>
            {
                warn!("Schema delete rejected: {message}");
                Err(FederatorError::SchemaInUse(customer_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The SSO schema definition as pretty-printed JSON
    pub async fn show_schema(&self, customer_id: &str) -> FederatorResult<String> {
        if !self.schema_exists(customer_id).await? {
            return Err(FederatorError::SchemaAbsent(customer_id.to_string()));
        }

        let schema = self
            .directory
            .get_schema(customer_id, SSO_SCHEMA_NAME)
            .await?;
        render_json(&schema)
    }
}
