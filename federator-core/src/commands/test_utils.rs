//! In-memory directory used by the service tests.

use crate::google::{DirectoryClient, DirectoryError, DirectoryResult};
use crate::types::{PatchPayload, SchemaDescriptor, UserRecord};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Applies patches with the Directory API's replace-the-schema semantics and records them.
#[derive(Default)]
pub(crate) struct InMemoryDirectory {
    users: Mutex<HashMap<String, UserRecord>>,
    schemas: Mutex<HashMap<String, Vec<SchemaDescriptor>>>,
    patches: Mutex<Vec<(String, PatchPayload)>>,
    get_calls: AtomicUsize,
    patch_failure: Option<StatusCode>,
    insert_failure: Option<StatusCode>,
    delete_failure: Option<StatusCode>,
}

fn rejected(status: StatusCode) -> DirectoryError {
    DirectoryError::Status {
        status,
        message: format!("simulated {status}"),
    }
}

impl InMemoryDirectory {
    pub(crate) fn with_user(user_key: &str, record: UserRecord) -> Self {
        let directory = Self::default();
        directory
            .users
            .lock()
            .unwrap()
            .insert(user_key.to_string(), record);
        directory
    }

    pub(crate) fn failing_patch(mut self, status: StatusCode) -> Self {
        self.patch_failure = Some(status);
        self
    }

    pub(crate) fn failing_insert(mut self, status: StatusCode) -> Self {
        self.insert_failure = Some(status);
        self
    }

    pub(crate) fn failing_delete(mut self, status: StatusCode) -> Self {
        self.delete_failure = Some(status);
        self
    }

    pub(crate) fn patches(&self) -> Vec<(String, PatchPayload)> {
        self.patches.lock().unwrap().clone()
    }

    pub(crate) fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DirectoryClient for InMemoryDirectory {
    async fn get_user(&self, user_key: &str) -> DirectoryResult<UserRecord> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.users
            .lock()
            .unwrap()
            .get(user_key)
            .cloned()
            .ok_or_else(|| rejected(StatusCode::NOT_FOUND))
    }

    async fn patch_user(
        &self,
        user_key: &str,
        patch: &PatchPayload,
    ) -> DirectoryResult<UserRecord> {
        if let Some(status) = self.patch_failure {
            return Err(rejected(status));
        }

        self.patches
            .lock()
            .unwrap()
            .push((user_key.to_string(), patch.clone()));

        let mut users = self.users.lock().unwrap();
        let record = users
            .get_mut(user_key)
            .ok_or_else(|| rejected(StatusCode::NOT_FOUND))?;
        let schemas = record.custom_schemas.get_or_insert_with(Default::default);
        schemas.sso = patch.custom_schemas.sso.clone();
        Ok(record.clone())
    }

    async fn list_schemas(&self, customer_id: &str) -> DirectoryResult<Vec<SchemaDescriptor>> {
        Ok(self
            .schemas
            .lock()
            .unwrap()
            .get(customer_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_schema(
        &self,
        customer_id: &str,
        schema_key: &str,
    ) -> DirectoryResult<SchemaDescriptor> {
        self.list_schemas(customer_id)
            .await?
            .into_iter()
            .find(|schema| schema.schema_name == schema_key)
            .ok_or_else(|| rejected(StatusCode::NOT_FOUND))
    }

    async fn insert_schema(
        &self,
        customer_id: &str,
        schema: &SchemaDescriptor,
    ) -> DirectoryResult<SchemaDescriptor> {
        if let Some(status) = self.insert_failure {
            return Err(rejected(status));
        }

        let mut created = schema.clone();
        created.schema_id = Some(format!("schema-{}", schema.schema_name));
        self.schemas
            .lock()
            .unwrap()
            .entry(customer_id.to_string())
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn delete_schema(&self, customer_id: &str, schema_key: &str) -> DirectoryResult<()> {
        if let Some(status) = self.delete_failure {
            return Err(rejected(status));
        }

        if let Some(schemas) = self.schemas.lock().unwrap().get_mut(customer_id) {
            schemas.retain(|schema| schema.schema_name != schema_key);
        }
        Ok(())
    }
}
