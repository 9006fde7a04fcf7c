//! Directory API record shapes touched by Federator.
//!
//! Only the `customSchemas.SSO.role` path is modelled explicitly. Every other field of a
//! user or schema record is carried through `other` so it survives a fetch/print cycle.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the custom schema holding the role mappings
pub const SSO_SCHEMA_NAME: &str = "SSO";

/// Field of the SSO schema that carries the role mappings
pub const ROLE_FIELD_NAME: &str = "role";

/// One role mapping stored in the multi-valued `role` field.
///
/// Entries fetched from the directory also carry `"type": "custom"`; that and any other
/// field lands in `other` so untouched mappings go back out unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleEntry {
    /// `<roleArn>,<providerArn>`
    pub value: String,
    /// `<accountId>-<roleName>`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub custom_type: String,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl RoleEntry {
    pub fn new(value: impl Into<String>, custom_type: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            custom_type: custom_type.into(),
            other: Map::new(),
        }
    }
}

/// Values of the SSO custom schema on a single user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SsoAttributes {
    #[serde(default)]
    pub role: Vec<RoleEntry>,
}

/// The `customSchemas` block of a user record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomSchemas {
    #[serde(rename = "SSO", default, skip_serializing_if = "Option::is_none")]
    pub sso: Option<SsoAttributes>,
    /// Custom schemas other than SSO, untouched
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A directory user as returned by `users.get` with the full projection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(
        rename = "customSchemas",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_schemas: Option<CustomSchemas>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Body sent to `users.patch`.
///
/// The Directory API replaces the whole value of every schema present in the body, so the
/// role list carried here is always the complete intended set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchPayload {
    #[serde(rename = "customSchemas")]
    pub custom_schemas: CustomSchemas,
}

/// Field definition inside a custom schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    pub field_name: String,
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_access_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_valued: Option<bool>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A custom user schema as listed by `schemas.list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDescriptor {
    pub schema_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_id: Option<String>,
    #[serde(default)]
    pub fields: Vec<SchemaField>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Response of `schemas.list`; `schemas` is omitted entirely when a customer has none.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaList {
    #[serde(default)]
    pub schemas: Vec<SchemaDescriptor>,
}
