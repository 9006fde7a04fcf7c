//! This crate provides the core business logic for Federator:
//! - AWS role and SAML provider ARN validation
//! - Reconciliation of a user's SSO role mappings (add/remove without clobbering)
//! - Full-replacement patch synthesis for the Directory API
//! - SSO custom schema lifecycle against a Google Workspace directory
//!

pub mod commands;
mod error;
pub mod google;
mod parsing;
mod roles;
mod synthesis;
mod types;

// Re-exports for a small, focused public API
pub use commands::{AddOutcome, FederatorService, SchemaCreateOutcome, SchemaDeleteOutcome};
pub use error::{FederatorError, FederatorResult};
pub use google::http_client::{
    DirectoryConfig, HttpDirectoryClient, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT,
};
pub use google::{DirectoryClient, DirectoryError, DirectoryResult};
pub use parsing::{
    derive_type_name, ensure_provider_arn, parse_role_arn, validate_provider_arn, RoleArn,
    PROVIDER_ARN_SHAPE, ROLE_ARN_SHAPE,
};
pub use roles::{mapping_value, AddResult, RemovalCriteria, RemoveResult, RoleSet};
pub use synthesis::{build_full_replacement, sso_schema_definition};
pub use types::{
    CustomSchemas, PatchPayload, RoleEntry, SchemaDescriptor, SchemaField, SchemaList,
    SsoAttributes, UserRecord, ROLE_FIELD_NAME, SSO_SCHEMA_NAME,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_sample_mapping() {
        let entry = RoleEntry::from_arns(
            "arn:aws:iam::123456789012:role/Admin",
            "arn:aws:iam::123456789012:saml-provider/GoogleApps",
        )
        .expect("should validate");
        assert_eq!(entry.custom_type, "123456789012-Admin");

        let mut roles = RoleSet::new();
        assert_eq!(roles.add(entry), AddResult::Added);

        let payload = build_full_replacement(&roles);
        assert_eq!(payload.custom_schemas.sso.map(|s| s.role.len()), Some(1));
    }
}
