//! Builders for the bodies sent to `users.patch` and `schemas.insert`

use crate::roles::RoleSet;
use crate::types::{
    CustomSchemas, PatchPayload, SchemaDescriptor, SchemaField, SsoAttributes, ROLE_FIELD_NAME,
    SSO_SCHEMA_NAME,
};
use serde_json::Map;

/// Build the patch that sets the user's SSO roles to exactly `roles`.
///
/// `users.patch` replaces the whole schema value, so the payload carries every entry of the
/// set, including the ones this command did not touch. An empty set yields an empty list,
/// which clears the field.
pub fn build_full_replacement(roles: &RoleSet) -> PatchPayload {
    PatchPayload {
        custom_schemas: CustomSchemas {
            sso: Some(SsoAttributes {
                role: roles.to_list(),
            }),
            other: Map::new(),
        },
    }
}

/// The SSO custom schema: one multi-valued string field readable by admins and the user.
pub fn sso_schema_definition() -> SchemaDescriptor {
    SchemaDescriptor {
        schema_name: SSO_SCHEMA_NAME.to_string(),
        schema_id: None,
        fields: vec![SchemaField {
            field_name: ROLE_FIELD_NAME.to_string(),
            field_type: "STRING".to_string(),
            read_access_type: Some("ADMINS_AND_SELF".to_string()),
            multi_valued: Some(true),
            other: Map::new(),
        }],
        other: Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoleEntry;
    use proptest::prelude::*;
    use serde_json::json;

    fn roles(n: usize) -> RoleSet {
        (0..n)
            .map(|i| {
                RoleEntry::new(
                    format!("arn:aws:iam::{i:012}:role/R{i},arn:aws:iam::{i:012}:saml-provider/P"),
                    format!("{i:012}-R{i}"),
                )
            })
            .collect()
    }

    #[test]
    fn test_full_replacement_emits_every_entry() {
        let set = roles(5);
        let payload = build_full_replacement(&set);
        let emitted = &payload.custom_schemas.sso.as_ref().unwrap().role;
        assert_eq!(emitted.len(), 5);
        assert_eq!(emitted, &set.to_list());
    }

    #[test]
    fn test_full_replacement_of_empty_set_clears_roles() {
        let payload = build_full_replacement(&RoleSet::new());
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"customSchemas": {"SSO": {"role": []}}})
        );
    }

    #[test]
    fn test_sso_schema_definition_wire_shape() {
        assert_eq!(
            serde_json::to_value(sso_schema_definition()).unwrap(),
            json!({
                "fields": [{
                    "fieldName": "role",
                    "fieldType": "STRING",
                    "readAccessType": "ADMINS_AND_SELF",
                    "multiValued": true
                }],
                "schemaName": "SSO"
            })
        );
    }

    proptest! {
        #[test]
        fn prop_full_replacement_round_trips(
            pairs in proptest::collection::vec(("[a-z0-9,:/]{1,24}", "[A-Za-z0-9-]{1,16}"), 0..8)
        ) {
            let set: RoleSet = pairs
                .into_iter()
                .map(|(value, custom_type)| RoleEntry::new(value, custom_type))
                .collect();

            let payload = build_full_replacement(&set);
            let wire = serde_json::to_string(&payload).unwrap();
            let decoded: PatchPayload = serde_json::from_str(&wire).unwrap();

            prop_assert_eq!(RoleSet::from_record(Some(&decoded.custom_schemas)), set);
        }
    }
}
