//! User-facing result messages

use federator_core::{AddOutcome, RoleSet, SchemaCreateOutcome, SchemaDeleteOutcome};

pub fn add_message(user_key: &str, outcome: &AddOutcome) -> String {
    match outcome {
        AddOutcome::Added { custom_type } => {
            format!("Updated user {user_key}: added role {custom_type}")
        }
        AddOutcome::AlreadyPresent { custom_type } => {
            format!("User {user_key} already has access to {custom_type}; nothing to do")
        }
    }
}

pub fn remove_message(user_key: &str, removed: &str) -> String {
    format!("Removed role {removed} from user {user_key}")
}

pub fn create_message(outcome: SchemaCreateOutcome) -> &'static str {
    match outcome {
        SchemaCreateOutcome::Created => "Created custom SSO schema",
        SchemaCreateOutcome::AlreadyExists => "Custom SSO schema already exists",
    }
}

pub fn delete_message(outcome: SchemaDeleteOutcome) -> &'static str {
    match outcome {
        SchemaDeleteOutcome::Deleted => "Deleted custom SSO schema",
        SchemaDeleteOutcome::Absent => "Custom SSO schema does not exist; nothing to delete",
    }
}

/// One `customType<TAB>value` line per mapping
pub fn roles_table(roles: &RoleSet) -> String {
    if roles.is_empty() {
        return "No SSO roles assigned".to_string();
    }

    roles
        .iter()
        .map(|entry| format!("{}\t{}", entry.custom_type, entry.value))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use federator_core::RoleEntry;

    #[test]
    fn test_add_messages_differ() {
        let added = add_message(
            "a@example.com",
            &AddOutcome::Added {
                custom_type: "1-R".into(),
            },
        );
        let noop = add_message(
            "a@example.com",
            &AddOutcome::AlreadyPresent {
                custom_type: "1-R".into(),
            },
        );
        assert!(added.starts_with("Updated user a@example.com"));
        assert!(noop.contains("already has access"));
    }

    #[test]
    fn test_roles_table() {
        assert_eq!(roles_table(&RoleSet::new()), "No SSO roles assigned");

        let roles: RoleSet = vec![RoleEntry::new("r,p", "t")]
        .into_iter()
        .collect();
        assert_eq!(roles_table(&roles), "t\tr,p");
    }
}
