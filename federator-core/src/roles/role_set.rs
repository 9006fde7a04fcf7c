use super::{mapping_value, AddResult, RemovalCriteria, RemoveResult};
use crate::types::{CustomSchemas, RoleEntry};

/// The role mappings of one user, rebuilt from each fetched record.
///
/// Additions never introduce a second entry with an existing `value` or an existing
/// `customType`. Entries read from the directory are kept as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet {
    entries: Vec<RoleEntry>,
}

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialize the set from a user's `customSchemas` block; absent blocks yield an empty set.
    pub fn from_record(custom_schemas: Option<&CustomSchemas>) -> Self {
        let entries = custom_schemas
            .and_then(|schemas| schemas.sso.as_ref())
            .map(|sso| sso.role.clone())
            .unwrap_or_default();

        Self { entries }
    }

    pub fn find_by_value(&self, value: &str) -> Option<&RoleEntry> {
        self.entries.iter().find(|entry| entry.value == value)
    }

    pub fn find_by_type(&self, custom_type: &str) -> Option<&RoleEntry> {
        self.entries
            .iter()
            .find(|entry| entry.custom_type == custom_type)
    }

    /// Append `entry` unless its value or its custom type is already taken.
    ///
    /// Either match alone blocks the insert: the same role cannot be granted twice through
    /// different providers.
    pub fn add(&mut self, entry: RoleEntry) -> AddResult {
        if self.find_by_value(&entry.value).is_some()
            || self.find_by_type(&entry.custom_type).is_some()
        {
            return AddResult::AlreadyPresent;
        }

        self.entries.push(entry);
        AddResult::Added
    }

    /// Remove the first entry whose custom type matches
    pub fn remove_by_type(&mut self, custom_type: &str) -> RemoveResult {
        match self
            .entries
            .iter()
            .position(|entry| entry.custom_type == custom_type)
        {
            Some(index) => RemoveResult::Removed(self.entries.remove(index).custom_type),
            None => RemoveResult::NotFound,
        }
    }

    /// Remove the first entry whose value is `<roleArn>,<providerArn>`
    pub fn remove_by_value(&mut self, role_arn: &str, provider_arn: &str) -> RemoveResult {
        let value = mapping_value(role_arn, provider_arn);
        match self.entries.iter().position(|entry| entry.value == value) {
            Some(index) => RemoveResult::Removed(self.entries.remove(index).value),
            None => RemoveResult::NotFound,
        }
    }

    pub fn remove(&mut self, criteria: &RemovalCriteria) -> RemoveResult {
        match criteria {
            RemovalCriteria::CustomType(custom_type) => self.remove_by_type(custom_type),
            RemovalCriteria::Mapping {
                role_arn,
                provider_arn,
            } => self.remove_by_value(role_arn, provider_arn),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoleEntry> {
        self.entries.iter()
    }

    /// The entries in insertion order. The directory does not guarantee order across fetches.
    pub fn to_list(&self) -> Vec<RoleEntry> {
        self.entries.clone()
    }
}

impl FromIterator<RoleEntry> for RoleSet {
    /// Collect entries as-is, without the duplicate check `add` performs
    fn from_iter<I: IntoIterator<Item = RoleEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
