//! Role mappings held in a user's SSO custom schema

mod role_set;

pub use role_set::RoleSet;

use crate::error::{FederatorError, FederatorResult};
use crate::parsing::{ensure_provider_arn, parse_role_arn};
use crate::types::RoleEntry;
use std::fmt;

/// Outcome of [`RoleSet::add`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddResult {
    Added,
    /// An entry with the same value or the same custom type already exists
    AlreadyPresent,
}

/// Outcome of a removal; `Removed` carries the identifier that matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveResult {
    Removed(String),
    NotFound,
}

/// Which entry a remove targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalCriteria {
    CustomType(String),
    Mapping {
        role_arn: String,
        provider_arn: String,
    },
}

impl RemovalCriteria {
    /// Build criteria from optional command-line inputs.
    ///
    /// Exactly one of a custom type or a complete role/provider ARN pair must be given.
    /// Empty strings count as absent.
    pub fn from_parts(
        custom_type: Option<String>,
        role_arn: Option<String>,
        provider_arn: Option<String>,
    ) -> FederatorResult<Self> {
        let present = |s: Option<String>| s.filter(|s| !s.is_empty());

        match (
            present(custom_type),
            present(role_arn),
            present(provider_arn),
        ) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                Err(FederatorError::ConflictingCriteria)
            }
            (Some(custom_type), None, None) => Ok(Self::CustomType(custom_type)),
            (None, Some(role_arn), Some(provider_arn)) => Ok(Self::Mapping {
                role_arn,
                provider_arn,
            }),
            _ => Err(FederatorError::MissingCriteria),
        }
    }
}

impl fmt::Display for RemovalCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CustomType(custom_type) => f.write_str(custom_type),
            Self::Mapping {
                role_arn,
                provider_arn,
            } => f.write_str(&mapping_value(role_arn, provider_arn)),
        }
    }
}

/// The stored `value` of a mapping: `<roleArn>,<providerArn>`
pub fn mapping_value(role_arn: &str, provider_arn: &str) -> String {
    format!("{role_arn},{provider_arn}")
}

impl RoleEntry {
    /// Validate both ARNs and build the entry that grants `role_arn` through `provider_arn`.
    pub fn from_arns(role_arn: &str, provider_arn: &str) -> FederatorResult<Self> {
        let role = parse_role_arn(role_arn)?;
        ensure_provider_arn(provider_arn)?;

        Ok(Self::new(mapping_value(role_arn, provider_arn), role.type_name()))
    }
}
