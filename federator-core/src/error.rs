//! Error types for Federator operations

use crate::google::DirectoryError;
use thiserror::Error;

/// Errors surfaced by role and schema commands.
///
/// An add that finds the mapping already present is not an error; see
/// [`AddOutcome::AlreadyPresent`](crate::AddOutcome::AlreadyPresent).
#[derive(Debug, Error)]
pub enum FederatorError {
    /// Malformed ARN input
    #[error("Invalid ARN '{arn}'; must be '{expected}'")]
    InvalidFormat { arn: String, expected: &'static str },

    /// Remove was called with neither a custom type nor a complete ARN pair
    #[error("You must specify either the custom type, or both the role and provider ARNs")]
    MissingCriteria,

    /// Remove was called with a custom type and ARNs at the same time
    #[error("Specify either the custom type or the role and provider ARNs, not both")]
    ConflictingCriteria,

    #[error("User {user_key} has no role matching '{criteria}'")]
    RoleNotFound { user_key: String, criteria: String },

    #[error("Custom SSO schema does not exist for customer {0}")]
    SchemaAbsent(String),

    #[error("Could not delete custom SSO schema for customer {0} -- is it in use?")]
    SchemaInUse(String),

    /// Any failure talking to the Directory API
    #[error("Directory API call failed: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Failed to render JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FederatorError {
    pub(crate) fn invalid_format(arn: &str, expected: &'static str) -> Self {
        Self::InvalidFormat {
            arn: arn.to_string(),
            expected,
        }
    }
}

pub type FederatorResult<T> = Result<T, FederatorError>;
