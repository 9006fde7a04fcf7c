//! Role and SAML provider ARN shapes accepted for SSO role mappings

use crate::error::{FederatorError, FederatorResult};
use regex::Regex;
use std::sync::LazyLock;

/// Human-readable shape of an accepted role ARN, used in error messages
pub const ROLE_ARN_SHAPE: &str = "arn:aws:iam::<ACCOUNTID>:role/<SOMETHING>";

/// Human-readable shape of an accepted SAML provider ARN
pub const PROVIDER_ARN_SHAPE: &str = "arn:aws:iam::<ACCOUNTID>:saml-provider/<SOMETHING>";

// ASCII classes on purpose: the regex crate's \d and \w are Unicode-aware.
static ROLE_ARN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^arn:aws:iam::([0-9]{12}):role/([A-Za-z0-9_]+)$")
        .expect("ROLE_ARN_RE is a valid regex pattern")
});

static PROVIDER_ARN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^arn:aws:iam::[0-9]{12}:saml-provider/[A-Za-z0-9_]+$")
        .expect("PROVIDER_ARN_RE is a valid regex pattern")
});

/// Components of a validated IAM role ARN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleArn {
    pub account_id: String,
    pub role_name: String,
}

impl RoleArn {
    /// The custom type name this role is stored under
    pub fn type_name(&self) -> String {
        derive_type_name(&self.account_id, &self.role_name)
    }
}

/// Parse `arn:aws:iam::<12 digits>:role/<name>` into its account id and role name.
pub fn parse_role_arn(arn: &str) -> FederatorResult<RoleArn> {
    let captures = ROLE_ARN_RE
        .captures(arn)
        .ok_or_else(|| FederatorError::invalid_format(arn, ROLE_ARN_SHAPE))?;

    Ok(RoleArn {
        account_id: captures[1].to_string(),
        role_name: captures[2].to_string(),
    })
}

/// Whether `arn` is a SAML identity provider ARN
pub fn validate_provider_arn(arn: &str) -> bool {
    PROVIDER_ARN_RE.is_match(arn)
}

/// Like [`validate_provider_arn`], but yields `InvalidFormat` for the caller to propagate.
pub fn ensure_provider_arn(arn: &str) -> FederatorResult<()> {
    if validate_provider_arn(arn) {
        Ok(())
    } else {
        Err(FederatorError::invalid_format(arn, PROVIDER_ARN_SHAPE))
    }
}

/// Build the custom type name `<accountId>-<roleName>`.
///
/// Deterministic: the same role always maps to the same name, which is what lets the
/// role set detect a second mapping for a role that is already granted.
pub fn derive_type_name(account_id: &str, role_name: &str) -> String {
    format!("{account_id}-{role_name}")
}
