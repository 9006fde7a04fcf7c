//! AWS ARN validation (pure Rust)

pub mod arn;

pub use arn::{
    derive_type_name, ensure_provider_arn, parse_role_arn, validate_provider_arn, RoleArn,
    PROVIDER_ARN_SHAPE, ROLE_ARN_SHAPE,
};
