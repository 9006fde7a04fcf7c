//! Payload synthesis (deterministic JSON generation)

pub mod patch_builder;

pub use patch_builder::{build_full_replacement, sso_schema_definition};
