//! Commands module - service layer for Federator role and schema operations

mod schema;
pub(crate) mod service;
#[cfg(test)]
pub(crate) mod test_utils;
mod user;

pub use schema::{SchemaCreateOutcome, SchemaDeleteOutcome};
pub use service::FederatorService;
pub use user::AddOutcome;

use crate::error::FederatorResult;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Render as JSON with sorted keys and four-space indentation
pub(crate) fn render_json<T: Serialize>(value: &T) -> FederatorResult<String> {
    // Going through Value sorts object keys
    let value = serde_json::to_value(value)?;
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
