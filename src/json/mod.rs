//! JSON document parsing with source-annotated diagnostics

pub mod diagnostics;

pub use diagnostics::JsonSyntaxError;

use serde::de::DeserializeOwned;

/// Parse a JSON document, mapping syntax errors to a diagnostic that points
/// at the offending line and column of `filename`
pub fn parse_json_str<T: DeserializeOwned>(source: &str, filename: &str) -> Result<T, JsonSyntaxError> {
    serde_json::from_str(source).map_err(|e| JsonSyntaxError::from_serde_error(&e, source, filename))
}
