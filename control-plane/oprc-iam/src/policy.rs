//! Canonical form of IAM policy documents.
//!
//! The remote API stores policies as compact, percent-encoded JSON. Desired
//! documents are written by users with arbitrary whitespace, so both sides are
//! brought to the same form before they are compared.

use serde_json::Value;

use crate::errors::DiffError;

/// Compact `raw` and percent-encode the result.
///
/// Key order is preserved. Empty input stays empty.
pub fn compact_and_escape_json(raw: &str) -> Result<String, DiffError> {
    let compact = compact_document(raw)?;
    Ok(urlencoding::encode(&compact).into_owned())
}

/// Validate `raw` and strip insignificant whitespace.
pub fn compact_document(raw: &str) -> Result<String, DiffError> {
    if raw.is_empty() {
        return Ok(String::new());
    }
    let doc: Value = serde_json::from_str(raw).map_err(DiffError::MalformedDocument)?;
    serde_json::to_string(&doc).map_err(DiffError::MalformedDocument)
}

/// Plain-text form of a stored document.
///
/// Percent-encoded input is decoded; anything that already parses as JSON, or
/// that does not decode to JSON, is returned unchanged.
pub fn unescape_policy(stored: &str) -> String {
    if serde_json::from_str::<Value>(stored).is_ok() {
        return stored.to_string();
    }
    match urlencoding::decode(stored) {
        Ok(decoded) if serde_json::from_str::<Value>(&decoded).is_ok() => decoded.into_owned(),
        _ => stored.to_string(),
    }
}

/// Parse a stored policy that may be raw JSON or percent-encoded JSON.
pub fn decode_policy(stored: &str) -> Result<Value, DiffError> {
    if let Ok(v) = serde_json::from_str(stored) {
        return Ok(v);
    }
    let decoded = urlencoding::decode(stored)
        .map_err(|e| DiffError::ComparisonInfrastructure(format!("policy is not UTF-8 after decoding: {}", e)))?;
    serde_json::from_str(&decoded)
        .map_err(|e| DiffError::ComparisonInfrastructure(format!("stored policy is not JSON: {}", e)))
}
