//! JSON codec for [`LayoutDocument`].
//!
//! The format is duck-typed at the edges: documents written by other editor
//! versions may carry fields this crate does not model. Every wire-visible
//! struct therefore flattens unrecognised keys into an extension bag, and a
//! decode/encode cycle preserves them verbatim. Field names are camelCase on
//! the wire.
//!
//! Decoding is deliberately non-validating: a historical or foreign document
//! that would fail today's integrity rules still round-trips losslessly.
//! [`LayoutDocument::validate`] gates persistence writes and publishing, not
//! parsing.
//!
//! [`LayoutDocument::validate`]: crate::domain::document::LayoutDocument::validate

use serde_json::Value;
use thiserror::Error;

use crate::domain::document::LayoutDocument;

/// Errors that can occur while encoding or decoding a layout document.
#[derive(Debug, Error)]
pub enum WireError {
    /// The JSON text could not be parsed into a layout document.
    #[error("malformed layout JSON: {0}")]
    Decode(#[source] serde_json::Error),

    /// The document could not be serialized.
    #[error("failed to encode layout JSON: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Decodes a layout document from JSON text.
///
/// # Errors
///
/// Returns [`WireError::Decode`] when the text is not valid JSON or does not
/// match the document shape.
pub fn from_json(text: &str) -> Result<LayoutDocument, WireError> {
    serde_json::from_str(text).map_err(WireError::Decode)
}

/// Encodes a layout document as compact JSON text.
///
/// # Errors
///
/// Returns [`WireError::Encode`] if serialization fails.
pub fn to_json(doc: &LayoutDocument) -> Result<String, WireError> {
    serde_json::to_string(doc).map_err(WireError::Encode)
}

/// Decodes a layout document from an already-parsed JSON value.
///
/// Used by persistence adapters that store documents as structured JSON
/// rather than text.
///
/// # Errors
///
/// Returns [`WireError::Decode`] when the value does not match the document
/// shape.
pub fn from_value(value: Value) -> Result<LayoutDocument, WireError> {
    serde_json::from_value(value).map_err(WireError::Decode)
}

/// Encodes a layout document as a structured JSON value.
///
/// # Errors
///
/// Returns [`WireError::Encode`] if serialization fails.
pub fn to_value(doc: &LayoutDocument) -> Result<Value, WireError> {
    serde_json::to_value(doc).map_err(WireError::Encode)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
