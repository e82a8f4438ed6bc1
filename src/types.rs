//! Common types used throughout the article source
//!
//! Shared type aliases for the JSON shapes that flow from the
//! search API to the consumer of a batch.

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// One nested article object as returned by the search API
pub type Record = JsonObject;

/// Single-level projection of a [`Record`] with dot-joined keys.
///
/// No value in a flat record is an object; arrays are kept as-is.
pub type FlatRecord = JsonObject;
