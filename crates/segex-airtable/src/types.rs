//! Airtable REST API response types.
//!
//! The list endpoint wraps results in `{"records": [...], "offset": "..."}`
//! where `offset` is present only while more pages remain. Each record's
//! `fields` object is keyed by the column's display name and omits columns
//! that are empty for that record.

use serde::Deserialize;
use serde_json::Value;

/// One page of a `list records` response.
#[derive(Debug, Deserialize)]
pub struct ListRecordsResponse {
    pub records: Vec<ApiRecord>,
    /// Opaque cursor for the next page; absent on the last page.
    #[serde(default)]
    pub offset: Option<String>,
}

/// A single record as returned by the list endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiRecord {
    pub id: String,
    #[serde(default)]
    pub fields: serde_json::Map<String, Value>,
}

impl ApiRecord {
    /// Renders the named field as text, returning an empty string when the
    /// field is absent (Airtable omits empty cells entirely).
    #[must_use]
    pub fn field_text(&self, name: &str) -> String {
        self.fields.get(name).map(field_text).unwrap_or_default()
    }
}

/// Renders an Airtable cell value as text.
///
/// Strings pass through untouched. Linked-record and multi-select cells
/// arrive as arrays; their elements are rendered and joined with `", "`, so
/// a cell holding several merchant ids still reads as a comma-separated list
/// (which the normalizer later drops). Anything without a sensible text form
/// renders as the empty string.
#[must_use]
pub fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(field_text)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null | Value::Object(_) => String::new(),
    }
}
