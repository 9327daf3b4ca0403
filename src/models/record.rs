//! Record model representing a row of a backing store table.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single record: an opaque ID plus its field values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Record {
    /// Record identifier (e.g. `recXXXXXXXXXXXXXX`)
    pub id: String,

    /// Creation timestamp reported by the backing store
    #[serde(
        rename = "createdTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_time: Option<String>,

    /// Field values keyed by field name; empty fields are omitted upstream
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Get a field as a string slice, if present and textual.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

/// Response body of a list request.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RecordList {
    #[serde(default)]
    pub records: Vec<Record>,

    /// Continuation token when more pages exist
    #[serde(default)]
    pub offset: Option<String>,
}

/// Response body of a delete request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeletedRecord {
    /// Missing when the backing store omits it; callers fall back to the
    /// requested ID
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub deleted: bool,
}
