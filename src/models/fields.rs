//! Field values sent to the backing store on create and update.

use serde::Serialize;
use std::collections::BTreeMap;

/// A value a tool may write into a record field.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(i64),
    Flag(bool),
    List(Vec<String>),
}

impl FieldValue {
    /// Lower-case textual content; numbers and flags pass through.
    pub fn to_lowercase(&self) -> FieldValue {
        match self {
            FieldValue::Text(s) => FieldValue::Text(s.to_lowercase()),
            FieldValue::List(items) => {
                FieldValue::List(items.iter().map(|s| s.to_lowercase()).collect())
            }
            other => other.clone(),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<u8> for FieldValue {
    fn from(value: u8) -> Self {
        FieldValue::Number(i64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value)
    }
}

/// Field name to value, as sent in a `{"fields": ...}` body.
pub type FieldMap = BTreeMap<String, FieldValue>;
