//! Partial field maps for create and update requests.

use crate::error::{AssistantError, AssistantResult};
use crate::models::{FieldMap, FieldValue};
use std::collections::HashMap;

/// Per-field transformation applied before a value is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    Lowercase,
}

impl Normalization {
    fn apply(self, value: FieldValue) -> FieldValue {
        match self {
            Normalization::Lowercase => value.to_lowercase(),
        }
    }
}

/// Builder for a field update map.
///
/// Only fields set with `Some` end up in the map; a missing key means the
/// field stays as it is in the backing store, never that it is cleared.
///
/// ```
/// use assistant_mcp_server::compose::{FieldUpdate, Normalization};
///
/// let fields = FieldUpdate::new()
///     .normalize("city", Normalization::Lowercase)
///     .set("city", Some("Tokyo"))
///     .set("phone", None::<String>)
///     .build()
///     .unwrap();
/// assert_eq!(fields.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct FieldUpdate {
    fields: FieldMap,
    normalizers: HashMap<&'static str, Normalization>,
}

impl FieldUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a normalization for a field. Must be called before `set`.
    pub fn normalize(mut self, field: &'static str, normalization: Normalization) -> Self {
        self.normalizers.insert(field, normalization);
        self
    }

    /// Include `field` when `value` is present.
    pub fn set<V: Into<FieldValue>>(mut self, field: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            let value = value.into();
            let value = match self.normalizers.get(field) {
                Some(normalization) => normalization.apply(value),
                None => value,
            };
            self.fields.insert(field.to_string(), value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Finish an update. Fails with `NoFieldsProvided` when nothing was set.
    pub fn build(self) -> AssistantResult<FieldMap> {
        self.build_inner(None)
    }

    /// Like `build`, with a hint appended to the error message.
    pub fn build_with_hint(self, hint: &str) -> AssistantResult<FieldMap> {
        self.build_inner(Some(hint.to_string()))
    }

    /// Finish a create, where required fields guarantee a non-empty map.
    pub fn into_fields(self) -> FieldMap {
        self.fields
    }

    fn build_inner(self, hint: Option<String>) -> AssistantResult<FieldMap> {
        if self.fields.is_empty() {
            return Err(AssistantError::NoFieldsProvided(hint));
        }
        Ok(self.fields)
    }
}
