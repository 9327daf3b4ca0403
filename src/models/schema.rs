//! Base schema returned by the metadata endpoint.

use serde::Deserialize;

/// `GET /v0/meta/bases/{base}/tables` response.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BaseSchema {
    #[serde(default)]
    pub tables: Vec<TableSchema>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableSchema {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldSchema {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: Option<String>,
    #[serde(default)]
    pub options: Option<FieldOptions>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct FieldOptions {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub name: String,
}

impl BaseSchema {
    /// Choice names of a select field, matched by table ID and
    /// case-insensitive field name. Unknown tables or fields yield an empty list.
    pub fn choices_for(&self, table_id: &str, field_name: &str) -> Vec<String> {
        self.tables
            .iter()
            .find(|t| t.id == table_id)
            .and_then(|t| {
                t.fields
                    .iter()
                    .find(|f| f.name.eq_ignore_ascii_case(field_name))
            })
            .and_then(|f| f.options.as_ref())
            .map(|o| o.choices.iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> BaseSchema {
        serde_json::from_value(json!({
            "tables": [
                {
                    "id": "tblPlaces",
                    "name": "places",
                    "fields": [
                        {"name": "name", "type": "singleLineText"},
                        {"name": "Type", "type": "multipleSelects", "options": {
                            "choices": [{"id": "sel1", "name": "cafe"}, {"id": "sel2", "name": "coworking"}]
                        }}
                    ]
                },
                {"id": "tblContacts", "name": "contacts", "fields": []}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_choices_case_insensitive_field() {
        assert_eq!(schema().choices_for("tblPlaces", "type"), vec!["cafe", "coworking"]);
    }

    #[test]
    fn test_choices_unknown_table_or_field() {
        let schema = schema();
        assert!(schema.choices_for("tblMissing", "type").is_empty());
        assert!(schema.choices_for("tblContacts", "city").is_empty());
        assert!(schema.choices_for("tblPlaces", "name").is_empty());
    }
}
