//! Tools shared by the place and contact tables.

use crate::client::AsyncAirtableClient;
use crate::config::{Table, TableIds};
use crate::domain::{Credential, RecordId};
use crate::error::{AssistantError, AssistantResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Table a cross-table operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Place,
    Contact,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Place => "place",
            Source::Contact => "contact",
        }
    }

    pub fn capitalized(&self) -> &'static str {
        match self {
            Source::Place => "Place",
            Source::Contact => "Contact",
        }
    }

    pub fn table(&self) -> Table {
        match self {
            Source::Place => Table::Places,
            Source::Contact => Table::Contacts,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteEntryParams {
    /// Which data source to delete from: 'place' for saved places, 'contact' for contacts
    pub source: Source,

    /// The record ID of the entry to delete. Get this from the corresponding search tool (get_places or get_contacts).
    pub entry_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ParameterOptionsParams {
    /// Which data source the parameter belongs to: 'place' for saved places, 'contact' for contacts
    pub source: Source,

    /// Which parameter to get available options for, e.g. 'type' for place categories, 'relationship' for contact relationship types, 'city' for contact cities
    pub parameter: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteEntryResponse {
    pub message: String,
    pub deleted_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterOptionsResponse {
    pub source: Source,
    pub parameter: String,
    pub options: Vec<String>,
    pub count: usize,
}

pub struct EntryTools {
    client: Arc<dyn AsyncAirtableClient>,
    tables: TableIds,
}

impl EntryTools {
    pub fn new(client: Arc<dyn AsyncAirtableClient>, tables: TableIds) -> Self {
        Self { client, tables }
    }

    fn table_for(&self, source: Source) -> AssistantResult<&str> {
        self.tables.get(source.table()).ok_or_else(|| {
            AssistantError::Configuration(format!("Table for '{}' is not configured.", source))
        })
    }

    /// Permanently delete a place or contact.
    pub async fn delete_entry(
        &self,
        credential: Option<&Credential>,
        params: DeleteEntryParams,
    ) -> AssistantResult<DeleteEntryResponse> {
        let credential = super::require_credential(credential)?;
        let table_id = self.table_for(params.source)?;
        let entry_id = RecordId::new(params.entry_id)?;

        let deleted = self
            .client
            .delete_record(credential, table_id, &entry_id)
            .await?;

        Ok(DeleteEntryResponse {
            message: format!("{} deleted successfully.", params.source.capitalized()),
            deleted_id: deleted.id.unwrap_or_else(|| entry_id.into_inner()),
        })
    }

    /// Choice names of a select field, for picking valid values before a
    /// search or write.
    pub async fn get_parameter_options(
        &self,
        credential: Option<&Credential>,
        params: ParameterOptionsParams,
    ) -> AssistantResult<ParameterOptionsResponse> {
        let credential = super::require_credential(credential)?;
        let table_id = self.table_for(params.source)?;

        let options = self
            .client
            .field_options(credential, table_id, &params.parameter)
            .await;

        Ok(ParameterOptionsResponse {
            source: params.source,
            parameter: params.parameter,
            count: options.len(),
            options,
        })
    }
}
