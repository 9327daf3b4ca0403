//! Location log tools.
//!
//! The location log holds automatic check-ins recorded every 30 minutes.
//! Entries can be linked to a saved place or marked as transit.

use crate::client::{AsyncAirtableClient, ListQuery, SortDirection};
use crate::compose::{FieldUpdate, FilterBuilder};
use crate::config::{Table, TableIds};
use crate::domain::{Credential, RecordId};
use crate::error::AssistantResult;
use crate::models::Record;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Ok,
    Warning,
}

impl LogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogStatus::Ok => "ok",
            LogStatus::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetLocationLogParams {
    /// Number of recent log entries to return (e.g. 1 for latest, 10 for last ten). Leave empty to get all entries.
    #[serde(default)]
    pub limit: Option<u32>,

    /// Filter by a saved place's record ID (from get_places). Returns only log entries linked to that place.
    #[serde(default)]
    pub place_id: Option<String>,

    /// Filter by log status: 'ok' for normal entries, 'warning' for entries that need attention.
    #[serde(default)]
    pub status: Option<LogStatus>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateLocationLogParams {
    /// The record ID of the location log entry to update
    pub log_id: String,

    /// The record ID of the saved place to link to this log entry (from get_places). Leave empty if marking as transit.
    #[serde(default)]
    pub place_id: Option<String>,

    /// Set to true to mark this log entry as in-transit. When marking as transit, leave place_id empty.
    #[serde(default)]
    pub transit: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationLogResponse {
    pub logs: Vec<Record>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationLogUpdateResponse {
    pub log: Record,
    pub message: String,
}

/// Tools over the location log table.
pub struct LocationTools {
    client: Arc<dyn AsyncAirtableClient>,
    tables: TableIds,
}

impl LocationTools {
    pub fn new(client: Arc<dyn AsyncAirtableClient>, tables: TableIds) -> Self {
        Self { client, tables }
    }

    /// Recent log entries, most recent first.
    pub async fn get_location_log(
        &self,
        credential: Option<&Credential>,
        params: GetLocationLogParams,
    ) -> AssistantResult<LocationLogResponse> {
        let credential = super::require_credential(credential)?;
        let table_id = self.tables.require(Table::LocationLogs)?;

        let place = params.place_id.map(|p| vec![p]);
        let filter = FilterBuilder::new()
            .any_in_list("place", place.as_deref())
            .equals("status", params.status.as_ref().map(LogStatus::as_str))
            .build();

        let query = ListQuery::new()
            .sort("timestamp", SortDirection::Desc)
            .max_records(params.limit)
            .filter(filter);

        let logs = self
            .client
            .list_records(credential, table_id, &query)
            .await?;

        Ok(LocationLogResponse {
            count: logs.len(),
            logs,
        })
    }

    /// Link a log entry to a place or mark it as transit.
    pub async fn update_location_log(
        &self,
        credential: Option<&Credential>,
        params: UpdateLocationLogParams,
    ) -> AssistantResult<LocationLogUpdateResponse> {
        let credential = super::require_credential(credential)?;
        let table_id = self.tables.require(Table::LocationLogs)?;
        let log_id = RecordId::new(params.log_id)?;

        let place = params
            .place_id
            .map(RecordId::new)
            .transpose()?
            .map(|id| vec![id.into_inner()]);

        let fields = FieldUpdate::new()
            .set("place", place)
            .set("transit", params.transit)
            .build_with_hint("Provide at least place_id or transit.")?;

        let log = self
            .client
            .update_record(credential, table_id, &log_id, &fields)
            .await?;

        Ok(LocationLogUpdateResponse {
            log,
            message: "Location log updated successfully.".to_string(),
        })
    }
}
