//! Message history tools.

use crate::client::{AsyncAirtableClient, ListQuery, SortDirection};
use crate::config::{Table, TableIds};
use crate::domain::Credential;
use crate::error::AssistantResult;
use crate::models::Record;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Time period of a message listing. Each range is a view of the messages table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum MessageRange {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "this week")]
    ThisWeek,
    #[serde(rename = "this month")]
    ThisMonth,
    #[default]
    #[serde(rename = "all")]
    All,
}

impl MessageRange {
    /// Name of the backing view.
    pub fn view(&self) -> &'static str {
        match self {
            MessageRange::Today => "today",
            MessageRange::ThisWeek => "this week",
            MessageRange::ThisMonth => "this month",
            MessageRange::All => "all",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetMessagesParams {
    /// Time period to filter messages: 'today', 'this week', 'this month', or 'all' for complete history
    #[serde(default)]
    pub range: Option<MessageRange>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessagesResponse {
    pub range: MessageRange,
    pub messages: Vec<Record>,
    pub count: usize,
}

/// Tools over the messages table.
pub struct MessageTools {
    client: Arc<dyn AsyncAirtableClient>,
    tables: TableIds,
}

impl MessageTools {
    pub fn new(client: Arc<dyn AsyncAirtableClient>, tables: TableIds) -> Self {
        Self { client, tables }
    }

    /// Messages of a time range, most recent first.
    pub async fn get_messages(
        &self,
        credential: Option<&Credential>,
        params: GetMessagesParams,
    ) -> AssistantResult<MessagesResponse> {
        let credential = super::require_credential(credential)?;
        let table_id = self.tables.require(Table::Messages)?;
        let range = params.range.unwrap_or_default();

        let query = ListQuery::new()
            .view(range.view())
            .sort("timestamp", SortDirection::Desc);

        let messages = self
            .client
            .list_records(credential, table_id, &query)
            .await?;

        Ok(MessagesResponse {
            range,
            count: messages.len(),
            messages,
        })
    }
}
