//! HTTP client for the Airtable REST API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. Every operation is a single request: no
//! retries, no pagination, no caching. Transport failures and non-success
//! statuses are mapped into [`AssistantError`] values.

mod async_wrapper;
pub mod request;

pub use async_wrapper::{AsyncAirtableClient, AsyncAirtableClientImpl};
pub use request::{HttpMethod, ListQuery, SortDirection, TableRequest};

use crate::config::Config;
use crate::domain::{Credential, RecordId};
use crate::error::{AssistantError, AssistantResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{BaseSchema, DeletedRecord, FieldMap, Record, RecordList};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for one Airtable base.
///
/// The credential is not part of the client: each call receives the bearer
/// token of the tool call it serves.
#[derive(Clone)]
pub struct AirtableClient {
    /// API root URL (e.g. `https://api.airtable.com`)
    api_url: String,

    /// Base identifier; missing means every call fails with a configuration error
    base_id: Option<String>,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl AirtableClient {
    /// Create a new AirtableClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            api_url: config.airtable_api_url.clone(),
            base_id: config.base_id.clone(),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Create an AirtableClient with a custom API URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(api_url: String, base_id: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            api_url,
            base_id,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn base_id(&self) -> AssistantResult<&str> {
        self.base_id
            .as_deref()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| {
                AssistantError::Configuration("Server configuration is incomplete.".to_string())
            })
    }

    /// Build `<api>/v0/<base>/<table>[/<record>]`.
    fn table_url(&self, base_id: &str, table_id: &str, record_id: Option<&RecordId>) -> String {
        let root = self.api_url.trim_end_matches('/');
        let mut url = format!(
            "{}/v0/{}/{}",
            root,
            urlencoding::encode(base_id),
            urlencoding::encode(table_id)
        );
        if let Some(record_id) = record_id {
            url.push('/');
            url.push_str(record_id.as_str());
        }
        url
    }

    /// Build `<api>/v0/meta/bases/<base>/tables`.
    fn meta_url(&self, base_id: &str) -> String {
        format!(
            "{}/v0/meta/bases/{}/tables",
            self.api_url.trim_end_matches('/'),
            urlencoding::encode(base_id)
        )
    }

    /// Perform one authenticated request against a table.
    ///
    /// Configuration is checked before any I/O. A 2xx response body is
    /// returned as parsed JSON without further validation.
    pub fn dispatch(
        &self,
        credential: &Credential,
        table_id: &str,
        request: &TableRequest,
    ) -> AssistantResult<Value> {
        let base_id = self.base_id()?;
        if table_id.trim().is_empty() {
            return Err(AssistantError::Configuration(
                "Server configuration is incomplete.".to_string(),
            ));
        }

        let url = self.table_url(base_id, table_id, request.record_id.as_ref());
        let method = request.method.as_str();

        let mut call = self
            .agent
            .request(method, &url)
            .set("Authorization", &credential.bearer_header())
            .set("Content-Type", "application/json");
        for (key, value) in &request.query {
            call = call.query(key, value);
        }

        tracing::debug!(method, table = table_id, record = ?request.record_id, "dispatching request");

        self.send(method, table_id, call, request.body.as_ref())
    }

    /// Send a prepared request and decode its JSON body.
    ///
    /// Any status outside 2xx becomes [`AssistantError::Request`], including
    /// redirects ureq did not follow.
    fn send(
        &self,
        method: &str,
        table: &str,
        call: ureq::Request,
        body: Option<&Value>,
    ) -> AssistantResult<Value> {
        let timer = HttpTimer::new(self.metrics.clone());
        let result = match body {
            Some(body) => call.send_json(body),
            None => call.call(),
        };

        let response = match result {
            Ok(response) if (200..300).contains(&response.status()) => response,
            Ok(response) => {
                timer.complete_with_error();
                let status = response.status();
                let err = AssistantError::Request {
                    status,
                    detail: Self::error_detail(response),
                };
                tracing::warn!(method, table, status, error = %err, "request failed");
                return Err(err);
            }
            Err(e) => {
                timer.complete_with_error();
                let err = Self::map_error(e);
                tracing::warn!(method, table, error = %err, "request failed");
                return Err(err);
            }
        };

        let duration = timer.complete();
        tracing::debug!(
            method,
            table,
            status = response.status(),
            duration_ms = duration.as_millis() as u64,
            "request succeeded"
        );
        let text = response
            .into_string()
            .map_err(|e| AssistantError::Transport(e.to_string()))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Map a ureq error to an AssistantError.
    fn map_error(error: ureq::Error) -> AssistantError {
        match error {
            ureq::Error::Status(status, response) => AssistantError::Request {
                status,
                detail: Self::error_detail(response),
            },
            ureq::Error::Transport(transport) => AssistantError::Transport(transport.to_string()),
        }
    }

    /// Error body as JSON when it parses, raw text otherwise.
    fn error_detail(response: ureq::Response) -> Value {
        let text = response.into_string().unwrap_or_default();
        serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text))
    }

    // ========================= Record Operations =========================

    /// List records matching a query.
    pub fn list_records(
        &self,
        credential: &Credential,
        table_id: &str,
        query: &ListQuery,
    ) -> AssistantResult<Vec<Record>> {
        let value = self.dispatch(credential, table_id, &TableRequest::get(query.to_params()))?;
        let list: RecordList = serde_json::from_value(value)?;
        self.metrics.record_records_fetched(list.records.len());
        Ok(list.records)
    }

    /// Create a record. Select options that don't exist yet are created
    /// (`typecast`).
    pub fn create_record(
        &self,
        credential: &Credential,
        table_id: &str,
        fields: &FieldMap,
    ) -> AssistantResult<Record> {
        let body = json!({ "fields": fields, "typecast": true });
        let value = self.dispatch(credential, table_id, &TableRequest::post(body))?;
        self.metrics.record_record_written();
        Ok(serde_json::from_value(value)?)
    }

    /// Partially update a record; fields not in `fields` are left untouched.
    pub fn update_record(
        &self,
        credential: &Credential,
        table_id: &str,
        record_id: &RecordId,
        fields: &FieldMap,
    ) -> AssistantResult<Record> {
        let body = json!({ "fields": fields, "typecast": true });
        let value = self.dispatch(
            credential,
            table_id,
            &TableRequest::patch(record_id.clone(), body),
        )?;
        self.metrics.record_record_written();
        Ok(serde_json::from_value(value)?)
    }

    /// Delete a record.
    pub fn delete_record(
        &self,
        credential: &Credential,
        table_id: &str,
        record_id: &RecordId,
    ) -> AssistantResult<DeletedRecord> {
        let value = self.dispatch(
            credential,
            table_id,
            &TableRequest::delete(record_id.clone()),
        )?;
        self.metrics.record_record_deleted();
        Ok(serde_json::from_value(value)?)
    }

    // ========================= Schema Operations =========================

    /// Fetch the table and field definitions of the base.
    pub fn fetch_schema(&self, credential: &Credential) -> AssistantResult<BaseSchema> {
        let base_id = self.base_id()?;
        let url = self.meta_url(base_id);
        let call = self
            .agent
            .get(&url)
            .set("Authorization", &credential.bearer_header());

        tracing::debug!(base = base_id, "fetching base schema");

        let value = self.send("GET", "meta", call, None)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Choice names of a select field.
    ///
    /// Best effort: any failure yields an empty list.
    pub fn field_options(
        &self,
        credential: &Credential,
        table_id: &str,
        field_name: &str,
    ) -> Vec<String> {
        match self.fetch_schema(credential) {
            Ok(schema) => schema.choices_for(table_id, field_name),
            Err(e) => {
                tracing::warn!(table = table_id, field = field_name, error = %e, "failed to fetch field options");
                Vec::new()
            }
        }
    }
}
