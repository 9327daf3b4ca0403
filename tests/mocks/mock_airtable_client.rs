use assistant_mcp_server::client::{AsyncAirtableClient, ListQuery};
use assistant_mcp_server::domain::{Credential, RecordId};
use assistant_mcp_server::error::{AssistantError, AssistantResult};
use assistant_mcp_server::models::{DeletedRecord, FieldMap, Record};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One call made against the mock, as the tools issued it.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: &'static str,
    pub table_id: String,
    pub record_id: Option<String>,
    pub params: Vec<(String, String)>,
    pub fields: Option<Value>,
    pub token: String,
}

/// Mock Airtable client for testing.
///
/// Holds canned records per table and select options per field, and records
/// every call for verification. Filters are not evaluated: a list returns
/// every canned record of the table.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockAirtableClient {
    records: Arc<Mutex<HashMap<String, Vec<Record>>>>,
    options: Arc<Mutex<HashMap<(String, String), Vec<String>>>>,
    failure: Arc<Mutex<Option<(u16, Value)>>>,
    deleted_id_missing: Arc<Mutex<bool>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

#[allow(dead_code)]
impl MockAirtableClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_record(&self, table_id: &str, record: Record) {
        let mut records = self.records.lock().unwrap();
        records.entry(table_id.to_string()).or_default().push(record);
    }

    pub fn set_options(&self, table_id: &str, field: &str, options: &[&str]) {
        let mut map = self.options.lock().unwrap();
        map.insert(
            (table_id.to_string(), field.to_string()),
            options.iter().map(|o| o.to_string()).collect(),
        );
    }

    /// Make every record operation fail with a non-success status.
    pub fn fail_with(&self, status: u16, detail: Value) {
        *self.failure.lock().unwrap() = Some((status, detail));
    }

    /// Answer deletes with a body lacking the record ID.
    pub fn omit_deleted_id(&self) {
        *self.deleted_id_missing.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let calls = self.calls.lock().unwrap();
        calls.iter().filter(|c| c.method == method).count()
    }

    pub fn last_call(&self, method: &str) -> Option<RecordedCall> {
        let calls = self.calls.lock().unwrap();
        calls.iter().rev().find(|c| c.method == method).cloned()
    }

    fn track_call(
        &self,
        method: &'static str,
        credential: &Credential,
        table_id: &str,
        record_id: Option<&RecordId>,
        params: Vec<(String, String)>,
        fields: Option<&FieldMap>,
    ) {
        let mut calls = self.calls.lock().unwrap();
        calls.push(RecordedCall {
            method,
            table_id: table_id.to_string(),
            record_id: record_id.map(|r| r.as_str().to_string()),
            params,
            fields: fields.map(|f| serde_json::to_value(f).unwrap()),
            token: credential.expose().to_string(),
        });
    }

    fn check_failure(&self) -> AssistantResult<()> {
        match self.failure.lock().unwrap().clone() {
            Some((status, detail)) => Err(AssistantError::Request { status, detail }),
            None => Ok(()),
        }
    }

    fn record_from(id: &str, fields: &FieldMap) -> Record {
        serde_json::from_value(json!({
            "id": id,
            "createdTime": "2026-01-01T00:00:00.000Z",
            "fields": fields,
        }))
        .unwrap()
    }
}

#[async_trait]
impl AsyncAirtableClient for MockAirtableClient {
    async fn list_records(
        &self,
        credential: &Credential,
        table_id: &str,
        query: &ListQuery,
    ) -> AssistantResult<Vec<Record>> {
        self.track_call("list", credential, table_id, None, query.to_params(), None);
        self.check_failure()?;

        let records = self.records.lock().unwrap();
        Ok(records.get(table_id).cloned().unwrap_or_default())
    }

    async fn create_record(
        &self,
        credential: &Credential,
        table_id: &str,
        fields: &FieldMap,
    ) -> AssistantResult<Record> {
        self.track_call("create", credential, table_id, None, vec![], Some(fields));
        self.check_failure()?;

        let record = Self::record_from("recCreated", fields);
        self.add_record(table_id, record.clone());
        Ok(record)
    }

    async fn update_record(
        &self,
        credential: &Credential,
        table_id: &str,
        record_id: &RecordId,
        fields: &FieldMap,
    ) -> AssistantResult<Record> {
        self.track_call(
            "update",
            credential,
            table_id,
            Some(record_id),
            vec![],
            Some(fields),
        );
        self.check_failure()?;

        Ok(Self::record_from(record_id.as_str(), fields))
    }

    async fn delete_record(
        &self,
        credential: &Credential,
        table_id: &str,
        record_id: &RecordId,
    ) -> AssistantResult<DeletedRecord> {
        self.track_call("delete", credential, table_id, Some(record_id), vec![], None);
        self.check_failure()?;

        let id = if *self.deleted_id_missing.lock().unwrap() {
            None
        } else {
            Some(record_id.as_str().to_string())
        };
        Ok(DeletedRecord { id, deleted: true })
    }

    async fn field_options(
        &self,
        credential: &Credential,
        table_id: &str,
        field_name: &str,
    ) -> Vec<String> {
        self.track_call(
            "field_options",
            credential,
            table_id,
            None,
            vec![("field".to_string(), field_name.to_string())],
            None,
        );

        let options = self.options.lock().unwrap();
        options
            .get(&(table_id.to_string(), field_name.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}
