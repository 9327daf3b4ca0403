//! Async wrapper around synchronous AirtableClient.
//!
//! This module provides an async interface to the synchronous AirtableClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::{AirtableClient, ListQuery};
use crate::domain::{Credential, RecordId};
use crate::error::{AssistantError, AssistantResult};
use crate::models::{DeletedRecord, FieldMap, Record};
use async_trait::async_trait;
use std::sync::Arc;

/// Async record operations against the backing store.
///
/// Tools depend on this trait rather than on the concrete client, so tests
/// can substitute an in-memory implementation.
#[async_trait]
pub trait AsyncAirtableClient: Send + Sync {
    async fn list_records(
        &self,
        credential: &Credential,
        table_id: &str,
        query: &ListQuery,
    ) -> AssistantResult<Vec<Record>>;

    async fn create_record(
        &self,
        credential: &Credential,
        table_id: &str,
        fields: &FieldMap,
    ) -> AssistantResult<Record>;

    async fn update_record(
        &self,
        credential: &Credential,
        table_id: &str,
        record_id: &RecordId,
        fields: &FieldMap,
    ) -> AssistantResult<Record>;

    async fn delete_record(
        &self,
        credential: &Credential,
        table_id: &str,
        record_id: &RecordId,
    ) -> AssistantResult<DeletedRecord>;

    /// Choice names of a select field; empty on any failure.
    async fn field_options(
        &self,
        credential: &Credential,
        table_id: &str,
        field_name: &str,
    ) -> Vec<String>;
}

/// Async wrapper around synchronous AirtableClient.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP
/// operations on a dedicated thread pool, preventing blocking
/// the async runtime.
#[derive(Clone)]
pub struct AsyncAirtableClientImpl {
    client: Arc<AirtableClient>,
}

impl AsyncAirtableClientImpl {
    pub fn new(client: AirtableClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

fn join_error(e: tokio::task::JoinError) -> AssistantError {
    AssistantError::Transport(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncAirtableClient for AsyncAirtableClientImpl {
    async fn list_records(
        &self,
        credential: &Credential,
        table_id: &str,
        query: &ListQuery,
    ) -> AssistantResult<Vec<Record>> {
        let client = self.client.clone();
        let credential = credential.clone();
        let table_id = table_id.to_string();
        let query = query.clone();

        tokio::task::spawn_blocking(move || client.list_records(&credential, &table_id, &query))
            .await
            .map_err(join_error)?
    }

    async fn create_record(
        &self,
        credential: &Credential,
        table_id: &str,
        fields: &FieldMap,
    ) -> AssistantResult<Record> {
        let client = self.client.clone();
        let credential = credential.clone();
        let table_id = table_id.to_string();
        let fields = fields.clone();

        tokio::task::spawn_blocking(move || client.create_record(&credential, &table_id, &fields))
            .await
            .map_err(join_error)?
    }

    async fn update_record(
        &self,
        credential: &Credential,
        table_id: &str,
        record_id: &RecordId,
        fields: &FieldMap,
    ) -> AssistantResult<Record> {
        let client = self.client.clone();
        let credential = credential.clone();
        let table_id = table_id.to_string();
        let record_id = record_id.clone();
        let fields = fields.clone();

        tokio::task::spawn_blocking(move || {
            client.update_record(&credential, &table_id, &record_id, &fields)
        })
        .await
        .map_err(join_error)?
    }

    async fn delete_record(
        &self,
        credential: &Credential,
        table_id: &str,
        record_id: &RecordId,
    ) -> AssistantResult<DeletedRecord> {
        let client = self.client.clone();
        let credential = credential.clone();
        let table_id = table_id.to_string();
        let record_id = record_id.clone();

        tokio::task::spawn_blocking(move || {
            client.delete_record(&credential, &table_id, &record_id)
        })
        .await
        .map_err(join_error)?
    }

    async fn field_options(
        &self,
        credential: &Credential,
        table_id: &str,
        field_name: &str,
    ) -> Vec<String> {
        let client = self.client.clone();
        let credential = credential.clone();
        let table_id = table_id.to_string();
        let field_name = field_name.to_string();

        tokio::task::spawn_blocking(move || {
            client.field_options(&credential, &table_id, &field_name)
        })
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "field options task failed");
            Vec::new()
        })
    }
}
