//! MCP tool handlers for the assistant server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.
//! Tool failures are reported as successful JSON-RPC responses carrying an
//! `{"error": ...}` object with `is_error` set, so the calling model can read
//! and react to them.

use crate::client::AsyncAirtableClient;
use crate::config::TableIds;
use crate::error::AssistantResult;
use crate::metrics::Metrics;
use crate::server::auth::credential_from_context;
use crate::tools::{
    ContactTools, CreateContactParams, CreatePlaceParams, DeleteEntryParams, EntryTools,
    GetContactsParams, GetLocationLogParams, GetMessagesParams, GetPlacesParams, LocationTools,
    MessageTools, ParameterOptionsParams, PlaceTools, UpdateContactParams,
    UpdateLocationLogParams, UpdatePlaceParams,
};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::borrow::Cow;
use std::sync::Arc;

const SERVER_NAME: &str = "assistant-mcp-server";

/// The MCP server exposing the personal assistant's messages, location log,
/// places and contacts.
#[derive(Clone)]
pub struct AssistantMcpServer {
    messages: Arc<MessageTools>,
    locations: Arc<LocationTools>,
    places: Arc<PlaceTools>,
    contacts: Arc<ContactTools>,
    entries: Arc<EntryTools>,
    metrics: Metrics,
    environment: String,
    started_at: String,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for AssistantMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Personal assistant data store - read message history and the location log, and manage saved places and contacts. Every call needs an 'Authorization: Bearer <token>' header.".into()),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct GreetParams {
    /// Name of the person to greet
    name: String,
}

#[derive(Debug, Serialize)]
struct ServerInfoResponse<'a> {
    server_name: &'a str,
    version: &'a str,
    environment: &'a str,
    started_at: &'a str,
    metrics: crate::metrics::MetricsSummary,
}

fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let body = serde_json::to_string_pretty(value).map_err(to_mcp_error)?;
    Ok(CallToolResult::success(vec![Content::text(body)]))
}

fn error_result(payload: &Value) -> Result<CallToolResult, McpError> {
    let body = serde_json::to_string_pretty(payload).map_err(to_mcp_error)?;
    Ok(CallToolResult::error(vec![Content::text(body)]))
}

/// Render a tool outcome. `extra` is merged into the error object.
fn respond<T: Serialize>(
    tool: &'static str,
    result: AssistantResult<T>,
    extra: Option<(&str, Value)>,
) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => json_result(&value),
        Err(e) => {
            tracing::warn!(tool, status = ?e.status(), error = %e, "tool call failed");
            let mut payload = e.payload();
            if let (Some((key, value)), Some(object)) = (extra, payload.as_object_mut()) {
                object.insert(key.to_string(), value);
            }
            error_result(&payload)
        }
    }
}

#[tool_router]
impl AssistantMcpServer {
    /// Create a new assistant MCP server.
    pub fn new(
        client: Arc<dyn AsyncAirtableClient>,
        tables: TableIds,
        metrics: Metrics,
        environment: String,
    ) -> Self {
        Self {
            messages: Arc::new(MessageTools::new(client.clone(), tables.clone())),
            locations: Arc::new(LocationTools::new(client.clone(), tables.clone())),
            places: Arc::new(PlaceTools::new(client.clone(), tables.clone())),
            contacts: Arc::new(ContactTools::new(client.clone(), tables.clone())),
            entries: Arc::new(EntryTools::new(client, tables)),
            metrics,
            environment,
            started_at: chrono::Utc::now().to_rfc3339(),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Get messages from the personal assistant's message history. Use range to pick a time period: 'today', 'this week', 'this month', or 'all'. Messages are returned most recent first."
    )]
    async fn get_messages(
        &self,
        params: Parameters<GetMessagesParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let range = params.range.unwrap_or_default();
        tracing::info!(tool = "get_messages", range = range.view(), "tool call");

        let credential = credential_from_context(&ctx);
        let result = self.messages.get_messages(credential.as_ref(), params).await;
        respond("get_messages", result, Some(("range", json!(range))))
    }

    #[tool(
        description = "Get entries from the location log. Location is recorded automatically every 30 minutes. Optionally filter by saved place or status, and limit to the most recent entries."
    )]
    async fn get_location_log(
        &self,
        params: Parameters<GetLocationLogParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(tool = "get_location_log", "tool call");
        let credential = credential_from_context(&ctx);
        let result = self
            .locations
            .get_location_log(credential.as_ref(), params.0)
            .await;
        respond("get_location_log", result, None)
    }

    #[tool(
        description = "Update a location log entry: link it to a saved place (place_id) or mark it as transit. Provide at least one of place_id or transit."
    )]
    async fn update_location_log(
        &self,
        params: Parameters<UpdateLocationLogParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(tool = "update_location_log", log_id = %params.0.log_id, "tool call");
        let credential = credential_from_context(&ctx);
        let result = self
            .locations
            .update_location_log(credential.as_ref(), params.0)
            .await;
        respond("update_location_log", result, None)
    }

    #[tool(description = "Save a new place the user has visited or wants to remember.")]
    async fn create_place(
        &self,
        params: Parameters<CreatePlaceParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(tool = "create_place", "tool call");
        let credential = credential_from_context(&ctx);
        let result = self.places.create_place(credential.as_ref(), params.0).await;
        respond("create_place", result, None)
    }

    #[tool(
        description = "Update an existing saved place. Only the provided fields will be updated, the rest will remain unchanged."
    )]
    async fn update_place(
        &self,
        params: Parameters<UpdatePlaceParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(tool = "update_place", place_id = %params.0.place_id, "tool call");
        let credential = credential_from_context(&ctx);
        let result = self.places.update_place(credential.as_ref(), params.0).await;
        respond("update_place", result, None)
    }

    #[tool(
        description = "Search saved places, optionally filtered by name, type(s), minimum rating, and/or address."
    )]
    async fn get_places(
        &self,
        params: Parameters<GetPlacesParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(tool = "get_places", "tool call");
        let credential = credential_from_context(&ctx);
        let result = self.places.get_places(credential.as_ref(), params.0).await;
        respond("get_places", result, None)
    }

    #[tool(
        description = "Get available options for a given parameter. Use this to see valid values before creating or filtering places and contacts."
    )]
    async fn get_parameter_options(
        &self,
        params: Parameters<ParameterOptionsParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            tool = "get_parameter_options",
            source = %params.0.source,
            parameter = %params.0.parameter,
            "tool call"
        );
        let credential = credential_from_context(&ctx);
        let result = self
            .entries
            .get_parameter_options(credential.as_ref(), params.0)
            .await;
        respond("get_parameter_options", result, None)
    }

    #[tool(
        description = "Search contacts, optionally filtered by name, nickname, city, sex, relationship type, or company."
    )]
    async fn get_contacts(
        &self,
        params: Parameters<GetContactsParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(tool = "get_contacts", "tool call");
        let credential = credential_from_context(&ctx);
        let result = self.contacts.get_contacts(credential.as_ref(), params.0).await;
        respond("get_contacts", result, None)
    }

    #[tool(description = "Save a new contact.")]
    async fn create_contact(
        &self,
        params: Parameters<CreateContactParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(tool = "create_contact", "tool call");
        let credential = credential_from_context(&ctx);
        let result = self
            .contacts
            .create_contact(credential.as_ref(), params.0)
            .await;
        respond("create_contact", result, None)
    }

    #[tool(
        description = "Update an existing contact. Only the provided fields will be updated, the rest will remain unchanged."
    )]
    async fn update_contact(
        &self,
        params: Parameters<UpdateContactParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(tool = "update_contact", contact_id = %params.0.contact_id, "tool call");
        let credential = credential_from_context(&ctx);
        let result = self
            .contacts
            .update_contact(credential.as_ref(), params.0)
            .await;
        respond("update_contact", result, None)
    }

    #[tool(
        description = "Permanently delete a record. Pick the source ('place' or 'contact') and provide the record ID. This cannot be undone."
    )]
    async fn delete_entry(
        &self,
        params: Parameters<DeleteEntryParams>,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            tool = "delete_entry",
            source = %params.0.source,
            entry_id = %params.0.entry_id,
            "tool call"
        );
        let credential = credential_from_context(&ctx);
        let result = self.entries.delete_entry(credential.as_ref(), params.0).await;
        respond("delete_entry", result, None)
    }

    #[tool(description = "Get contacts with upcoming birthdays, grouped by urgency.")]
    async fn get_birthdays(
        &self,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(tool = "get_birthdays", "tool call");
        let credential = credential_from_context(&ctx);
        let result = self.contacts.get_birthdays(credential.as_ref()).await;
        respond("get_birthdays", result, None)
    }

    #[tool(description = "Greet someone by name.")]
    async fn greet(&self, params: Parameters<GreetParams>) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(greeting(
            &params.0.name,
        ))]))
    }

    #[tool(
        description = "Get server name, version, environment, start time and request metrics."
    )]
    async fn get_server_info(&self) -> Result<CallToolResult, McpError> {
        json_result(&ServerInfoResponse {
            server_name: SERVER_NAME,
            version: env!("CARGO_PKG_VERSION"),
            environment: &self.environment,
            started_at: &self.started_at,
            metrics: self.metrics.summary(),
        })
    }
}

fn greeting(name: &str) -> String {
    format!(
        "Hello, {}! Welcome to the personal assistant MCP server.",
        name
    )
}
