//! MCP server implementation for the personal assistant.
//!
//! This module provides the MCP protocol server and its streamable HTTP
//! transport. HTTP is the only transport: the bearer token of each call
//! travels in the request's `Authorization` header.

pub mod auth;
pub mod handlers;

pub use handlers::AssistantMcpServer;

use anyhow::Result;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};

/// Path the MCP endpoint is mounted at.
pub const MCP_PATH: &str = "/mcp";

/// Run the MCP server over streamable HTTP.
///
/// Serves until ctrl-c is received, then shuts down gracefully.
///
/// # Arguments
/// * `server` - The configured AssistantMcpServer instance
/// * `bind_address` - `host:port` to listen on
pub async fn run_server(server: AssistantMcpServer, bind_address: &str) -> Result<()> {
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    let router = axum::Router::new().nest_service(MCP_PATH, service);
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, path = MCP_PATH, "MCP endpoint listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
        })
        .await?;

    Ok(())
}
