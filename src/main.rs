//! Assistant MCP Server - Main entry point
//!
//! Serves the assistant's Airtable base as MCP tools over streamable HTTP.

use anyhow::Result;
use assistant_mcp_server::client::{AsyncAirtableClient, AsyncAirtableClientImpl};
use assistant_mcp_server::{AirtableClient, AssistantMcpServer, Config};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging on stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if config.base_id.is_none() {
        warn!("AIRTABLE_BASE_ID is not set; every data tool will report a configuration error");
    }

    info!(
        api_url = %config.airtable_api_url,
        environment = %config.environment,
        "Starting Assistant MCP Server"
    );

    // Initialize Airtable client
    let sync_client = AirtableClient::new(&config);
    let metrics = sync_client.metrics().clone();
    let client =
        Arc::new(AsyncAirtableClientImpl::new(sync_client)) as Arc<dyn AsyncAirtableClient>;

    let server = AssistantMcpServer::new(
        client,
        config.tables.clone(),
        metrics,
        config.environment.clone(),
    );

    info!("Assistant MCP Server initialized");

    // Run the server (this will block until shutdown)
    assistant_mcp_server::server::run_server(server, &config.bind_address()).await?;

    info!("Assistant MCP Server shutdown complete");
    Ok(())
}
