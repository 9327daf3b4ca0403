//! Assistant MCP Server - a Model Context Protocol server over an Airtable base.
//!
//! The base backs a personal assistant: a message history, an automatic
//! location log, saved places and contacts. Every tool call authenticates
//! with the caller's own bearer token; the server holds no credential.
//!
//! # Architecture
//!
//! - **compose**: Filter formulas and partial field updates
//! - **client**: Request dispatcher for the Airtable REST API
//! - **tools**: Tool operations, one module per table
//! - **server**: MCP tool router and streamable HTTP transport
//! - **config**: Configuration management from environment variables
//! - **domain**: Validated identifiers and the per-call credential
//! - **models**: Records, field values and base schema
//! - **error**: Custom error types and the tool error envelope
//! - **metrics**: Request counters reported by `get_server_info`

pub mod client;
pub mod compose;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod server;
pub mod tools;

pub use client::{AirtableClient, AsyncAirtableClient, AsyncAirtableClientImpl, ListQuery};
pub use compose::{FieldUpdate, FilterBuilder, Formula, Normalization};
pub use config::{Config, Table, TableIds};
pub use domain::{Credential, RecordId};
pub use error::{AssistantError, AssistantResult, ConfigError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{FieldMap, FieldValue, Record};
pub use server::AssistantMcpServer;
