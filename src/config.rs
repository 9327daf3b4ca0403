//! Configuration management for the Assistant MCP Server.
//!
//! Configuration is loaded once at startup from environment variables (and an
//! optional `.env` file) and is read-only afterwards. Base and table
//! identifiers are optional here: a missing identifier only fails the tool
//! calls that need it.

use crate::error::{AssistantError, AssistantResult, ConfigError, ConfigResult};
use std::env;

/// Default Airtable REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.airtable.com";

/// The tables of the assistant base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Messages,
    LocationLogs,
    Places,
    Contacts,
}

impl Table {
    fn not_configured(self) -> &'static str {
        match self {
            Table::Messages => "Messages table is not configured.",
            Table::LocationLogs => "Location log is not configured.",
            Table::Places => "Places table is not configured.",
            Table::Contacts => "Contacts table is not configured.",
        }
    }
}

/// Table identifiers within the configured base.
#[derive(Debug, Clone, Default)]
pub struct TableIds {
    pub messages: Option<String>,
    pub location_logs: Option<String>,
    pub places: Option<String>,
    pub contacts: Option<String>,
}

impl TableIds {
    /// Get the identifier of a table, if configured.
    pub fn get(&self, table: Table) -> Option<&str> {
        let id = match table {
            Table::Messages => &self.messages,
            Table::LocationLogs => &self.location_logs,
            Table::Places => &self.places,
            Table::Contacts => &self.contacts,
        };
        id.as_deref()
    }

    /// Get the identifier of a table or fail with a configuration error.
    pub fn require(&self, table: Table) -> AssistantResult<&str> {
        self.get(table)
            .ok_or_else(|| AssistantError::Configuration(table.not_configured().to_string()))
    }
}

/// Configuration for the Assistant MCP Server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Airtable API root URL
    pub airtable_api_url: String,

    /// Airtable base identifier
    pub base_id: Option<String>,

    /// Per-table identifiers
    pub tables: TableIds,

    /// HTTP request timeout in seconds (default: 30)
    pub request_timeout: u64,

    /// Address the MCP endpoint binds to (default: 0.0.0.0)
    pub host: String,

    /// Port the MCP endpoint listens on (default: 8000)
    pub port: u16,

    /// Deployment environment name reported by `get_server_info`
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `AIRTABLE_API_URL`: API root (default: https://api.airtable.com)
    /// - `AIRTABLE_BASE_ID`: Base identifier
    /// - `AIRTABLE_MESSAGES_TABLE_ID`, `AIRTABLE_LOCATION_LOGS_TABLE_ID`,
    ///   `AIRTABLE_PLACES_TABLE_ID`, `AIRTABLE_CONTACTS_TABLE_ID`: table identifiers
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 30)
    /// - `HOST`: Bind host (default: 0.0.0.0)
    /// - `PORT`: Bind port (default: 8000)
    /// - `ENVIRONMENT`: Environment name (default: "development")
    pub fn from_env() -> ConfigResult<Self> {
        // dotenvy::dotenv() doesn't print to stdout
        let _ = dotenvy::dotenv();

        let airtable_api_url =
            Self::optional_var("AIRTABLE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        if !airtable_api_url.starts_with("http://") && !airtable_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "AIRTABLE_API_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let tables = TableIds {
            messages: Self::optional_var("AIRTABLE_MESSAGES_TABLE_ID"),
            location_logs: Self::optional_var("AIRTABLE_LOCATION_LOGS_TABLE_ID"),
            places: Self::optional_var("AIRTABLE_PLACES_TABLE_ID"),
            contacts: Self::optional_var("AIRTABLE_CONTACTS_TABLE_ID"),
        };

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 30)?;
        let port = Self::parse_env_u16("PORT", 8000)?;

        Ok(Config {
            airtable_api_url,
            base_id: Self::optional_var("AIRTABLE_BASE_ID"),
            tables,
            request_timeout,
            host: Self::optional_var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            environment: Self::optional_var("ENVIRONMENT")
                .unwrap_or_else(|| "development".to_string()),
        })
    }

    /// Socket address string for the MCP endpoint.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Read an environment variable, treating empty values as unset.
    fn optional_var(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match Self::optional_var(var_name) {
            Some(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            None => Ok(default),
        }
    }

    /// Parse an environment variable as u16 with a default value.
    fn parse_env_u16(var_name: &str, default: u16) -> ConfigResult<u16> {
        match Self::optional_var(var_name) {
            Some(val) => val.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a port number between 0-65535, got: {}", val),
            }),
            None => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            airtable_api_url: DEFAULT_API_URL.to_string(),
            base_id: None,
            tables: TableIds::default(),
            request_timeout: 30,
            host: "0.0.0.0".to_string(),
            port: 8000,
            environment: "development".to_string(),
        }
    }
}
