//! Per-call credential extraction.
//!
//! The streamable HTTP transport attaches the originating request's head to
//! every tool call. The bearer token is read from its `Authorization` header
//! and never stored beyond the call.

use crate::domain::Credential;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use rmcp::service::RequestContext;
use rmcp::RoleServer;

/// Credential carried by an HTTP request head, if any.
pub fn credential_from_parts(parts: Option<&Parts>) -> Option<Credential> {
    let value = parts?.headers.get(AUTHORIZATION)?.to_str().ok()?;
    Credential::from_authorization_header(value)
}

/// Credential of the HTTP request a tool call arrived on.
pub fn credential_from_context(ctx: &RequestContext<RoleServer>) -> Option<Credential> {
    credential_from_parts(ctx.extensions.get::<Parts>())
}
