//! Domain value objects and types.
//!
//! Type-safe wrappers for record identifiers and the per-call bearer
//! credential. These value objects validate at construction time so that
//! invalid data never reaches the request dispatcher.

pub mod credential;
pub mod errors;
pub mod record_id;

pub use credential::Credential;
pub use errors::ValidationError;
pub use record_id::RecordId;
