//! Data models for the backing store's wire format.
//!
//! Records are passed through to tool callers mostly untouched, so the read
//! side keeps field values as raw JSON. The write side uses [`FieldValue`]
//! to restrict what a tool can send.

pub mod fields;
pub mod record;
pub mod schema;

pub use fields::{FieldMap, FieldValue};
pub use record::{DeletedRecord, Record, RecordList};
pub use schema::{BaseSchema, FieldSchema, TableSchema};
