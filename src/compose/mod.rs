//! Filter and field composition.
//!
//! - **formula**: optional search parameters to a filter expression
//! - **update**: optional field values to a partial update map

pub mod formula;
pub mod update;

pub use formula::{FilterBuilder, Formula};
pub use update::{FieldUpdate, Normalization};
