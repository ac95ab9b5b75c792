//! Data layer for student records.
//!
//! Handles the record model, validation, and the JSON file the records live in.

mod error;
mod models;
mod storage;
mod store;

pub use error::{StoreError, ValidationError};
pub use models::{format_marks, validate_id, validate_marks, validate_year, Student, StudentUpdate};
pub use store::{LoadOutcome, RecordStore};
#[cfg(test)]
pub use storage::Storage;
