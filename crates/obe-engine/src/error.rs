//! Engine error types.
//!
//! Degenerate data never produces an error here; it is reported through
//! `Option` values and [`crate::CourseStatus`]. Errors only cover requests
//! that cannot be answered at all.

use obe_core::errors::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Lookup or schema validation failed in the dataset.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A department filter names a department the dataset does not have.
    #[error("Unknown department: {department_id}")]
    UnknownDepartment { department_id: String },
}
