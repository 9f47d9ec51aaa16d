//! Cross-cutting error types for OBE crates.
//!
//! Data-quality conditions inside the attainment pipeline are not errors:
//! they are reported as sentinel values by `obe-engine`. The variants here
//! cover load-time failures (bad files, malformed schemas, dangling
//! references) and rejected entry actions.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can be raised by any OBE crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// An assessment schema failed load-time validation.
    #[error("Invalid assessment schema for course {course_id}: {reason}")]
    InvalidSchema { course_id: String, reason: String },

    /// Data failed validation (format, uniqueness, references).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Reading or writing a dataset file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML dataset could not be parsed.
    #[error("TOML parse error: {0}")]
    TomlDecode(#[from] toml::de::Error),

    /// TOML dataset could not be written.
    #[error("TOML write error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    /// JSON dataset could not be parsed or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    pub(crate) fn not_found(entity_type: &str, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    pub(crate) fn schema(course_id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            course_id: course_id.to_string(),
            reason: reason.into(),
        }
    }
}
