//! Store error types.

use obe_core::errors::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unknown course: {course_id}")]
    UnknownCourse { course_id: String },

    #[error("Unknown outcome: {outcome_id}")]
    UnknownOutcome { outcome_id: String },

    #[error("{co_id} is not a course outcome of {course_id}")]
    UnknownCo { course_id: String, co_id: String },

    /// A mutation was well-formed but would break a store invariant.
    #[error("Mutation rejected: {0}")]
    Rejected(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    pub(crate) fn unknown_course(course_id: &str) -> Self {
        Self::UnknownCourse {
            course_id: course_id.to_string(),
        }
    }

    pub(crate) fn unknown_outcome(outcome_id: &str) -> Self {
        Self::UnknownOutcome {
            outcome_id: outcome_id.to_string(),
        }
    }

    pub(crate) fn unknown_co(course_id: &str, co_id: &str) -> Self {
        Self::UnknownCo {
            course_id: course_id.to_string(),
            co_id: co_id.to_string(),
        }
    }
}
