//! Batched mutations applied all-or-nothing.

use obe_core::enums::OutcomeKind;
use obe_core::matrix::CourseMatrix;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::ArticulationStore;
use crate::updates::CoUpdate;

/// One change to the articulation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    AddOutcome {
        kind: OutcomeKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    UpdateOutcome {
        outcome_id: String,
        description: String,
    },
    DeleteOutcome {
        outcome_id: String,
    },
    AddCo {
        course_id: String,
    },
    UpdateCo {
        course_id: String,
        co_id: String,
        #[serde(flatten)]
        update: CoUpdate,
    },
    DeleteCo {
        course_id: String,
        co_id: String,
    },
    SetCorrelation {
        course_id: String,
        co_id: String,
        outcome_id: String,
        value: i64,
    },
    ReplaceCourseMatrix {
        course_id: String,
        matrix: CourseMatrix,
    },
}

/// What a single applied mutation produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MutationOutcome {
    /// An entity was created or edited; `id` names it.
    Saved { id: String },
    /// Matrix entries removed by a cascade or a zero write.
    Removed { entries: usize },
    /// Stored correlation value.
    Correlation { value: u8 },
    /// Entries stored for a replaced course slice.
    Replaced { entries: usize },
}

impl ArticulationStore {
    /// Apply one mutation.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying operation.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationOutcome, StoreError> {
        let outcome = match mutation {
            Mutation::AddOutcome { kind, description } => MutationOutcome::Saved {
                id: self.add_outcome(kind, description.as_deref()).id,
            },
            Mutation::UpdateOutcome {
                outcome_id,
                description,
            } => MutationOutcome::Saved {
                id: self.update_outcome(&outcome_id, &description)?.id,
            },
            Mutation::DeleteOutcome { outcome_id } => MutationOutcome::Removed {
                entries: self.delete_outcome(&outcome_id)?,
            },
            Mutation::AddCo { course_id } => MutationOutcome::Saved {
                id: self.add_co(&course_id)?.id,
            },
            Mutation::UpdateCo {
                course_id,
                co_id,
                update,
            } => MutationOutcome::Saved {
                id: self.update_co(&course_id, &co_id, update)?.id,
            },
            Mutation::DeleteCo { course_id, co_id } => MutationOutcome::Removed {
                entries: self.delete_co(&course_id, &co_id)?,
            },
            Mutation::SetCorrelation {
                course_id,
                co_id,
                outcome_id,
                value,
            } => MutationOutcome::Correlation {
                value: self
                    .set_correlation(&course_id, &co_id, &outcome_id, value)?
                    .value(),
            },
            Mutation::ReplaceCourseMatrix { course_id, matrix } => MutationOutcome::Replaced {
                entries: self.replace_course_matrix(&course_id, matrix)?,
            },
        };
        Ok(outcome)
    }

    /// Apply a batch in order. If any mutation fails, the state and
    /// revision are restored to what they were before the batch.
    ///
    /// # Errors
    ///
    /// Returns the first failing mutation's error.
    pub fn apply_all(
        &mut self,
        mutations: impl IntoIterator<Item = Mutation>,
    ) -> Result<Vec<MutationOutcome>, StoreError> {
        let saved = (self.state().clone(), self.revision());
        let mut outcomes = Vec::new();
        for (index, mutation) in mutations.into_iter().enumerate() {
            match self.apply(mutation) {
                Ok(outcome) => outcomes.push(outcome),
                Err(error) => {
                    tracing::warn!(index, %error, "mutation batch rolled back");
                    self.restore(saved.0, saved.1);
                    return Err(error);
                }
            }
        }
        Ok(outcomes)
    }
}
