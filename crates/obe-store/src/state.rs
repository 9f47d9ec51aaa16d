//! The state the articulation store owns, and its exchange with a dataset.

use std::collections::BTreeSet;

use obe_core::dataset::Dataset;
use obe_core::entities::{Course, Outcome};
use obe_core::matrix::ArticulationMatrix;
use serde::{Deserialize, Serialize};

/// Outcomes, courses and the matrix linking them. Compared structurally to
/// detect unsaved changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticulationState {
    pub pos: Vec<Outcome>,
    pub psos: Vec<Outcome>,
    pub courses: Vec<Course>,
    pub matrix: ArticulationMatrix,
    /// Ids of outcomes deleted since this state was loaded. A later outcome
    /// may reuse one of these ids; it must not inherit the old ratings.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub retired: BTreeSet<String>,
}

impl ArticulationState {
    #[must_use]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            pos: dataset.pos.clone(),
            psos: dataset.psos.clone(),
            courses: dataset.courses.clone(),
            matrix: dataset.matrix.clone(),
            retired: BTreeSet::new(),
        }
    }

    /// Copy this state into `dataset`. Survey ratings for outcomes that no
    /// longer exist, or that were deleted and whose id was handed out
    /// again, are dropped.
    pub fn write_into(&self, dataset: &mut Dataset) {
        let kept: BTreeSet<&str> = self.outcome_ids().collect();
        let mut dropped: BTreeSet<String> = dataset
            .outcomes()
            .filter(|outcome| !kept.contains(outcome.id.as_str()))
            .map(|outcome| outcome.id.clone())
            .collect();
        dropped.extend(self.retired.iter().cloned());
        for outcome_id in &dropped {
            let removed = dataset.surveys.remove_outcome(outcome_id);
            tracing::debug!(outcome = %outcome_id, removed, "dropped survey ratings");
        }

        dataset.pos.clone_from(&self.pos);
        dataset.psos.clone_from(&self.psos);
        dataset.courses.clone_from(&self.courses);
        dataset.matrix.clone_from(&self.matrix);
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &Outcome> {
        self.pos.iter().chain(&self.psos)
    }

    pub fn outcome_ids(&self) -> impl Iterator<Item = &str> {
        self.outcomes().map(|outcome| outcome.id.as_str())
    }

    #[must_use]
    pub fn has_outcome(&self, outcome_id: &str) -> bool {
        self.outcomes().any(|outcome| outcome.id == outcome_id)
    }

    #[must_use]
    pub fn course(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|course| course.id == course_id)
    }

    pub(crate) fn course_mut(&mut self, course_id: &str) -> Option<&mut Course> {
        self.courses.iter_mut().find(|course| course.id == course_id)
    }
}
