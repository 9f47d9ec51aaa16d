//! `ArticulationStore` owns the articulation state. Mutation methods live
//! in per-entity modules as `impl ArticulationStore` blocks.

use chrono::{DateTime, Utc};
use obe_core::dataset::Dataset;
use obe_core::entities::{Course, Outcome};
use obe_core::matrix::ArticulationMatrix;
use serde::Serialize;

use crate::error::StoreError;
use crate::state::ArticulationState;

/// A committed baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub state: ArticulationState,
    pub revision: u64,
    pub committed_at: DateTime<Utc>,
}

/// Single owner of outcomes, courses and the articulation matrix.
///
/// Every change goes through a method on this type. Each change that
/// alters the state bumps [`revision`](Self::revision); cascades (an
/// outcome or CO taking its correlations with it) happen inside the same
/// call, so no reader ever sees a dangling matrix entry.
#[derive(Debug, Clone)]
pub struct ArticulationStore {
    state: ArticulationState,
    revision: u64,
    baseline: Snapshot,
}

impl ArticulationStore {
    /// Start from `state`, which also becomes the committed baseline.
    #[must_use]
    pub fn new(state: ArticulationState) -> Self {
        let baseline = Snapshot {
            state: state.clone(),
            revision: 0,
            committed_at: Utc::now(),
        };
        Self {
            state,
            revision: 0,
            baseline,
        }
    }

    /// Load the articulation part of a dataset. The matrix is canonicalized
    /// and checked against the dataset's courses and outcomes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Core`] if the dataset fails its integrity check.
    pub fn from_dataset(dataset: &Dataset) -> Result<Self, StoreError> {
        dataset.check_integrity()?;
        let mut state = ArticulationState::from_dataset(dataset);
        state.matrix.canonicalize();
        Ok(Self::new(state))
    }

    #[must_use]
    pub const fn state(&self) -> &ArticulationState {
        &self.state
    }

    #[must_use]
    pub fn pos(&self) -> &[Outcome] {
        &self.state.pos
    }

    #[must_use]
    pub fn psos(&self) -> &[Outcome] {
        &self.state.psos
    }

    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.state.courses
    }

    #[must_use]
    pub const fn matrix(&self) -> &ArticulationMatrix {
        &self.state.matrix
    }

    #[must_use]
    pub fn course(&self, course_id: &str) -> Option<&Course> {
        self.state.course(course_id)
    }

    #[must_use]
    pub fn outcome(&self, outcome_id: &str) -> Option<&Outcome> {
        self.state
            .outcomes()
            .find(|outcome| outcome.id == outcome_id)
    }

    /// Count of state changes since the store was created. [`discard`]
    /// winds it back to the baseline revision.
    ///
    /// [`discard`]: Self::discard
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub const fn baseline(&self) -> &Snapshot {
        &self.baseline
    }

    pub(crate) const fn state_mut(&mut self) -> &mut ArticulationState {
        &mut self.state
    }

    pub(crate) const fn bump(&mut self) {
        self.revision += 1;
    }

    pub(crate) fn require_course(&self, course_id: &str) -> Result<&Course, StoreError> {
        self.course(course_id)
            .ok_or_else(|| StoreError::unknown_course(course_id))
    }

    pub(crate) fn require_outcome(&self, outcome_id: &str) -> Result<&Outcome, StoreError> {
        self.outcome(outcome_id)
            .ok_or_else(|| StoreError::unknown_outcome(outcome_id))
    }

    pub(crate) fn restore(&mut self, state: ArticulationState, revision: u64) {
        self.state = state;
        self.revision = revision;
    }

    pub(crate) fn set_baseline(&mut self, baseline: Snapshot) {
        self.baseline = baseline;
    }
}
