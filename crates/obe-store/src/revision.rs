//! Baseline snapshots and unsaved-change detection.

use chrono::Utc;

use crate::store::{ArticulationStore, Snapshot};

impl ArticulationStore {
    /// Whether the current state differs from the committed baseline.
    ///
    /// Unchanged revisions answer without comparing; otherwise the states
    /// are compared structurally, so an edit that is later reverted by hand
    /// does not count as a change.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        if self.revision() == self.baseline().revision {
            return false;
        }
        self.state() != &self.baseline().state
    }

    /// Make the current state the new baseline.
    pub fn commit(&mut self) -> &Snapshot {
        let snapshot = Snapshot {
            state: self.state().clone(),
            revision: self.revision(),
            committed_at: Utc::now(),
        };
        tracing::debug!(revision = snapshot.revision, "articulation state committed");
        self.set_baseline(snapshot);
        self.baseline()
    }

    /// Throw away uncommitted edits.
    pub fn discard(&mut self) {
        let baseline = self.baseline().clone();
        tracing::debug!(
            from = self.revision(),
            to = baseline.revision,
            "uncommitted edits discarded"
        );
        self.restore(baseline.state, baseline.revision);
    }
}

#[cfg(test)]
mod tests {
    use obe_core::entities::Outcome;
    use obe_core::enums::OutcomeKind;

    use super::*;
    use crate::state::ArticulationState;

    fn store() -> ArticulationStore {
        ArticulationStore::new(ArticulationState {
            pos: vec![Outcome::new("PO1", "Engineering knowledge")],
            ..ArticulationState::default()
        })
    }

    #[test]
    fn fresh_store_is_clean() {
        assert!(!store().has_unsaved_changes());
    }

    #[test]
    fn edit_then_commit() {
        let mut store = store();
        store.add_outcome(OutcomeKind::Pso, None);
        assert!(store.has_unsaved_changes());

        let snapshot = store.commit();
        assert_eq!(snapshot.revision, 1);
        assert_eq!(snapshot.state.psos.len(), 1);
        assert!(!store.has_unsaved_changes());
    }

    #[test]
    fn reverted_edit_is_not_a_change() {
        let mut store = store();
        store.update_outcome("PO1", "Changed").unwrap();
        store.update_outcome("PO1", "Engineering knowledge").unwrap();
        assert_eq!(store.revision(), 2);
        assert!(!store.has_unsaved_changes());
    }

    #[test]
    fn discard_restores_baseline() {
        let mut store = store();
        store.commit();
        store.delete_outcome("PO1").unwrap();
        store.discard();
        assert!(store.outcome("PO1").is_some());
        assert_eq!(store.revision(), 0);
        assert!(!store.has_unsaved_changes());
    }
}
