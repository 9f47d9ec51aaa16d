//! PO / PSO management.

use obe_core::entities::Outcome;
use obe_core::enums::OutcomeKind;
use obe_core::ids::next_outcome_id;

use crate::error::StoreError;
use crate::store::ArticulationStore;

impl ArticulationStore {
    /// Append a new outcome of `kind` with the next free id (`PO{n+1}` /
    /// `PSO{n+1}`). Without a description the kind's default is used.
    pub fn add_outcome(&mut self, kind: OutcomeKind, description: Option<&str>) -> Outcome {
        let state = self.state_mut();
        let (same, other) = match kind {
            OutcomeKind::Po => (&state.pos, &state.psos),
            OutcomeKind::Pso => (&state.psos, &state.pos),
        };
        let outcome = Outcome::new(
            next_outcome_id(kind, same, other),
            description.unwrap_or(kind.default_description()),
        );

        match kind {
            OutcomeKind::Po => state.pos.push(outcome.clone()),
            OutcomeKind::Pso => state.psos.push(outcome.clone()),
        }
        self.bump();
        tracing::debug!(outcome = %outcome.id, %kind, "outcome added");
        outcome
    }

    /// Replace an outcome's description.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownOutcome`] if no PO or PSO has that id.
    pub fn update_outcome(
        &mut self,
        outcome_id: &str,
        description: &str,
    ) -> Result<Outcome, StoreError> {
        self.require_outcome(outcome_id)?;
        let state = self.state_mut();
        let outcome = state
            .pos
            .iter_mut()
            .chain(state.psos.iter_mut())
            .find(|outcome| outcome.id == outcome_id)
            .ok_or_else(|| StoreError::unknown_outcome(outcome_id))?;

        if outcome.description == description {
            return Ok(outcome.clone());
        }
        outcome.description = description.to_string();
        let updated = outcome.clone();
        self.bump();
        Ok(updated)
    }

    /// Delete an outcome and every correlation that references it.
    /// Returns how many matrix entries were removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownOutcome`] if no PO or PSO has that id.
    pub fn delete_outcome(&mut self, outcome_id: &str) -> Result<usize, StoreError> {
        self.require_outcome(outcome_id)?;
        let state = self.state_mut();
        state.pos.retain(|outcome| outcome.id != outcome_id);
        state.psos.retain(|outcome| outcome.id != outcome_id);
        let removed = state.matrix.remove_outcome(outcome_id);
        state.retired.insert(outcome_id.to_string());
        self.bump();

        tracing::debug!(outcome = outcome_id, removed, "outcome deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use obe_core::entities::{Course, CourseOutcome};
    use obe_core::values::Correlation;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::state::ArticulationState;

    fn store() -> ArticulationStore {
        let course = Course {
            id: "C1".into(),
            code: "CS1".into(),
            name: "Course".into(),
            semester: 1,
            cos: vec![CourseOutcome {
                id: "C1.1".into(),
                description: String::new(),
                k_level: "K1".into(),
            }],
            assigned_faculty_id: None,
            department_id: None,
        };
        let mut state = ArticulationState {
            pos: vec![Outcome::new("PO1", "a"), Outcome::new("PO2", "b")],
            psos: vec![Outcome::new("PSO1", "c")],
            courses: vec![course],
            ..ArticulationState::default()
        };
        state.matrix.set("C1", "C1.1", "PO2", Correlation::HIGH);
        state.matrix.set("C1", "C1.1", "PSO1", Correlation::LOW);
        ArticulationStore::new(state)
    }

    #[test]
    fn add_uses_next_free_id() {
        let mut store = store();
        let po = store.add_outcome(OutcomeKind::Po, None);
        assert_eq!(po.id, "PO3");
        assert_eq!(po.description, "New Program Outcome");
        let pso = store.add_outcome(OutcomeKind::Pso, Some("Systems"));
        assert_eq!(pso.id, "PSO2");
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn add_after_delete_does_not_reuse_taken_id() {
        let mut store = store();
        store.delete_outcome("PO1").unwrap();
        assert_eq!(store.add_outcome(OutcomeKind::Po, None).id, "PO3");
    }

    #[test]
    fn update_changes_description_only_when_different() {
        let mut store = store();
        store.update_outcome("PO1", "a").unwrap();
        assert_eq!(store.revision(), 0);
        let updated = store.update_outcome("PSO1", "Networks").unwrap();
        assert_eq!(updated.description, "Networks");
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn delete_cascades_into_matrix() {
        let mut store = store();
        assert_eq!(store.delete_outcome("PO2").unwrap(), 1);
        assert!(store.outcome("PO2").is_none());
        assert_eq!(store.matrix().get("C1", "C1.1", "PO2"), Correlation::NONE);
        assert_eq!(store.matrix().get("C1", "C1.1", "PSO1"), Correlation::LOW);
    }

    #[test]
    fn delete_records_retired_id() {
        let mut store = store();
        store.delete_outcome("PSO1").unwrap();
        assert_eq!(store.add_outcome(OutcomeKind::Pso, None).id, "PSO1");
        assert!(store.state().retired.contains("PSO1"));
    }

    #[test]
    fn unknown_outcome_is_an_error() {
        let mut store = store();
        assert!(matches!(
            store.delete_outcome("PO9"),
            Err(StoreError::UnknownOutcome { .. })
        ));
        assert_eq!(store.revision(), 0);
    }
}
