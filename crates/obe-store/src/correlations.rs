//! Correlation edits on the articulation matrix.

use obe_core::matrix::CourseMatrix;
use obe_core::values::Correlation;

use crate::error::StoreError;
use crate::store::ArticulationStore;

impl ArticulationStore {
    #[must_use]
    pub fn correlation(&self, course_id: &str, co_id: &str, outcome_id: &str) -> Correlation {
        self.matrix().get(course_id, co_id, outcome_id)
    }

    /// Set one cell, clamping `value` to 0-3. Setting 0 removes the entry.
    /// Returns the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownCourse`], [`StoreError::UnknownCo`] or
    /// [`StoreError::UnknownOutcome`] when the cell does not exist.
    pub fn set_correlation(
        &mut self,
        course_id: &str,
        co_id: &str,
        outcome_id: &str,
        value: i64,
    ) -> Result<Correlation, StoreError> {
        self.check_cell(course_id, co_id, outcome_id)?;
        let value = Correlation::clamped(value);
        let previous = self
            .state_mut()
            .matrix
            .set(course_id, co_id, outcome_id, value);
        if previous != value {
            self.bump();
            tracing::debug!(
                course = course_id,
                co = co_id,
                outcome = outcome_id,
                from = %previous,
                to = %value,
                "correlation set"
            );
        }
        Ok(value)
    }

    /// Replace a course's whole slice of the matrix. Zero entries are
    /// dropped. Returns how many entries were stored.
    ///
    /// # Errors
    ///
    /// Rejects the whole slice, leaving the matrix untouched, when any row
    /// names a CO outside the course or any entry names an unknown outcome.
    pub fn replace_course_matrix(
        &mut self,
        course_id: &str,
        slice: CourseMatrix,
    ) -> Result<usize, StoreError> {
        let course = self.require_course(course_id)?;
        for (co_id, row) in &slice {
            if !course.has_co(co_id) {
                return Err(StoreError::unknown_co(course_id, co_id));
            }
            if let Some(outcome_id) = row.keys().find(|id| !self.state().has_outcome(id)) {
                return Err(StoreError::unknown_outcome(outcome_id));
            }
        }

        let matrix = &mut self.state_mut().matrix;
        let before = matrix.course(course_id).cloned();
        matrix.replace_course(course_id, slice);
        let after = matrix.course(course_id);
        let stored = after.map_or(0, |course| course.values().map(|row| row.len()).sum());
        let changed = after != before.as_ref();

        if changed {
            self.bump();
        }
        tracing::debug!(course = course_id, stored, changed, "course matrix replaced");
        Ok(stored)
    }

    fn check_cell(&self, course_id: &str, co_id: &str, outcome_id: &str) -> Result<(), StoreError> {
        if !self.require_course(course_id)?.has_co(co_id) {
            return Err(StoreError::unknown_co(course_id, co_id));
        }
        self.require_outcome(outcome_id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use obe_core::entities::{Course, CourseOutcome, Outcome};
    use obe_core::matrix::CoRow;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::state::ArticulationState;

    fn store() -> ArticulationStore {
        let cos = ["C1.1", "C1.2"]
            .into_iter()
            .map(|id| CourseOutcome {
                id: id.into(),
                description: String::new(),
                k_level: "K1".into(),
            })
            .collect();
        ArticulationStore::new(ArticulationState {
            pos: vec![Outcome::new("PO1", "a"), Outcome::new("PO2", "b")],
            psos: vec![],
            courses: vec![Course {
                id: "C1".into(),
                code: "CS1".into(),
                name: "Course".into(),
                semester: 1,
                cos,
                assigned_faculty_id: None,
                department_id: None,
            }],
            ..ArticulationState::default()
        })
    }

    #[rstest]
    #[case(2, Correlation::MODERATE)]
    #[case(7, Correlation::HIGH)]
    #[case(-4, Correlation::NONE)]
    fn set_clamps(#[case] input: i64, #[case] expected: Correlation) {
        let mut store = store();
        assert_eq!(store.set_correlation("C1", "C1.1", "PO1", input).unwrap(), expected);
        assert_eq!(store.correlation("C1", "C1.1", "PO1"), expected);
    }

    #[test]
    fn setting_same_value_keeps_revision() {
        let mut store = store();
        store.set_correlation("C1", "C1.1", "PO1", 3).unwrap();
        store.set_correlation("C1", "C1.1", "PO1", 3).unwrap();
        assert_eq!(store.revision(), 1);
        store.set_correlation("C1", "C1.1", "PO1", 0).unwrap();
        assert_eq!(store.revision(), 2);
        assert_eq!(store.matrix().entry_count(), 0);
    }

    #[test]
    fn set_rejects_foreign_cells() {
        let mut store = store();
        assert!(matches!(
            store.set_correlation("C1", "C2.1", "PO1", 1),
            Err(StoreError::UnknownCo { .. })
        ));
        assert!(matches!(
            store.set_correlation("C1", "C1.1", "PSO9", 1),
            Err(StoreError::UnknownOutcome { .. })
        ));
    }

    #[test]
    fn replace_stores_canonical_slice() {
        let mut store = store();
        store.set_correlation("C1", "C1.2", "PO2", 2).unwrap();
        let slice = CourseMatrix::from([(
            "C1.1".to_string(),
            CoRow::from([
                ("PO1".to_string(), Correlation::HIGH),
                ("PO2".to_string(), Correlation::NONE),
            ]),
        )]);
        assert_eq!(store.replace_course_matrix("C1", slice).unwrap(), 1);
        assert_eq!(store.correlation("C1", "C1.2", "PO2"), Correlation::NONE);
        assert_eq!(store.correlation("C1", "C1.1", "PO1"), Correlation::HIGH);
    }

    #[test]
    fn replace_rejects_unknown_outcome_without_changes() {
        let mut store = store();
        store.set_correlation("C1", "C1.1", "PO1", 1).unwrap();
        let slice = CourseMatrix::from([(
            "C1.2".to_string(),
            CoRow::from([("PO7".to_string(), Correlation::LOW)]),
        )]);
        assert!(matches!(
            store.replace_course_matrix("C1", slice),
            Err(StoreError::UnknownOutcome { .. })
        ));
        assert_eq!(store.correlation("C1", "C1.1", "PO1"), Correlation::LOW);
        assert_eq!(store.revision(), 1);
    }
}
