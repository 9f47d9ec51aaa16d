//! Course outcome management.

use obe_core::entities::CourseOutcome;
use obe_core::ids::{co_id, next_co_number};

use crate::error::StoreError;
use crate::store::ArticulationStore;
use crate::updates::CoUpdate;

const NEW_CO_DESCRIPTION: &str = "New Course Outcome";
const NEW_CO_K_LEVEL: &str = "Kx";

impl ArticulationStore {
    /// Append a CO to a course, numbered one past the highest existing
    /// suffix.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownCourse`] for an unknown course.
    pub fn add_co(&mut self, course_id: &str) -> Result<CourseOutcome, StoreError> {
        let number = next_co_number(self.require_course(course_id)?);
        let co = CourseOutcome {
            id: co_id(course_id, number),
            description: NEW_CO_DESCRIPTION.to_string(),
            k_level: NEW_CO_K_LEVEL.to_string(),
        };

        self.state_mut()
            .course_mut(course_id)
            .ok_or_else(|| StoreError::unknown_course(course_id))?
            .cos
            .push(co.clone());
        self.bump();
        tracing::debug!(course = course_id, co = %co.id, "course outcome added");
        Ok(co)
    }

    /// Edit a CO's description or knowledge level.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownCourse`] or [`StoreError::UnknownCo`].
    pub fn update_co(
        &mut self,
        course_id: &str,
        co_id: &str,
        update: CoUpdate,
    ) -> Result<CourseOutcome, StoreError> {
        let course = self
            .state_mut()
            .course_mut(course_id)
            .ok_or_else(|| StoreError::unknown_course(course_id))?;
        let co = course
            .cos
            .iter_mut()
            .find(|co| co.id == co_id)
            .ok_or_else(|| StoreError::unknown_co(course_id, co_id))?;

        let before = co.clone();
        if let Some(description) = update.description {
            co.description = description;
        }
        if let Some(k_level) = update.k_level {
            co.k_level = k_level;
        }
        let after = co.clone();

        if after != before {
            self.bump();
        }
        Ok(after)
    }

    /// Delete a CO and its matrix row. Returns how many matrix entries the
    /// row held.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownCourse`] or [`StoreError::UnknownCo`].
    pub fn delete_co(&mut self, course_id: &str, co_id: &str) -> Result<usize, StoreError> {
        if !self.require_course(course_id)?.has_co(co_id) {
            return Err(StoreError::unknown_co(course_id, co_id));
        }

        let state = self.state_mut();
        if let Some(course) = state.course_mut(course_id) {
            course.cos.retain(|co| co.id != co_id);
        }
        let removed = state.matrix.remove_co(course_id, co_id);
        self.bump();

        tracing::debug!(course = course_id, co = co_id, removed, "course outcome deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use obe_core::entities::{Course, Outcome};
    use obe_core::values::Correlation;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::state::ArticulationState;
    use crate::updates::CoUpdateBuilder;

    fn co(id: &str) -> CourseOutcome {
        CourseOutcome {
            id: id.into(),
            description: format!("about {id}"),
            k_level: "K2".into(),
        }
    }

    fn store(cos: Vec<CourseOutcome>) -> ArticulationStore {
        let mut state = ArticulationState {
            pos: vec![Outcome::new("PO1", "a")],
            courses: vec![Course {
                id: "C7".into(),
                code: "EE7".into(),
                name: "Circuits".into(),
                semester: 2,
                cos,
                assigned_faculty_id: None,
                department_id: None,
            }],
            ..ArticulationState::default()
        };
        state.matrix.set("C7", "C7.1", "PO1", Correlation::MODERATE);
        ArticulationStore::new(state)
    }

    #[test]
    fn add_numbers_past_highest_suffix() {
        let mut store = store(vec![co("C7.1"), co("C7.4"), co("C7.x")]);
        let added = store.add_co("C7").unwrap();
        assert_eq!(added.id, "C7.5");
        assert_eq!(added.description, "New Course Outcome");
        assert_eq!(added.k_level, "Kx");
        assert_eq!(store.course("C7").unwrap().cos.len(), 4);
    }

    #[test]
    fn first_co_is_numbered_one() {
        let mut store = store(vec![]);
        assert_eq!(store.add_co("C7").unwrap().id, "C7.1");
    }

    #[test]
    fn update_applies_given_fields() {
        let mut store = store(vec![co("C7.1")]);
        let update = CoUpdateBuilder::new().k_level("K4").build();
        let updated = store.update_co("C7", "C7.1", update).unwrap();
        assert_eq!(updated.k_level, "K4");
        assert_eq!(updated.description, "about C7.1");
        assert_eq!(store.revision(), 1);

        store.update_co("C7", "C7.1", CoUpdate::default()).unwrap();
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn delete_removes_row() {
        let mut store = store(vec![co("C7.1"), co("C7.2")]);
        assert_eq!(store.delete_co("C7", "C7.1").unwrap(), 1);
        assert!(store.matrix().course("C7").is_none());
        assert!(matches!(
            store.delete_co("C7", "C7.1"),
            Err(StoreError::UnknownCo { .. })
        ));
        assert!(matches!(
            store.add_co("C404"),
            Err(StoreError::UnknownCourse { .. })
        ));
    }
}
