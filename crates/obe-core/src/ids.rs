//! Id formatting helpers for course outcomes and program outcomes.
//!
//! Course outcomes use `<courseId>.<n>`; POs and PSOs use `PO<n>` / `PSO<n>`.

use crate::entities::{Course, Outcome};
use crate::enums::OutcomeKind;

/// Separator between course id and CO number.
pub const CO_SEPARATOR: char = '.';

/// Format a course-outcome id.
#[must_use]
pub fn co_id(course_id: &str, number: u32) -> String {
    format!("{course_id}{CO_SEPARATOR}{number}")
}

/// Numeric suffix of a course-outcome id, if it has one.
#[must_use]
pub fn co_number(co_id: &str) -> Option<u32> {
    co_id
        .rsplit_once(CO_SEPARATOR)
        .and_then(|(_, suffix)| suffix.parse().ok())
}

/// Next CO number for a course: one past the highest parsable suffix, or 1.
#[must_use]
pub fn next_co_number(course: &Course) -> u32 {
    course
        .cos
        .iter()
        .filter_map(|co| co_number(&co.id))
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

/// Next free id for an outcome of `kind`, starting at `count + 1`.
///
/// Starts from the collection size and walks forward past ids that are
/// already taken in either set, so deleting `PO2` out of `PO1..PO3` and
/// adding again yields `PO4` rather than a duplicate `PO3`.
#[must_use]
pub fn next_outcome_id(kind: OutcomeKind, same_kind: &[Outcome], other_kind: &[Outcome]) -> String {
    let taken = |id: &str| {
        same_kind
            .iter()
            .chain(other_kind)
            .any(|outcome| outcome.id == id)
    };

    let mut number = same_kind.len() + 1;
    loop {
        let candidate = format!("{}{number}", kind.id_prefix());
        if !taken(&candidate) {
            return candidate;
        }
        number += 1;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entities::CourseOutcome;

    fn course_with(ids: &[&str]) -> Course {
        Course {
            id: "C001".into(),
            code: "CS201".into(),
            name: "Data Structures".into(),
            semester: 3,
            cos: ids
                .iter()
                .map(|id| CourseOutcome {
                    id: (*id).to_string(),
                    description: String::new(),
                    k_level: "K2".into(),
                })
                .collect(),
            assigned_faculty_id: None,
            department_id: None,
        }
    }

    #[test]
    fn co_ids_round_trip_number() {
        assert_eq!(co_id("C001", 4), "C001.4");
        assert_eq!(co_number("C001.4"), Some(4));
        assert_eq!(co_number("C001"), None);
        assert_eq!(co_number("C001.x"), None);
    }

    #[test]
    fn next_co_number_skips_gaps() {
        assert_eq!(next_co_number(&course_with(&[])), 1);
        assert_eq!(next_co_number(&course_with(&["C001.1", "C001.5", "C001.2"])), 6);
        assert_eq!(next_co_number(&course_with(&["C001.bad"])), 1);
    }

    #[test]
    fn next_outcome_id_avoids_collisions() {
        let pos = vec![Outcome::new("PO1", ""), Outcome::new("PO3", "")];
        assert_eq!(next_outcome_id(OutcomeKind::Po, &pos, &[]), "PO4");
        assert_eq!(next_outcome_id(OutcomeKind::Pso, &[], &pos), "PSO1");
    }
}
