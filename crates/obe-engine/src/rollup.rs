//! Articulation rollup.
//!
//! Course level: for each outcome, the mean of the nonzero correlations of
//! the course's COs. Department level: the mean of the course values that
//! are defined. Missing and zero entries never enter a denominator.

use std::collections::BTreeMap;

use obe_core::entities::Course;
use obe_core::matrix::CourseMatrix;
use serde::Serialize;

use crate::aggregator::mean;

/// Mean for one outcome plus how many values went into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeValue {
    pub outcome_id: String,
    /// `None` when nothing contributed.
    pub value: Option<f64>,
    pub contributors: usize,
}

impl OutcomeValue {
    fn from_values(outcome_id: &str, values: &[f64]) -> Self {
        Self {
            outcome_id: outcome_id.to_string(),
            value: mean(values),
            contributors: values.len(),
        }
    }
}

/// Per-outcome averages for one course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseRollup {
    pub course_id: String,
    pub code: String,
    pub name: String,
    pub semester: u32,
    pub values: Vec<OutcomeValue>,
}

impl CourseRollup {
    #[must_use]
    pub fn value(&self, outcome_id: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|value| value.outcome_id == outcome_id)
            .and_then(|value| value.value)
    }
}

/// Roll one course's matrix slice up to its outcome averages.
///
/// Only rows for COs the course actually owns are read.
#[must_use]
pub fn course_rollup<'a>(
    course: &Course,
    slice: Option<&CourseMatrix>,
    outcome_ids: impl IntoIterator<Item = &'a str>,
) -> CourseRollup {
    let values = outcome_ids
        .into_iter()
        .map(|outcome_id| {
            let correlations: Vec<f64> = course
                .cos
                .iter()
                .filter_map(|co| slice.and_then(|slice| slice.get(&co.id)))
                .filter_map(|row| row.get(outcome_id))
                .filter(|value| value.is_mapped())
                .map(|value| f64::from(*value))
                .collect();
            OutcomeValue::from_values(outcome_id, &correlations)
        })
        .collect();

    CourseRollup {
        course_id: course.id.clone(),
        code: course.code.clone(),
        name: course.name.clone(),
        semester: course.semester,
        values,
    }
}

/// Average course values per outcome, skipping courses where the outcome
/// is undefined.
#[must_use]
pub fn aggregate_rollups<'a>(
    rollups: &[CourseRollup],
    outcome_ids: impl IntoIterator<Item = &'a str>,
) -> Vec<OutcomeValue> {
    outcome_ids
        .into_iter()
        .map(|outcome_id| {
            let values: Vec<f64> = rollups
                .iter()
                .filter_map(|rollup| rollup.value(outcome_id))
                .collect();
            OutcomeValue::from_values(outcome_id, &values)
        })
        .collect()
}

/// Which courses take part in a department rollup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CourseFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
}

impl CourseFilter {
    #[must_use]
    pub fn matches(&self, course: &Course) -> bool {
        self.semester.is_none_or(|semester| course.semester == semester)
            && self
                .department_id
                .as_deref()
                .is_none_or(|department| course.department_id.as_deref() == Some(department))
    }
}

/// Order rollups by semester, then course code.
pub fn sort_rollups(rollups: &mut [CourseRollup]) {
    rollups.sort_by(|a, b| {
        a.semester
            .cmp(&b.semester)
            .then_with(|| a.code.cmp(&b.code))
    });
}

/// Courses of one semester, for the program-level view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemesterGroup {
    pub semester: u32,
    pub courses: Vec<CourseRollup>,
}

/// Group rollups by ascending semester; courses within a semester keep
/// code order.
#[must_use]
pub fn group_by_semester(mut rollups: Vec<CourseRollup>) -> Vec<SemesterGroup> {
    sort_rollups(&mut rollups);
    let mut groups: BTreeMap<u32, Vec<CourseRollup>> = BTreeMap::new();
    for rollup in rollups {
        groups.entry(rollup.semester).or_default().push(rollup);
    }
    groups
        .into_iter()
        .map(|(semester, courses)| SemesterGroup { semester, courses })
        .collect()
}

#[cfg(test)]
mod tests {
    use obe_core::entities::CourseOutcome;
    use obe_core::matrix::ArticulationMatrix;
    use obe_core::values::Correlation;
    use pretty_assertions::assert_eq;

    use super::*;

    fn course(id: &str, code: &str, semester: u32, cos: usize) -> Course {
        Course {
            id: id.into(),
            code: code.into(),
            name: format!("Course {id}"),
            semester,
            cos: (1..=cos)
                .map(|n| CourseOutcome {
                    id: format!("{id}.{n}"),
                    description: String::new(),
                    k_level: "K2".into(),
                })
                .collect(),
            assigned_faculty_id: None,
            department_id: Some("D1".into()),
        }
    }

    #[test]
    fn zero_and_missing_are_excluded() {
        let c1 = course("C1", "CS1", 1, 3);
        let mut matrix = ArticulationMatrix::new();
        matrix.set("C1", "C1.1", "PO1", Correlation::MODERATE);
        matrix.set("C1", "C1.2", "PO1", Correlation::NONE);

        let rollup = course_rollup(&c1, matrix.course("C1"), ["PO1"]);
        assert_eq!(
            rollup.values,
            vec![OutcomeValue {
                outcome_id: "PO1".into(),
                value: Some(2.0),
                contributors: 1,
            }]
        );
    }

    #[test]
    fn zero_correlation_does_not_halve_average() {
        let c1 = course("C1", "CS1", 1, 2);
        let slice = CourseMatrix::from([
            (
                "C1.1".to_string(),
                [("PO1".to_string(), Correlation::HIGH)].into(),
            ),
            (
                "C1.2".to_string(),
                [("PO1".to_string(), Correlation::NONE)].into(),
            ),
        ]);
        let rollup = course_rollup(&c1, Some(&slice), ["PO1", "PO2"]);
        assert_eq!(rollup.value("PO1"), Some(3.0));
        assert_eq!(rollup.value("PO2"), None);
    }

    #[test]
    fn rows_for_foreign_cos_are_ignored() {
        let c1 = course("C1", "CS1", 1, 1);
        let slice = CourseMatrix::from([(
            "C2.1".to_string(),
            [("PO1".to_string(), Correlation::HIGH)].into(),
        )]);
        assert_eq!(course_rollup(&c1, Some(&slice), ["PO1"]).value("PO1"), None);
    }

    #[test]
    fn department_mean_skips_undefined_courses() {
        let mut matrix = ArticulationMatrix::new();
        matrix.set("C1", "C1.1", "PO1", Correlation::HIGH);
        matrix.set("C2", "C2.1", "PO1", Correlation::LOW);
        let courses = [
            course("C1", "CS1", 1, 1),
            course("C2", "CS2", 1, 1),
            course("C3", "CS3", 2, 1),
        ];
        let rollups: Vec<CourseRollup> = courses
            .iter()
            .map(|c| course_rollup(c, matrix.course(&c.id), ["PO1", "PO2"]))
            .collect();

        let values = aggregate_rollups(&rollups, ["PO1", "PO2"]);
        assert_eq!(values[0].value, Some(2.0));
        assert_eq!(values[0].contributors, 2);
        assert_eq!(values[1].value, None);
        assert_eq!(values[1].contributors, 0);
    }

    #[test]
    fn filter_by_semester_and_department() {
        let c = course("C1", "CS1", 3, 1);
        assert!(CourseFilter::default().matches(&c));
        assert!(CourseFilter {
            semester: Some(3),
            department_id: Some("D1".into()),
        }
        .matches(&c));
        assert!(!CourseFilter {
            semester: Some(4),
            department_id: None,
        }
        .matches(&c));
        assert!(!CourseFilter {
            semester: None,
            department_id: Some("D2".into()),
        }
        .matches(&c));
    }

    #[test]
    fn groups_sorted_by_semester_then_code() {
        let rollups = [
            course("C3", "MA200", 2, 1),
            course("C1", "CS300", 1, 1),
            course("C2", "CS100", 2, 1),
        ]
        .iter()
        .map(|c| course_rollup(c, None, ["PO1"]))
        .collect();

        let groups = group_by_semester(rollups);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].semester, 1);
        let codes: Vec<&str> = groups[1].courses.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, ["CS100", "MA200"]);
    }
}
