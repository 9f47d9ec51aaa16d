//! The CO -> PO/PSO articulation matrix.
//!
//! Three levels: course id -> CO id -> outcome id -> [`Correlation`].
//! The stored form is canonical: a `0` correlation is never stored, so an
//! absent entry and an explicit zero compare equal.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::values::Correlation;

/// Correlations for one CO: outcome id -> correlation.
pub type CoRow = BTreeMap<String, Correlation>;

/// Correlations for one course: CO id -> row.
pub type CourseMatrix = BTreeMap<String, CoRow>;

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(transparent)]
pub struct ArticulationMatrix(BTreeMap<String, CourseMatrix>);

impl ArticulationMatrix {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Correlation for a cell, [`Correlation::NONE`] when absent.
    #[must_use]
    pub fn get(&self, course_id: &str, co_id: &str, outcome_id: &str) -> Correlation {
        self.0
            .get(course_id)
            .and_then(|course| course.get(co_id))
            .and_then(|row| row.get(outcome_id))
            .copied()
            .unwrap_or(Correlation::NONE)
    }

    #[must_use]
    pub fn course(&self, course_id: &str) -> Option<&CourseMatrix> {
        self.0.get(course_id)
    }

    pub fn courses(&self) -> impl Iterator<Item = (&String, &CourseMatrix)> {
        self.0.iter()
    }

    /// Set a cell. Setting [`Correlation::NONE`] removes the entry.
    /// Returns the previous value.
    pub fn set(
        &mut self,
        course_id: &str,
        co_id: &str,
        outcome_id: &str,
        value: Correlation,
    ) -> Correlation {
        if !value.is_mapped() {
            return self.remove(course_id, co_id, outcome_id);
        }
        self.0
            .entry(course_id.to_string())
            .or_default()
            .entry(co_id.to_string())
            .or_default()
            .insert(outcome_id.to_string(), value)
            .unwrap_or(Correlation::NONE)
    }

    fn remove(&mut self, course_id: &str, co_id: &str, outcome_id: &str) -> Correlation {
        let Some(course) = self.0.get_mut(course_id) else {
            return Correlation::NONE;
        };
        let Some(row) = course.get_mut(co_id) else {
            return Correlation::NONE;
        };
        let previous = row.remove(outcome_id).unwrap_or(Correlation::NONE);
        if row.is_empty() {
            course.remove(co_id);
        }
        if course.is_empty() {
            self.0.remove(course_id);
        }
        previous
    }

    /// Remove every entry for `outcome_id` across all courses.
    /// Returns how many entries were removed.
    pub fn remove_outcome(&mut self, outcome_id: &str) -> usize {
        let mut removed = 0;
        for course in self.0.values_mut() {
            for row in course.values_mut() {
                removed += usize::from(row.remove(outcome_id).is_some());
            }
            course.retain(|_, row| !row.is_empty());
        }
        self.0.retain(|_, course| !course.is_empty());
        removed
    }

    /// Remove the row for `co_id` in `course_id`. Returns how many entries
    /// the row held.
    pub fn remove_co(&mut self, course_id: &str, co_id: &str) -> usize {
        let Some(course) = self.0.get_mut(course_id) else {
            return 0;
        };
        let removed = course.remove(co_id).map_or(0, |row| row.len());
        if course.is_empty() {
            self.0.remove(course_id);
        }
        removed
    }

    /// Replace a course's slice, dropping zero entries.
    pub fn replace_course(&mut self, course_id: &str, slice: CourseMatrix) {
        let canonical: CourseMatrix = slice
            .into_iter()
            .map(|(co_id, row)| {
                let row: CoRow = row.into_iter().filter(|(_, v)| v.is_mapped()).collect();
                (co_id, row)
            })
            .filter(|(_, row)| !row.is_empty())
            .collect();

        if canonical.is_empty() {
            self.0.remove(course_id);
        } else {
            self.0.insert(course_id.to_string(), canonical);
        }
    }

    /// Drop any stored zero entries (possible in hand-written files).
    pub fn canonicalize(&mut self) {
        for course in self.0.values_mut() {
            for row in course.values_mut() {
                row.retain(|_, value| value.is_mapped());
            }
            course.retain(|_, row| !row.is_empty());
        }
        self.0.retain(|_, course| !course.is_empty());
    }

    /// Total number of stored (nonzero) entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.0
            .values()
            .flat_map(BTreeMap::values)
            .map(BTreeMap::len)
            .sum()
    }

    /// Iterate over every stored `(course, co, outcome, value)` cell.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &str, &str, Correlation)> {
        self.0.iter().flat_map(|(course_id, course)| {
            course.iter().flat_map(move |(co_id, row)| {
                row.iter().map(move |(outcome_id, value)| {
                    (course_id.as_str(), co_id.as_str(), outcome_id.as_str(), *value)
                })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> ArticulationMatrix {
        let mut matrix = ArticulationMatrix::new();
        matrix.set("C1", "C1.1", "PO1", Correlation::HIGH);
        matrix.set("C1", "C1.2", "PO1", Correlation::LOW);
        matrix.set("C1", "C1.2", "PO2", Correlation::MODERATE);
        matrix.set("C2", "C2.1", "PO1", Correlation::MODERATE);
        matrix
    }

    #[test]
    fn absent_and_zero_are_equivalent() {
        let mut matrix = sample();
        let before = matrix.clone();
        matrix.set("C1", "C1.1", "PO9", Correlation::NONE);
        assert_eq!(matrix, before);
        assert_eq!(matrix.get("C1", "C1.1", "PO9"), Correlation::NONE);
    }

    #[test]
    fn setting_zero_removes_entry() {
        let mut matrix = sample();
        let previous = matrix.set("C2", "C2.1", "PO1", Correlation::NONE);
        assert_eq!(previous, Correlation::MODERATE);
        assert!(matrix.course("C2").is_none());
        assert_eq!(matrix.entry_count(), 3);
    }

    #[test]
    fn remove_outcome_counts_entries() {
        let mut matrix = sample();
        assert_eq!(matrix.remove_outcome("PO1"), 3);
        assert_eq!(matrix.entry_count(), 1);
        assert_eq!(matrix.get("C1", "C1.2", "PO2"), Correlation::MODERATE);
    }

    #[test]
    fn remove_co_drops_row_only() {
        let mut matrix = sample();
        assert_eq!(matrix.remove_co("C1", "C1.2"), 2);
        assert_eq!(matrix.get("C1", "C1.1", "PO1"), Correlation::HIGH);
        assert_eq!(matrix.remove_co("C1", "C1.9"), 0);
    }

    #[test]
    fn replace_course_is_canonical() {
        let mut matrix = sample();
        let slice = CourseMatrix::from([(
            "C1.1".to_string(),
            CoRow::from([
                ("PO1".to_string(), Correlation::NONE),
                ("PO3".to_string(), Correlation::LOW),
            ]),
        )]);
        matrix.replace_course("C1", slice);
        assert_eq!(matrix.get("C1", "C1.1", "PO3"), Correlation::LOW);
        assert_eq!(matrix.get("C1", "C1.2", "PO2"), Correlation::NONE);
        assert_eq!(matrix.cells().count(), 2);
    }
}
