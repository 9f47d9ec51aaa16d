//! Raw student marks and the marks-entry action.
//!
//! A [`MarkSheet`] maps student ids to [`StudentMarks`]. Marks are only ever
//! changed through [`MarkSheet::record`] / [`MarkSheet::clear`], which clamp
//! to the schema's maxima, or through [`MarkSheet::conform_to`] for sheets
//! supplied from outside. Missing marks count as `0` in aggregation.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::schema::{AssessmentSchema, InternalTest};
use crate::values::clamp_mark;

/// One student's raw marks for a course.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StudentMarks {
    /// Internal test id -> part id -> mark.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub internal: BTreeMap<String, BTreeMap<String, f64>>,
    /// Supplementary item id -> mark.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub supplementary: BTreeMap<String, f64>,
    /// Semester-end exam score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub see: Option<f64>,
}

impl StudentMarks {
    #[must_use]
    pub fn internal_mark(&self, test_id: &str, part_id: &str) -> f64 {
        self.internal
            .get(test_id)
            .and_then(|parts| parts.get(part_id))
            .copied()
            .unwrap_or(0.0)
    }

    /// Sum of this student's marks over the parts of `test`.
    #[must_use]
    pub fn internal_total(&self, test: &InternalTest) -> f64 {
        test.parts
            .iter()
            .map(|part| self.internal_mark(&test.id, &part.id))
            .sum()
    }

    #[must_use]
    pub fn supplementary_mark(&self, item_id: &str) -> f64 {
        self.supplementary.get(item_id).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn see_mark(&self) -> f64 {
        self.see.unwrap_or(0.0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.internal.values().all(BTreeMap::is_empty)
            && self.supplementary.is_empty()
            && self.see.is_none()
    }
}

/// Addresses a single markable cell of an assessment schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkKey {
    Internal { test: String, part: String },
    Supplementary { item: String },
    SemesterEnd,
}

impl MarkKey {
    /// Maximum mark for this cell under `schema`, or `None` if the schema
    /// has no such cell.
    #[must_use]
    pub fn max(&self, schema: &AssessmentSchema) -> Option<f64> {
        match self {
            Self::Internal { test, part } => schema
                .internal_test(test)
                .and_then(|test| test.part(part))
                .map(|part| part.max),
            Self::Supplementary { item } => schema.supplementary_item(item).map(|item| item.max),
            Self::SemesterEnd => Some(schema.see().total),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Internal { test, part } => format!("{test}/{part}"),
            Self::Supplementary { item } => item.clone(),
            Self::SemesterEnd => "see".to_string(),
        }
    }
}

/// Marks for one course: student id -> marks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(transparent)]
pub struct MarkSheet(BTreeMap<String, StudentMarks>);

impl MarkSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, student_id: &str) -> Option<&StudentMarks> {
        self.0.get(student_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StudentMarks)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Record a mark, clamped to `[0, max]` for the addressed cell.
    ///
    /// Returns the value actually stored.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when `key` does not exist in
    /// `schema`.
    pub fn record(
        &mut self,
        schema: &AssessmentSchema,
        student_id: &str,
        key: &MarkKey,
        value: f64,
    ) -> Result<f64, CoreError> {
        let max = key.max(schema).ok_or_else(|| {
            CoreError::Validation(format!(
                "course {} has no assessment cell '{}'",
                schema.course_id(),
                key.describe()
            ))
        })?;

        let stored = clamp_mark(value, max);
        if (stored - value).abs() > f64::EPSILON {
            tracing::debug!(
                student = student_id,
                cell = %key.describe(),
                entered = value,
                stored,
                "mark clamped on entry"
            );
        }

        let marks = self.0.entry(student_id.to_string()).or_default();
        match key {
            MarkKey::Internal { test, part } => {
                marks
                    .internal
                    .entry(test.clone())
                    .or_default()
                    .insert(part.clone(), stored);
            }
            MarkKey::Supplementary { item } => {
                marks.supplementary.insert(item.clone(), stored);
            }
            MarkKey::SemesterEnd => marks.see = Some(stored),
        }
        Ok(stored)
    }

    /// Remove a recorded mark. Returns whether anything was removed.
    pub fn clear(&mut self, student_id: &str, key: &MarkKey) -> bool {
        let Some(marks) = self.0.get_mut(student_id) else {
            return false;
        };
        match key {
            MarkKey::Internal { test, part } => marks
                .internal
                .get_mut(test)
                .and_then(|parts| parts.remove(part))
                .is_some(),
            MarkKey::Supplementary { item } => marks.supplementary.remove(item).is_some(),
            MarkKey::SemesterEnd => marks.see.take().is_some(),
        }
    }

    /// Clamp every stored mark to the maxima of `schema` and drop marks for
    /// cells the schema does not define. Returns the number of values that
    /// were changed or dropped.
    pub fn conform_to(&mut self, schema: &AssessmentSchema) -> usize {
        let mut adjusted = 0;
        for (student_id, marks) in &mut self.0 {
            for (test_id, parts) in &mut marks.internal {
                let test = schema.internal_test(test_id);
                parts.retain(|part_id, value| {
                    match test.and_then(|test| test.part(part_id)) {
                        Some(part) => {
                            adjusted += usize::from(conform_value(value, part.max));
                            true
                        }
                        None => {
                            tracing::warn!(
                                student = %student_id,
                                cell = %format!("{test_id}/{part_id}"),
                                "dropping mark for unknown assessment part"
                            );
                            adjusted += 1;
                            false
                        }
                    }
                });
            }

            marks.supplementary.retain(|item_id, value| {
                match schema.supplementary_item(item_id) {
                    Some(item) => {
                        adjusted += usize::from(conform_value(value, item.max));
                        true
                    }
                    None => {
                        tracing::warn!(
                            student = %student_id,
                            cell = %item_id,
                            "dropping mark for unknown supplementary item"
                        );
                        adjusted += 1;
                        false
                    }
                }
            });

            if let Some(see) = marks.see.as_mut() {
                adjusted += usize::from(conform_value(see, schema.see().total));
            }
        }
        adjusted
    }
}

fn conform_value(value: &mut f64, max: f64) -> bool {
    let clamped = clamp_mark(*value, max);
    let changed = (clamped - *value).abs() > f64::EPSILON || value.is_nan();
    *value = clamped;
    changed
}

impl FromIterator<(String, StudentMarks)> for MarkSheet {
    fn from_iter<I: IntoIterator<Item = (String, StudentMarks)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::schema::{
        AssessmentPart, AssessmentSchemaConfig, SchemaDefaults, SemesterEndExam,
        SupplementaryItem,
    };

    fn schema() -> AssessmentSchema {
        let config = AssessmentSchemaConfig {
            target_percentage: Some(50.0),
            attainment_levels: None,
            cos: vec!["CO1".into()],
            internal_tests: vec![InternalTest {
                id: "ia1".into(),
                name: "IA-1".into(),
                total: 10.0,
                parts: vec![AssessmentPart {
                    id: "1A".into(),
                    max: 10.0,
                    co: "CO1".into(),
                }],
            }],
            supplementary: vec![SupplementaryItem {
                id: "quiz".into(),
                name: "Quiz".into(),
                max: 5.0,
                co: "CO1".into(),
            }],
            see: SemesterEndExam {
                name: "SEE".into(),
                total: 50.0,
                co_mapping: BTreeMap::from([("CO1".into(), 50.0)]),
            },
        };
        AssessmentSchema::validate("C1", config, &SchemaDefaults::default()).unwrap()
    }

    #[test]
    fn record_clamps_to_part_maximum() {
        let schema = schema();
        let mut sheet = MarkSheet::new();
        let key = MarkKey::Internal {
            test: "ia1".into(),
            part: "1A".into(),
        };

        let stored = sheet.record(&schema, "s1", &key, 14.0).unwrap();
        assert!((stored - 10.0).abs() < f64::EPSILON);
        assert!((sheet.get("s1").unwrap().internal_mark("ia1", "1A") - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn record_rejects_unknown_cell() {
        let schema = schema();
        let mut sheet = MarkSheet::new();
        let key = MarkKey::Supplementary {
            item: "missing".into(),
        };
        assert!(matches!(
            sheet.record(&schema, "s1", &key, 1.0),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn clear_removes_mark() {
        let schema = schema();
        let mut sheet = MarkSheet::new();
        sheet
            .record(&schema, "s1", &MarkKey::SemesterEnd, 40.0)
            .unwrap();
        assert!(sheet.clear("s1", &MarkKey::SemesterEnd));
        assert!(!sheet.clear("s1", &MarkKey::SemesterEnd));
        assert!(sheet.get("s1").unwrap().is_empty());
    }

    #[test]
    fn conform_clamps_and_drops_unknown_cells() {
        let schema = schema();
        let marks = StudentMarks {
            internal: BTreeMap::from([(
                "ia1".to_string(),
                BTreeMap::from([("1A".to_string(), 12.0), ("9Z".to_string(), 3.0)]),
            )]),
            supplementary: BTreeMap::from([("quiz".to_string(), -2.0)]),
            see: Some(45.0),
        };
        let mut sheet: MarkSheet = [("s1".to_string(), marks)].into_iter().collect();

        assert_eq!(sheet.conform_to(&schema), 3);
        let marks = sheet.get("s1").unwrap();
        assert_eq!(marks.internal["ia1"].len(), 1);
        assert!((marks.internal_mark("ia1", "1A") - 10.0).abs() < f64::EPSILON);
        assert!(marks.supplementary_mark("quiz").abs() < f64::EPSILON);
        assert!((marks.see_mark() - 45.0).abs() < f64::EPSILON);
    }
}
