//! CO aggregator.
//!
//! For each student, sums marks per CO across internal test parts,
//! supplementary items and the SEE share, normalizes against the CO's
//! maximum onto the 0-3 scale, and compares against the pass threshold.
//! A CO whose maximum is 0 has no score rather than a score of 0.

use std::collections::BTreeMap;

use obe_core::entities::Student;
use obe_core::enums::AssessmentKind;
use obe_core::marks::StudentMarks;
use obe_core::schema::AssessmentSchema;
use serde::Serialize;

use crate::FULL_SCALE;

/// Coarse score for a passed assessment.
pub const ASSESSMENT_PASS_SCORE: u8 = 3;
/// Coarse score for a failed assessment.
pub const ASSESSMENT_FAIL_SCORE: u8 = 1;

/// Maximum attainable mark per CO: part maxima, supplementary maxima and
/// the SEE weight for the CO. Every schema CO is present, possibly at 0.
#[must_use]
pub fn max_co_marks(schema: &AssessmentSchema) -> BTreeMap<String, f64> {
    let mut maxima = zeroed(schema);
    for test in schema.internal_tests() {
        for part in &test.parts {
            *maxima.entry(part.co.clone()).or_default() += part.max;
        }
    }
    for item in schema.supplementary() {
        *maxima.entry(item.co.clone()).or_default() += item.max;
    }
    let see = schema.see();
    for co in schema.cos() {
        *maxima.entry(co.clone()).or_default() += see.weight(co);
    }
    maxima
}

/// A student's raw marks per CO, with the SEE score split across COs in
/// proportion to `weight / total`.
#[must_use]
pub fn raw_co_marks(schema: &AssessmentSchema, marks: &StudentMarks) -> BTreeMap<String, f64> {
    let mut raw = zeroed(schema);
    for test in schema.internal_tests() {
        for part in &test.parts {
            *raw.entry(part.co.clone()).or_default() += marks.internal_mark(&test.id, &part.id);
        }
    }
    for item in schema.supplementary() {
        *raw.entry(item.co.clone()).or_default() += marks.supplementary_mark(&item.id);
    }
    let see = schema.see();
    if see.total > 0.0 {
        let score = marks.see_mark();
        for co in schema.cos() {
            *raw.entry(co.clone()).or_default() += score * see.weight(co) / see.total;
        }
    }
    raw
}

fn zeroed(schema: &AssessmentSchema) -> BTreeMap<String, f64> {
    schema.cos().iter().map(|co| (co.clone(), 0.0)).collect()
}

/// Raw CO marks on the 0-3 scale; `None` when the CO has no attainable marks.
#[must_use]
pub fn normalize(raw: f64, max: f64) -> Option<f64> {
    (max > 0.0).then(|| raw / max * FULL_SCALE)
}

/// Binary pass/fail of one assessment against the target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentOutcome {
    pub assessment_id: String,
    pub kind: AssessmentKind,
    pub obtained: f64,
    pub total: f64,
    pub passed: bool,
    /// 3 when passed, 1 otherwise.
    pub score: u8,
}

impl AssessmentOutcome {
    /// `None` for an assessment with no marks to earn.
    #[must_use]
    pub fn evaluate(
        assessment_id: &str,
        kind: AssessmentKind,
        obtained: f64,
        total: f64,
        target_fraction: f64,
    ) -> Option<Self> {
        if total <= 0.0 {
            return None;
        }
        let passed = obtained >= total * target_fraction;
        Some(Self {
            assessment_id: assessment_id.to_string(),
            kind,
            obtained,
            total,
            passed,
            score: if passed {
                ASSESSMENT_PASS_SCORE
            } else {
                ASSESSMENT_FAIL_SCORE
            },
        })
    }
}

/// One student's result on one CO.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoScore {
    pub co: String,
    pub raw: f64,
    /// Normalized 0-3 score; `None` when the CO is not computable.
    pub score: Option<f64>,
    pub passed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentCoResult {
    pub student_id: String,
    pub name: String,
    pub usn: String,
    pub cos: Vec<CoScore>,
    /// Mean score over computable COs.
    pub average: Option<f64>,
    pub passed: Option<bool>,
    pub assessments: Vec<AssessmentOutcome>,
}

impl StudentCoResult {
    #[must_use]
    pub fn co(&self, co: &str) -> Option<&CoScore> {
        self.cos.iter().find(|score| score.co == co)
    }

    #[must_use]
    pub fn assessment(&self, assessment_id: &str) -> Option<&AssessmentOutcome> {
        self.assessments
            .iter()
            .find(|outcome| outcome.assessment_id == assessment_id)
    }
}

/// Scores students against one validated schema.
#[derive(Debug, Clone)]
pub struct CoAggregator<'a> {
    schema: &'a AssessmentSchema,
    maxima: BTreeMap<String, f64>,
    threshold: f64,
}

impl<'a> CoAggregator<'a> {
    #[must_use]
    pub fn new(schema: &'a AssessmentSchema) -> Self {
        Self {
            schema,
            maxima: max_co_marks(schema),
            threshold: FULL_SCALE * schema.target_fraction(),
        }
    }

    #[must_use]
    pub const fn maxima(&self) -> &BTreeMap<String, f64> {
        &self.maxima
    }

    #[must_use]
    pub fn max_marks(&self, co: &str) -> f64 {
        self.maxima.get(co).copied().unwrap_or(0.0)
    }

    /// Normalized score a student must reach on a CO, and on average.
    #[must_use]
    pub const fn pass_threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether at least one CO has attainable marks.
    #[must_use]
    pub fn any_computable(&self) -> bool {
        self.maxima.values().any(|max| *max > 0.0)
    }

    /// Score one student. Missing marks count as 0.
    #[must_use]
    pub fn aggregate(&self, student: &Student, marks: Option<&StudentMarks>) -> StudentCoResult {
        let fallback = StudentMarks::default();
        let marks = marks.unwrap_or_else(|| {
            tracing::warn!(
                course = self.schema.course_id(),
                student = %student.id,
                "no mark record, counting every mark as 0"
            );
            &fallback
        });

        let raw = raw_co_marks(self.schema, marks);
        let cos: Vec<CoScore> = self
            .schema
            .cos()
            .iter()
            .map(|co| {
                let raw = raw.get(co).copied().unwrap_or(0.0);
                let score = normalize(raw, self.max_marks(co));
                CoScore {
                    co: co.clone(),
                    raw,
                    score,
                    passed: score.map(|score| score >= self.threshold),
                }
            })
            .collect();

        let computable: Vec<f64> = cos.iter().filter_map(|co| co.score).collect();
        let average = mean(&computable);

        StudentCoResult {
            student_id: student.id.clone(),
            name: student.name.clone(),
            usn: student.usn.clone(),
            cos,
            average,
            passed: average.map(|average| average >= self.threshold),
            assessments: self.assessments(marks),
        }
    }

    fn assessments(&self, marks: &StudentMarks) -> Vec<AssessmentOutcome> {
        let target = self.schema.target_fraction();
        let see = self.schema.see();
        self.schema
            .internal_tests()
            .iter()
            .filter_map(|test| {
                AssessmentOutcome::evaluate(
                    &test.id,
                    AssessmentKind::Internal,
                    marks.internal_total(test),
                    test.total,
                    target,
                )
            })
            .chain(AssessmentOutcome::evaluate(
                &see.name,
                AssessmentKind::SemesterEnd,
                marks.see_mark(),
                see.total,
                target,
            ))
            .collect()
    }
}

/// Arithmetic mean, `None` for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    // Slices here hold a handful of COs or courses.
    #[allow(clippy::cast_precision_loss)]
    let count = values.len() as f64;
    Some(values.iter().sum::<f64>() / count)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use obe_core::schema::{
        AssessmentPart, AssessmentSchemaConfig, InternalTest, SchemaDefaults, SemesterEndExam,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn approx(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    /// Two COs with 20 marks each, all from one internal test.
    fn two_co_schema(target: f64) -> AssessmentSchema {
        let config = AssessmentSchemaConfig {
            target_percentage: Some(target),
            ..two_co_schema_config()
        };
        AssessmentSchema::validate("C1", config, &SchemaDefaults::default()).unwrap()
    }

    fn student() -> Student {
        Student {
            id: "S".into(),
            name: "Student".into(),
            usn: "USN1".into(),
        }
    }

    fn marks(co1: f64, co2: f64) -> StudentMarks {
        StudentMarks {
            internal: BTreeMap::from([(
                "ia1".to_string(),
                BTreeMap::from([("1A".to_string(), co1), ("1B".to_string(), co2)]),
            )]),
            ..StudentMarks::default()
        }
    }

    #[test]
    fn scenario_average_on_threshold_passes() {
        let schema = two_co_schema(50.0);
        let aggregator = CoAggregator::new(&schema);
        assert_eq!(
            aggregator.maxima(),
            &BTreeMap::from([("CO1".to_string(), 20.0), ("CO2".to_string(), 20.0)])
        );

        let result = aggregator.aggregate(&student(), Some(&marks(15.0, 5.0)));
        assert!(approx(result.co("CO1").unwrap().score.unwrap(), 2.25));
        assert!(approx(result.co("CO2").unwrap().score.unwrap(), 0.75));
        assert_eq!(result.co("CO1").unwrap().passed, Some(true));
        assert_eq!(result.co("CO2").unwrap().passed, Some(false));
        assert!(approx(result.average.unwrap(), 1.5));
        assert_eq!(result.passed, Some(true));
    }

    #[rstest]
    #[case(1.0)]
    #[case(50.0)]
    #[case(99.5)]
    #[case(100.0)]
    fn full_marks_score_exactly_three(#[case] target: f64) {
        let schema = two_co_schema(target);
        let result = CoAggregator::new(&schema).aggregate(&student(), Some(&marks(20.0, 20.0)));
        for co in &result.cos {
            assert_eq!(co.score, Some(3.0));
            assert_eq!(co.passed, Some(true));
        }
        assert_eq!(result.passed, Some(true));
    }

    #[test]
    fn missing_record_counts_as_zero() {
        let schema = two_co_schema(50.0);
        let result = CoAggregator::new(&schema).aggregate(&student(), None);
        assert_eq!(result.average, Some(0.0));
        assert_eq!(result.passed, Some(false));
        assert_eq!(result.assessments[0].score, ASSESSMENT_FAIL_SCORE);
    }

    #[test]
    fn zero_maximum_co_is_not_computable() {
        let config = AssessmentSchemaConfig {
            cos: vec!["CO1".into(), "CO2".into(), "CO3".into()],
            ..two_co_schema_config()
        };
        let schema = AssessmentSchema::validate("C1", config, &SchemaDefaults::default()).unwrap();
        let aggregator = CoAggregator::new(&schema);
        assert!(approx(aggregator.max_marks("CO3"), 0.0));

        let result = aggregator.aggregate(&student(), Some(&marks(20.0, 20.0)));
        let co3 = result.co("CO3").unwrap();
        assert_eq!(co3.score, None);
        assert_eq!(co3.passed, None);
        // CO3 is left out of the average rather than dragging it to 2.0.
        assert_eq!(result.average, Some(3.0));
    }

    fn two_co_schema_config() -> AssessmentSchemaConfig {
        AssessmentSchemaConfig {
            target_percentage: None,
            attainment_levels: None,
            cos: vec!["CO1".into(), "CO2".into()],
            internal_tests: vec![InternalTest {
                id: "ia1".into(),
                name: "IA-1".into(),
                total: 40.0,
                parts: vec![
                    AssessmentPart {
                        id: "1A".into(),
                        max: 20.0,
                        co: "CO1".into(),
                    },
                    AssessmentPart {
                        id: "1B".into(),
                        max: 20.0,
                        co: "CO2".into(),
                    },
                ],
            }],
            supplementary: vec![],
            see: SemesterEndExam {
                name: "SEE".into(),
                total: 0.0,
                co_mapping: BTreeMap::new(),
            },
        }
    }

    #[test]
    fn see_score_is_split_by_weight() {
        let mut config = two_co_schema_config();
        config.see = SemesterEndExam {
            name: "SEE".into(),
            total: 60.0,
            co_mapping: BTreeMap::from([("CO1".into(), 40.0), ("CO2".into(), 20.0)]),
        };
        let schema = AssessmentSchema::validate("C1", config, &SchemaDefaults::default()).unwrap();
        let mut student_marks = marks(0.0, 0.0);
        student_marks.see = Some(30.0);

        let raw = raw_co_marks(&schema, &student_marks);
        assert!(approx(raw["CO1"], 20.0));
        assert!(approx(raw["CO2"], 10.0));
        assert!(approx(max_co_marks(&schema)["CO1"], 60.0));

        let result = CoAggregator::new(&schema).aggregate(&student(), Some(&student_marks));
        let see = result.assessment("SEE").unwrap();
        assert!(see.passed);
        assert_eq!(see.score, ASSESSMENT_PASS_SCORE);
    }

    #[test]
    fn assessment_without_total_is_skipped() {
        assert!(AssessmentOutcome::evaluate("SEE", AssessmentKind::SemesterEnd, 0.0, 0.0, 0.5)
            .is_none());
        let schema = two_co_schema(50.0);
        let result = CoAggregator::new(&schema).aggregate(&student(), Some(&marks(10.0, 10.0)));
        assert_eq!(result.assessments.len(), 1);
        assert!(result.assessment("ia1").unwrap().passed);
    }

    #[test]
    fn mean_of_empty_is_undefined() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0]), Some(1.5));
    }
}
