//! Course-level CO attainment report.
//!
//! Runs the aggregator over a roster, then summarizes each CO (pass count,
//! percentage of roster, attainment level) and each assessment.

use obe_core::entities::Student;
use obe_core::enums::AssessmentKind;
use obe_core::marks::MarkSheet;
use obe_core::schema::AssessmentSchema;
use serde::Serialize;

use crate::aggregator::{CoAggregator, StudentCoResult, mean};
use crate::levels::LevelResolver;

/// Whether a course report carries attainment figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    Computed,
    /// Every CO has a maximum attainable mark of 0.
    NotComputable,
    /// Nobody is enrolled, so there is no percentage to report.
    NoRoster,
}

/// Roster-wide summary of one CO.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoSummary {
    pub co: String,
    pub max_marks: f64,
    pub passed_count: usize,
    /// Percentage of the roster that passed; `None` when not computable or
    /// the roster is empty.
    pub percentage: Option<f64>,
    pub level: Option<u8>,
    pub average_score: Option<f64>,
}

/// Roster-wide summary of one internal test or the SEE.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentSummary {
    pub assessment_id: String,
    pub name: String,
    pub kind: AssessmentKind,
    pub total: f64,
    /// Marks needed to pass (`total * target / 100`).
    pub pass_mark: f64,
    pub passed_count: usize,
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseAttainment {
    pub course_id: String,
    pub status: CourseStatus,
    pub target_percentage: f64,
    /// Normalized score a student needs on a CO (and on average) to pass.
    pub pass_threshold: f64,
    pub cos: Vec<CoSummary>,
    pub assessments: Vec<AssessmentSummary>,
    pub students: Vec<StudentCoResult>,
    /// Students whose average CO score passed.
    pub passed_count: usize,
}

impl CourseAttainment {
    #[must_use]
    pub fn co(&self, co: &str) -> Option<&CoSummary> {
        self.cos.iter().find(|summary| summary.co == co)
    }

    #[must_use]
    pub fn student(&self, student_id: &str) -> Option<&StudentCoResult> {
        self.students
            .iter()
            .find(|student| student.student_id == student_id)
    }
}

/// Compute the CO attainment report for one course.
#[must_use]
pub fn course_attainment(
    schema: &AssessmentSchema,
    roster: &[Student],
    marks: Option<&MarkSheet>,
) -> CourseAttainment {
    let aggregator = CoAggregator::new(schema);
    let resolver = LevelResolver::new(schema.attainment_levels());

    let students: Vec<StudentCoResult> = roster
        .iter()
        .map(|student| aggregator.aggregate(student, marks.and_then(|sheet| sheet.get(&student.id))))
        .collect();

    let status = if roster.is_empty() {
        tracing::warn!(course = schema.course_id(), "course has no enrolled students");
        CourseStatus::NoRoster
    } else if aggregator.any_computable() {
        CourseStatus::Computed
    } else {
        tracing::warn!(
            course = schema.course_id(),
            "no CO has attainable marks, attainment is not computable"
        );
        CourseStatus::NotComputable
    };

    let cos = schema
        .cos()
        .iter()
        .map(|co| summarize_co(co, &aggregator, &resolver, &students))
        .collect();

    let assessments = summarize_assessments(schema, &students);
    let passed_count = students
        .iter()
        .filter(|student| student.passed == Some(true))
        .count();

    tracing::debug!(
        course = schema.course_id(),
        students = students.len(),
        ?status,
        "course attainment computed"
    );

    CourseAttainment {
        course_id: schema.course_id().to_string(),
        status,
        target_percentage: schema.target_percentage(),
        pass_threshold: aggregator.pass_threshold(),
        cos,
        assessments,
        students,
        passed_count,
    }
}

fn summarize_co(
    co: &str,
    aggregator: &CoAggregator<'_>,
    resolver: &LevelResolver,
    students: &[StudentCoResult],
) -> CoSummary {
    let max_marks = aggregator.max_marks(co);
    let scores: Vec<f64> = students
        .iter()
        .filter_map(|student| student.co(co).and_then(|score| score.score))
        .collect();
    let passed_count = students
        .iter()
        .filter(|student| student.co(co).and_then(|score| score.passed) == Some(true))
        .count();

    if max_marks <= 0.0 {
        tracing::warn!(co, "CO has no attainable marks");
    }
    let percentage = (max_marks > 0.0)
        .then(|| share(passed_count, students.len()))
        .flatten();

    CoSummary {
        co: co.to_string(),
        max_marks,
        passed_count,
        percentage,
        level: percentage.map(|percentage| resolver.resolve(percentage)),
        average_score: mean(&scores),
    }
}

fn summarize_assessments(
    schema: &AssessmentSchema,
    students: &[StudentCoResult],
) -> Vec<AssessmentSummary> {
    let target = schema.target_fraction();
    let see = schema.see();
    let tests = schema
        .internal_tests()
        .iter()
        .map(|test| (test.id.as_str(), test.name.as_str(), AssessmentKind::Internal, test.total));
    let exam = (see.total > 0.0).then_some((
        see.name.as_str(),
        see.name.as_str(),
        AssessmentKind::SemesterEnd,
        see.total,
    ));

    tests
        .chain(exam)
        .map(|(id, name, kind, total)| {
            let passed_count = students
                .iter()
                .filter(|student| student.assessment(id).is_some_and(|outcome| outcome.passed))
                .count();
            AssessmentSummary {
                assessment_id: id.to_string(),
                name: name.to_string(),
                kind,
                total,
                pass_mark: total * target,
                passed_count,
                percentage: share(passed_count, students.len()),
            }
        })
        .collect()
}

/// `part / whole` as a percentage; `None` for an empty whole.
#[allow(clippy::cast_precision_loss)]
fn share(part: usize, whole: usize) -> Option<f64> {
    (whole > 0).then(|| part as f64 / whole as f64 * 100.0)
}
