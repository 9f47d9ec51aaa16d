//! Dataset-level entry point tying the pipeline stages together.

use obe_core::dataset::Dataset;
use obe_core::enums::OutcomeKind;
use obe_core::schema::SchemaDefaults;

use crate::course::{CourseAttainment, course_attainment};
use crate::department::{DepartmentReport, department_report};
use crate::error::EngineError;
use crate::rollup::{
    CourseFilter, CourseRollup, SemesterGroup, course_rollup, group_by_semester, sort_rollups,
};

/// Read-only view of a dataset that answers attainment queries.
///
/// Every query recomputes from the dataset; nothing is cached.
#[derive(Debug, Clone)]
pub struct AttainmentEngine<'a> {
    dataset: &'a Dataset,
    defaults: SchemaDefaults,
    survey_fallback: Option<f64>,
}

impl<'a> AttainmentEngine<'a> {
    #[must_use]
    pub fn new(dataset: &'a Dataset, defaults: SchemaDefaults) -> Self {
        Self {
            dataset,
            defaults,
            survey_fallback: None,
        }
    }

    /// Rating used for outcomes no survey instrument covers.
    #[must_use]
    pub fn with_survey_fallback(mut self, fallback: Option<f64>) -> Self {
        self.survey_fallback = fallback;
        self
    }

    #[must_use]
    pub const fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// CO attainment report for one course.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Core`] when the course or its schema is
    /// missing, or the schema is invalid.
    pub fn course_attainment(&self, course_id: &str) -> Result<CourseAttainment, EngineError> {
        self.dataset.require_course(course_id)?;
        let schema = self.dataset.schema(course_id, &self.defaults)?;
        Ok(course_attainment(
            &schema,
            self.dataset.roster(course_id),
            self.dataset.marks.get(course_id),
        ))
    }

    /// Per-outcome averages for one course.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Core`] for an unknown course.
    pub fn course_rollup(&self, course_id: &str) -> Result<CourseRollup, EngineError> {
        let course = self.dataset.require_course(course_id)?;
        Ok(course_rollup(
            course,
            self.dataset.matrix.course(course_id),
            self.outcome_ids(),
        ))
    }

    /// Rollups for every course the filter admits, by semester then code.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownDepartment`] when the filter names a
    /// department that does not exist.
    pub fn course_rollups(&self, filter: &CourseFilter) -> Result<Vec<CourseRollup>, EngineError> {
        if let Some(department_id) = &filter.department_id {
            if !self.dataset.departments.iter().any(|d| &d.id == department_id) {
                return Err(EngineError::UnknownDepartment {
                    department_id: department_id.clone(),
                });
            }
        }

        let mut rollups: Vec<CourseRollup> = self
            .dataset
            .courses
            .iter()
            .filter(|course| filter.matches(course))
            .map(|course| {
                course_rollup(
                    course,
                    self.dataset.matrix.course(&course.id),
                    self.outcome_ids(),
                )
            })
            .collect();
        sort_rollups(&mut rollups);

        if rollups.is_empty() {
            tracing::warn!(?filter, "no course matches the filter");
        }
        Ok(rollups)
    }

    /// Department rows with direct, indirect and blended attainment.
    ///
    /// # Errors
    ///
    /// See [`course_rollups`](Self::course_rollups).
    pub fn department(&self, filter: CourseFilter) -> Result<DepartmentReport, EngineError> {
        let courses = self.course_rollups(&filter)?;
        let outcomes: Vec<(OutcomeKind, &str)> = self
            .dataset
            .pos
            .iter()
            .map(|o| (OutcomeKind::Po, o.id.as_str()))
            .chain(self.dataset.psos.iter().map(|o| (OutcomeKind::Pso, o.id.as_str())))
            .collect();

        tracing::debug!(courses = courses.len(), outcomes = outcomes.len(), "department rollup");
        Ok(department_report(
            filter,
            courses,
            &outcomes,
            &self.dataset.surveys,
            self.survey_fallback,
        ))
    }

    /// Course averages grouped by ascending semester.
    #[must_use]
    pub fn program(&self) -> Vec<SemesterGroup> {
        let rollups = self
            .dataset
            .courses
            .iter()
            .map(|course| {
                course_rollup(
                    course,
                    self.dataset.matrix.course(&course.id),
                    self.outcome_ids(),
                )
            })
            .collect();
        group_by_semester(rollups)
    }

    fn outcome_ids(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        let dataset = self.dataset;
        dataset.outcomes().map(|outcome| outcome.id.as_str())
    }
}
