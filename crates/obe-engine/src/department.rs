//! Department attainment rows: direct [A], surveys, indirect [B], and the
//! blended C, D, total and percentage per outcome.

use obe_core::enums::OutcomeKind;
use obe_core::survey::SurveyRatings;
use serde::Serialize;

use crate::blend::{Blend, blend_defined};
use crate::indirect::{IndirectAttainment, indirect_attainment};
use crate::rollup::{CourseFilter, CourseRollup, aggregate_rollups};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentRow {
    pub outcome_id: String,
    pub kind: OutcomeKind,
    /// A: mean of the course averages that are defined.
    pub direct: Option<f64>,
    /// Courses contributing to `direct`.
    pub courses: usize,
    pub indirect: IndirectAttainment,
    pub blend: Option<Blend>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentReport {
    pub filter: CourseFilter,
    /// Included courses, by semester then code.
    pub courses: Vec<CourseRollup>,
    pub rows: Vec<DepartmentRow>,
}

impl DepartmentReport {
    #[must_use]
    pub fn row(&self, outcome_id: &str) -> Option<&DepartmentRow> {
        self.rows.iter().find(|row| row.outcome_id == outcome_id)
    }
}

/// Build department rows for `outcomes` from already filtered and sorted
/// course rollups.
#[must_use]
pub fn department_report(
    filter: CourseFilter,
    courses: Vec<CourseRollup>,
    outcomes: &[(OutcomeKind, &str)],
    surveys: &SurveyRatings,
    survey_fallback: Option<f64>,
) -> DepartmentReport {
    let direct = aggregate_rollups(&courses, outcomes.iter().map(|(_, id)| *id));

    let rows = outcomes
        .iter()
        .zip(direct)
        .map(|((kind, outcome_id), direct)| {
            let indirect = indirect_attainment(surveys, outcome_id, survey_fallback);
            DepartmentRow {
                outcome_id: direct.outcome_id,
                kind: *kind,
                direct: direct.value,
                courses: direct.contributors,
                blend: blend_defined(direct.value, indirect.value),
                indirect,
            }
        })
        .collect();

    DepartmentReport {
        filter,
        courses,
        rows,
    }
}
