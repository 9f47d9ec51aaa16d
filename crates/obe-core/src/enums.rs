//! Kind enums for outcomes, survey instruments, and assessments.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// OutcomeKind
// ---------------------------------------------------------------------------

/// Which outcome set an outcome belongs to. The two sets are disjoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Program Outcome.
    Po,
    /// Program-Specific Outcome.
    Pso,
}

impl OutcomeKind {
    /// Id prefix for newly created outcomes of this kind.
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Po => "PO",
            Self::Pso => "PSO",
        }
    }

    /// Default description for a newly created outcome.
    #[must_use]
    pub const fn default_description(self) -> &'static str {
        match self {
            Self::Po => "New Program Outcome",
            Self::Pso => "New Program Specific Outcome",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Po => "po",
            Self::Pso => "pso",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SurveyKind
// ---------------------------------------------------------------------------

/// Indirect-attainment survey instruments.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SurveyKind {
    /// Graduating students' perception of outcome achievement.
    ProgramExit,
    /// Employers' view of graduates in the workplace.
    Employer,
    /// Alumni feedback collected a few years after graduation.
    Alumni,
}

impl SurveyKind {
    pub const ALL: [Self; 3] = [Self::ProgramExit, Self::Employer, Self::Alumni];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProgramExit => "program_exit",
            Self::Employer => "employer",
            Self::Alumni => "alumni",
        }
    }

    /// Human-readable row label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ProgramExit => "Program Exit Survey",
            Self::Employer => "Employer Survey",
            Self::Alumni => "Alumni Survey",
        }
    }
}

impl fmt::Display for SurveyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AssessmentKind
// ---------------------------------------------------------------------------

/// The component of an assessment schema a mark or summary belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    /// Periodic in-term test (IA) with CO-mapped parts.
    Internal,
    /// Quiz, assignment, or other CO-specific continuous evaluation item.
    Supplementary,
    /// Semester-end exam (SEE), split across COs by weight.
    SemesterEnd,
}

impl AssessmentKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Supplementary => "supplementary",
            Self::SemesterEnd => "semester_end",
        }
    }
}

impl fmt::Display for AssessmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_kind_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&OutcomeKind::Pso).unwrap(), "\"pso\"");
        assert_eq!(OutcomeKind::Po.id_prefix(), "PO");
    }

    #[test]
    fn survey_kind_display_matches_serde() {
        for kind in SurveyKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }
}
