use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A course outcome, owned by exactly one course.
///
/// Ids have the form `<courseId>.<n>` and are unique within the course.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CourseOutcome {
    pub id: String,
    pub description: String,
    /// Knowledge level, e.g. `K1`..`K6`.
    pub k_level: String,
}

/// A course and its ordered course outcomes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Course {
    pub id: String,
    pub code: String,
    pub name: String,
    pub semester: u32,
    #[serde(default)]
    pub cos: Vec<CourseOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_faculty_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
}

impl Course {
    /// Look up one of this course's outcomes.
    #[must_use]
    pub fn co(&self, co_id: &str) -> Option<&CourseOutcome> {
        self.cos.iter().find(|co| co.id == co_id)
    }

    #[must_use]
    pub fn has_co(&self, co_id: &str) -> bool {
        self.co(co_id).is_some()
    }

    /// A course with no COs has no attainment to compute.
    #[must_use]
    pub fn has_outcomes(&self) -> bool {
        !self.cos.is_empty()
    }
}
