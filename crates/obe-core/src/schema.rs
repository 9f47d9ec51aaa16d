//! Per-course assessment schemas.
//!
//! [`AssessmentSchemaConfig`] is the loose, deserializable form stored in a
//! dataset. [`AssessmentSchema::validate`] turns it into the checked form the
//! attainment engine consumes; every structural problem that would otherwise
//! show up later as a silent `NaN` is rejected here.

use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Tolerance for comparing sums of configured marks.
const MARK_EPSILON: f64 = 1e-9;

/// Highest attainment level.
pub const MAX_LEVEL: u8 = 3;

/// One row of the attainment-level table: when at least `threshold` percent
/// of the roster reaches the target, the CO attains `level`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LevelThreshold {
    pub threshold: f64,
    pub level: u8,
}

impl LevelThreshold {
    #[must_use]
    pub const fn new(threshold: f64, level: u8) -> Self {
        Self { threshold, level }
    }
}

/// Fallbacks applied when a schema omits its target or level table.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDefaults {
    pub target_percentage: f64,
    pub attainment_levels: Vec<LevelThreshold>,
}

impl Default for SchemaDefaults {
    fn default() -> Self {
        Self {
            target_percentage: 50.0,
            attainment_levels: vec![
                LevelThreshold::new(80.0, 3),
                LevelThreshold::new(70.0, 2),
                LevelThreshold::new(60.0, 1),
                LevelThreshold::new(0.0, 0),
            ],
        }
    }
}

/// A part of an internal test, targeting one CO.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AssessmentPart {
    pub id: String,
    pub max: f64,
    pub co: String,
}

/// An internal assessment (IA) made of CO-mapped parts.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct InternalTest {
    pub id: String,
    pub name: String,
    pub total: f64,
    pub parts: Vec<AssessmentPart>,
}

impl InternalTest {
    #[must_use]
    pub fn part(&self, part_id: &str) -> Option<&AssessmentPart> {
        self.parts.iter().find(|part| part.id == part_id)
    }
}

/// A CO-specific continuous-evaluation item (quiz, assignment).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SupplementaryItem {
    pub id: String,
    pub name: String,
    pub max: f64,
    pub co: String,
}

fn default_see_name() -> String {
    "SEE".to_string()
}

/// Semester-end exam. A single score, distributed across COs in proportion
/// to `co_mapping[co] / total`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SemesterEndExam {
    #[serde(default = "default_see_name")]
    pub name: String,
    pub total: f64,
    #[serde(default)]
    pub co_mapping: BTreeMap<String, f64>,
}

impl SemesterEndExam {
    /// Configured weight for `co`, `0` when unmapped.
    #[must_use]
    pub fn weight(&self, co: &str) -> f64 {
        self.co_mapping.get(co).copied().unwrap_or(0.0)
    }
}

/// Loose schema as stored in a dataset file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AssessmentSchemaConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attainment_levels: Option<Vec<LevelThreshold>>,
    pub cos: Vec<String>,
    #[serde(default)]
    pub internal_tests: Vec<InternalTest>,
    #[serde(default)]
    pub supplementary: Vec<SupplementaryItem>,
    pub see: SemesterEndExam,
}

/// Validated assessment schema for one course.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssessmentSchema {
    course_id: String,
    target_percentage: f64,
    attainment_levels: Vec<LevelThreshold>,
    cos: Vec<String>,
    internal_tests: Vec<InternalTest>,
    supplementary: Vec<SupplementaryItem>,
    see: SemesterEndExam,
}

impl AssessmentSchema {
    /// Validate a loose schema, filling gaps from `defaults`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSchema`] when the target or level table is
    /// out of range, COs are empty or duplicated, an item references an
    /// unknown CO, ids collide, maxima are negative or exceed their
    /// assessment total, or the SEE mapping cannot be distributed.
    pub fn validate(
        course_id: &str,
        config: AssessmentSchemaConfig,
        defaults: &SchemaDefaults,
    ) -> Result<Self, CoreError> {
        check_structure(course_id, &config)?;

        let target_percentage = config
            .target_percentage
            .unwrap_or(defaults.target_percentage);
        check_target(course_id, target_percentage)?;

        let attainment_levels = config
            .attainment_levels
            .unwrap_or_else(|| defaults.attainment_levels.clone());
        check_levels(course_id, &attainment_levels)?;

        Ok(Self {
            course_id: course_id.to_string(),
            target_percentage,
            attainment_levels,
            cos: config.cos,
            internal_tests: config.internal_tests,
            supplementary: config.supplementary,
            see: config.see,
        })
    }

    #[must_use]
    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    #[must_use]
    pub const fn target_percentage(&self) -> f64 {
        self.target_percentage
    }

    /// Target as a fraction of the full mark (`target_percentage / 100`).
    #[must_use]
    pub fn target_fraction(&self) -> f64 {
        self.target_percentage / 100.0
    }

    /// Level table in configured order (not necessarily sorted).
    #[must_use]
    pub fn attainment_levels(&self) -> &[LevelThreshold] {
        &self.attainment_levels
    }

    #[must_use]
    pub fn cos(&self) -> &[String] {
        &self.cos
    }

    #[must_use]
    pub fn internal_tests(&self) -> &[InternalTest] {
        &self.internal_tests
    }

    #[must_use]
    pub fn internal_test(&self, test_id: &str) -> Option<&InternalTest> {
        self.internal_tests.iter().find(|test| test.id == test_id)
    }

    #[must_use]
    pub fn supplementary(&self) -> &[SupplementaryItem] {
        &self.supplementary
    }

    #[must_use]
    pub fn supplementary_item(&self, item_id: &str) -> Option<&SupplementaryItem> {
        self.supplementary.iter().find(|item| item.id == item_id)
    }

    #[must_use]
    pub const fn see(&self) -> &SemesterEndExam {
        &self.see
    }
}

fn check_structure(course_id: &str, config: &AssessmentSchemaConfig) -> Result<(), CoreError> {
    let cos = check_cos(course_id, &config.cos)?;

    let mut test_ids = BTreeSet::new();
    for test in &config.internal_tests {
        if !test_ids.insert(test.id.as_str()) {
            return Err(CoreError::schema(
                course_id,
                format!("duplicate internal test id '{}'", test.id),
            ));
        }
        check_internal_test(course_id, test, &cos)?;
    }

    let mut item_ids = BTreeSet::new();
    for item in &config.supplementary {
        if !item_ids.insert(item.id.as_str()) {
            return Err(CoreError::schema(
                course_id,
                format!("duplicate supplementary item id '{}'", item.id),
            ));
        }
        check_max(course_id, &item.id, item.max)?;
        check_co_ref(course_id, &item.id, &item.co, &cos)?;
    }

    check_see(course_id, &config.see, &cos)?;
    Ok(())
}

fn check_target(course_id: &str, target: f64) -> Result<(), CoreError> {
    if target.is_finite() && target > 0.0 && target <= 100.0 {
        Ok(())
    } else {
        Err(CoreError::schema(
            course_id,
            format!("target percentage {target} must be in (0, 100]"),
        ))
    }
}

fn check_levels(course_id: &str, levels: &[LevelThreshold]) -> Result<(), CoreError> {
    if levels.is_empty() {
        return Err(CoreError::schema(course_id, "attainment level table is empty"));
    }
    for entry in levels {
        if !entry.threshold.is_finite() || !(0.0..=100.0).contains(&entry.threshold) {
            return Err(CoreError::schema(
                course_id,
                format!("level threshold {} must be in [0, 100]", entry.threshold),
            ));
        }
        if entry.level > MAX_LEVEL {
            return Err(CoreError::schema(
                course_id,
                format!("attainment level {} exceeds {MAX_LEVEL}", entry.level),
            ));
        }
    }

    // A higher threshold must never map to a lower level, otherwise the
    // resolver would not be monotonic in the pass percentage.
    let mut sorted = levels.to_vec();
    sorted.sort_by(|a, b| b.threshold.total_cmp(&a.threshold));
    if sorted.windows(2).any(|pair| pair[0].level < pair[1].level) {
        return Err(CoreError::schema(
            course_id,
            "attainment levels must not decrease as thresholds increase",
        ));
    }
    Ok(())
}

fn check_cos<'a>(course_id: &str, cos: &'a [String]) -> Result<BTreeSet<&'a str>, CoreError> {
    if cos.is_empty() {
        return Err(CoreError::schema(course_id, "schema lists no course outcomes"));
    }
    let mut seen = BTreeSet::new();
    for co in cos {
        if co.trim().is_empty() {
            return Err(CoreError::schema(course_id, "course outcome label is empty"));
        }
        if !seen.insert(co.as_str()) {
            return Err(CoreError::schema(
                course_id,
                format!("duplicate course outcome '{co}'"),
            ));
        }
    }
    Ok(seen)
}

fn check_max(course_id: &str, item_id: &str, max: f64) -> Result<(), CoreError> {
    if max.is_finite() && max >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::schema(
            course_id,
            format!("maximum mark {max} for '{item_id}' must be a non-negative number"),
        ))
    }
}

fn check_co_ref(
    course_id: &str,
    item_id: &str,
    co: &str,
    cos: &BTreeSet<&str>,
) -> Result<(), CoreError> {
    if cos.contains(co) {
        Ok(())
    } else {
        Err(CoreError::schema(
            course_id,
            format!("'{item_id}' targets unknown course outcome '{co}'"),
        ))
    }
}

fn check_internal_test(
    course_id: &str,
    test: &InternalTest,
    cos: &BTreeSet<&str>,
) -> Result<(), CoreError> {
    if !test.total.is_finite() || test.total <= 0.0 {
        return Err(CoreError::schema(
            course_id,
            format!("internal test '{}' total must be positive", test.id),
        ));
    }

    let mut part_ids = BTreeSet::new();
    let mut sum = 0.0;
    for part in &test.parts {
        let label = format!("{}/{}", test.id, part.id);
        if !part_ids.insert(part.id.as_str()) {
            return Err(CoreError::schema(
                course_id,
                format!("duplicate part id '{label}'"),
            ));
        }
        check_max(course_id, &label, part.max)?;
        check_co_ref(course_id, &label, &part.co, cos)?;
        sum += part.max;
    }

    if sum > test.total + MARK_EPSILON {
        return Err(CoreError::schema(
            course_id,
            format!(
                "parts of internal test '{}' sum to {sum}, exceeding its total {}",
                test.id, test.total
            ),
        ));
    }
    Ok(())
}

fn check_see(
    course_id: &str,
    see: &SemesterEndExam,
    cos: &BTreeSet<&str>,
) -> Result<(), CoreError> {
    if !see.total.is_finite() || see.total < 0.0 {
        return Err(CoreError::schema(
            course_id,
            format!("{} total must be a non-negative number", see.name),
        ));
    }

    let mut sum = 0.0;
    for (co, weight) in &see.co_mapping {
        check_co_ref(course_id, &see.name, co, cos)?;
        if !weight.is_finite() || *weight < 0.0 {
            return Err(CoreError::schema(
                course_id,
                format!("{} weight for '{co}' must be non-negative", see.name),
            ));
        }
        sum += weight;
    }

    if see.total == 0.0 && sum > 0.0 {
        return Err(CoreError::schema(
            course_id,
            format!("{} maps marks to COs but its total is 0", see.name),
        ));
    }
    if sum > see.total + MARK_EPSILON {
        return Err(CoreError::schema(
            course_id,
            format!(
                "{} CO mapping sums to {sum}, exceeding its total {}",
                see.name, see.total
            ),
        ));
    }
    Ok(())
}
