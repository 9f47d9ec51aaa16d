//! Dataset envelope: everything needed to run the attainment pipeline for
//! one term, as loaded from (and saved to) a TOML or JSON file.
//!
//! The file format is picked by extension: `.json` is JSON, anything else
//! is TOML.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Course, Department, Outcome, Student};
use crate::enums::{OutcomeKind, SurveyKind};
use crate::errors::CoreError;
use crate::marks::MarkSheet;
use crate::matrix::ArticulationMatrix;
use crate::schema::{AssessmentSchema, AssessmentSchemaConfig, SchemaDefaults};
use crate::survey::SurveyRatings;

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Dataset {
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub pos: Vec<Outcome>,
    #[serde(default)]
    pub psos: Vec<Outcome>,
    #[serde(default)]
    pub courses: Vec<Course>,
    /// Course id -> roster.
    #[serde(default)]
    pub students: BTreeMap<String, Vec<Student>>,
    /// Course id -> assessment schema.
    #[serde(default)]
    pub schemas: BTreeMap<String, AssessmentSchemaConfig>,
    /// Course id -> mark sheet.
    #[serde(default)]
    pub marks: BTreeMap<String, MarkSheet>,
    #[serde(default)]
    pub matrix: ArticulationMatrix,
    #[serde(default)]
    pub surveys: SurveyRatings,
}

/// Counts reported after a successful load.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DatasetSummary {
    pub departments: usize,
    pub pos: usize,
    pub psos: usize,
    pub courses: usize,
    pub course_outcomes: usize,
    pub students: usize,
    pub schemas: usize,
    pub correlations: usize,
}

impl Dataset {
    /// Read a dataset file and run [`Dataset::check_integrity`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Io`] if the file cannot be read, a parse error if
    /// the content is malformed, or [`CoreError::Validation`] if references
    /// do not resolve.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut dataset = if is_json(path) {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };
        dataset.matrix.canonicalize();
        dataset.check_integrity()?;

        tracing::debug!(path = %path.display(), "dataset loaded");
        Ok(dataset)
    }

    /// Parse TOML without integrity checks.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TomlDecode`] on malformed input.
    pub fn from_toml_str(content: &str) -> Result<Self, CoreError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse JSON without integrity checks.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Json`] on malformed input.
    pub fn from_json_str(content: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Write the dataset to `path` in the format implied by its extension.
    ///
    /// # Errors
    ///
    /// Returns an encode error or [`CoreError::Io`].
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };
        std::fs::write(path, content).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "dataset saved");
        Ok(())
    }

    /// POs followed by PSOs, in stored order.
    pub fn outcomes(&self) -> impl Iterator<Item = &Outcome> {
        self.pos.iter().chain(&self.psos)
    }

    #[must_use]
    pub fn outcome_kind(&self, outcome_id: &str) -> Option<OutcomeKind> {
        if self.pos.iter().any(|o| o.id == outcome_id) {
            Some(OutcomeKind::Po)
        } else if self.psos.iter().any(|o| o.id == outcome_id) {
            Some(OutcomeKind::Pso)
        } else {
            None
        }
    }

    #[must_use]
    pub fn course(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|course| course.id == course_id)
    }

    /// Look up a course by id, failing with [`CoreError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] for an unknown course.
    pub fn require_course(&self, course_id: &str) -> Result<&Course, CoreError> {
        self.course(course_id)
            .ok_or_else(|| CoreError::not_found("course", course_id))
    }

    /// Roster for a course; empty when none is on file.
    #[must_use]
    pub fn roster(&self, course_id: &str) -> &[Student] {
        self.students.get(course_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Validated assessment schema for a course.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if the course has no schema, or
    /// [`CoreError::InvalidSchema`] if it fails validation.
    pub fn schema(
        &self,
        course_id: &str,
        defaults: &SchemaDefaults,
    ) -> Result<AssessmentSchema, CoreError> {
        let config = self
            .schemas
            .get(course_id)
            .ok_or_else(|| CoreError::not_found("assessment schema", course_id))?;
        AssessmentSchema::validate(course_id, config.clone(), defaults)
    }

    /// Validate every assessment schema in the dataset.
    ///
    /// # Errors
    ///
    /// Returns the first [`CoreError::InvalidSchema`] encountered.
    pub fn validate_schemas(
        &self,
        defaults: &SchemaDefaults,
    ) -> Result<BTreeMap<String, AssessmentSchema>, CoreError> {
        self.schemas
            .iter()
            .map(|(course_id, config)| {
                AssessmentSchema::validate(course_id, config.clone(), defaults)
                    .map(|schema| (course_id.clone(), schema))
            })
            .collect()
    }

    /// Check uniqueness of ids and that every cross-reference resolves.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] describing the first problem found.
    pub fn check_integrity(&self) -> Result<(), CoreError> {
        unique("department", self.departments.iter().map(|d| d.id.as_str()))?;
        unique("outcome", self.outcomes().map(|o| o.id.as_str()))?;
        unique("course", self.courses.iter().map(|c| c.id.as_str()))?;

        let department_ids: BTreeSet<&str> =
            self.departments.iter().map(|d| d.id.as_str()).collect();
        for course in &self.courses {
            unique(
                &format!("course outcome in {}", course.id),
                course.cos.iter().map(|co| co.id.as_str()),
            )?;
            if let Some(department) = &course.department_id {
                if !department_ids.contains(department.as_str()) {
                    return Err(CoreError::Validation(format!(
                        "course {} references unknown department {department}",
                        course.id
                    )));
                }
            }
        }

        for (course_id, roster) in &self.students {
            self.require_known_course("roster", course_id)?;
            unique(
                &format!("student in {course_id}"),
                roster.iter().map(|s| s.id.as_str()),
            )?;
            unique(
                &format!("usn in {course_id}"),
                roster.iter().map(|s| s.usn.as_str()),
            )?;
        }
        for course_id in self.schemas.keys() {
            self.require_known_course("assessment schema", course_id)?;
        }
        for course_id in self.marks.keys() {
            self.require_known_course("mark sheet", course_id)?;
        }

        let outcome_ids: BTreeSet<&str> = self.outcomes().map(|o| o.id.as_str()).collect();
        for (course_id, co_id, outcome_id, _) in self.matrix.cells() {
            let course = self.course(course_id).ok_or_else(|| {
                CoreError::Validation(format!(
                    "articulation matrix references unknown course {course_id}"
                ))
            })?;
            if !course.has_co(co_id) {
                return Err(CoreError::Validation(format!(
                    "articulation matrix references {co_id}, which is not a CO of {course_id}"
                )));
            }
            if !outcome_ids.contains(outcome_id) {
                return Err(CoreError::Validation(format!(
                    "articulation matrix references unknown outcome {outcome_id}"
                )));
            }
        }

        for kind in SurveyKind::ALL {
            if let Some(outcome_id) = self
                .surveys
                .instrument(kind)
                .keys()
                .find(|id| !outcome_ids.contains(id.as_str()))
            {
                return Err(CoreError::Validation(format!(
                    "{} rates unknown outcome {outcome_id}",
                    kind.label()
                )));
            }
        }
        Ok(())
    }

    fn require_known_course(&self, what: &str, course_id: &str) -> Result<(), CoreError> {
        if self.course(course_id).is_some() {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "{what} references unknown course {course_id}"
            )))
        }
    }

    #[must_use]
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            departments: self.departments.len(),
            pos: self.pos.len(),
            psos: self.psos.len(),
            courses: self.courses.len(),
            course_outcomes: self.courses.iter().map(|c| c.cos.len()).sum(),
            students: self.students.values().map(Vec::len).sum(),
            schemas: self.schemas.len(),
            correlations: self.matrix.entry_count(),
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn unique<'a>(what: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), CoreError> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CoreError::Validation(format!("duplicate {what} id '{id}'")));
        }
    }
    Ok(())
}
