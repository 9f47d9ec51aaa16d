//! Indirect-attainment survey ratings.
//!
//! Each instrument holds an outcome id -> rating map on the 1-3 scale.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SurveyKind;
use crate::values::clamp_rating;

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SurveyRatings {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub program_exit: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub employer: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub alumni: BTreeMap<String, f64>,
}

impl SurveyRatings {
    #[must_use]
    pub const fn instrument(&self, kind: SurveyKind) -> &BTreeMap<String, f64> {
        match kind {
            SurveyKind::ProgramExit => &self.program_exit,
            SurveyKind::Employer => &self.employer,
            SurveyKind::Alumni => &self.alumni,
        }
    }

    const fn instrument_mut(&mut self, kind: SurveyKind) -> &mut BTreeMap<String, f64> {
        match kind {
            SurveyKind::ProgramExit => &mut self.program_exit,
            SurveyKind::Employer => &mut self.employer,
            SurveyKind::Alumni => &mut self.alumni,
        }
    }

    #[must_use]
    pub fn rating(&self, kind: SurveyKind, outcome_id: &str) -> Option<f64> {
        self.instrument(kind).get(outcome_id).copied()
    }

    /// Record a rating, clamped to 1-3. A non-finite value clears the
    /// rating. Returns the stored value.
    pub fn record(&mut self, kind: SurveyKind, outcome_id: &str, value: f64) -> Option<f64> {
        let instrument = self.instrument_mut(kind);
        match clamp_rating(value) {
            Some(rating) => {
                instrument.insert(outcome_id.to_string(), rating);
                Some(rating)
            }
            None => {
                instrument.remove(outcome_id);
                None
            }
        }
    }

    /// Drop every rating for `outcome_id`. Returns how many were removed.
    pub fn remove_outcome(&mut self, outcome_id: &str) -> usize {
        SurveyKind::ALL
            .into_iter()
            .filter(|kind| self.instrument_mut(*kind).remove(outcome_id).is_some())
            .count()
    }

    /// Clamp loaded ratings into range, dropping non-finite ones.
    /// Returns how many values changed.
    pub fn conform(&mut self) -> usize {
        let mut adjusted = 0;
        for kind in SurveyKind::ALL {
            self.instrument_mut(kind).retain(|_, value| match clamp_rating(*value) {
                Some(rating) => {
                    adjusted += usize::from((rating - *value).abs() > f64::EPSILON);
                    *value = rating;
                    true
                }
                None => {
                    adjusted += 1;
                    false
                }
            });
        }
        adjusted
    }
}
