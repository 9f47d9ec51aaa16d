//! Indirect attainment from survey instruments.

use std::collections::BTreeMap;

use obe_core::enums::SurveyKind;
use obe_core::survey::SurveyRatings;
use serde::Serialize;

use crate::aggregator::mean;

/// Where an indirect value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndirectSource {
    Surveys,
    Fallback,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndirectAttainment {
    pub outcome_id: String,
    /// Ratings present for this outcome, by instrument.
    pub ratings: BTreeMap<SurveyKind, f64>,
    pub value: Option<f64>,
    pub source: IndirectSource,
}

/// Mean of the instrument ratings available for `outcome_id`. With no
/// rating at all, `fallback` is used when set.
#[must_use]
pub fn indirect_attainment(
    surveys: &SurveyRatings,
    outcome_id: &str,
    fallback: Option<f64>,
) -> IndirectAttainment {
    let ratings: BTreeMap<SurveyKind, f64> = SurveyKind::ALL
        .into_iter()
        .filter_map(|kind| surveys.rating(kind, outcome_id).map(|rating| (kind, rating)))
        .collect();
    let values: Vec<f64> = ratings.values().copied().collect();

    let (value, source) = match (mean(&values), fallback) {
        (Some(value), _) => (Some(value), IndirectSource::Surveys),
        (None, Some(fallback)) => (Some(fallback), IndirectSource::Fallback),
        (None, None) => (None, IndirectSource::Missing),
    };

    IndirectAttainment {
        outcome_id: outcome_id.to_string(),
        ratings,
        value,
        source,
    }
}
