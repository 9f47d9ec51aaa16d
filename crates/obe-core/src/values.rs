//! Range-bounded values and entry-time clamping.
//!
//! Out-of-range input is clamped to the nearest valid bound when it is
//! entered, so nothing downstream has to re-check ranges.

use std::borrow::Cow;
use std::fmt;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};

/// Lowest allowed survey rating.
pub const RATING_MIN: f64 = 1.0;
/// Highest allowed survey rating.
pub const RATING_MAX: f64 = 3.0;

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// CO -> outcome correlation strength on the 0-3 scale.
///
/// `0` means "no correlation" and is equivalent to an absent entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Correlation(u8);

impl Correlation {
    pub const NONE: Self = Self(0);
    pub const LOW: Self = Self(1);
    pub const MODERATE: Self = Self(2);
    pub const HIGH: Self = Self(3);

    /// Build a correlation, clamping to `0..=3`.
    #[must_use]
    pub fn clamped(raw: i64) -> Self {
        // Clamped to 0..=3, cannot truncate.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self(raw.clamp(0, 3) as u8)
    }

    /// Parse user input the way the matrix editor does: non-numeric input
    /// becomes `0`, numeric input is clamped.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        input
            .trim()
            .parse::<i64>()
            .map_or(Self::NONE, Self::clamped)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether this entry contributes to averages.
    #[must_use]
    pub const fn is_mapped(self) -> bool {
        self.0 > 0
    }
}

impl From<i64> for Correlation {
    fn from(raw: i64) -> Self {
        Self::clamped(raw)
    }
}

impl From<Correlation> for u8 {
    fn from(value: Correlation) -> Self {
        value.0
    }
}

impl From<Correlation> for f64 {
    fn from(value: Correlation) -> Self {
        Self::from(value.0)
    }
}

impl fmt::Display for Correlation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl JsonSchema for Correlation {
    fn schema_name() -> Cow<'static, str> {
        "Correlation".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "integer",
            "minimum": 0,
            "maximum": 3
        })
    }
}

// ---------------------------------------------------------------------------
// Marks and ratings
// ---------------------------------------------------------------------------

/// Clamp a raw mark to `[0, max]`. Non-finite input becomes `0`.
#[must_use]
pub fn clamp_mark(value: f64, max: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, max.max(0.0))
}

/// Clamp a survey rating to `[1, 3]`. Returns `None` for non-finite input,
/// which the entry layer treats as clearing the rating.
#[must_use]
pub fn clamp_rating(value: f64) -> Option<f64> {
    value
        .is_finite()
        .then(|| value.clamp(RATING_MIN, RATING_MAX))
}
