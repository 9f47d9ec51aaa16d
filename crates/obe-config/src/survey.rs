//! Indirect-attainment survey configuration.

use obe_core::values::{RATING_MAX, RATING_MIN};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SurveyDefaults {
    /// Rating assumed for an outcome no survey instrument has rated.
    /// Unset leaves indirect attainment undefined for that outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_rating: Option<f64>,
}

impl SurveyDefaults {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the fallback is outside 1-3.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.fallback_rating {
            Some(rating) if !(RATING_MIN..=RATING_MAX).contains(&rating) => {
                Err(ConfigError::InvalidValue {
                    field: "survey.fallback_rating".into(),
                    reason: format!("{rating} is not in [{RATING_MIN}, {RATING_MAX}]"),
                })
            }
            _ => Ok(()),
        }
    }
}
