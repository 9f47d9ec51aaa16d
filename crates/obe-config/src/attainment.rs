//! Defaults for assessment schemas that omit their target or level table.

use obe_core::schema::{LevelThreshold, MAX_LEVEL, SchemaDefaults};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_target_percentage() -> f64 {
    50.0
}

fn default_levels() -> Vec<LevelThreshold> {
    SchemaDefaults::default().attainment_levels
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AttainmentDefaults {
    /// Percentage of the full mark a student must reach on a CO.
    #[serde(default = "default_target_percentage")]
    pub target_percentage: f64,

    /// Percentage-of-roster thresholds mapped to levels 0-3.
    #[serde(default = "default_levels")]
    pub levels: Vec<LevelThreshold>,
}

impl AttainmentDefaults {
    /// Check ranges before the defaults are handed to schema validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a target outside (0, 100],
    /// an empty level table, a threshold outside [0, 100], or a level above 3.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.target_percentage > 0.0 && self.target_percentage <= 100.0) {
            return Err(ConfigError::InvalidValue {
                field: "attainment.target_percentage".into(),
                reason: format!("{} is not in (0, 100]", self.target_percentage),
            });
        }
        if self.levels.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "attainment.levels".into(),
                reason: "at least one level is required".into(),
            });
        }
        for entry in &self.levels {
            if !(0.0..=100.0).contains(&entry.threshold) || entry.level > MAX_LEVEL {
                return Err(ConfigError::InvalidValue {
                    field: "attainment.levels".into(),
                    reason: format!(
                        "threshold {} -> level {} is out of range",
                        entry.threshold, entry.level
                    ),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn schema_defaults(&self) -> SchemaDefaults {
        SchemaDefaults {
            target_percentage: self.target_percentage,
            attainment_levels: self.levels.clone(),
        }
    }
}

impl Default for AttainmentDefaults {
    fn default() -> Self {
        Self {
            target_percentage: default_target_percentage(),
            levels: default_levels(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_core_schema_defaults() {
        let defaults = AttainmentDefaults::default();
        assert!(defaults.validate().is_ok());
        assert_eq!(defaults.schema_defaults(), SchemaDefaults::default());
    }

    #[test]
    fn rejects_zero_target() {
        let defaults = AttainmentDefaults {
            target_percentage: 0.0,
            ..AttainmentDefaults::default()
        };
        assert!(matches!(
            defaults.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
