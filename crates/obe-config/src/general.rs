//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default decimal places for rendered scores.
const fn default_precision() -> u8 {
    2
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Dataset file used when `--data` is not given. Empty means unset.
    #[serde(default)]
    pub dataset: String,

    /// Decimal places for scores and percentages in table output.
    #[serde(default = "default_precision")]
    pub precision: u8,
}

impl GeneralConfig {
    #[must_use]
    pub fn has_dataset(&self) -> bool {
        !self.dataset.trim().is_empty()
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            dataset: String::new(),
            precision: default_precision(),
        }
    }
}
