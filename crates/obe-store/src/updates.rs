//! Update builders for editable entities.

use serde::{Deserialize, Serialize};

/// Fields of a course outcome that can be edited. `None` leaves a field
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_level: Option<String>,
}

impl CoUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.description.is_none() && self.k_level.is_none()
    }
}

pub struct CoUpdateBuilder(CoUpdate);

impl CoUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(CoUpdate::default())
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn k_level(mut self, k_level: impl Into<String>) -> Self {
        self.0.k_level = Some(k_level.into());
        self
    }

    #[must_use]
    pub fn build(self) -> CoUpdate {
        self.0
    }
}

impl Default for CoUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
