use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A program outcome (PO) or program-specific outcome (PSO).
///
/// Identity is the id; the description is editable by admins. Which set the
/// outcome belongs to is decided by the collection holding it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Outcome {
    pub id: String,
    pub description: String,
}

impl Outcome {
    #[must_use]
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}
