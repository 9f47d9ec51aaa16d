use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Immutable roster entry. `usn` is the unique roll identifier.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub usn: String,
}
