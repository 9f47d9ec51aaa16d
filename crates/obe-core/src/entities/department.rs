use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An academic department. Courses may reference one by id.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Department {
    pub id: String,
    pub name: String,
}
