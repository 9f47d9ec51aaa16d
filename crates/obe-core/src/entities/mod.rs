//! Entity structs for OBE domain objects.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so a
//! dataset can round-trip through TOML or JSON and be checked against its
//! generated schema.

mod course;
mod department;
mod outcome;
mod student;

pub use course::{Course, CourseOutcome};
pub use department::Department;
pub use outcome::Outcome;
pub use student::Student;
