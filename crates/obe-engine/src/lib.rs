//! # obe-engine
//!
//! Outcome-based-education attainment pipeline:
//!
//! 1. [`aggregator`]: per-student normalized CO scores and pass flags.
//! 2. [`levels`]: percentage of roster passing a CO -> attainment level.
//! 3. [`rollup`]: CO -> PO/PSO correlation averages per course and across
//!    courses.
//! 4. [`indirect`] and [`blend`]: survey-based attainment and the 80/20
//!    direct/indirect blend.
//!
//! All functions are pure. Data-quality conditions (a CO with no attainable
//! marks, an outcome with no correlations, an empty roster) come back as
//! `None` or [`CourseStatus`] variants, never as a numeric 0.

pub mod aggregator;
pub mod blend;
pub mod course;
pub mod department;
pub mod engine;
pub mod error;
pub mod indirect;
pub mod levels;
pub mod rollup;

pub use course::{CourseAttainment, CourseStatus};
pub use engine::AttainmentEngine;
pub use error::EngineError;

/// Top of the attainment scale shared by CO scores, correlations and
/// survey ratings.
pub const FULL_SCALE: f64 = 3.0;
