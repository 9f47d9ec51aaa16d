//! # obe-core
//!
//! Core types, validation, and error types for outcome-based-education
//! attainment.
//!
//! This crate provides the foundational types shared across all OBE crates:
//! - Entity structs (outcomes, courses, course outcomes, students, departments)
//! - Kind enums for outcomes, surveys, and assessments
//! - Clamped value types for correlations, marks, and survey ratings
//! - Assessment schemas with load-time validation
//! - Mark sheets with entry-time clamping
//! - The articulation matrix (course -> CO -> outcome -> correlation)
//! - The dataset envelope used to load and save a full term of data
//! - Cross-cutting error types

pub mod dataset;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod marks;
pub mod matrix;
pub mod schema;
pub mod survey;
pub mod values;
