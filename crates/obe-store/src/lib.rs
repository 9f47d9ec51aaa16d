//! # obe-store
//!
//! The articulation repository. [`ArticulationStore`] is the only owner of
//! the PO/PSO sets, the course list with its COs, and the CO -> outcome
//! matrix. Consumers read through it and change state through its methods
//! (or a [`Mutation`] batch), which keep the matrix free of dangling
//! references and track a revision counter against a committed baseline.

pub mod error;
pub mod mutation;
pub mod state;
pub mod updates;

mod correlations;
mod course_outcomes;
mod outcomes;
mod revision;
mod store;

pub use error::StoreError;
pub use mutation::{Mutation, MutationOutcome};
pub use state::ArticulationState;
pub use store::{ArticulationStore, Snapshot};
pub use updates::{CoUpdate, CoUpdateBuilder};
