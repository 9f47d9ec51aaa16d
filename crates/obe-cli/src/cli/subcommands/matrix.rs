use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use obe_core::enums::OutcomeKind;

#[derive(Clone, Debug, Args)]
pub struct MatrixArgs {
    #[command(subcommand)]
    pub action: MatrixCommands,

    /// Write the updated dataset here instead of back to --data.
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,
}

/// Articulation edits. Each one is committed and written out.
#[derive(Clone, Debug, Subcommand)]
pub enum MatrixCommands {
    /// Set one correlation. Numbers are clamped to 0-3, anything else
    /// counts as 0, and 0 removes the entry.
    Set {
        course: String,
        co: String,
        outcome: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Add a PO or PSO with the next free id.
    AddOutcome {
        kind: OutcomeKindArg,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change an outcome's description.
    UpdateOutcome {
        outcome: String,
        #[arg(long)]
        description: String,
    },
    /// Delete an outcome and all of its correlations.
    DeleteOutcome { outcome: String },
    /// Add a course outcome with the next free number.
    AddCo { course: String },
    /// Edit a course outcome.
    UpdateCo {
        course: String,
        co: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        k_level: Option<String>,
    },
    /// Delete a course outcome and its matrix row.
    DeleteCo { course: String, co: String },
    /// Apply a JSON array of mutations, all or nothing.
    Apply { file: PathBuf },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutcomeKindArg {
    Po,
    Pso,
}

impl From<OutcomeKindArg> for OutcomeKind {
    fn from(value: OutcomeKindArg) -> Self {
        match value {
            OutcomeKindArg::Po => Self::Po,
            OutcomeKindArg::Pso => Self::Pso,
        }
    }
}
