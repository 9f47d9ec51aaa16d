use std::path::{Path, PathBuf};

use anyhow::Context;
use obe_core::values::Correlation;
use obe_store::{ArticulationStore, CoUpdate, Mutation, MutationOutcome};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{MatrixArgs, MatrixCommands};
use crate::context::AppContext;
use crate::output::{Section, output_report};

#[derive(Debug, Serialize)]
pub struct MatrixResponse {
    pub results: Vec<MutationOutcome>,
    pub revision: u64,
    /// Where the dataset was written; `None` when nothing changed.
    pub written: Option<PathBuf>,
}

/// Handle `obe matrix`.
pub fn handle(args: &MatrixArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = execute(ctx, &args.action, args.output.as_deref())?;
    output_report(&response, flags.format, || {
        let mut section = Section::new("Results", &["result", "detail"]);
        for result in &response.results {
            section.row(result_row(result));
        }
        let written = response
            .written
            .as_ref()
            .map_or_else(|| "no changes".to_string(), |path| path.display().to_string());
        section.row(vec!["written".to_string(), written]);
        vec![section]
    })
}

/// Apply `action` to the loaded dataset and write it out if anything
/// changed.
pub fn execute(
    ctx: &mut AppContext,
    action: &MatrixCommands,
    output: Option<&Path>,
) -> anyhow::Result<MatrixResponse> {
    let mutations = mutations(action)?;
    let mut store = ArticulationStore::from_dataset(&ctx.dataset)?;
    let results = store.apply_all(mutations)?;

    let written = if store.has_unsaved_changes() {
        let revision = store.commit().revision;
        store.state().write_into(&mut ctx.dataset);
        let target = output.map_or_else(|| ctx.data_path.clone(), Path::to_path_buf);
        ctx.dataset
            .save(&target)
            .with_context(|| format!("failed to write dataset {}", target.display()))?;
        tracing::info!(revision, path = %target.display(), "articulation changes saved");
        Some(target)
    } else {
        tracing::debug!("no articulation changes to save");
        None
    };

    Ok(MatrixResponse {
        results,
        revision: store.revision(),
        written,
    })
}

fn mutations(action: &MatrixCommands) -> anyhow::Result<Vec<Mutation>> {
    let mutation = match action {
        MatrixCommands::Set {
            course,
            co,
            outcome,
            value,
        } => Mutation::SetCorrelation {
            course_id: course.clone(),
            co_id: co.clone(),
            outcome_id: outcome.clone(),
            value: i64::from(Correlation::parse_lenient(value).value()),
        },
        MatrixCommands::AddOutcome { kind, description } => Mutation::AddOutcome {
            kind: (*kind).into(),
            description: description.clone(),
        },
        MatrixCommands::UpdateOutcome {
            outcome,
            description,
        } => Mutation::UpdateOutcome {
            outcome_id: outcome.clone(),
            description: description.clone(),
        },
        MatrixCommands::DeleteOutcome { outcome } => Mutation::DeleteOutcome {
            outcome_id: outcome.clone(),
        },
        MatrixCommands::AddCo { course } => Mutation::AddCo {
            course_id: course.clone(),
        },
        MatrixCommands::UpdateCo {
            course,
            co,
            description,
            k_level,
        } => Mutation::UpdateCo {
            course_id: course.clone(),
            co_id: co.clone(),
            update: CoUpdate {
                description: description.clone(),
                k_level: k_level.clone(),
            },
        },
        MatrixCommands::DeleteCo { course, co } => Mutation::DeleteCo {
            course_id: course.clone(),
            co_id: co.clone(),
        },
        MatrixCommands::Apply { file } => return read_batch(file),
    };
    Ok(vec![mutation])
}

fn read_batch(path: &Path) -> anyhow::Result<Vec<Mutation>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read mutation batch {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid mutation batch {}", path.display()))
}

fn result_row(result: &MutationOutcome) -> Vec<String> {
    match result {
        MutationOutcome::Saved { id } => vec!["saved".to_string(), id.clone()],
        MutationOutcome::Removed { entries } => {
            vec!["removed".to_string(), format!("{entries} matrix entries")]
        }
        MutationOutcome::Correlation { value } => vec!["correlation".to_string(), value.to_string()],
        MutationOutcome::Replaced { entries } => {
            vec!["replaced".to_string(), format!("{entries} matrix entries")]
        }
    }
}
