use crate::cli::GlobalFlags;
use crate::cli::root_commands::ArticulationArgs;
use crate::context::AppContext;
use crate::output::{Section, maybe_number, output_report};

/// Handle `obe articulation <COURSE_ID>`.
pub fn handle(
    args: &ArticulationArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let rollup = ctx.engine().course_rollup(&args.course_id)?;
    output_report(&rollup, flags.format, || {
        let mut section = Section::new(
            format!("{} {} (semester {})", rollup.code, rollup.name, rollup.semester),
            &["outcome", "average", "mapped cos"],
        );
        for value in &rollup.values {
            section.row(vec![
                value.outcome_id.clone(),
                maybe_number(value.value),
                value.contributors.to_string(),
            ]);
        }
        vec![section]
    })
}
