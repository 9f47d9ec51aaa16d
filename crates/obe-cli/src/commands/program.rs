use obe_engine::rollup::CourseRollup;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::{Section, maybe_number, output_report};

/// Handle `obe program`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let semesters = ctx.engine().program();
    let outcome_ids = ctx
        .dataset
        .outcomes()
        .map(|outcome| outcome.id.as_str())
        .collect::<Vec<_>>();

    output_report(&semesters, flags.format, || {
        semesters
            .iter()
            .map(|group| {
                rollup_section(
                    format!("Semester {}", group.semester),
                    &group.courses,
                    &outcome_ids,
                )
            })
            .collect()
    })
}

/// One row per course with its average for each outcome.
pub fn rollup_section(title: String, rollups: &[CourseRollup], outcome_ids: &[&str]) -> Section {
    let mut headers = vec!["code", "name"];
    headers.extend(outcome_ids.iter().copied());
    let mut section = Section::new(title, &headers);
    for rollup in rollups {
        let mut row = vec![rollup.code.clone(), rollup.name.clone()];
        row.extend(outcome_ids.iter().map(|id| maybe_number(rollup.value(id))));
        section.row(row);
    }
    section
}
