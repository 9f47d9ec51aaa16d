use obe_core::enums::SurveyKind;
use obe_engine::blend::Blend;
use obe_engine::department::DepartmentReport;
use obe_engine::rollup::CourseFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DepartmentArgs;
use crate::commands::program::rollup_section;
use crate::context::AppContext;
use crate::output::{Section, maybe_number, output_report};

/// Handle `obe department`.
pub fn handle(args: &DepartmentArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = CourseFilter {
        semester: args.semester,
        department_id: args.department.clone(),
    };
    let report = ctx.engine().department(filter)?;
    output_report(&report, flags.format, || sections(&report))
}

fn sections(report: &DepartmentReport) -> Vec<Section> {
    let outcome_ids = report
        .rows
        .iter()
        .map(|row| row.outcome_id.as_str())
        .collect::<Vec<_>>();

    let courses = rollup_section("Courses".to_string(), &report.courses, &outcome_ids);

    let mut headers = vec![""];
    headers.extend(outcome_ids.iter().copied());
    let mut attainment = Section::new("Attainment", &headers);

    let rows = &report.rows;
    let blend = move |index: usize| rows[index].blend.as_ref();

    value_row(&mut attainment, "Direct [A]", rows.len(), |i| rows[i].direct);
    for kind in SurveyKind::ALL {
        value_row(&mut attainment, kind.label(), rows.len(), |i| {
            rows[i].indirect.ratings.get(&kind).copied()
        });
    }
    value_row(&mut attainment, "Indirect [B]", rows.len(), |i| rows[i].indirect.value);
    value_row(&mut attainment, "C = A x 0.8", rows.len(), |i| {
        blend(i).map(|b: &Blend| b.weighted_direct)
    });
    value_row(&mut attainment, "D = B x 0.2", rows.len(), |i| {
        blend(i).map(|b: &Blend| b.weighted_indirect)
    });
    value_row(&mut attainment, "Total", rows.len(), |i| blend(i).map(|b: &Blend| b.total));
    value_row(&mut attainment, "%", rows.len(), |i| blend(i).map(|b: &Blend| b.percentage));

    vec![courses, attainment]
}

fn value_row(section: &mut Section, label: &str, count: usize, cell: impl Fn(usize) -> Option<f64>) {
    let mut row = vec![label.to_string()];
    row.extend((0..count).map(|index| maybe_number(cell(index))));
    section.row(row);
}
