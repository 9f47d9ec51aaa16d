use obe_engine::{CourseAttainment, CourseStatus};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CourseArgs;
use crate::context::AppContext;
use crate::output::{Section, maybe_number, number, output_report, pass_fail};

/// Handle `obe course <COURSE_ID>`.
pub fn handle(args: &CourseArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = ctx.engine().course_attainment(&args.course_id)?;
    output_report(&report, flags.format, || sections(&report))
}

const fn status_label(status: CourseStatus) -> &'static str {
    match status {
        CourseStatus::Computed => "computed",
        CourseStatus::NotComputable => "not_computable",
        CourseStatus::NoRoster => "no_roster",
    }
}

fn sections(report: &CourseAttainment) -> Vec<Section> {
    let mut overview = Section::new(format!("Course {}", report.course_id), &["item", "value"]);
    overview.row(vec!["status".into(), status_label(report.status).into()]);
    overview.row(vec!["target %".into(), number(report.target_percentage)]);
    overview.row(vec!["pass threshold".into(), number(report.pass_threshold)]);
    overview.row(vec![
        "students passed".into(),
        format!("{} / {}", report.passed_count, report.students.len()),
    ]);

    let mut cos = Section::new(
        "Course outcomes",
        &["co", "max", "passed", "%", "level", "avg score"],
    );
    for co in &report.cos {
        cos.row(vec![
            co.co.clone(),
            number(co.max_marks),
            co.passed_count.to_string(),
            maybe_number(co.percentage),
            co.level.map_or_else(|| "-".to_string(), |level| level.to_string()),
            maybe_number(co.average_score),
        ]);
    }

    let mut assessments = Section::new(
        "Assessments",
        &["id", "name", "kind", "total", "pass mark", "passed", "%"],
    );
    for assessment in &report.assessments {
        assessments.row(vec![
            assessment.assessment_id.clone(),
            assessment.name.clone(),
            assessment.kind.to_string(),
            number(assessment.total),
            number(assessment.pass_mark),
            assessment.passed_count.to_string(),
            maybe_number(assessment.percentage),
        ]);
    }

    let co_ids = report.cos.iter().map(|co| co.co.as_str()).collect::<Vec<_>>();
    let mut headers = vec!["usn", "name"];
    headers.extend(co_ids.iter().copied());
    headers.extend(["average", "result"]);
    let mut students = Section::new("Students", &headers);
    for student in &report.students {
        let mut row = vec![student.usn.clone(), student.name.clone()];
        row.extend(
            co_ids
                .iter()
                .map(|co| maybe_number(student.co(co).and_then(|score| score.score))),
        );
        row.push(maybe_number(student.average));
        row.push(pass_fail(student.passed));
        students.row(row);
    }

    vec![overview, cos, assessments, students]
}
