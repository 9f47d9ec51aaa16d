use std::path::PathBuf;

use obe_core::dataset::DatasetSummary;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::{Section, output_report};

#[derive(Debug, Serialize)]
struct ValidateResponse {
    path: PathBuf,
    summary: DatasetSummary,
    /// Courses that have no assessment schema and so no CO attainment.
    courses_without_schema: Vec<String>,
}

/// Handle `obe validate`. Loading the context already ran every check.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let dataset = &ctx.dataset;
    let response = ValidateResponse {
        path: ctx.data_path.clone(),
        summary: dataset.summary(),
        courses_without_schema: dataset
            .courses
            .iter()
            .filter(|course| !dataset.schemas.contains_key(&course.id))
            .map(|course| course.id.clone())
            .collect(),
    };

    output_report(&response, flags.format, || {
        let summary = &response.summary;
        let mut section = Section::new(
            format!("Dataset {} is valid", response.path.display()),
            &["item", "count"],
        );
        for (item, count) in [
            ("departments", summary.departments),
            ("pos", summary.pos),
            ("psos", summary.psos),
            ("courses", summary.courses),
            ("course outcomes", summary.course_outcomes),
            ("students", summary.students),
            ("schemas", summary.schemas),
            ("correlations", summary.correlations),
        ] {
            section.row(vec![item.to_string(), count.to_string()]);
        }
        if !response.courses_without_schema.is_empty() {
            section.row(vec![
                "without schema".to_string(),
                response.courses_without_schema.join(", "),
            ]);
        }
        vec![section]
    })
}
