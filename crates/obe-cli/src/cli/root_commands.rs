use clap::{Args, Subcommand};

use crate::cli::subcommands::MatrixArgs;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Load and validate the dataset, then print a summary.
    Validate,
    /// CO attainment report for one course.
    Course(CourseArgs),
    /// Per-outcome correlation averages for one course.
    Articulation(ArticulationArgs),
    /// Department rollup with direct, indirect and blended attainment.
    Department(DepartmentArgs),
    /// Course averages grouped by semester.
    Program,
    /// Edit outcomes, course outcomes and the articulation matrix.
    Matrix(MatrixArgs),
    /// Print the dataset JSON Schema.
    Schema,
}

#[derive(Clone, Debug, Args)]
pub struct CourseArgs {
    /// Course id.
    pub course_id: String,
}

#[derive(Clone, Debug, Args)]
pub struct ArticulationArgs {
    /// Course id.
    pub course_id: String,
}

#[derive(Clone, Debug, Args)]
pub struct DepartmentArgs {
    /// Only include courses of this semester.
    #[arg(long)]
    pub semester: Option<u32>,
    /// Only include courses of this department id.
    #[arg(long)]
    pub department: Option<String>,
}
