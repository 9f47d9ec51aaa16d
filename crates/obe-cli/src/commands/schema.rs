use obe_core::dataset::Dataset;
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::output::render_json;

/// Handle `obe schema`. A JSON Schema has no tabular form, so table mode
/// prints it as pretty JSON too.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_for!(Dataset);
    println!("{}", render_json(&schema, flags.format)?);
    Ok(())
}
