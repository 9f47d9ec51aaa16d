use serde::Serialize;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// A titled block of rows for table output.
#[derive(Clone, Debug, Default)]
pub struct Section {
    pub title: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Section {
    #[must_use]
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            title: Some(title.into()),
            headers: headers.iter().map(ToString::to_string).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }
}

/// Serialize a response as JSON: compact for `raw`, pretty otherwise.
pub fn render_json<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Json | OutputFormat::Table => Ok(serde_json::to_string_pretty(value)?),
    }
}

/// Print a report. Json and raw serialize `value`; table mode prints the
/// sections built by `sections` instead.
pub fn output_report<T, F>(value: &T, format: OutputFormat, sections: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce() -> Vec<Section>,
{
    let rendered = match format {
        OutputFormat::Table => render_sections(&sections()),
        OutputFormat::Json | OutputFormat::Raw => render_json(value, format)?,
    };
    println!("{rendered}");
    Ok(())
}

fn render_sections(sections: &[Section]) -> String {
    let prefs = ui::prefs();
    let options = table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    };
    sections
        .iter()
        .map(|section| table::render_section(section, options))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format a score or percentage with the configured precision.
#[must_use]
pub fn number(value: f64) -> String {
    format!("{value:.prec$}", prec = ui::prefs().precision)
}

/// Like [`number`], with `-` for an undefined value.
#[must_use]
pub fn maybe_number(value: Option<f64>) -> String {
    value.map_or_else(|| String::from("-"), number)
}

/// `pass` / `fail`, `-` when not computable.
#[must_use]
pub fn pass_fail(passed: Option<bool>) -> String {
    match passed {
        Some(true) => String::from("pass"),
        Some(false) => String::from("fail"),
        None => String::from("-"),
    }
}
