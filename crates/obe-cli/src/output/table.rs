//! Plain-text rendering of report sections.

use super::Section;

/// Narrowest a column is squeezed to when the terminal is too small.
const MIN_COLUMN: usize = 4;
const GAP: &str = "  ";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render one section: optional title, header line, rule, rows.
#[must_use]
pub fn render_section(section: &Section, options: TableOptions) -> String {
    let mut lines = Vec::with_capacity(section.rows.len() + 3);
    if let Some(title) = &section.title {
        lines.push(title.clone());
    }
    if section.rows.is_empty() {
        lines.push(String::from("(no rows)"));
        return lines.join("\n");
    }

    let widths = column_widths(section, options.max_width);
    let header = section
        .headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&clip(header, *width), *width, Align::Left))
        .collect::<Vec<_>>()
        .join(GAP);
    lines.push(header.trim_end().to_string());
    lines.push("-".repeat(widths.iter().sum::<usize>() + GAP.len() * widths.len().saturating_sub(1)));

    for row in &section.rows {
        let cells = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = row.get(index).map_or("-", String::as_str);
                let text = clip(cell, *width);
                let align = if is_number(&text) { Align::Right } else { Align::Left };
                let padded = pad(&text, *width, align);
                if options.color {
                    paint(&text, &padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>();
        lines.push(cells.join(GAP).trim_end().to_string());
    }
    lines.join("\n")
}

/// Widest cell per column, shrinking the widest column first until the
/// table fits `max_width`.
fn column_widths(section: &Section, max_width: Option<usize>) -> Vec<usize> {
    let mut widths = section
        .headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            section
                .rows
                .iter()
                .filter_map(|row| row.get(index))
                .chain(std::iter::once(header))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<_>>();

    let Some(max_width) = max_width else {
        return widths;
    };
    let gaps = GAP.len() * widths.len().saturating_sub(1);
    while widths.iter().sum::<usize>() + gaps > max_width {
        let Some((index, width)) = widths
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, width)| *width > MIN_COLUMN)
            .max_by_key(|(_, width)| *width)
        else {
            break;
        };
        widths[index] = width - 1;
    }
    widths
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(text.chars().count()));
    match align {
        Align::Left => format!("{text}{fill}"),
        Align::Right => format!("{fill}{text}"),
    }
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped = text.chars().take(width.saturating_sub(1)).collect::<String>();
    clipped.push('…');
    clipped
}

/// Scores, percentages, counts and the `-` placeholder.
fn is_number(text: &str) -> bool {
    text == "-"
        || (text.parse::<f64>().is_ok()
            && text.chars().all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '-')))
}

/// Color course status and pass/fail cells; `padded` keeps its padding.
fn paint(text: &str, padded: &str) -> String {
    let code = match text {
        "pass" | "computed" => "32",
        "no_roster" => "33",
        "fail" | "not_computable" => "31",
        _ => return padded.to_string(),
    };
    padded.replacen(text, &format!("\u{1b}[{code}m{text}\u{1b}[0m"), 1)
}
