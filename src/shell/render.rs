use crate::{
    db::grid::Grid,
    error::{AppError, Severity},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Widest a cell may print before it is cut with an ellipsis.
const MAX_COLUMN_WIDTH: usize = 40;

pub fn render_grid(grid: &Grid, format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Table => Ok(render_table(grid)),
        OutputFormat::Json => serde_json::to_string_pretty(grid)
            .map_err(|err| AppError::internal(format!("Could not encode grid: {err}"))),
    }
}

pub fn render_error(err: &AppError) -> String {
    let level = match err.severity() {
        Severity::Warning => "warning",
        Severity::Error => "error",
    };
    format!("{level}: [{}] {}", err.title(), err.message())
}

fn truncate(value: &str, max_width: usize) -> String {
    if value.chars().count() <= max_width {
        value.to_string()
    } else {
        let kept: String = value.chars().take(max_width.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Box-drawn table with a leading `#` column holding the 1-based row number.
fn render_table(grid: &Grid) -> String {
    let mut header = vec!["#".to_string()];
    header.extend(grid.columns.iter().map(|c| truncate(c, MAX_COLUMN_WIDTH)));

    let body: Vec<Vec<String>> = grid
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let mut line = vec![(index + 1).to_string()];
            line.extend(
                row.cells()
                    .iter()
                    .map(|cell| truncate(&cell.to_string(), MAX_COLUMN_WIDTH)),
            );
            line
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for line in &body {
        for (width, value) in widths.iter_mut().zip(line) {
            *width = (*width).max(value.chars().count());
        }
    }

    let mut out = String::new();
    push_border(&mut out, &widths, ('┌', '┬', '┐'));
    push_line(&mut out, &widths, &header);
    push_border(&mut out, &widths, ('├', '┼', '┤'));
    for line in &body {
        push_line(&mut out, &widths, line);
    }
    push_border(&mut out, &widths, ('└', '┴', '┘'));

    let count = grid.len();
    out.push_str(&format!(
        "({count} row{})",
        if count == 1 { "" } else { "s" }
    ));
    out
}

fn push_border(out: &mut String, widths: &[usize], (left, mid, right): (char, char, char)) {
    out.push(left);
    for (idx, width) in widths.iter().enumerate() {
        out.push_str(&"─".repeat(width + 2));
        out.push(if idx + 1 == widths.len() { right } else { mid });
    }
    out.push('\n');
}

fn push_line(out: &mut String, widths: &[usize], values: &[String]) {
    out.push('│');
    for (width, value) in widths.iter().zip(values) {
        let pad = width.saturating_sub(value.chars().count());
        out.push(' ');
        out.push_str(value);
        out.push_str(&" ".repeat(pad + 1));
        out.push('│');
    }
    out.push('\n');
}
