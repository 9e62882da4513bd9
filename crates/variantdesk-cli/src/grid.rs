//! Plain-text rendering of the record grid.

use variantdesk_core::{Column, Record, SortState};

/// Cells longer than this are cut and suffixed with `...`.
const MAX_CELL_WIDTH: usize = 40;
const PROGRESS_WIDTH: usize = 20;

fn truncate(value: &str) -> String {
    if value.chars().count() > MAX_CELL_WIDTH {
        format!(
            "{}...",
            value.chars().take(MAX_CELL_WIDTH - 3).collect::<String>()
        )
    } else {
        value.to_string()
    }
}

fn header_label(column: Column, sort: Option<SortState>) -> String {
    match sort {
        Some(state) if state.column == column && state.descending => {
            format!("{} v", column.header())
        }
        Some(state) if state.column == column => format!("{} ^", column.header()),
        _ => column.header().to_string(),
    }
}

/// Renders `rows` as a left-aligned table with one column per [`Column`].
///
/// The sorted column's header carries `^` (ascending) or `v` (descending).
pub(crate) fn render(rows: &[Record], sort: Option<SortState>) -> String {
    if rows.is_empty() {
        return "(no records)\n".to_string();
    }

    let headers: Vec<String> = Column::ALL
        .iter()
        .map(|&column| header_label(column, sort))
        .collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.cells().iter().map(|cell| truncate(cell)).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, &headers, &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// `[#####---------------]  25%` style bar for a fraction in `0.0..=1.0`.
pub(crate) fn progress_bar(progress: f32) -> String {
    let progress = progress.clamp(0.0, 1.0);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    let filled = (progress * PROGRESS_WIDTH as f32).round() as usize;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = (progress * 100.0).round() as u32;
    format!(
        "[{}{}] {percent:>3}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled)
    )
}
