//! Fixed-width text tables.
//!
//! Column widths are measured with `unicode-width`, so labels containing
//! wide characters still line up in a terminal.

use unicode_width::UnicodeWidthStr;

const CELL_SEPARATOR: &str = " | ";
const RULE_SEPARATOR: &str = "-+-";

/// Pads `text` with spaces up to `width` display columns.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let current = text.width();
    if current >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - current))
}

/// Renders `rows` under `headers`.
///
/// Every column, the last one included, is padded to the widest of its header
/// and cells. The header is followed by a rule of dashes; lines are joined
/// with `\n` and there is no trailing newline.
pub fn render<const N: usize>(headers: [&str; N], rows: &[[&str; N]]) -> String {
    let mut widths = headers.map(UnicodeWidthStr::width);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.width());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(&headers, &widths));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join(RULE_SEPARATOR),
    );
    for row in rows {
        lines.push(render_row(row, &widths));
    }
    lines.join("\n")
}

fn render_row(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad_to_width(cell, *width))
        .collect::<Vec<_>>()
        .join(CELL_SEPARATOR)
}
