//! Table component.
//!
//! Column widths are fitted to the widest cell (or heading) in each column,
//! capped at [`MAX_COLUMN_WIDTH`]. Longer cells are cut with an ellipsis.
//! Widths are counted in chars, not bytes.

use crate::ui::viewmodel::DisplayRow;

/// Widest a column may grow before cells are truncated.
pub const MAX_COLUMN_WIDTH: usize = 32;

/// Two spaces between columns.
const GUTTER: &str = "  ";

/// Width of each column for the given headings and rows.
#[must_use]
pub fn fit_widths(columns: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .map(|(i, heading)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(heading.chars().count()))
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH)
        })
        .collect()
}

fn fit(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    if len <= width {
        return format!("{cell}{}", " ".repeat(width - len));
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = cell.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

fn render_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| fit(cell, width))
        .collect::<Vec<_>>()
        .join(GUTTER);
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Appends headings and rows.
pub fn render_cells(out: &mut String, columns: &[String], rows: &[Vec<String>]) {
    let widths = fit_widths(columns, rows);
    render_line(out, columns, &widths);
    for row in rows {
        render_line(out, row, &widths);
    }
}

pub fn render_table(out: &mut String, columns: &[String], rows: &[DisplayRow]) {
    let cells: Vec<Vec<String>> = rows.iter().map(|row| row.cells.clone()).collect();
    render_cells(out, columns, &cells);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_follow_widest_cell() {
        let columns = vec!["ID".to_string(), "TITLE".to_string()];
        let rows = vec![vec!["1".to_string(), "The Left Hand of Darkness".to_string()]];
        assert_eq!(fit_widths(&columns, &rows), vec![2, 25]);
    }

    #[test]
    fn long_cells_are_truncated() {
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("ab", 4), "ab  ");
    }
}
