//! Composable text components.
//!
//! Each component appends its lines to an output buffer and knows nothing
//! about the others. The layout functions decide the order.
//!
//! # Components
//!
//! - [`header`]: Centered title bar
//! - [`search`]: Active search term
//! - [`table`]: Column headings and rows, widths fitted to content
//! - [`empty`]: Message shown instead of an empty table
//! - [`footer`]: Page position, active sort and notices
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Rule]
//! [Search]            (only while searching)
//! [Table | Empty]
//! [Rule]
//! [Footer]
//! [Notices]
//! ```

mod empty;
mod footer;
mod header;
mod search;
mod table;

use crate::ui::viewmodel::TableViewModel;

pub use table::{fit_widths, MAX_COLUMN_WIDTH};

/// Appends a horizontal rule.
fn render_rule(out: &mut String, width: usize) {
    out.push_str(&"─".repeat(width));
    out.push('\n');
}

/// Lays out a full list screen.
pub fn render_list(out: &mut String, vm: &TableViewModel, width: usize) {
    header::render_header(out, &vm.header, width);
    render_rule(out, width);

    if let Some(search) = &vm.search_bar {
        search::render_search_bar(out, search);
    }

    if let Some(empty) = &vm.empty_state {
        empty::render_empty_state(out, empty, width);
    } else {
        table::render_table(out, &vm.header.columns, &vm.rows);
    }

    render_rule(out, width);
    footer::render_footer(out, &vm.footer, &vm.notices);
}

/// Appends a headed table without title or footer.
pub fn render_plain_table(out: &mut String, columns: &[String], rows: &[Vec<String>]) {
    table::render_cells(out, columns, rows);
}
