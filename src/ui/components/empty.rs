//! Empty state component.
//!
//! Shown when loading, after a failed fetch, or when nothing matches.

use crate::ui::viewmodel::EmptyState;

/// Appends the message and subtitle, each centered.
///
/// ```text
///
///            No books found
///        Nothing matches "dune"
///
/// ```
pub fn render_empty_state(out: &mut String, empty: &EmptyState, width: usize) {
    out.push('\n');
    for line in [&empty.message, &empty.subtitle] {
        if line.is_empty() {
            continue;
        }
        let padding = width.saturating_sub(line.chars().count()) / 2;
        out.push_str(&" ".repeat(padding));
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
}
