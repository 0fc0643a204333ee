//! Header component.

use crate::ui::viewmodel::HeaderInfo;

/// Appends the title centered in `width` columns.
pub fn render_header(out: &mut String, header: &HeaderInfo, width: usize) {
    let title_len = header.title.chars().count();
    let padding = width.saturating_sub(title_len) / 2;
    out.push_str(&" ".repeat(padding));
    out.push_str(&header.title);
    out.push('\n');
}
