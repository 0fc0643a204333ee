//! Footer component.

use crate::ui::viewmodel::FooterInfo;

/// Appends the status line followed by one line per notice.
pub fn render_footer(out: &mut String, footer: &FooterInfo, notices: &[String]) {
    out.push_str(&footer.status);
    out.push('\n');
    for notice in notices {
        out.push_str(notice);
        out.push('\n');
    }
}
