//! Search bar component.

use crate::ui::viewmodel::SearchBarInfo;

pub fn render_search_bar(out: &mut String, search: &SearchBarInfo) {
    out.push_str(&format!("Search: {}\n", search.query));
}
