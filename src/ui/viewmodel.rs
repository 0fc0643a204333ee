//! View model types representing a renderable list screen.
//!
//! View models are computed by [`ListState::compute_viewmodel`] and consumed by
//! the renderer. They hold display-ready strings only: prices are already
//! formatted, pages already clamped, notices already worded.
//!
//! [`ListState::compute_viewmodel`]: crate::app::ListState::compute_viewmodel
//!
//! # Example
//!
//! ```rust
//! use folio::ui::viewmodel::{DisplayRow, FooterInfo, HeaderInfo, TableViewModel};
//!
//! let vm = TableViewModel {
//!     header: HeaderInfo {
//!         title: " Books (1) ".to_string(),
//!         columns: vec!["TITLE".to_string(), "PRICE".to_string()],
//!     },
//!     rows: vec![DisplayRow {
//!         id: "b1".to_string(),
//!         cells: vec!["Dune".to_string(), "$9.99".to_string()],
//!     }],
//!     footer: FooterInfo { status: "page 1 of 1".to_string() },
//!     empty_state: None,
//!     search_bar: None,
//!     notices: vec![],
//! };
//! assert_eq!(vm.rows.len(), 1);
//! ```

/// Complete view model for one list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableViewModel {
    /// Title and column headings.
    pub header: HeaderInfo,

    /// Rows of the current page, in display order.
    pub rows: Vec<DisplayRow>,

    /// Page position and active sort.
    pub footer: FooterInfo,

    /// Shown instead of the table when loading, failed or empty.
    pub empty_state: Option<EmptyState>,

    /// Present while a search term is active.
    pub search_bar: Option<SearchBarInfo>,

    /// Pending notices, already formatted.
    pub notices: Vec<String>,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Identifier of the record the row shows.
    pub id: String,

    /// One cell per header column.
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// e.g. `page 2 of 5  sorted by price desc`
    pub status: String,
}

/// Message shown in place of an empty table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No books found").
    pub message: String,

    /// Secondary text; may be empty.
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
}
