//! List screen state and view computation.
//!
//! [`ListState`] is the state one list screen (books, orders or users) owns for
//! its lifetime: the cached collection, the search term, the sort, the current
//! page, the loading flag and any notices waiting to be shown.
//!
//! # State Components
//!
//! - **Collection**: id-keyed cache filled by the fetcher, spliced by the
//!   dispatcher
//! - **Query**: search term and optional single-field sort
//! - **Page**: 1-based, reset on query change, clamped on navigation
//! - **Status**: loading flag, last error, pending notices
//! - **Lifetime**: a cancellation token; [`ListState::close`] cancels it
//!
//! # Example
//!
//! ```rust
//! use folio::app::ListState;
//! use folio::domain::Book;
//!
//! let mut state: ListState<Book> = ListState::new(10);
//! state.set_search("dune");
//! assert_eq!(state.page(), 1);
//! ```

use super::collection::{Collection, Mutation};
use super::modes::SortSpec;
use super::query;
use crate::api::CancellationToken;
use crate::domain::error::{FolioError, Result};
use crate::domain::Record;
use crate::ui::viewmodel::{
    DisplayRow, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, TableViewModel,
};
use crate::ui::Tabular;
use std::fmt;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A toast-style message produced by a fetch or mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            NoticeLevel::Success => write!(f, "✓ {}", self.message),
            NoticeLevel::Error => write!(f, "✗ {}", self.message),
        }
    }
}

/// The derived window of a list.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a, T> {
    pub items: Vec<&'a T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

/// State owned by one list screen.
#[derive(Debug, Clone)]
pub struct ListState<T: Record> {
    collection: Collection<T>,
    search: String,
    sort: Option<SortSpec>,
    page: usize,
    page_size: usize,
    loading: bool,
    error: Option<String>,
    notices: Vec<Notice>,
    cancel: CancellationToken,
}

impl<T: Record> ListState<T> {
    /// Creates an empty list with a fixed page size (0 is treated as 1).
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            collection: Collection::default(),
            search: String::new(),
            sort: None,
            page: 1,
            page_size: page_size.max(1),
            loading: false,
            error: None,
            notices: Vec::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Creates a list pre-filled with items, as if a fetch had succeeded.
    #[must_use]
    pub fn with_items(items: Vec<T>, page_size: usize) -> Self {
        let mut state = Self::new(page_size);
        state.collection.replace(items);
        state
    }

    #[must_use]
    pub const fn collection(&self) -> &Collection<T> {
        &self.collection
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.collection.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.collection.get(id)
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub const fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drains pending notices for display.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn push_notice(&mut self, notice: Notice) {
        tracing::debug!(level = ?notice.level, message = %notice.message, "notice queued");
        self.notices.push(notice);
    }

    /// Token to pass into every network call made on behalf of this list.
    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Ends the list's lifetime; in-flight requests resolve as cancelled.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Sets the search term and returns to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// Sets or clears the sort and returns to page 1.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Validation`] for a field the record type does
    /// not sort by.
    pub fn set_sort(&mut self, sort: Option<SortSpec>) -> Result<()> {
        if let Some(spec) = &sort {
            if !T::SORT_FIELDS.contains(&spec.field.as_str()) {
                return Err(FolioError::Validation(format!(
                    "cannot sort by {:?}; expected one of {}",
                    spec.field,
                    T::SORT_FIELDS.join(", ")
                )));
            }
        }
        self.sort = sort;
        self.page = 1;
        Ok(())
    }

    /// Sorts by `field`, flipping the direction if it is already active.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Validation`] for an unknown field.
    pub fn toggle_sort(&mut self, field: &str) -> Result<()> {
        let next = match &self.sort {
            Some(current) if current.field == field => current.toggled(),
            _ => SortSpec::ascending(field),
        };
        self.set_sort(Some(next))
    }

    /// Filtered and sorted items, before pagination.
    #[must_use]
    pub fn matching(&self) -> Vec<&T> {
        let mut items = query::filter(self.collection.as_slice(), &self.search);
        query::sort(&mut items, self.sort.as_ref());
        items
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        query::total_pages(self.matching().len(), self.page_size)
    }

    /// Moves to `page`, clamped into `[1, total_pages]`.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = query::clamp_page(page, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.page.saturating_sub(1));
    }

    /// The current page of filtered, sorted items.
    #[must_use]
    pub fn view(&self) -> PageView<'_, T> {
        let matching = self.matching();
        let total_pages = query::total_pages(matching.len(), self.page_size);
        let page = query::clamp_page(self.page, total_pages);
        let items = query::window(&matching, page, self.page_size).to_vec();
        PageView {
            items,
            page,
            total_pages,
            total_matches: matching.len(),
        }
    }

    /// Marks a fetch as started.
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Drops the loading flag without touching the collection.
    pub fn abort_load(&mut self) {
        self.loading = false;
    }

    /// Stores the outcome of a fetch.
    ///
    /// Failures leave the list empty and queue an error notice.
    pub fn finish_load(&mut self, result: Result<Vec<T>>) {
        self.loading = false;
        match result {
            Ok(items) => {
                tracing::debug!(count = items.len(), "collection loaded");
                self.collection.replace(items);
                self.error = None;
                self.page = query::clamp_page(self.page, self.total_pages());
            }
            Err(e) => {
                tracing::warn!(error = %e, "collection load failed");
                self.collection.clear();
                self.page = 1;
                let message = e.user_message();
                self.error = Some(message.clone());
                self.push_notice(Notice::error(message));
            }
        }
    }

    /// Splices a server-confirmed mutation into the cache.
    ///
    /// # Errors
    ///
    /// Propagates [`Collection::apply`] errors; state is unchanged on error.
    pub fn apply(&mut self, mutation: Mutation<T>) -> Result<()> {
        self.collection.apply(mutation)?;
        self.page = query::clamp_page(self.page, self.total_pages());
        Ok(())
    }
}

impl<T: Record + Tabular> ListState<T> {
    /// Computes a renderable table for the current page.
    #[must_use]
    pub fn compute_viewmodel(&self) -> TableViewModel {
        let view = self.view();

        let header = HeaderInfo {
            title: format!(" {} ({}) ", T::TITLE, view.total_matches),
            columns: T::headers().iter().map(|h| (*h).to_string()).collect(),
        };

        let sort = self
            .sort
            .as_ref()
            .map(|s| format!("  sorted by {} {}", s.field, s.direction))
            .unwrap_or_default();
        let footer = FooterInfo {
            status: format!(
                "page {} of {}{}",
                view.page,
                view.total_pages.max(1),
                sort
            ),
        };

        let empty_state = if self.loading {
            Some(EmptyState {
                message: "Loading…".to_string(),
                subtitle: String::new(),
            })
        } else if let Some(error) = &self.error {
            Some(EmptyState {
                message: format!("Could not load {}", T::TITLE.to_lowercase()),
                subtitle: error.clone(),
            })
        } else if view.items.is_empty() {
            Some(EmptyState {
                message: format!("No {} found", T::TITLE.to_lowercase()),
                subtitle: if self.search.is_empty() {
                    String::new()
                } else {
                    format!("Nothing matches \"{}\"", self.search)
                },
            })
        } else {
            None
        };

        let rows = view
            .items
            .iter()
            .map(|item| DisplayRow {
                id: item.id().to_string(),
                cells: item.cells(),
            })
            .collect();

        TableViewModel {
            header,
            rows,
            footer,
            empty_state,
            search_bar: (!self.search.is_empty()).then(|| SearchBarInfo {
                query: self.search.clone(),
            }),
            notices: self.notices.iter().map(ToString::to_string).collect(),
        }
    }
}
