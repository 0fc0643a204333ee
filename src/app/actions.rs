//! Side effects requested by the list event handler.
//!
//! [`handle_event`](super::handle_event) only mutates list state. Anything that
//! needs the network or the terminal is returned as an [`Action`] for the
//! caller to run, so the handler stays synchronous and testable.
//!
//! # Example
//!
//! ```rust
//! use folio::app::{handle_event, Action, ListEvent, ListState};
//! use folio::domain::Book;
//!
//! let mut state: ListState<Book> = ListState::new(10);
//! let (_, actions) = handle_event(&mut state, &ListEvent::Refresh)?;
//! assert_eq!(actions, vec![Action::Fetch]);
//! # Ok::<(), folio::FolioError>(())
//! ```

use super::state::Notice;

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run the resource fetcher again for this list.
    ///
    /// Re-invoking the fetch is the only retry mechanism.
    Fetch,

    /// Show a notice without storing it on the list.
    Notify(Notice),

    /// The list screen was closed; in-flight work has been cancelled.
    Exit,
}
