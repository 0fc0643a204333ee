//! Event handling for list screens.
//!
//! [`handle_event`] is the single entry point through which user input reaches a
//! [`ListState`]. It pattern-matches the event, calls the state's query and
//! navigation methods, and returns whether the view needs re-rendering plus any
//! [`Action`]s the caller must execute.
//!
//! # Event Types
//!
//! - **Search**: `SetSearch`, `Char`, `Backspace`, `ClearSearch`
//! - **Sort**: `SortBy`, `ClearSort`
//! - **Pagination**: `NextPage`, `PrevPage`, `GoToPage`
//! - **Lifecycle**: `Refresh`, `Close`
//!
//! Every search or sort change resets the page to 1; page moves are clamped.

use super::actions::Action;
use super::state::{ListState, Notice};
use crate::domain::error::{FolioError, Result};
use crate::domain::Record;

/// Input events a list screen understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    /// Replaces the search term.
    SetSearch(String),
    /// Appends a character to the search term.
    Char(char),
    /// Removes the last character of the search term.
    Backspace,
    /// Clears the search term.
    ClearSearch,
    /// Sorts by a field; repeating the active field flips direction.
    SortBy(String),
    /// Returns to the server's original order.
    ClearSort,
    NextPage,
    PrevPage,
    /// Jumps to a 1-based page, clamped to the available range.
    GoToPage(usize),
    /// Requests a fresh fetch.
    Refresh,
    /// Leaves the screen.
    Close,
}

/// Applies one event to a list and returns `(needs_render, actions)`.
///
/// # Errors
///
/// Currently infallible for well-formed events: an unknown sort field is
/// reported as an [`Action::Notify`] rather than an error, so a mistyped
/// column never aborts the screen. Kept fallible so callers propagate with `?`.
///
/// # Example
///
/// ```rust
/// use folio::app::{handle_event, ListEvent, ListState};
/// use folio::domain::Book;
///
/// let mut state: ListState<Book> = ListState::new(4);
/// let (render, _) = handle_event(&mut state, &ListEvent::Char('d'))?;
/// assert!(render);
/// assert_eq!(state.search(), "d");
/// # Ok::<(), folio::FolioError>(())
/// ```
pub fn handle_event<T: Record>(
    state: &mut ListState<T>,
    event: &ListEvent,
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        ListEvent::SetSearch(term) => {
            if state.search() == term {
                return Ok((false, vec![]));
            }
            state.set_search(term.clone());
            tracing::trace!(query = %state.search(), "search query updated");
            Ok((true, vec![]))
        }
        ListEvent::Char(c) => {
            let mut term = state.search().to_string();
            term.push(*c);
            state.set_search(term);
            tracing::trace!(query = %state.search(), char = %c, "search query updated");
            Ok((true, vec![]))
        }
        ListEvent::Backspace => {
            if state.search().is_empty() {
                return Ok((false, vec![]));
            }
            let mut term = state.search().to_string();
            term.pop();
            state.set_search(term);
            Ok((true, vec![]))
        }
        ListEvent::ClearSearch => {
            if state.search().is_empty() {
                return Ok((false, vec![]));
            }
            state.set_search(String::new());
            Ok((true, vec![]))
        }
        ListEvent::SortBy(field) => match state.toggle_sort(field) {
            Ok(()) => {
                tracing::debug!(sort = ?state.sort(), "sort changed");
                Ok((true, vec![]))
            }
            Err(FolioError::Validation(message)) => {
                tracing::debug!(field = %field, "rejected sort field");
                Ok((false, vec![Action::Notify(Notice::error(message))]))
            }
            Err(e) => Err(e),
        },
        ListEvent::ClearSort => {
            if state.sort().is_none() {
                return Ok((false, vec![]));
            }
            state.set_sort(None)?;
            Ok((true, vec![]))
        }
        ListEvent::NextPage => Ok((move_page(state, ListState::<T>::next_page), vec![])),
        ListEvent::PrevPage => Ok((move_page(state, ListState::<T>::prev_page), vec![])),
        ListEvent::GoToPage(page) => {
            let page = *page;
            Ok((move_page(state, |s| s.go_to_page(page)), vec![]))
        }
        ListEvent::Refresh => Ok((false, vec![Action::Fetch])),
        ListEvent::Close => {
            state.close();
            Ok((false, vec![Action::Exit]))
        }
    }
}

/// Runs a page move and reports whether the page actually changed.
fn move_page<T: Record>(state: &mut ListState<T>, step: impl FnOnce(&mut ListState<T>)) -> bool {
    let before = state.page();
    step(state);
    let moved = state.page() != before;
    if !moved {
        tracing::debug!(page = before, "page move clamped, no change");
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Book;

    fn books(n: usize) -> Vec<Book> {
        (1..=n)
            .map(|i| Book {
                id: format!("b{i}"),
                title: format!("Title {i}"),
                ..Book::default()
            })
            .collect()
    }

    #[test]
    fn typing_resets_page() {
        let mut state = ListState::with_items(books(9), 4);
        handle_event(&mut state, &ListEvent::GoToPage(3)).unwrap();
        assert_eq!(state.page(), 3);
        handle_event(&mut state, &ListEvent::Char('t')).unwrap();
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn clamped_page_move_does_not_render() {
        let mut state = ListState::with_items(books(7), 4);
        handle_event(&mut state, &ListEvent::NextPage).unwrap();
        let (render, actions) = handle_event(&mut state, &ListEvent::GoToPage(3)).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn unknown_sort_field_becomes_notice() {
        let mut state = ListState::with_items(books(2), 4);
        let (render, actions) =
            handle_event(&mut state, &ListEvent::SortBy("isbn".to_string())).unwrap();
        assert!(!render);
        assert!(matches!(actions.as_slice(), [Action::Notify(_)]));
        assert!(state.sort().is_none());
    }

    #[test]
    fn repeated_sort_flips_direction() {
        let mut state = ListState::with_items(books(3), 4);
        handle_event(&mut state, &ListEvent::SortBy("title".to_string())).unwrap();
        handle_event(&mut state, &ListEvent::SortBy("title".to_string())).unwrap();
        let first = state.view().items[0].title.clone();
        assert_eq!(first, "Title 3");
    }

    #[test]
    fn close_cancels_token() {
        let mut state: ListState<Book> = ListState::new(4);
        let (_, actions) = handle_event(&mut state, &ListEvent::Close).unwrap();
        assert_eq!(actions, vec![Action::Exit]);
        assert!(state.cancel_token().is_cancelled());
    }
}
