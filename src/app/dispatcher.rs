//! Mutation dispatcher.
//!
//! Sends one create, update or delete request and, only once the API confirms
//! it, splices the result into the owning [`ListState`]. The collection is
//! never refetched. A failed request leaves the collection exactly as it was
//! and queues the server's message (or the generic fallback) as a notice.

use super::collection::Mutation;
use super::state::{ListState, Notice};
use crate::domain::error::{FolioError, Result};
use crate::domain::Record;
use std::future::Future;

/// What a dispatched mutation did to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The server confirmed and the cache was updated.
    Applied,
    /// The server confirmed but the cache already held a newer revision.
    Stale,
    /// The request failed; the cache is unchanged.
    Failed(String),
    /// The screen closed first; the cache is unchanged.
    Cancelled,
}

impl DispatchOutcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Awaits `request` and applies its [`Mutation`] to `state` on success.
///
/// `success` is the notice text queued when the mutation lands.
///
/// # Example
///
/// ```rust,no_run
/// use folio::app::{dispatch, ListState, Mutation};
/// use folio::domain::Book;
///
/// async fn remove(state: &mut ListState<Book>) {
///     let outcome = dispatch(state, "Book deleted", async {
///         Ok(Mutation::Deleted("x".to_string()))
///     })
///     .await;
///     assert!(outcome.is_applied());
/// }
/// ```
pub async fn dispatch<T, F>(
    state: &mut ListState<T>,
    success: &str,
    request: F,
) -> DispatchOutcome
where
    T: Record,
    F: Future<Output = Result<Mutation<T>>>,
{
    let token = state.cancel_token().clone();
    let result = token.run(request).await;

    let mutation = match result {
        Ok(mutation) => mutation,
        Err(FolioError::Cancelled) => {
            tracing::debug!("mutation cancelled, state untouched");
            return DispatchOutcome::Cancelled;
        }
        Err(e) => {
            tracing::debug!(error = %e, "mutation failed");
            let message = e.user_message();
            state.push_notice(Notice::error(message.clone()));
            return DispatchOutcome::Failed(message);
        }
    };

    // The response may land after the screen closed even if the race above
    // was won by the request.
    if state.is_closed() {
        return DispatchOutcome::Cancelled;
    }

    if let Mutation::Confirmed(id) = &mutation {
        tracing::warn!(id = %id, "server confirmed a change to an item that is not loaded");
        state.push_notice(Notice::success(success));
        return DispatchOutcome::Applied;
    }

    let kind = mutation.kind();
    let id = mutation.id().to_string();
    match state.apply(mutation) {
        Ok(()) => {
            tracing::debug!(kind, id = %id, len = state.len(), "mutation applied");
            state.push_notice(Notice::success(success));
            DispatchOutcome::Applied
        }
        Err(FolioError::Stale { .. }) => {
            state.push_notice(Notice::success(success));
            DispatchOutcome::Stale
        }
        Err(e) => {
            // The server accepted the change; only the local copy is behind.
            tracing::warn!(kind, id = %id, error = %e, "confirmed mutation could not be applied locally");
            state.push_notice(Notice::success(success));
            DispatchOutcome::Applied
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Book;

    fn books(n: usize) -> Vec<Book> {
        (0..n)
            .map(|i| Book {
                id: format!("b{i}"),
                ..Book::default()
            })
            .collect()
    }

    #[tokio::test]
    async fn create_update_delete_change_length_by_one_zero_minus_one() {
        let mut state = ListState::with_items(books(3), 10);

        let new = Book {
            id: "new".to_string(),
            ..Book::default()
        };
        dispatch(&mut state, "created", async { Ok(Mutation::Created(new)) }).await;
        assert_eq!(state.len(), 4);

        let edited = Book {
            id: "b0".to_string(),
            title: "Edited".to_string(),
            ..Book::default()
        };
        dispatch(&mut state, "updated", async { Ok(Mutation::Updated(edited)) }).await;
        assert_eq!(state.len(), 4);
        assert_eq!(state.get("b0").unwrap().title, "Edited");

        dispatch(&mut state, "deleted", async {
            Ok(Mutation::Deleted("b1".to_string()))
        })
        .await;
        assert_eq!(state.len(), 3);
    }

    #[tokio::test]
    async fn failure_keeps_collection_and_surfaces_message() {
        let mut state = ListState::with_items(books(2), 10);
        let before = state.collection().as_slice().to_vec();
        let outcome = dispatch(&mut state, "deleted", async {
            Err::<Mutation<Book>, _>(FolioError::Api {
                status: 403,
                message: "Admins only".to_string(),
            })
        })
        .await;
        assert_eq!(outcome, DispatchOutcome::Failed("Admins only".to_string()));
        assert_eq!(state.collection().as_slice(), before.as_slice());
    }
}
