//! Resource fetcher.
//!
//! Runs one collection read against the API on behalf of a list screen and
//! stores the result in its [`ListState`]. There are no retries; calling
//! [`fetch`] again is the retry.

use super::state::ListState;
use crate::domain::error::{FolioError, Result};
use crate::domain::Record;
use std::future::Future;

/// What a fetch did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The collection was replaced with this many items.
    Loaded(usize),
    /// The list was emptied and an error notice queued.
    Failed,
    /// The screen closed first; the list is untouched.
    Cancelled,
}

/// Awaits `request` and stores its result in `state`.
///
/// The request races against the list's cancellation token. A cancelled
/// fetch only clears the loading flag; a failed one (network, API error or a
/// malformed envelope) leaves the list empty with a notice.
pub async fn fetch<T, F>(state: &mut ListState<T>, request: F) -> FetchOutcome
where
    T: Record,
    F: Future<Output = Result<Vec<T>>>,
{
    match try_fetch(state, request).await {
        Ok(count) => FetchOutcome::Loaded(count),
        Err(FolioError::Cancelled) => {
            tracing::debug!("fetch cancelled, state untouched");
            FetchOutcome::Cancelled
        }
        Err(e) => {
            if matches!(e, FolioError::MalformedEnvelope(_)) {
                tracing::warn!(error = %e, "malformed collection response, treating as empty");
            }
            state.finish_load(Err(e));
            FetchOutcome::Failed
        }
    }
}

/// Like [`fetch`], but hands any failure back instead of recording it.
///
/// Used where a list must be loaded before anything else can happen. On
/// error only the loading flag is cleared.
///
/// # Errors
///
/// [`FolioError::Cancelled`] if the list closed first, otherwise whatever
/// `request` failed with.
pub async fn try_fetch<T, F>(state: &mut ListState<T>, request: F) -> Result<usize>
where
    T: Record,
    F: Future<Output = Result<Vec<T>>>,
{
    let token = state.cancel_token().clone();
    state.begin_load();

    match token.run(request).await {
        Ok(items) => {
            let count = items.len();
            state.finish_load(Ok(items));
            Ok(count)
        }
        Err(e) => {
            state.abort_load();
            Err(e)
        }
    }
}
