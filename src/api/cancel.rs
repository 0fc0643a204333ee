//! Cooperative cancellation for in-flight requests.
//!
//! Each list state owns a [`CancellationToken`]. Closing the state cancels the
//! token, and any request racing against it resolves to
//! [`FolioError::Cancelled`] instead of touching state that is gone.

use crate::domain::error::{FolioError, Result};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Cloneable cancellation flag; all clones observe the same cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the token and wakes every waiter. Idempotent.
    pub fn cancel(&self) {
        if !self.inner.cancelled.swap(true, Ordering::SeqCst) {
            tracing::debug!("cancellation requested");
            self.inner.notify.notify_waiters();
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) {
        loop {
            // Register before checking the flag so a concurrent cancel is not missed.
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }

    /// Drives `future` unless the token is cancelled first.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Cancelled`] if cancellation wins, otherwise
    /// whatever `future` returns.
    pub async fn run<T, F>(&self, future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_cancelled() {
            return Err(FolioError::Cancelled);
        }
        tokio::select! {
            biased;
            () = self.cancelled() => Err(FolioError::Cancelled),
            result = future => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn completed_future_passes_through() {
        let token = CancellationToken::new();
        let value = token.run(async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn cancel_interrupts_pending_future() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let result: Result<()> = token
            .run(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            })
            .await;
        assert!(matches!(result, Err(FolioError::Cancelled)));
    }

    #[tokio::test]
    async fn already_cancelled_token_short_circuits() {
        let token = CancellationToken::new();
        token.cancel();
        let result = token.run(async { Ok(1) }).await;
        assert!(matches!(result, Err(FolioError::Cancelled)));
    }
}
