//! Typed session store over a [`KeyValueStore`].
//!
//! This is the only place the double-encoded session blob is parsed or
//! written. Reads never fail: any missing or malformed layer simply yields
//! [`AuthState::Unauthenticated`] (or `None` from [`SessionStore::access_token`]).
//! There is no caching and no expiry check; every call re-reads storage.

use super::backend::KeyValueStore;
use super::models::{PersistedAuth, PersistedRoot, CART_KEY, SESSION_KEY};
use crate::domain::error::{FolioError, Result};
use crate::domain::{AuthState, Cart, Session};

/// Session and cart accessor.
#[derive(Debug)]
pub struct SessionStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Parses both layers of the persisted blob.
    fn read_auth(&self) -> Option<PersistedAuth> {
        let blob = self.store.get_item(SESSION_KEY)?;

        let root: PersistedRoot = match serde_json::from_str(&blob) {
            Ok(root) => root,
            Err(e) => {
                tracing::debug!(error = %e, "session blob is not a JSON object");
                return None;
            }
        };

        let auth = root.auth?;
        match serde_json::from_str::<PersistedAuth>(&auth) {
            Ok(auth) => Some(auth),
            Err(e) => {
                tracing::debug!(error = %e, "session auth layer is malformed");
                None
            }
        }
    }

    /// The persisted bearer token, if any, whether or not a user profile
    /// was stored with it.
    ///
    /// This is a token-only view for inspecting storage. Request code goes
    /// through [`SessionStore::load`], which applies the same blank-token rule
    /// and additionally requires the profile.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        usable_token(self.read_auth()?.access_token)
    }

    /// The current auth state. This is the entry point for anything that
    /// sends requests.
    ///
    /// Authenticated only when both a token and a user profile are present.
    #[must_use]
    pub fn load(&self) -> AuthState {
        let Some(auth) = self.read_auth() else {
            return AuthState::Unauthenticated;
        };
        match (usable_token(auth.access_token), auth.user) {
            (Some(access_token), Some(user)) => {
                AuthState::Authenticated(Session { access_token, user })
            }
            _ => AuthState::Unauthenticated,
        }
    }

    /// Persists a session after login.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    pub fn save(&mut self, session: &Session) -> Result<()> {
        let inner = PersistedAuth {
            access_token: Some(session.access_token.clone()),
            user: Some(session.user.clone()),
        };
        let inner = serde_json::to_string(&inner)
            .map_err(|e| FolioError::Storage(format!("failed to encode session: {e}")))?;
        let root = serde_json::to_string(&PersistedRoot { auth: Some(inner) })
            .map_err(|e| FolioError::Storage(format!("failed to encode session: {e}")))?;

        tracing::debug!(user_id = %session.user.id, "persisting session");
        self.store.set_item(SESSION_KEY, root)
    }

    /// Forgets the session on logout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying removal fails.
    pub fn clear(&mut self) -> Result<()> {
        tracing::debug!("clearing session");
        self.store.remove_item(SESSION_KEY)
    }

    /// The persisted cart; a missing or unreadable cart is empty.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.store
            .get_item(CART_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    pub fn save_cart(&mut self, cart: &Cart) -> Result<()> {
        if cart.is_empty() {
            return self.store.remove_item(CART_KEY);
        }
        let raw = serde_json::to_string(cart)
            .map_err(|e| FolioError::Storage(format!("failed to encode cart: {e}")))?;
        self.store.set_item(CART_KEY, raw)
    }
}

/// Blank tokens count as absent.
fn usable_token(token: Option<String>) -> Option<String> {
    token.filter(|token| !token.trim().is_empty())
}
