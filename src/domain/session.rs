//! Authenticated session and the explicit auth state derived from storage.

use super::error::{FolioError, Result};
use super::user::{Role, User};
use serde::{Deserialize, Serialize};

/// Bearer token plus the profile the API echoed back at login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    pub user: User,
}

/// Whether a usable session is present.
///
/// Produced by one parse path in [`crate::storage::SessionStore`]; screens
/// never look at the raw persisted blob.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    Authenticated(Session),
    #[default]
    Unauthenticated,
}

impl AuthState {
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            Self::Unauthenticated => None,
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session().map(|s| s.access_token.as_str())
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.session().map(|s| s.user.role)
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The bearer token, or the "token not found" error.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::TokenNotFound`] when unauthenticated.
    pub fn require_token(&self) -> Result<&str> {
        self.token().ok_or(FolioError::TokenNotFound)
    }
}
