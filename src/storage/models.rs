//! Persisted record shapes.
//!
//! The session is stored double-encoded: the value under [`SESSION_KEY`] is a
//! JSON object whose `auth` field is itself a JSON *string* holding the token
//! and profile. These types describe each layer separately so a missing or
//! malformed layer can be detected without failing the whole read.

use crate::domain::User;
use serde::{Deserialize, Serialize};

/// Namespaced key holding the session blob.
pub const SESSION_KEY: &str = "persist:folio";

/// Namespaced key holding the serialized cart.
pub const CART_KEY: &str = "folio:cart";

/// Outer layer: `{ "auth": "<json string>" }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedRoot {
    #[serde(default)]
    pub auth: Option<String>,
}

/// Inner layer: `{ "accessToken": "...", "user": { ... } }`.
///
/// Every field is optional; the accessor decides what is usable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedAuth {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}
