//! Persistence layer for client-side state.
//!
//! The bookshop API owns all records; the client only persists what a browser
//! would keep in local storage: the session blob and the cart.
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] trait and the in-memory implementation
//! - `json`: JSON file-backed implementation with atomic writes
//! - `models`: Persisted layer shapes and namespaced keys
//! - `session`: Typed session/cart accessor, the single parse path

pub mod backend;
pub mod json;
pub mod models;
pub mod session;

pub use backend::{KeyValueStore, MemoryStore};
pub use json::JsonFileStore;
pub use models::{CART_KEY, SESSION_KEY};
pub use session::SessionStore;
