//! Domain layer for the Folio client.
//!
//! Plain records mirrored from the bookshop API plus the small amount of logic
//! that belongs to them: draft validation, the advisory order status machine,
//! role toggling and the cart. Nothing here performs I/O.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`record`]: The [`Record`] trait shared by every listable resource
//! - [`book`], [`order`], [`user`]: Resource models
//! - [`session`]: Session and explicit auth state
//! - [`cart`]: Client-side shopping cart

pub mod book;
pub mod cart;
pub mod error;
pub mod order;
pub mod record;
pub mod session;
pub mod user;

pub use book::{Book, BookDraft};
pub use cart::{Cart, CartLine};
pub use error::{FolioError, Result};
pub use order::{Order, OrderItem, OrderStatus, PlaceOrder, Reference, Revenue};
pub use record::{FieldValue, Record};
pub use session::{AuthState, Session};
pub use user::{Credentials, Registration, Role, User};
