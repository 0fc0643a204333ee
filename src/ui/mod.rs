//! Plain-text rendering layer.
//!
//! ```text
//! ListState → compute_viewmodel → TableViewModel → render → String
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready view model types
//! - [`tabular`]: Column definitions per resource
//! - [`renderer`]: List, detail, cart and profile rendering
//! - [`components`]: Header, search, table, empty state and footer pieces

pub mod components;
pub mod renderer;
pub mod tabular;
pub mod viewmodel;

pub use renderer::{
    render, render_book, render_cart, render_order_placed, render_profile, render_viewmodel,
};
pub use tabular::{money, Tabular};
pub use viewmodel::{DisplayRow, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, TableViewModel};
