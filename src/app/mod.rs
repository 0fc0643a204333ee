//! Application layer: list state, events and the fetch/mutate pipeline.
//!
//! This layer sits between the command-line front end (`main.rs`) and the
//! API/storage layers. Each list screen (books, orders, users) owns one
//! [`ListState`]; everything else here either derives a view from it or feeds
//! server results into it.
//!
//! # Architecture
//!
//! ```text
//! fetch ──▶ ListState ──▶ filter / sort / paginate ──▶ TableViewModel
//!              ▲   │
//!   dispatch ──┘   └── handle_event(ListEvent) ──▶ Vec<Action>
//! ```
//!
//! # Modules
//!
//! - [`state`]: Per-screen list state and view model computation
//! - [`collection`]: Id-keyed, revision-checked cache
//! - [`query`]: Pure filter, sort and pagination
//! - [`modes`]: Sort direction and sort spec
//! - [`handler`]: Event processing
//! - [`actions`]: Side effects emitted by the handler
//! - [`fetcher`]: Collection reads into list state
//! - [`dispatcher`]: Confirmed mutations spliced into list state
//! - [`capabilities`]: Role to permitted-action resolution
//! - [`operations`]: Per-resource mutations behind capability checks
//!
//! # Example
//!
//! ```rust
//! use folio::app::{handle_event, ListEvent, ListState};
//! use folio::domain::Book;
//!
//! let mut state: ListState<Book> = ListState::new(4);
//! handle_event(&mut state, &ListEvent::SortBy("title".into()))?;
//! # Ok::<(), folio::FolioError>(())
//! ```

pub mod actions;
pub mod capabilities;
pub mod collection;
pub mod dispatcher;
pub mod fetcher;
pub mod handler;
pub mod modes;
pub mod operations;
pub mod query;
pub mod state;

pub use actions::Action;
pub use capabilities::{capabilities, Capability};
pub use collection::{Collection, Mutation};
pub use dispatcher::{dispatch, DispatchOutcome};
pub use fetcher::{fetch, try_fetch, FetchOutcome};
pub use handler::{handle_event, ListEvent};
pub use modes::{SortDirection, SortSpec};
pub use operations::Operations;
pub use state::{ListState, Notice, NoticeLevel, PageView};
