//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where Folio keeps its configuration, persisted session storage
//! and trace files on the host.

pub mod paths;

pub use paths::{config_dir, config_file, data_dir, expand_tilde, storage_file, trace_file};
