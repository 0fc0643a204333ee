//! Folio: storefront and back-office client for the Folio bookshop API.
//!
//! Folio is a library plus command-line front end that provides:
//! - Catalogue browsing with local search, single-field sort and pagination
//! - A persisted cart and checkout
//! - Login, registration and a persisted session
//! - Order tracking for customers
//! - Book, order and user management for admins
//!
//! All business logic (pricing, inventory, authorization) lives behind the
//! remote HTTP API. Folio only caches what it fetched and keeps the cache
//! consistent with the mutations the API confirms.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - List state, events, actions                      │
//! │  - Fetcher and mutation dispatcher                  │
//! │  - Capability resolution                            │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ API Layer     │
//! │ (ui/)         │   │ (storage/)    │   │ (api/)        │
//! │ - View models │   │ - JSON K/V    │   │ - Endpoints   │
//! │ - Text tables │   │ - Session     │   │ - Envelope    │
//! │               │   │ - Cart        │   │ - Cancellation│
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Book, Order, User, Session, Cart (domain/)       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - stderr logging                                   │
//! │  - Optional OTLP file export                        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! Read from `~/.config/folio/config.toml` (or `--config`); every key is
//! optional:
//!
//! ```toml
//! api_base = "https://shop.example.com"
//! page_size = 12
//! storage_file = "~/.local/share/folio/storage.json"
//! trace_level = "info"
//! trace_export = true
//! request_timeout_secs = 15
//! ```
//!
//! `FOLIO_API_BASE` overrides `api_base`.
//!
//! # Example
//!
//! ```rust
//! use folio::app::{handle_event, ListEvent, ListState};
//! use folio::domain::Book;
//!
//! let mut books: ListState<Book> = ListState::new(4);
//! handle_event(&mut books, &ListEvent::SetSearch("dune".into()))?;
//! assert_eq!(books.page(), 1);
//! # Ok::<(), folio::FolioError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, ListEvent, ListState};
pub use domain::{FolioError, Result};

use api::{ApiClient, ReqwestTransport};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use storage::{JsonFileStore, SessionStore};

/// Environment variable overriding [`Config::api_base`].
pub const API_BASE_ENV: &str = "FOLIO_API_BASE";

/// Origin used when neither the config file nor the environment sets one.
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Client configuration.
///
/// # Example
///
/// ```rust
/// use folio::Config;
///
/// let config: Config = toml::from_str("page_size = 5").unwrap();
/// assert_eq!(config.page_size, 5);
/// assert_eq!(config.api_base, folio::DEFAULT_API_BASE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Origin of the bookshop API, without the `/api` prefix.
    pub api_base: String,

    /// Rows per page in every list.
    pub page_size: usize,

    /// Key/value storage file for the session and cart.
    ///
    /// Default: `~/.local/share/folio/storage.json`
    pub storage_file: Option<String>,

    /// `EnvFilter` directive used when `RUST_LOG` is unset. Default: `"warn"`
    pub trace_level: String,

    /// Export spans to an OTLP/JSON file.
    pub trace_export: bool,

    /// Where exported spans go. Default: `~/.local/share/folio/otlp.json`
    #[serde(rename = "trace_file")]
    pub trace_path: Option<String>,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            page_size: 10,
            storage_file: None,
            trace_level: "warn".to_string(),
            trace_export: false,
            trace_path: None,
            request_timeout_secs: 15,
        }
    }
}

impl Config {
    /// Loads the configuration from `path`.
    ///
    /// A missing file yields the defaults. The environment override is
    /// applied afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Config`] if the file exists but cannot be read,
    /// is not valid TOML, or holds invalid values.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = match std::fs::read_to_string(path) {
            Ok(raw) => Self::parse(&raw)
                .map_err(|e| FolioError::Config(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            Err(e) => {
                return Err(FolioError::Config(format!(
                    "cannot read {}: {e}",
                    path.display()
                )))
            }
        };
        config.apply_env(std::env::var(API_BASE_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parses TOML without touching the environment.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Config`] on invalid TOML or unknown keys.
    pub fn parse(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| FolioError::Config(e.to_string()))
    }

    /// Applies an `api_base` override; blank values are ignored.
    pub fn apply_env(&mut self, api_base: Option<String>) {
        if let Some(base) = api_base.filter(|b| !b.trim().is_empty()) {
            tracing::debug!(api_base = %base, "api base overridden from environment");
            self.api_base = base.trim().to_string();
        }
    }

    /// # Errors
    ///
    /// Returns [`FolioError::Config`] for a zero page size or a non-HTTP
    /// origin.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(FolioError::Config("page_size must be at least 1".to_string()));
        }
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(FolioError::Config(format!(
                "api_base must be an http(s) origin, got {:?}",
                self.api_base
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn storage_file(&self) -> PathBuf {
        self.storage_file
            .as_deref()
            .map_or_else(infrastructure::storage_file, infrastructure::expand_tilde)
    }

    #[must_use]
    pub fn trace_file(&self) -> PathBuf {
        self.trace_path
            .as_deref()
            .map_or_else(infrastructure::trace_file, infrastructure::expand_tilde)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Everything a command needs: configuration, API client and session store.
#[derive(Debug)]
pub struct Folio {
    pub config: Config,
    pub client: ApiClient<ReqwestTransport>,
    pub sessions: SessionStore<JsonFileStore>,
}

/// Builds the HTTP client and opens persisted storage.
///
/// # Errors
///
/// Returns configuration errors for an unusable origin and storage errors if
/// the storage file's directory cannot be created.
pub fn initialize(config: Config) -> Result<Folio> {
    tracing::debug!(api_base = %config.api_base, page_size = config.page_size, "initializing folio");

    let transport = ReqwestTransport::new(&config.api_base, config.request_timeout())?;
    let store = JsonFileStore::open(config.storage_file())?;

    Ok(Folio {
        client: ApiClient::new(transport),
        sessions: SessionStore::new(store),
        config,
    })
}
