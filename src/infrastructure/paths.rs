//! Platform paths for configuration and client storage.
//!
//! Configuration lives under the platform config directory
//! (`~/.config/folio` on Linux), data under the platform data directory
//! (`~/.local/share/folio`). When the platform reports neither, the home
//! directory is used, and failing that the current directory.

use std::path::PathBuf;

const APP_DIR: &str = "folio";

fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// `~/.config/folio` or the platform equivalent.
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| home().join(".config"))
        .join(APP_DIR)
}

/// Default location of `config.toml`.
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// `~/.local/share/folio` or the platform equivalent.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| home().join(".local").join("share"))
        .join(APP_DIR)
}

/// Default key/value storage file holding the session and cart.
#[must_use]
pub fn storage_file() -> PathBuf {
    data_dir().join("storage.json")
}

/// Default OTLP trace export file.
#[must_use]
pub fn trace_file() -> PathBuf {
    data_dir().join("otlp.json")
}

/// Expands a leading `~` to the home directory.
///
/// # Examples
///
/// ```
/// use folio::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), std::path::PathBuf::from("/absolute/path"));
/// assert!(!expand_tilde("~/notes").starts_with("~"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        home()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home().join(rest)
    } else {
        PathBuf::from(path)
    }
}
