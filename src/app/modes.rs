//! Sort mode types for list views.
//!
//! A list is either unsorted (original server order) or sorted by exactly one
//! field in one direction. Re-selecting the active field flips the direction.
//!
//! # Example
//!
//! ```rust
//! use folio::app::modes::{SortDirection, SortSpec};
//!
//! let spec = SortSpec::ascending("title");
//! assert_eq!(spec.toggled().direction, SortDirection::Descending);
//! ```

use std::fmt;

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        })
    }
}

/// The single field a list is sorted by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    #[must_use]
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Same field, opposite direction.
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            field: self.field.clone(),
            direction: self.direction.flipped(),
        }
    }
}
