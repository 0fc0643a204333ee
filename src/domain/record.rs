//! The shape every listable resource shares.
//!
//! Books, orders and users are all fetched as collections, searched by a fixed
//! set of text fields, sorted by a single named field and spliced by id. The
//! [`Record`] trait is the seam that lets one list state implementation serve
//! all three.

use std::cmp::Ordering;

/// A sortable value extracted from a record field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Compared lexicographically.
    Text(&'a str),
    /// Compared numerically.
    Number(f64),
}

impl FieldValue<'_> {
    /// Orders two field values.
    ///
    /// Strings compare lexicographically and numbers numerically. When a
    /// field holds mixed kinds across records, numbers sort before text so
    /// the ordering stays total.
    #[must_use]
    pub fn compare(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Number(_), FieldValue::Text(_)) => Ordering::Less,
            (FieldValue::Text(_), FieldValue::Number(_)) => Ordering::Greater,
        }
    }
}

/// A domain record mirrored from the remote API.
pub trait Record: Clone {
    /// Field names accepted by [`Record::field`] for sorting.
    const SORT_FIELDS: &'static [&'static str];

    /// Server-assigned identifier.
    fn id(&self) -> &str;

    /// Text fields consulted by the search filter.
    fn search_fields(&self) -> Vec<&str>;

    /// Looks up a sortable field by name; `None` if the record has no value.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// Monotonic revision used to discard stale responses.
    ///
    /// Records without a revision are always accepted.
    fn revision(&self) -> Option<i64> {
        None
    }

    /// Case-insensitive substring match over [`Record::search_fields`].
    ///
    /// `needle` must already be lowercased.
    fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Compares two records on one field; records missing the field sort last.
#[must_use]
pub fn compare_on<R: Record>(a: &R, b: &R, field: &str) -> Ordering {
    match (a.field(field), b.field(field)) {
        (Some(x), Some(y)) => x.compare(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
