//! Book domain model.
//!
//! A [`Book`] is a catalogue entry as returned by the API. A [`BookDraft`] is the
//! payload an admin submits to create or edit one; it is validated locally
//! before any request is sent.

use super::error::{FolioError, Result};
use super::record::{FieldValue, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimum description length accepted by [`BookDraft::validate`].
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// A catalogue entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    pub author: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Book {
    /// Price clamped to zero for display.
    #[must_use]
    pub fn display_price(&self) -> f64 {
        if self.price.is_finite() {
            self.price.max(0.0)
        } else {
            0.0
        }
    }

    /// Stock clamped to zero for display.
    #[must_use]
    pub fn display_quantity(&self) -> u64 {
        u64::try_from(self.quantity).unwrap_or(0)
    }

    /// Whether at least one copy is in stock.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

impl Record for Book {
    const SORT_FIELDS: &'static [&'static str] =
        &["title", "author", "category", "price", "quantity"];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.author, &self.category]
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "title" => Some(FieldValue::Text(&self.title)),
            "author" => Some(FieldValue::Text(&self.author)),
            "category" => Some(FieldValue::Text(&self.category)),
            "price" => Some(FieldValue::Number(self.price)),
            #[allow(clippy::cast_precision_loss)]
            "quantity" => Some(FieldValue::Number(self.quantity as f64)),
            _ => None,
        }
    }

    fn revision(&self) -> Option<i64> {
        self.updated_at.map(|t| t.timestamp_millis())
    }
}

/// Create or edit payload for a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub price: f64,
    pub category: String,
    pub description: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl BookDraft {
    /// Checks the draft against the catalogue rules.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(FolioError::Validation("title is required".to_string()));
        }
        if self.author.trim().is_empty() {
            return Err(FolioError::Validation("author is required".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(FolioError::Validation("category is required".to_string()));
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(FolioError::Validation(
                "price must be greater than zero".to_string(),
            ));
        }
        if self.description.trim().chars().count() < MIN_DESCRIPTION_LEN {
            return Err(FolioError::Validation(format!(
                "description must be at least {MIN_DESCRIPTION_LEN} characters"
            )));
        }
        Ok(())
    }

    /// Builds a draft pre-filled from an existing book, for editing.
    #[must_use]
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            price: book.display_price(),
            category: book.category.clone(),
            description: book.description.clone(),
            quantity: u32::try_from(book.display_quantity()).unwrap_or(u32::MAX),
            image: book.image.clone(),
        }
    }

    /// The book as it would look after this draft is saved.
    ///
    /// Used when the API confirms an edit without echoing the record back.
    #[must_use]
    pub fn apply_to(&self, book: &Book) -> Book {
        Book {
            title: self.title.clone(),
            author: self.author.clone(),
            price: self.price,
            category: self.category.clone(),
            description: self.description.clone(),
            quantity: i64::from(self.quantity),
            image: self.image.clone().or_else(|| book.image.clone()),
            ..book.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> BookDraft {
        BookDraft {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            price: 12.5,
            category: "Fiction".to_string(),
            description: "Spice, sand and politics.".to_string(),
            quantity: 3,
            image: None,
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn zero_price_is_rejected() {
        let mut d = draft();
        d.price = 0.0;
        assert!(matches!(d.validate(), Err(FolioError::Validation(_))));
    }

    #[test]
    fn short_description_is_rejected() {
        let mut d = draft();
        d.description = "too short".to_string();
        assert!(matches!(d.validate(), Err(FolioError::Validation(_))));
    }

    #[test]
    fn negative_stock_renders_as_zero() {
        let book: Book = serde_json::from_value(serde_json::json!({
            "_id": "b1", "title": "T", "author": "A", "price": -4.0, "quantity": -2
        }))
        .unwrap();
        assert_eq!(book.display_quantity(), 0);
        assert!(book.display_price().abs() < f64::EPSILON);
    }
}
