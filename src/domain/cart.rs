//! Shopping cart.
//!
//! The cart lives entirely on the client and is persisted next to the session.
//! Line quantities are clamped to the stock reported for the book when the line
//! was added, and checkout converts the cart into a [`PlaceOrder`] payload.

use super::book::Book;
use super::error::{FolioError, Result};
use super::order::{OrderLine, PlaceOrder};
use serde::{Deserialize, Serialize};

/// One book in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub book_id: String,
    pub title: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub stock: u32,
}

impl CartLine {
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Adds copies of a book, merging with an existing line.
    ///
    /// Returns the resulting line quantity, which may be lower than asked
    /// for when stock runs out.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Validation`] for a zero quantity or an
    /// out-of-stock book.
    pub fn add(&mut self, book: &Book, quantity: u32) -> Result<u32> {
        if quantity == 0 {
            return Err(FolioError::Validation("quantity must be at least 1".to_string()));
        }
        let stock = u32::try_from(book.display_quantity()).unwrap_or(u32::MAX);
        if stock == 0 {
            return Err(FolioError::Validation(format!("\"{}\" is out of stock", book.title)));
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.book_id == book.id) {
            line.stock = stock;
            line.unit_price = book.display_price();
            line.quantity = line.quantity.saturating_add(quantity).min(stock);
            return Ok(line.quantity);
        }

        let line = CartLine {
            book_id: book.id.clone(),
            title: book.title.clone(),
            unit_price: book.display_price(),
            quantity: quantity.min(stock),
            stock,
        };
        let added = line.quantity;
        self.lines.push(line);
        Ok(added)
    }

    /// Sets a line's quantity; zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::NotFound`] if the book is not in the cart.
    pub fn set_quantity(&mut self, book_id: &str, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return self.remove(book_id);
        }
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.book_id == book_id)
            .ok_or_else(|| FolioError::NotFound(book_id.to_string()))?;
        line.quantity = quantity.min(line.stock.max(1));
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`FolioError::NotFound`] if the book is not in the cart.
    pub fn remove(&mut self, book_id: &str) -> Result<()> {
        let before = self.lines.len();
        self.lines.retain(|l| l.book_id != book_id);
        if self.lines.len() == before {
            return Err(FolioError::NotFound(book_id.to_string()));
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Converts the cart into a checkout payload.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Validation`] when the cart is empty.
    pub fn to_order(&self) -> Result<PlaceOrder> {
        if self.is_empty() {
            return Err(FolioError::Validation("cart is empty".to_string()));
        }
        Ok(PlaceOrder {
            items: self
                .lines
                .iter()
                .map(|l| OrderLine {
                    book: l.book_id.clone(),
                    quantity: l.quantity,
                })
                .collect(),
            total_price: self.total(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str, price: f64, quantity: i64) -> Book {
        Book {
            id: id.to_string(),
            title: format!("Book {id}"),
            author: "Author".to_string(),
            price,
            category: "Fiction".to_string(),
            description: "A description long enough.".to_string(),
            quantity,
            image: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn adding_twice_merges_and_clamps_to_stock() {
        let mut cart = Cart::default();
        let b = book("b1", 10.0, 3);
        assert_eq!(cart.add(&b, 2).unwrap(), 2);
        assert_eq!(cart.add(&b, 2).unwrap(), 3);
        assert_eq!(cart.lines.len(), 1);
    }

    #[test]
    fn out_of_stock_is_rejected() {
        let mut cart = Cart::default();
        assert!(cart.add(&book("b1", 10.0, 0), 1).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn checkout_payload_carries_lines_and_total() {
        let mut cart = Cart::default();
        cart.add(&book("b1", 10.0, 5), 2).unwrap();
        cart.add(&book("b2", 2.5, 5), 1).unwrap();
        let order = cart.to_order().unwrap();
        assert_eq!(order.items.len(), 2);
        assert!((order.total_price - 22.5).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_quantity_removes_line() {
        let mut cart = Cart::default();
        cart.add(&book("b1", 10.0, 5), 2).unwrap();
        cart.set_quantity("b1", 0).unwrap();
        assert!(cart.is_empty());
    }
}
