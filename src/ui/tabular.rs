//! Table columns for each listable resource.

use crate::domain::{Book, Order, User};
use chrono::{DateTime, Utc};

/// A record that can be shown as one table row.
pub trait Tabular {
    /// Plural title for the screen, e.g. `Books`.
    const TITLE: &'static str;

    fn headers() -> &'static [&'static str];

    /// One cell per entry in [`Tabular::headers`].
    fn cells(&self) -> Vec<String>;
}

/// Formats an amount as dollars, never negative.
#[must_use]
pub fn money(amount: f64) -> String {
    let amount = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
    format!("${amount:.2}")
}

fn date(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d").to_string())
}

impl Tabular for Book {
    const TITLE: &'static str = "Books";

    fn headers() -> &'static [&'static str] {
        &["ID", "TITLE", "AUTHOR", "CATEGORY", "PRICE", "STOCK"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            self.author.clone(),
            self.category.clone(),
            money(self.display_price()),
            self.display_quantity().to_string(),
        ]
    }
}

impl Tabular for Order {
    const TITLE: &'static str = "Orders";

    fn headers() -> &'static [&'static str] {
        &["ID", "CUSTOMER", "COPIES", "TOTAL", "STATUS", "PLACED", "NEXT"]
    }

    fn cells(&self) -> Vec<String> {
        let next: Vec<&str> = self.status.next().iter().map(|s| s.as_str()).collect();
        vec![
            self.id.clone(),
            self.user.label().to_string(),
            self.copies().to_string(),
            money(self.total_price),
            self.status.to_string(),
            date(self.created_at),
            if next.is_empty() {
                "-".to_string()
            } else {
                next.join("|")
            },
        ]
    }
}

impl Tabular for User {
    const TITLE: &'static str = "Users";

    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "EMAIL", "ROLE", "JOINED"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.role.to_string(),
            date(self.created_at),
        ]
    }
}
