//! Order domain model and its advisory status machine.
//!
//! The API is the authority on status transitions. The client only uses
//! [`OrderStatus::next`] to decide which actions to offer; it never blocks a
//! request the server might accept.

use super::record::{FieldValue, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Statuses reachable from this one.
    ///
    /// pending → processing | cancelled, processing → completed. Completed
    /// and cancelled are terminal.
    #[must_use]
    pub const fn next(self) -> &'static [OrderStatus] {
        match self {
            Self::Pending => &[Self::Processing, Self::Cancelled],
            Self::Processing => &[Self::Completed],
            Self::Completed | Self::Cancelled => &[],
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.next().is_empty()
    }

    #[must_use]
    pub fn can_become(self, target: Self) -> bool {
        self.next().contains(&target)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// A reference to another record, either a bare id or a populated object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    Id(String),
    Expanded {
        #[serde(rename = "_id", alias = "id")]
        id: String,
        #[serde(default, alias = "title")]
        name: Option<String>,
        #[serde(default)]
        email: Option<String>,
    },
}

impl Reference {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) | Self::Expanded { id, .. } => id,
        }
    }

    /// Human-readable label, falling back to the id.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Expanded {
                name: Some(name), ..
            } => name,
            Self::Expanded {
                email: Some(email), ..
            } => email,
            other => other.id(),
        }
    }
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(alias = "product")]
    pub book: Reference,
    pub quantity: u32,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub user: Reference,
    #[serde(default, alias = "products")]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub total_price: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Total number of copies across all lines.
    #[must_use]
    pub fn copies(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

impl Record for Order {
    const SORT_FIELDS: &'static [&'static str] = &["status", "totalPrice", "createdAt", "user"];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.id, self.user.label(), self.status.as_str()]
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "status" => Some(FieldValue::Text(self.status.as_str())),
            "totalPrice" => Some(FieldValue::Number(self.total_price)),
            #[allow(clippy::cast_precision_loss)]
            "createdAt" => self
                .created_at
                .map(|t| FieldValue::Number(t.timestamp_millis() as f64)),
            "user" => Some(FieldValue::Text(self.user.label())),
            _ => None,
        }
    }

    fn revision(&self) -> Option<i64> {
        self.updated_at.map(|t| t.timestamp_millis())
    }
}

/// Line of a checkout request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub book: String,
    pub quantity: u32,
}

/// Checkout payload sent to `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    pub items: Vec<OrderLine>,
    pub total_price: f64,
}

/// Revenue summary from `/api/orders/revenue`.
///
/// The endpoint has been seen returning either a bare number or an object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Revenue {
    Total(f64),
    Summary {
        #[serde(alias = "totalRevenue", alias = "revenue")]
        total: f64,
        #[serde(default, alias = "totalOrders", alias = "orderCount")]
        orders: Option<u64>,
    },
}

impl Revenue {
    #[must_use]
    pub const fn total(&self) -> f64 {
        match self {
            Self::Total(total) | Self::Summary { total, .. } => *total,
        }
    }
}
