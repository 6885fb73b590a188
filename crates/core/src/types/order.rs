//! Order records as exchanged with the external orders API.
//!
//! The wire format is camelCase JSON. Apart from `reference` and `status`,
//! every field is an opaque payload the lifecycle logic never interprets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{MenuItemId, OrderId};
use super::reference::OrderReference;
use super::status::OrderStatus;

/// An order as returned by `GET /orders` and `GET /orders/{reference}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Store-side numeric row id.
    pub id: OrderId,
    /// Customer-facing tracking reference.
    pub reference: OrderReference,
    /// Name of the ordered crêpe.
    pub item_name: String,
    /// Chosen size.
    pub size: String,
    /// Number of crêpes.
    pub quantity: u32,
    /// Total price in FCFA.
    pub total_price: i64,
    /// Customer full name.
    pub customer_name: String,
    /// Customer phone number.
    pub customer_contact: String,
    /// Delivery address.
    pub delivery_location: String,
    /// Free-form instructions (allergies, etc.). Empty when none.
    #[serde(default)]
    pub additional_notes: String,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Set by the store when the order is placed; immutable afterwards.
    pub created_at: DateTime<Utc>,
}

/// Payload for `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub item_id: MenuItemId,
    pub item_name: String,
    pub size: String,
    pub quantity: u32,
    pub total_price: i64,
    pub customer_name: String,
    pub customer_contact: String,
    pub delivery_location: String,
    #[serde(default)]
    pub additional_notes: String,
}

/// One page of orders from `GET /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub pagination: Pagination,
}

/// Pagination envelope returned alongside an order page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_pages: u32,
}

impl OrderPage {
    /// Count of orders on this page with the given status.
    ///
    /// The dashboard stats cards are computed over the fetched page, not
    /// the whole data set.
    #[must_use]
    pub fn count_with_status(&self, status: OrderStatus) -> usize {
        self.orders.iter().filter(|o| o.status == status).count()
    }
}
