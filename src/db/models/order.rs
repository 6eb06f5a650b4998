//! Order Model
//!
//! A composite order holds an ordered list of line items referencing either
//! a cafe item purchase (stock-backed, unit price snapshot) or a game
//! session charge (time-billed, cost snapshot). `totalAmount` is maintained
//! by the order engine as items are added, resized, removed.

use super::customer::Customer;
use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Payment status; Paid and Cancelled are terminal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Cancelled,
}

/// Line item kind tag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderItemType {
    CafeItem,
    GameSession,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub customer: RecordId,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub items: Vec<RecordId>,
    pub total_amount: f64,
    pub payment_status: PaymentStatus,
}

/// Order line item entity; the tagged reference resolves against the table
/// named by `itemType`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub item: RecordId,
    pub item_type: OrderItemType,
    pub quantity: i64,
    /// Unit price captured at the time of sale
    pub price_at_sale: f64,
    /// Computed session cost, captured for game session lines only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_at_sale: Option<f64>,
}

impl OrderItem {
    /// This line's contribution to the order total
    pub fn line_total(&self) -> f64 {
        match self.item_type {
            OrderItemType::CafeItem => self.price_at_sale * self.quantity as f64,
            OrderItemType::GameSession => self.cost_at_sale.unwrap_or(self.price_at_sale),
        }
    }
}

// =============================================================================
// API Request Types
// =============================================================================

/// One requested line in a create/add call
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineInput {
    #[validate(length(min = 1, message = "Item ID is required"))]
    pub item_id: String,
    pub item_type: OrderItemType,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i64,
}

/// Create order payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    #[validate(length(min = 1, message = "Customer ID is required"))]
    pub customer_id: String,
    #[validate(nested)]
    pub items: Vec<OrderLineInput>,
}

/// Add items payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderAddItems {
    #[validate(nested)]
    pub items: Vec<OrderLineInput>,
}

/// Resize one line payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemQuantityUpdate {
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i64,
}

// =============================================================================
// API Response Types
// =============================================================================

/// Order with its line items and customer resolved
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub payment_status: PaymentStatus,
}
