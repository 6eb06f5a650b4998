//! Order Engine
//!
//! Builds and mutates composite orders whose lines are either cafe-item
//! purchases (stock reserved through the inventory ledger, unit price
//! snapshotted) or game-session charges (cost snapshotted from the closed
//! session). Maintains the running total across every mutation and drives
//! the payment-status transitions.
//!
//! There is no transaction spanning stock, line items, and the order
//! document. Lines are processed strictly in the order supplied; the first
//! failing line aborts the whole call, and stock already reserved for
//! earlier lines stays reserved. Paid and Cancelled orders are terminal:
//! every item mutation and payment attempt against them is rejected here,
//! not left to callers.

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use crate::db::models::{
    Order, OrderDetail, OrderItem, OrderItemType, OrderLineInput, PaymentStatus,
};
use crate::db::repository::cafe_item::CAFE_ITEM_TABLE;
use crate::db::repository::customer::CUSTOMER_TABLE;
use crate::db::repository::game_session::GAME_SESSION_TABLE;
use crate::db::repository::order::ORDER_ITEM_TABLE;
use crate::db::repository::{
    CustomerRepository, GameSessionRepository, OrderRepository, record_id,
};
use crate::inventory::InventoryLedger;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct OrderEngine {
    orders: OrderRepository,
    customers: CustomerRepository,
    sessions: GameSessionRepository,
    inventory: InventoryLedger,
}

impl OrderEngine {
    pub fn new(db: Surreal<Db>, inventory: InventoryLedger) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            customers: CustomerRepository::new(db.clone()),
            sessions: GameSessionRepository::new(db),
            inventory,
        }
    }

    /// Create an order from a list of requested lines.
    ///
    /// Lines are processed sequentially; on the first failure the order is
    /// never persisted, but reservations (and line records) from earlier
    /// lines remain applied.
    pub async fn create_order(
        &self,
        customer_id: &str,
        lines: &[OrderLineInput],
    ) -> AppResult<OrderDetail> {
        let customer = self
            .customers
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer not found"))?;
        let customer_ref = customer
            .id
            .clone()
            .unwrap_or_else(|| record_id(CUSTOMER_TABLE, customer_id));

        let mut item_refs: Vec<RecordId> = Vec::with_capacity(lines.len());
        let mut total_amount = 0.0;

        for line in lines {
            let (item, contribution) = self.process_line(line).await?;
            if let Some(id) = item.id {
                item_refs.push(id);
            }
            total_amount += contribution;
        }

        let order = self
            .orders
            .create(Order {
                id: None,
                customer: customer_ref,
                items: item_refs,
                total_amount,
                payment_status: PaymentStatus::Pending,
            })
            .await?;

        tracing::info!(
            order = %order.id.as_ref().map(|i| i.to_string()).unwrap_or_default(),
            total = total_amount,
            "Order created"
        );

        self.assemble(order).await
    }

    /// Append lines to an existing order, accumulating onto its total.
    /// Same sequential processing and same partial-failure exposure as
    /// order creation.
    pub async fn add_items(
        &self,
        order_id: &str,
        lines: &[OrderLineInput],
    ) -> AppResult<OrderDetail> {
        let order = self.find_order(order_id).await?;
        ensure_mutable(&order)?;

        let mut item_refs = order.items.clone();
        let mut total_amount = order.total_amount;

        for line in lines {
            let (item, contribution) = self.process_line(line).await?;
            if let Some(id) = item.id {
                item_refs.push(id);
            }
            total_amount += contribution;
        }

        let updated = self
            .orders
            .set_items_and_total(order_id, &item_refs, total_amount)
            .await?;
        self.assemble(updated).await
    }

    /// Resize a cafe-item line, applying the price delta to the total.
    /// Stock is not re-checked or adjusted for the delta.
    pub async fn update_item_quantity(
        &self,
        order_id: &str,
        order_item_id: &str,
        quantity: i64,
    ) -> AppResult<OrderDetail> {
        let order = self.find_order(order_id).await?;
        ensure_mutable(&order)?;

        let item = self
            .orders
            .find_item(order_item_id)
            .await?
            .ok_or_else(|| AppError::not_found("Order item not found"))?;

        if item.item_type == OrderItemType::GameSession && quantity != item.quantity {
            return Err(AppError::validation(
                "Game session items have a fixed quantity of 1",
            ));
        }

        let delta = (quantity - item.quantity) as f64 * item.price_at_sale;
        self.orders.set_item_quantity(order_item_id, quantity).await?;

        let updated = self
            .orders
            .set_items_and_total(order_id, &order.items, order.total_amount + delta)
            .await?;
        self.assemble(updated).await
    }

    /// Remove a line, subtracting its full contribution from the total.
    /// Reserved stock is not restored.
    pub async fn remove_item(&self, order_id: &str, order_item_id: &str) -> AppResult<OrderDetail> {
        let order = self.find_order(order_id).await?;
        ensure_mutable(&order)?;

        let item = self
            .orders
            .find_item(order_item_id)
            .await?
            .ok_or_else(|| AppError::not_found("Order item not found"))?;

        let item_ref = record_id(ORDER_ITEM_TABLE, order_item_id);
        let remaining: Vec<RecordId> = order
            .items
            .iter()
            .filter(|id| **id != item_ref)
            .cloned()
            .collect();

        let updated = self
            .orders
            .set_items_and_total(order_id, &remaining, order.total_amount - item.line_total())
            .await?;
        self.orders.delete_item(order_item_id).await?;

        self.assemble(updated).await
    }

    /// Flip the order to Paid. No amount matching; a status transition only.
    pub async fn pay_for_order(&self, order_id: &str) -> AppResult<OrderDetail> {
        let order = self.find_order(order_id).await?;

        match order.payment_status {
            PaymentStatus::Paid => return Err(AppError::conflict("Order is already paid")),
            PaymentStatus::Cancelled => return Err(AppError::conflict("Order is cancelled")),
            PaymentStatus::Pending => {}
        }

        let updated = self.orders.set_status(order_id, PaymentStatus::Paid).await?;
        tracing::info!(order = %order_id, "Order paid");
        self.assemble(updated).await
    }

    pub async fn order_detail(&self, order_id: &str) -> AppResult<OrderDetail> {
        let order = self.find_order(order_id).await?;
        self.assemble(order).await
    }

    pub async fn list_orders(&self) -> AppResult<Vec<OrderDetail>> {
        let orders = self.orders.find_all().await?;
        let mut details = Vec::with_capacity(orders.len());
        for order in orders {
            details.push(self.assemble(order).await?);
        }
        Ok(details)
    }

    pub async fn orders_for_customer(&self, customer_id: &str) -> AppResult<Vec<OrderDetail>> {
        let customer_ref = record_id(CUSTOMER_TABLE, customer_id);
        let orders = self.orders.find_by_customer(&customer_ref).await?;
        let mut details = Vec::with_capacity(orders.len());
        for order in orders {
            details.push(self.assemble(order).await?);
        }
        Ok(details)
    }

    // ========== Internals ==========

    async fn find_order(&self, order_id: &str) -> AppResult<Order> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found"))
    }

    /// Process one requested line into a persisted line-item record and its
    /// contribution to the total.
    async fn process_line(&self, line: &OrderLineInput) -> AppResult<(OrderItem, f64)> {
        match line.item_type {
            OrderItemType::CafeItem => {
                let price = self
                    .inventory
                    .check_and_reserve(&line.item_id, line.quantity)
                    .await?;

                let item = self
                    .orders
                    .create_item(OrderItem {
                        id: None,
                        item: record_id(CAFE_ITEM_TABLE, &line.item_id),
                        item_type: OrderItemType::CafeItem,
                        quantity: line.quantity,
                        price_at_sale: price,
                        cost_at_sale: None,
                    })
                    .await?;

                let contribution = price * line.quantity as f64;
                Ok((item, contribution))
            }
            OrderItemType::GameSession => {
                let session = self
                    .sessions
                    .find_by_id(&line.item_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::not_found(format!("Game session {} not found", line.item_id))
                    })?;

                let cost = session.cost.unwrap_or(0.0);
                let item = self
                    .orders
                    .create_item(OrderItem {
                        id: None,
                        item: record_id(GAME_SESSION_TABLE, &line.item_id),
                        item_type: OrderItemType::GameSession,
                        quantity: 1,
                        price_at_sale: cost,
                        cost_at_sale: session.cost,
                    })
                    .await?;

                Ok((item, cost))
            }
        }
    }

    /// Resolve the customer and line items for the response view
    async fn assemble(&self, order: Order) -> AppResult<OrderDetail> {
        let customer = self
            .customers
            .find_by_id(&order.customer.to_string())
            .await?;
        let items = self.orders.find_items(&order.items).await?;

        Ok(OrderDetail {
            id: order.id,
            customer,
            items,
            total_amount: order.total_amount,
            payment_status: order.payment_status,
        })
    }
}

/// Paid and Cancelled are terminal; item mutation is only valid while the
/// order is Pending.
fn ensure_mutable(order: &Order) -> AppResult<()> {
    match order.payment_status {
        PaymentStatus::Pending => Ok(()),
        PaymentStatus::Paid => Err(AppError::conflict("Order is already paid")),
        PaymentStatus::Cancelled => Err(AppError::conflict("Order is cancelled")),
    }
}
