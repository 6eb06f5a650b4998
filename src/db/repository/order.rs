//! Order Repository
//!
//! Persists orders and their line-item records. Orders carry the ordered
//! list of line-item references plus the running total; all mutation
//! decisions (stock, totals, terminality) live in the order engine.

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{Order, OrderItem, PaymentStatus};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

pub const ORDER_TABLE: &str = "order";
pub const ORDER_ITEM_TABLE: &str = "order_item";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    // ========== Orders ==========

    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(ORDER_TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".into()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self
            .base
            .db()
            .select((ORDER_TABLE, record_key(ORDER_TABLE, id)))
            .await?;
        Ok(order)
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order")
            .await?
            .take(0)?;
        Ok(orders)
    }

    pub async fn find_by_customer(&self, customer: &RecordId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE customer = $customer")
            .bind(("customer", customer.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Persist a new item list and total in one write
    pub async fn set_items_and_total(
        &self,
        id: &str,
        items: &[RecordId],
        total_amount: f64,
    ) -> RepoResult<Order> {
        let key = record_key(ORDER_TABLE, id);
        let item_ids: Vec<String> = items.iter().map(|i| i.to_string()).collect();
        let updated: Option<Order> = self
            .base
            .db()
            .update((ORDER_TABLE, key))
            .merge(serde_json::json!({
                "items": item_ids,
                "totalAmount": total_amount,
            }))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    pub async fn set_status(&self, id: &str, status: PaymentStatus) -> RepoResult<Order> {
        let key = record_key(ORDER_TABLE, id);
        let updated: Option<Order> = self
            .base
            .db()
            .update((ORDER_TABLE, key))
            .merge(serde_json::json!({ "paymentStatus": status }))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    // ========== Order Items ==========

    pub async fn create_item(&self, item: OrderItem) -> RepoResult<OrderItem> {
        let created: Option<OrderItem> = self
            .base
            .db()
            .create(ORDER_ITEM_TABLE)
            .content(item)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order item".into()))
    }

    pub async fn find_item(&self, id: &str) -> RepoResult<Option<OrderItem>> {
        let item: Option<OrderItem> = self
            .base
            .db()
            .select((ORDER_ITEM_TABLE, record_key(ORDER_ITEM_TABLE, id)))
            .await?;
        Ok(item)
    }

    /// Resolve item references in list order
    pub async fn find_items(&self, ids: &[RecordId]) -> RepoResult<Vec<OrderItem>> {
        let mut items = Vec::with_capacity(ids.len());
        for id in ids {
            let item: Option<OrderItem> = self.base.db().select(id.clone()).await?;
            if let Some(item) = item {
                items.push(item);
            }
        }
        Ok(items)
    }

    pub async fn set_item_quantity(&self, id: &str, quantity: i64) -> RepoResult<OrderItem> {
        let key = record_key(ORDER_ITEM_TABLE, id);
        let updated: Option<OrderItem> = self
            .base
            .db()
            .update((ORDER_ITEM_TABLE, key))
            .merge(serde_json::json!({ "quantity": quantity }))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order item {} not found", id)))
    }

    pub async fn delete_item(&self, id: &str) -> RepoResult<()> {
        let key = record_key(ORDER_ITEM_TABLE, id);
        let deleted: Option<OrderItem> = self.base.db().delete((ORDER_ITEM_TABLE, key)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Order item {} not found", id)));
        }
        Ok(())
    }
}
