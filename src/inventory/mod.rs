//! Inventory Ledger
//!
//! The single point of truth for cafe-item stock. All order paths reserve
//! stock here; nothing else writes `quantity`.
//!
//! The read-check-decrement sequence is a critical section per item id:
//! concurrent reservations against the same item serialize on a keyed
//! async lock so two requests cannot both pass the sufficiency check
//! against a stale count and jointly oversell.
//!
//! There is no release operation. Stock reserved for a line stays reserved
//! even if the enclosing order call later fails or the line is removed.

use std::sync::Arc;

use dashmap::DashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::Mutex;

use crate::db::repository::CafeItemRepository;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct InventoryLedger {
    items: CafeItemRepository,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl InventoryLedger {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            items: CafeItemRepository::new(db),
            locks: Arc::new(DashMap::new()),
        }
    }

    fn lock_for(&self, item_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(item_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Reserve `quantity` units of an item, returning the unit price
    /// captured before the decrement.
    ///
    /// Fails with `NotFound` if the item is absent and `InsufficientStock`
    /// if fewer than `quantity` units remain. Drains the flag to
    /// out-of-stock when the count reaches zero; never re-asserts it.
    pub async fn check_and_reserve(&self, item_id: &str, quantity: i64) -> AppResult<f64> {
        let lock = self.lock_for(item_id);
        let _guard = lock.lock().await;

        let item = self
            .items
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Cafe item {} not found", item_id)))?;

        if quantity > item.quantity {
            return Err(AppError::insufficient_stock(format!(
                "Insufficient stock for {}",
                item.name
            )));
        }

        let remaining = item.quantity - quantity;
        let in_stock = if remaining == 0 { false } else { item.in_stock };
        self.items.set_stock(item_id, remaining, in_stock).await?;

        tracing::debug!(
            item = %item_id,
            reserved = quantity,
            remaining,
            "Stock reserved"
        );

        Ok(item.price)
    }
}
