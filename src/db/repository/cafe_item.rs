//! Cafe Item Repository

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{CafeItem, CafeItemCreate, CafeItemUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const CAFE_ITEM_TABLE: &str = "cafe_item";

/// Items counted as low stock below this quantity
const LOW_STOCK_THRESHOLD: i64 = 10;

#[derive(Clone)]
pub struct CafeItemRepository {
    base: BaseRepository,
}

impl CafeItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<CafeItem>> {
        let items: Vec<CafeItem> = self
            .base
            .db()
            .query("SELECT * FROM cafe_item ORDER BY name")
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<CafeItem>> {
        let item: Option<CafeItem> = self
            .base
            .db()
            .select((CAFE_ITEM_TABLE, record_key(CAFE_ITEM_TABLE, id)))
            .await?;
        Ok(item)
    }

    pub async fn create(&self, data: CafeItemCreate) -> RepoResult<CafeItem> {
        let item = CafeItem {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            category: data.category,
            in_stock: data.in_stock.unwrap_or(true),
            quantity: data.quantity.unwrap_or(0),
        };

        let created: Option<CafeItem> = self
            .base
            .db()
            .create(CAFE_ITEM_TABLE)
            .content(item)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create cafe item".into()))
    }

    pub async fn update(&self, id: &str, data: CafeItemUpdate) -> RepoResult<CafeItem> {
        let key = record_key(CAFE_ITEM_TABLE, id);
        let updated: Option<CafeItem> = self
            .base
            .db()
            .update((CAFE_ITEM_TABLE, key))
            .merge(data)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Cafe item {} not found", id)))
    }

    /// Overwrite the stock fields; used by the inventory ledger only
    pub async fn set_stock(&self, id: &str, quantity: i64, in_stock: bool) -> RepoResult<CafeItem> {
        let key = record_key(CAFE_ITEM_TABLE, id);
        let updated: Option<CafeItem> = self
            .base
            .db()
            .update((CAFE_ITEM_TABLE, key))
            .merge(serde_json::json!({ "quantity": quantity, "inStock": in_stock }))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Cafe item {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = record_key(CAFE_ITEM_TABLE, id);
        let deleted: Option<CafeItem> = self.base.db().delete((CAFE_ITEM_TABLE, key)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Cafe item {} not found", id)));
        }
        Ok(())
    }

    /// Items running low or already flagged out of stock
    pub async fn find_low_stock(&self) -> RepoResult<Vec<CafeItem>> {
        let items: Vec<CafeItem> = self
            .base
            .db()
            .query("SELECT * FROM cafe_item WHERE quantity < $threshold OR inStock = false ORDER BY quantity")
            .bind(("threshold", LOW_STOCK_THRESHOLD))
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_category(&self, category: &str) -> RepoResult<Vec<CafeItem>> {
        let items: Vec<CafeItem> = self
            .base
            .db()
            .query("SELECT * FROM cafe_item WHERE category = $category ORDER BY name")
            .bind(("category", category.to_string()))
            .await?
            .take(0)?;
        Ok(items)
    }
}
