//! Bar Game Repository

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{BarGame, BarGameCreate, BarGameUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const BAR_GAME_TABLE: &str = "bar_game";

#[derive(Clone)]
pub struct BarGameRepository {
    base: BaseRepository,
}

impl BarGameRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<BarGame>> {
        let games: Vec<BarGame> = self
            .base
            .db()
            .query("SELECT * FROM bar_game ORDER BY name")
            .await?
            .take(0)?;
        Ok(games)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<BarGame>> {
        let game: Option<BarGame> = self
            .base
            .db()
            .select((BAR_GAME_TABLE, record_key(BAR_GAME_TABLE, id)))
            .await?;
        Ok(game)
    }

    pub async fn create(&self, data: BarGameCreate) -> RepoResult<BarGame> {
        let game = BarGame {
            id: None,
            name: data.name,
            description: data.description,
            price_per_hour: data.price_per_hour,
            available: data.available.unwrap_or(true),
        };

        let created: Option<BarGame> = self.base.db().create(BAR_GAME_TABLE).content(game).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create bar game".into()))
    }

    pub async fn update(&self, id: &str, data: BarGameUpdate) -> RepoResult<BarGame> {
        let key = record_key(BAR_GAME_TABLE, id);
        let updated: Option<BarGame> = self
            .base
            .db()
            .update((BAR_GAME_TABLE, key))
            .merge(data)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Bar game {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = record_key(BAR_GAME_TABLE, id);
        let deleted: Option<BarGame> = self.base.db().delete((BAR_GAME_TABLE, key)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Bar game {} not found", id)));
        }
        Ok(())
    }
}
