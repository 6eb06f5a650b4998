//! Game Session Repository
//!
//! Session references (game, customer) are stored as `"table:key"` strings,
//! so lookups bind string forms of the referenced ids.

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{GameSession, GameSessionUpdate};
use chrono::{DateTime, Utc};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

pub const GAME_SESSION_TABLE: &str = "game_session";

#[derive(Clone)]
pub struct GameSessionRepository {
    base: BaseRepository,
}

impl GameSessionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(
        &self,
        game: RecordId,
        customer: RecordId,
        start_time: DateTime<Utc>,
    ) -> RepoResult<GameSession> {
        let session = GameSession {
            id: None,
            game,
            customer,
            start_time,
            end_time: None,
            cost: None,
        };

        let created: Option<GameSession> = self
            .base
            .db()
            .create(GAME_SESSION_TABLE)
            .content(session)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create game session".into()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<GameSession>> {
        let session: Option<GameSession> = self
            .base
            .db()
            .select((GAME_SESSION_TABLE, record_key(GAME_SESSION_TABLE, id)))
            .await?;
        Ok(session)
    }

    /// The customer's session with no end time, if one exists
    pub async fn find_active_by_customer(
        &self,
        customer: &RecordId,
    ) -> RepoResult<Option<GameSession>> {
        let sessions: Vec<GameSession> = self
            .base
            .db()
            .query("SELECT * FROM game_session WHERE customer = $customer AND endTime IS NONE")
            .bind(("customer", customer.to_string()))
            .await?
            .take(0)?;
        Ok(sessions.into_iter().next())
    }

    pub async fn find_active(&self) -> RepoResult<Vec<GameSession>> {
        let sessions: Vec<GameSession> = self
            .base
            .db()
            .query("SELECT * FROM game_session WHERE endTime IS NONE ORDER BY startTime")
            .await?
            .take(0)?;
        Ok(sessions)
    }

    pub async fn find_past(&self) -> RepoResult<Vec<GameSession>> {
        let sessions: Vec<GameSession> = self
            .base
            .db()
            .query("SELECT * FROM game_session WHERE endTime IS NOT NONE ORDER BY startTime")
            .await?
            .take(0)?;
        Ok(sessions)
    }

    pub async fn find_by_customer(&self, customer: &RecordId) -> RepoResult<Vec<GameSession>> {
        let sessions: Vec<GameSession> = self
            .base
            .db()
            .query("SELECT * FROM game_session WHERE customer = $customer ORDER BY startTime")
            .bind(("customer", customer.to_string()))
            .await?
            .take(0)?;
        Ok(sessions)
    }

    /// Record end time and cost; the write that closes a session
    pub async fn close(
        &self,
        id: &str,
        end_time: DateTime<Utc>,
        cost: f64,
    ) -> RepoResult<GameSession> {
        let key = record_key(GAME_SESSION_TABLE, id);
        let updated: Option<GameSession> = self
            .base
            .db()
            .update((GAME_SESSION_TABLE, key))
            .merge(serde_json::json!({
                "endTime": end_time.to_rfc3339(),
                "cost": cost,
            }))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Game session {} not found", id)))
    }

    pub async fn update(&self, id: &str, data: GameSessionUpdate) -> RepoResult<GameSession> {
        let key = record_key(GAME_SESSION_TABLE, id);
        let updated: Option<GameSession> = self
            .base
            .db()
            .update((GAME_SESSION_TABLE, key))
            .merge(data)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Game session {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = record_key(GAME_SESSION_TABLE, id);
        let deleted: Option<GameSession> =
            self.base.db().delete((GAME_SESSION_TABLE, key)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Game session {} not found", id)));
        }
        Ok(())
    }
}
