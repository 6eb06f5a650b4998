//! Session Tracker
//!
//! Drives the rental-session state machine: NotStarted -> Active -> Closed.
//! Check-in creates an Active session (one per customer at a time);
//! check-out stamps the end time and computes the elapsed-time cost exactly
//! once. Closed sessions are terminal and reject further mutation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::Mutex;

use crate::db::models::{GameSession, GameSessionUpdate};
use crate::db::repository::bar_game::BAR_GAME_TABLE;
use crate::db::repository::customer::CUSTOMER_TABLE;
use crate::db::repository::{
    BarGameRepository, CustomerRepository, GameSessionRepository, record_id,
};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct SessionTracker {
    games: BarGameRepository,
    customers: CustomerRepository,
    sessions: GameSessionRepository,
    /// Serializes the no-other-active-session check per customer
    checkin_locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl SessionTracker {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            games: BarGameRepository::new(db.clone()),
            customers: CustomerRepository::new(db.clone()),
            sessions: GameSessionRepository::new(db),
            checkin_locks: Arc::new(DashMap::new()),
        }
    }

    fn lock_for(&self, customer_id: &str) -> Arc<Mutex<()>> {
        self.checkin_locks
            .entry(customer_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Start a session for a customer on a game
    pub async fn check_in(&self, game_id: &str, customer_id: &str) -> AppResult<GameSession> {
        let game = self
            .games
            .find_by_id(game_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Bar game {} not found", game_id)))?;

        if !game.available {
            return Err(AppError::unavailable("Game not available"));
        }

        let customer = self
            .customers
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer not found"))?;

        let customer_ref = customer
            .id
            .unwrap_or_else(|| record_id(CUSTOMER_TABLE, customer_id));
        let game_ref = game.id.unwrap_or_else(|| record_id(BAR_GAME_TABLE, game_id));

        // Check-then-create is serialized per customer
        let lock = self.lock_for(customer_id);
        let _guard = lock.lock().await;

        if self
            .sessions
            .find_active_by_customer(&customer_ref)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "Customer is already in an active game session",
            ));
        }

        let session = self
            .sessions
            .create(game_ref, customer_ref, Utc::now())
            .await?;

        tracing::info!(
            session = %session.id.as_ref().map(|i| i.to_string()).unwrap_or_default(),
            game = %game_id,
            customer = %customer_id,
            "Session checked in"
        );

        Ok(session)
    }

    /// Close a session and bill the elapsed time.
    ///
    /// The cost is computed here and never again; a second call fails with
    /// a conflict and leaves the stored end time and cost untouched. When
    /// the game record is gone by checkout time, the cost defaults to 0.
    pub async fn check_out(&self, session_id: &str) -> AppResult<GameSession> {
        let session = self
            .sessions
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| AppError::not_found("Game session not found"))?;

        if session.is_closed() {
            return Err(AppError::conflict("Game session already ended"));
        }

        let end_time = Utc::now();
        let cost = match self.games.find_by_id(&session.game.to_string()).await? {
            Some(game) => session_cost(session.start_time, end_time, game.price_per_hour),
            None => 0.0,
        };

        let closed = self.sessions.close(session_id, end_time, cost).await?;

        tracing::info!(session = %session_id, cost, "Session checked out");

        Ok(closed)
    }

    /// Administrative update; closed sessions are terminal
    pub async fn update_session(
        &self,
        session_id: &str,
        data: GameSessionUpdate,
    ) -> AppResult<GameSession> {
        let session = self
            .sessions
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| AppError::not_found("Game session not found"))?;

        if session.is_closed() {
            return Err(AppError::conflict("Game session already ended"));
        }

        Ok(self.sessions.update(session_id, data).await?)
    }

    /// Administrative delete; no invariant depends on a session record
    pub async fn delete_session(&self, session_id: &str) -> AppResult<()> {
        Ok(self.sessions.delete(session_id).await?)
    }

    pub async fn active_sessions(&self) -> AppResult<Vec<GameSession>> {
        Ok(self.sessions.find_active().await?)
    }

    pub async fn past_sessions(&self) -> AppResult<Vec<GameSession>> {
        Ok(self.sessions.find_past().await?)
    }

    pub async fn sessions_for_customer(&self, customer_id: &str) -> AppResult<Vec<GameSession>> {
        let customer_ref = record_id(CUSTOMER_TABLE, customer_id);
        Ok(self.sessions.find_by_customer(&customer_ref).await?)
    }
}

/// Elapsed-time billing: fractional hours at the game's hourly rate, no
/// rounding, no minimum charge.
fn session_cost(start: DateTime<Utc>, end: DateTime<Utc>, price_per_hour: f64) -> f64 {
    let hours = (end - start).num_milliseconds() as f64 / 3_600_000.0;
    hours * price_per_hour
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn ninety_minutes_at_ten_per_hour() {
        let start = at(1_000_000);
        let end = at(1_000_000 + 90 * 60);
        assert_eq!(session_cost(start, end, 10.0), 15.0);
    }

    #[test]
    fn fractional_hours_bill_proportionally() {
        let start = at(0);
        let end = at(6 * 60); // six minutes
        let cost = session_cost(start, end, 20.0);
        assert!((cost - 2.0).abs() < 1e-9);
    }

    #[test]
    fn zero_duration_is_free() {
        let t = at(42);
        assert_eq!(session_cost(t, t, 35.0), 0.0);
    }
}
