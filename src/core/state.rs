//! Server State
//!
//! Holds the database handle and the engine singletons. Built once at
//! startup by [`ServerState::initialize`] and cloned into handlers (all
//! fields are cheap shared-ownership clones). Components receive the
//! handle explicitly at construction; there is no ambient global store.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::inventory::InventoryLedger;
use crate::orders::OrderEngine;
use crate::sessions::SessionTracker;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database handle
    pub db: Surreal<Db>,
    /// Stock reservations; the only writer of cafe-item quantity
    pub inventory: InventoryLedger,
    /// Rental session lifecycle
    pub sessions: SessionTracker,
    /// Composite order lifecycle
    pub orders: OrderEngine,
}

impl ServerState {
    /// Wire up all components around an open database handle
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        let inventory = InventoryLedger::new(db.clone());
        let sessions = SessionTracker::new(db.clone());
        let orders = OrderEngine::new(db.clone(), inventory.clone());

        Self {
            config,
            db,
            inventory,
            sessions,
            orders,
        }
    }

    /// Initialize state for the serving process: ensure the work dir
    /// structure exists, open the on-disk database, wire components.
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db_dir = config.database_dir();
        std::fs::create_dir_all(&db_dir).map_err(|e| {
            AppError::internal(format!("Failed to create database directory: {e}"))
        })?;

        let db_path = db_dir.join("barcade.db");
        let db_service = DbService::open(&db_path.to_string_lossy()).await?;

        Ok(Self::new(config.clone(), db_service.db))
    }

    /// State backed by an ephemeral in-memory database (tests, demos)
    pub async fn in_memory(config: Config) -> AppResult<Self> {
        let db_service = DbService::memory().await?;
        Ok(Self::new(config, db_service.db))
    }
}
