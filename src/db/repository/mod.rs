//! Repository Module
//!
//! CRUD access to the embedded document store, one repository per entity.
//! Ids travel as `"table:key"` strings end to end; [`record_key`] accepts
//! both the prefixed and the bare form.

pub mod bar_game;
pub mod cafe_item;
pub mod customer;
pub mod game_session;
pub mod membership;
pub mod order;

// Re-exports
pub use bar_game::BarGameRepository;
pub use cafe_item::CafeItemRepository;
pub use customer::CustomerRepository;
pub use game_session::GameSessionRepository;
pub use membership::MembershipRepository;
pub use order::OrderRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Strip a `"table:"` prefix from an id, if present
pub(crate) fn record_key<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Build a RecordId for `table` from a prefixed or bare id string
pub(crate) fn record_id(table: &str, id: &str) -> RecordId {
    RecordId::from_table_key(table, record_key(table, id))
}
