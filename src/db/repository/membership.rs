//! Membership Repository

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{Membership, MembershipCreate, MembershipUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const MEMBERSHIP_TABLE: &str = "membership";

#[derive(Clone)]
pub struct MembershipRepository {
    base: BaseRepository,
}

impl MembershipRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Membership>> {
        let memberships: Vec<Membership> = self
            .base
            .db()
            .query("SELECT * FROM membership ORDER BY name")
            .await?
            .take(0)?;
        Ok(memberships)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Membership>> {
        let membership: Option<Membership> = self
            .base
            .db()
            .select((MEMBERSHIP_TABLE, record_key(MEMBERSHIP_TABLE, id)))
            .await?;
        Ok(membership)
    }

    pub async fn create(&self, data: MembershipCreate) -> RepoResult<Membership> {
        let membership = Membership {
            id: None,
            name: data.name,
            description: data.description,
            duration: data.duration,
            price: data.price,
            active: data.active.unwrap_or(true),
        };

        let created: Option<Membership> = self
            .base
            .db()
            .create(MEMBERSHIP_TABLE)
            .content(membership)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create membership".into()))
    }

    pub async fn update(&self, id: &str, data: MembershipUpdate) -> RepoResult<Membership> {
        let key = record_key(MEMBERSHIP_TABLE, id);
        let updated: Option<Membership> = self
            .base
            .db()
            .update((MEMBERSHIP_TABLE, key))
            .merge(data)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Membership {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = record_key(MEMBERSHIP_TABLE, id);
        let deleted: Option<Membership> = self.base.db().delete((MEMBERSHIP_TABLE, key)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Membership {} not found", id)));
        }
        Ok(())
    }
}
