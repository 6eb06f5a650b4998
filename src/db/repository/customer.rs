//! Customer Repository

use super::{BaseRepository, RepoError, RepoResult, record_id, record_key};
use crate::db::models::{Customer, CustomerCreate, CustomerUpdate};
use crate::db::repository::membership::MEMBERSHIP_TABLE;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

pub const CUSTOMER_TABLE: &str = "customer";

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Customer>> {
        let customers: Vec<Customer> = self
            .base
            .db()
            .query("SELECT * FROM customer ORDER BY name")
            .await?
            .take(0)?;
        Ok(customers)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Customer>> {
        let customer: Option<Customer> = self
            .base
            .db()
            .select((CUSTOMER_TABLE, record_key(CUSTOMER_TABLE, id)))
            .await?;
        Ok(customer)
    }

    pub async fn create(&self, data: CustomerCreate) -> RepoResult<Customer> {
        let customer = Customer {
            id: None,
            name: data.name,
            email: data.email,
            phone: data.phone,
            membership: data.membership.map(|m| record_id(MEMBERSHIP_TABLE, &m)),
        };

        let created: Option<Customer> = self
            .base
            .db()
            .create(CUSTOMER_TABLE)
            .content(customer)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create customer".into()))
    }

    pub async fn update(&self, id: &str, data: CustomerUpdate) -> RepoResult<Customer> {
        let key = record_key(CUSTOMER_TABLE, id);
        let updated: Option<Customer> = self
            .base
            .db()
            .update((CUSTOMER_TABLE, key))
            .merge(data)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))
    }

    pub async fn set_membership(&self, id: &str, membership: &RecordId) -> RepoResult<Customer> {
        let key = record_key(CUSTOMER_TABLE, id);
        let updated: Option<Customer> = self
            .base
            .db()
            .update((CUSTOMER_TABLE, key))
            .merge(serde_json::json!({ "membership": membership.to_string() }))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = record_key(CUSTOMER_TABLE, id);
        let deleted: Option<Customer> = self.base.db().delete((CUSTOMER_TABLE, key)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Customer {} not found", id)));
        }
        Ok(())
    }

    /// Case-insensitive substring search over name, email, phone
    pub async fn search(&self, query: &str) -> RepoResult<Vec<Customer>> {
        let needle = query.to_lowercase();
        let customers: Vec<Customer> = self
            .base
            .db()
            .query(
                "SELECT * FROM customer WHERE \
                 string::lowercase(name) CONTAINS $q \
                 OR (email IS NOT NONE AND string::lowercase(email) CONTAINS $q) \
                 OR (phone IS NOT NONE AND string::lowercase(phone) CONTAINS $q) \
                 ORDER BY name",
            )
            .bind(("q", needle))
            .await?
            .take(0)?;
        Ok(customers)
    }
}
