//! Store traits shared by the postgres and in-memory backends.

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use super::models::{Account, LocationRecord, LocationUpdate, Role};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    #[error("store operation '{operation}' timed out after {limit:?}")]
    Timeout { operation: &'static str, limit: Duration },

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("corrupt row: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Backend(#[from] sqlx::Error),
}

/// Persistent record of registered accounts.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Inserts the account; fails with `DuplicateEmail` if the email is taken.
    /// The check and the insert are a single atomic step.
    async fn insert_account(&self, account: &Account) -> StoreResult<()>;

    async fn account_by_email(&self, email: &str) -> StoreResult<Option<Account>>;

    /// Exact match on both email and stored password.
    async fn account_by_credentials(&self, email: &str, password: &str) -> StoreResult<Option<Account>>;

    async fn list_accounts(&self) -> StoreResult<Vec<Account>>;

    /// Returns the updated account, or `None` if no account has this id.
    async fn set_role(&self, id: Uuid, role: Role) -> StoreResult<Option<Account>>;

    /// Returns whether an account was removed. Locations are not touched.
    async fn delete_account(&self, id: Uuid) -> StoreResult<bool>;

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Persistent record of map annotations.
#[async_trait]
pub trait LocationStore: Send + Sync + 'static {
    async fn insert_location(&self, location: &LocationRecord) -> StoreResult<()>;

    /// All records in creation order.
    async fn list_locations(&self) -> StoreResult<Vec<LocationRecord>>;

    async fn location_by_id(&self, id: Uuid) -> StoreResult<Option<LocationRecord>>;

    /// Overwrites the editable fields only while the record exists and is
    /// still owned by `expected_owner`. Returns `None` when that condition
    /// does not hold.
    async fn update_location(
        &self,
        id: Uuid,
        expected_owner: &str,
        update: &LocationUpdate,
    ) -> StoreResult<Option<LocationRecord>>;

    /// Deletes only while the record is still owned by `expected_owner`.
    async fn delete_location(&self, id: Uuid, expected_owner: &str) -> StoreResult<bool>;

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Bounds a store call so a stuck backend surfaces as `StoreError::Timeout`.
pub async fn with_deadline<T, F>(operation: &'static str, limit: Duration, fut: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout { operation, limit }),
    }
}
