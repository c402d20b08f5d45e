use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::models::{Account, LocationRecord, LocationUpdate, Role};
use super::store::{AccountStore, LocationStore, StoreError, StoreResult};

// Vectors keep insertion order, which is the listing order
#[derive(Default)]
struct StorageData {
    accounts: Vec<Account>,
    locations: Vec<LocationRecord>,
}

/// In-memory storage implementation (useful for testing and local runs)
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<StorageData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the given accounts already present, in order.
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        Self {
            data: RwLock::new(StorageData {
                accounts,
                locations: Vec::new(),
            }),
        }
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn insert_account(&self, account: &Account) -> StoreResult<()> {
        // Check and insert under one write lock
        let mut data = self.data.write().await;
        if data.accounts.iter().any(|a| a.email == account.email) {
            return Err(StoreError::DuplicateEmail(account.email.clone()));
        }
        data.accounts.push(account.clone());
        debug!("memory: inserted account {}", account.id);
        Ok(())
    }

    async fn account_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        let data = self.data.read().await;
        Ok(data.accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn account_by_credentials(&self, email: &str, password: &str) -> StoreResult<Option<Account>> {
        let data = self.data.read().await;
        Ok(data
            .accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .cloned())
    }

    async fn list_accounts(&self) -> StoreResult<Vec<Account>> {
        let data = self.data.read().await;
        Ok(data.accounts.clone())
    }

    async fn set_role(&self, id: Uuid, role: Role) -> StoreResult<Option<Account>> {
        let mut data = self.data.write().await;
        Ok(data.accounts.iter_mut().find(|a| a.id == id).map(|account| {
            account.role = role;
            account.clone()
        }))
    }

    async fn delete_account(&self, id: Uuid) -> StoreResult<bool> {
        let mut data = self.data.write().await;
        let before = data.accounts.len();
        data.accounts.retain(|a| a.id != id);
        Ok(data.accounts.len() != before)
    }
}

#[async_trait]
impl LocationStore for MemoryStore {
    async fn insert_location(&self, location: &LocationRecord) -> StoreResult<()> {
        let mut data = self.data.write().await;
        data.locations.push(location.clone());
        debug!("memory: inserted location {}", location.id);
        Ok(())
    }

    async fn list_locations(&self) -> StoreResult<Vec<LocationRecord>> {
        let data = self.data.read().await;
        Ok(data.locations.clone())
    }

    async fn location_by_id(&self, id: Uuid) -> StoreResult<Option<LocationRecord>> {
        let data = self.data.read().await;
        Ok(data.locations.iter().find(|l| l.id == id).cloned())
    }

    async fn update_location(
        &self,
        id: Uuid,
        expected_owner: &str,
        update: &LocationUpdate,
    ) -> StoreResult<Option<LocationRecord>> {
        let mut data = self.data.write().await;
        Ok(data
            .locations
            .iter_mut()
            .find(|l| l.id == id && l.created_by == expected_owner)
            .map(|location| {
                location.apply(update);
                location.clone()
            }))
    }

    async fn delete_location(&self, id: Uuid, expected_owner: &str) -> StoreResult<bool> {
        let mut data = self.data.write().await;
        let before = data.locations.len();
        data.locations
            .retain(|l| !(l.id == id && l.created_by == expected_owner));
        Ok(data.locations.len() != before)
    }
}
