use std::future::Future;
use std::sync::Arc;

use tracing::info;

use crate::config::{AdminSeed, AppConfig};
use crate::database::models::{Account, Role};
use crate::database::{with_deadline, AccountStore, LocationStore, StoreError, StoreResult};

/// Process-wide handles shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStore>,
    pub locations: Arc<dyn LocationStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Uses one backend for both stores.
    pub fn new<S>(store: Arc<S>, config: AppConfig) -> Self
    where
        S: AccountStore + LocationStore,
    {
        Self {
            accounts: store.clone(),
            locations: store,
            config: Arc::new(config),
        }
    }

    /// Runs a store call under the configured per-operation deadline.
    pub async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        with_deadline(operation, self.config.database.operation_timeout(), fut).await
    }

    /// Creates the configured admin account unless the email is already taken.
    pub async fn seed_admin(&self, seed: &AdminSeed) -> StoreResult<()> {
        let admin = Account::register(&seed.email, &seed.password).with_role(Role::Admin);
        match self.accounts.insert_account(&admin).await {
            Ok(()) => {
                info!("Seeded admin account {}", seed.email);
                Ok(())
            }
            Err(StoreError::DuplicateEmail(_)) => {
                info!("Admin seed {} already present, leaving it unchanged", seed.email);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
