use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use super::models::{Account, Coordinates, LocationRecord, LocationUpdate, Role};
use super::store::{AccountStore, LocationStore, StoreError, StoreResult};
use crate::config::DatabaseConfig;

const CREATE_ACCOUNTS: &str = r#"
    CREATE TABLE IF NOT EXISTS accounts (
        id          UUID PRIMARY KEY,
        email       TEXT NOT NULL UNIQUE,
        password    TEXT NOT NULL,
        role        TEXT NOT NULL DEFAULT 'user',
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

const CREATE_LOCATIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS locations (
        id          UUID PRIMARY KEY,
        name        TEXT NOT NULL,
        category    TEXT NOT NULL DEFAULT '',
        lat         DOUBLE PRECISION NOT NULL,
        lng         DOUBLE PRECISION NOT NULL,
        address     TEXT NOT NULL DEFAULT '',
        created_by  TEXT NOT NULL,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

const ACCOUNT_COLUMNS: &str = "id, email, password, role";
const LOCATION_COLUMNS: &str = "id, name, category, lat, lng, address, created_by";

#[derive(Debug, FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    password: String,
    role: String,
}

impl TryFrom<AccountRow> for Account {
    type Error = StoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role: Role = row
            .role
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("account {}: {}", row.id, e)))?;
        Ok(Account {
            id: row.id,
            email: row.email,
            password: row.password,
            role,
        })
    }
}

#[derive(Debug, FromRow)]
struct LocationRow {
    id: Uuid,
    name: String,
    category: String,
    lat: f64,
    lng: f64,
    address: String,
    created_by: String,
}

impl From<LocationRow> for LocationRecord {
    fn from(row: LocationRow) -> Self {
        LocationRecord {
            id: row.id,
            name: row.name,
            category: row.category,
            coordinates: Coordinates { lat: row.lat, lng: row.lng },
            address: row.address,
            created_by: row.created_by,
        }
    }
}

fn classify(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(err.to_string())
        }
        other => StoreError::Backend(other),
    }
}

/// PostgreSQL-backed implementation of both stores over one pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects and makes sure both tables exist before any traffic is accepted.
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| StoreError::Unavailable("DATABASE_URL is not set".to_string()))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await
            .map_err(classify)?;

        let store = Self { pool };
        store.ensure_schema().await?;
        info!("Connected to postgres (max {} connections)", config.max_connections);
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(CREATE_ACCOUNTS).execute(&self.pool).await.map_err(classify)?;
        sqlx::query(CREATE_LOCATIONS).execute(&self.pool).await.map_err(classify)?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await.map_err(classify)?;
        Ok(())
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn insert_account(&self, account: &Account) -> StoreResult<()> {
        // The unique constraint on email makes this check-and-insert atomic
        let result = sqlx::query(
            "INSERT INTO accounts (id, email, password, role) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.password)
        .bind(account.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::DuplicateEmail(account.email.clone()));
        }
        Ok(())
    }

    async fn account_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        let sql = format!("SELECT {} FROM accounts WHERE email = $1", ACCOUNT_COLUMNS);
        sqlx::query_as::<_, AccountRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .map(Account::try_from)
            .transpose()
    }

    async fn account_by_credentials(&self, email: &str, password: &str) -> StoreResult<Option<Account>> {
        let sql = format!(
            "SELECT {} FROM accounts WHERE email = $1 AND password = $2",
            ACCOUNT_COLUMNS
        );
        sqlx::query_as::<_, AccountRow>(&sql)
            .bind(email)
            .bind(password)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .map(Account::try_from)
            .transpose()
    }

    async fn list_accounts(&self) -> StoreResult<Vec<Account>> {
        let sql = format!("SELECT {} FROM accounts ORDER BY created_at, id", ACCOUNT_COLUMNS);
        sqlx::query_as::<_, AccountRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?
            .into_iter()
            .map(Account::try_from)
            .collect()
    }

    async fn set_role(&self, id: Uuid, role: Role) -> StoreResult<Option<Account>> {
        let sql = format!(
            "UPDATE accounts SET role = $2 WHERE id = $1 RETURNING {}",
            ACCOUNT_COLUMNS
        );
        sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id)
            .bind(role.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .map(Account::try_from)
            .transpose()
    }

    async fn delete_account(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.health_check().await
    }
}

#[async_trait]
impl LocationStore for PgStore {
    async fn insert_location(&self, location: &LocationRecord) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO locations (id, name, category, lat, lng, address, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(location.id)
        .bind(&location.name)
        .bind(&location.category)
        .bind(location.coordinates.lat)
        .bind(location.coordinates.lng)
        .bind(&location.address)
        .bind(&location.created_by)
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        Ok(())
    }

    async fn list_locations(&self) -> StoreResult<Vec<LocationRecord>> {
        let sql = format!("SELECT {} FROM locations ORDER BY created_at, id", LOCATION_COLUMNS);
        let rows = sqlx::query_as::<_, LocationRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;
        Ok(rows.into_iter().map(LocationRecord::from).collect())
    }

    async fn location_by_id(&self, id: Uuid) -> StoreResult<Option<LocationRecord>> {
        let sql = format!("SELECT {} FROM locations WHERE id = $1", LOCATION_COLUMNS);
        let row = sqlx::query_as::<_, LocationRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?;
        Ok(row.map(LocationRecord::from))
    }

    async fn update_location(
        &self,
        id: Uuid,
        expected_owner: &str,
        update: &LocationUpdate,
    ) -> StoreResult<Option<LocationRecord>> {
        let sql = format!(
            "UPDATE locations SET name = $3, category = $4, lat = $5, lng = $6, address = $7 \
             WHERE id = $1 AND created_by = $2 \
             RETURNING {}",
            LOCATION_COLUMNS
        );
        let row = sqlx::query_as::<_, LocationRow>(&sql)
            .bind(id)
            .bind(expected_owner)
            .bind(&update.name)
            .bind(&update.category)
            .bind(update.coordinates.lat)
            .bind(update.coordinates.lng)
            .bind(&update.address)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?;
        Ok(row.map(LocationRecord::from))
    }

    async fn delete_location(&self, id: Uuid, expected_owner: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1 AND created_by = $2")
            .bind(id)
            .bind(expected_owner)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.health_check().await
    }
}
