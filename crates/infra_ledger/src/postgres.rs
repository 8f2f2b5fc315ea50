//! PostgreSQL Ledger Adapter
//!
//! Implements the ledger store port on a single `ledger_state` table:
//!
//! - values are stored as JSONB, so rich queries are JSONB containment
//!   (`value @> selector`) and can use the GIN index
//! - every write bumps `version`; conditional writes are a single
//!   `UPDATE ... WHERE version = $expected`
//! - rich queries run inside a transaction through a server-side cursor and
//!   are fetched in batches; closing the result set closes the cursor and
//!   commits, dropping it rolls the transaction back
//!
//! ```rust,ignore
//! use infra_ledger::{create_pool, run_migrations, DatabaseConfig, PgLedgerStore};
//!
//! let pool = create_pool(DatabaseConfig::new(url)).await?;
//! run_migrations(&pool).await?;
//! let store: Arc<dyn LedgerStore> = Arc::new(PgLedgerStore::new(pool));
//! ```

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::VecDeque;
use tracing::{debug, instrument};

use core_kernel::{
    DomainPort, HealthCheckResult, HealthCheckable, KeyValue, LedgerStore, PortError,
    QueryResults, Selector, Version, VersionedRecord,
};

use crate::error::DatabaseError;

const ADAPTER_ID: &str = "postgres-ledger-store";
const CURSOR_NAME: &str = "ledger_query_cursor";
const DEFAULT_FETCH_SIZE: usize = 100;

const SELECT_STATE: &str = "SELECT value::text, version FROM ledger_state WHERE key = $1";

const UPSERT_STATE: &str = r#"
    INSERT INTO ledger_state (key, value, version, updated_at)
    VALUES ($1, $2::jsonb, 1, now())
    ON CONFLICT (key) DO UPDATE
    SET value = EXCLUDED.value,
        version = ledger_state.version + 1,
        updated_at = now()
    RETURNING version
"#;

const UPDATE_STATE_IF_VERSION: &str = r#"
    UPDATE ledger_state
    SET value = $2::jsonb,
        version = version + 1,
        updated_at = now()
    WHERE key = $1 AND version = $3
    RETURNING version
"#;

const SELECT_VERSION: &str = "SELECT version FROM ledger_state WHERE key = $1";

/// PostgreSQL-backed implementation of the ledger store port
#[derive(Debug, Clone)]
pub struct PgLedgerStore {
    pool: PgPool,
    fetch_size: usize,
}

impl PgLedgerStore {
    /// Creates a new adapter over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            fetch_size: DEFAULT_FETCH_SIZE,
        }
    }

    /// Sets how many rows a rich query pulls from its cursor per round trip
    pub fn with_fetch_size(mut self, fetch_size: usize) -> Self {
        self.fetch_size = fetch_size.max(1);
        self
    }

    /// Returns the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Deletes every ledger record, keeping the table
pub async fn truncate_ledger(pool: &PgPool) -> Result<(), DatabaseError> {
    sqlx::query("TRUNCATE TABLE ledger_state").execute(pool).await?;
    Ok(())
}

fn to_json_text(key: &str, value: Vec<u8>) -> Result<String, DatabaseError> {
    String::from_utf8(value).map_err(|_| {
        DatabaseError::SerializationError(format!("value for key '{}' is not UTF-8 JSON", key))
    })
}

fn to_version(raw: i64) -> Result<Version, DatabaseError> {
    Version::try_from(raw)
        .map_err(|_| DatabaseError::SerializationError(format!("invalid stored version {}", raw)))
}

fn from_version(version: Version) -> Result<i64, DatabaseError> {
    i64::try_from(version)
        .map_err(|_| DatabaseError::SerializationError(format!("version {} out of range", version)))
}

impl DomainPort for PgLedgerStore {}

#[async_trait]
impl HealthCheckable for PgLedgerStore {
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult::healthy(ADAPTER_ID, latency_ms),
            Err(e) => {
                HealthCheckResult::unhealthy(ADAPTER_ID, latency_ms, format!("Database error: {}", e))
            }
        }
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    #[instrument(skip(self))]
    async fn get_state(&self, key: &str) -> Result<Option<VersionedRecord>, PortError> {
        let row = sqlx::query_as::<_, (String, i64)>(SELECT_STATE)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        match row {
            Some((value, version)) => Ok(Some(VersionedRecord {
                value: value.into_bytes(),
                version: to_version(version)?,
            })),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<Version, PortError> {
        let json = to_json_text(key, value)?;

        let version = sqlx::query_scalar::<_, i64>(UPSERT_STATE)
            .bind(key)
            .bind(json)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        debug!(version, "State written");
        Ok(to_version(version)?)
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn put_state_if_version(
        &self,
        key: &str,
        expected: Version,
        value: Vec<u8>,
    ) -> Result<Version, PortError> {
        let json = to_json_text(key, value)?;

        let updated = sqlx::query_scalar::<_, i64>(UPDATE_STATE_IF_VERSION)
            .bind(key)
            .bind(json)
            .bind(from_version(expected)?)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        match updated {
            Some(version) => Ok(to_version(version)?),
            None => {
                let current = sqlx::query_scalar::<_, i64>(SELECT_VERSION)
                    .bind(key)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(DatabaseError::from)?
                    .map(to_version)
                    .transpose()?;
                Err(PortError::version_conflict(key, expected, current))
            }
        }
    }

    #[instrument(skip(self, selector), fields(selector = %selector.to_query_string()))]
    async fn rich_query(&self, selector: &Selector) -> Result<Box<dyn QueryResults>, PortError> {
        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;

        let declare = format!(
            "DECLARE {} NO SCROLL CURSOR FOR \
             SELECT key, value::text FROM ledger_state WHERE value @> $1::jsonb ORDER BY key COLLATE \"C\"",
            CURSOR_NAME
        );
        sqlx::query(&declare)
            .bind(selector.to_document().to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(Box::new(PgQueryResults {
            tx: Some(tx),
            buffer: VecDeque::new(),
            exhausted: false,
            fetch_size: self.fetch_size,
        }))
    }
}

/// Cursor-backed rich-query result set
///
/// Holds an open transaction until closed or dropped.
pub struct PgQueryResults {
    tx: Option<Transaction<'static, Postgres>>,
    buffer: VecDeque<KeyValue>,
    exhausted: bool,
    fetch_size: usize,
}

impl PgQueryResults {
    async fn fetch_batch(&mut self) -> Result<(), DatabaseError> {
        let tx = self
            .tx
            .as_mut()
            .ok_or_else(|| DatabaseError::QueryFailed("result set already closed".to_string()))?;

        let fetch = format!("FETCH FORWARD {} FROM {}", self.fetch_size, CURSOR_NAME);
        let rows = sqlx::query_as::<_, (String, String)>(&fetch)
            .fetch_all(&mut **tx)
            .await
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        if rows.len() < self.fetch_size {
            self.exhausted = true;
        }
        self.buffer.extend(rows.into_iter().map(|(key, value)| KeyValue {
            key,
            value: value.into_bytes(),
        }));
        Ok(())
    }
}

#[async_trait]
impl QueryResults for PgQueryResults {
    async fn next(&mut self) -> Result<Option<KeyValue>, PortError> {
        if self.tx.is_none() {
            return Err(PortError::query("result set already closed"));
        }
        if self.buffer.is_empty() && !self.exhausted {
            self.fetch_batch().await?;
        }
        Ok(self.buffer.pop_front())
    }

    async fn close(&mut self) -> Result<(), PortError> {
        self.buffer.clear();
        self.exhausted = true;

        if let Some(mut tx) = self.tx.take() {
            sqlx::query(&format!("CLOSE {}", CURSOR_NAME))
                .execute(&mut *tx)
                .await
                .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            tx.commit().await.map_err(DatabaseError::from)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_utf8_value_rejected() {
        let err = to_json_text("P1", vec![0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, DatabaseError::SerializationError(_)));
    }

    #[test]
    fn test_version_conversion() {
        assert_eq!(to_version(3).unwrap(), 3);
        assert!(to_version(-1).is_err());
        assert!(from_version(u64::MAX).is_err());
    }
}
