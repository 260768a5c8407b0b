use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::db::models::QuoteRecord;
use crate::db::schema::{QUOTES_TABLE, SQLITE_INIT};
use crate::error::RelayError;

pub type SqlitePool = Pool<Sqlite>;

/// Shared handle over the quote history. Cloning shares the pool; SQLite
/// serializes concurrent writers on its own.
#[derive(Clone)]
pub struct QuoteStorage {
    pool: SqlitePool,
}

impl QuoteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating the file if needed) the database at `database_url`,
    /// check it answers and make sure the table exists.
    pub async fn connect(database_url: &str) -> Result<Self, RelayError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.ping().await?;
        storage.init_schema().await?;
        info!(database_url = %database_url, table = QUOTES_TABLE, "quote storage ready");
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn ping(&self) -> Result<(), RelayError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), RelayError> {
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Append a bid stamped with the current time. Returns the row id.
    ///
    /// `BEGIN` and the `INSERT` must finish within `deadline`; only then is the
    /// transaction committed. On expiry the open transaction is dropped, which
    /// rolls the row back, so a timed-out call never leaves a record behind.
    pub async fn insert_bid(&self, bid: &str, deadline: Duration) -> Result<i64, RelayError> {
        let staged = tokio::time::timeout(deadline, async {
            let mut tx = self.pool.begin().await?;
            let result = sqlx::query("INSERT INTO usdbrl (bid, created_at) VALUES (?, ?)")
                .bind(bid)
                .bind(Utc::now())
                .execute(&mut *tx)
                .await?;
            Ok::<_, RelayError>((tx, result.last_insert_rowid()))
        })
        .await
        .map_err(|_| RelayError::PersistTimeout(deadline))?;

        let (tx, id) = staged?;
        tx.commit().await?;
        Ok(id)
    }

    /// Read one row back. Used by tests and manual inspection; never served.
    pub async fn get_by_id(&self, id: i64) -> Result<QuoteRecord, RelayError> {
        let record = sqlx::query_as::<_, QuoteRecord>(
            "SELECT id, bid, created_at FROM usdbrl WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    /// Number of recorded bids. Test and inspection support, like `get_by_id`.
    pub async fn count(&self) -> Result<i64, RelayError> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM usdbrl")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENEROUS: Duration = Duration::from_secs(5);

    async fn memory_storage() -> QuoteStorage {
        // one connection: each in-memory connection is its own database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let storage = QuoteStorage::new(pool);
        storage.init_schema().await.unwrap();
        storage
    }

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let storage = memory_storage().await;
        storage.init_schema().await.unwrap();
        storage.init_schema().await.unwrap();
        assert_eq!(storage.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn insert_keeps_bid_text_verbatim() {
        let storage = memory_storage().await;
        let id = storage.insert_bid("5.2500", GENEROUS).await.unwrap();

        let record = storage.get_by_id(id).await.unwrap();
        assert_eq!(record.bid, "5.2500");
        assert!(record.created_at <= Utc::now());
    }

    #[tokio::test]
    async fn duplicate_bids_are_appended() {
        let storage = memory_storage().await;
        let first = storage.insert_bid("5.25", GENEROUS).await.unwrap();
        let second = storage.insert_bid("5.25", GENEROUS).await.unwrap();

        assert!(second > first);
        assert_eq!(storage.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn connect_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cotacoes.db");
        let url = format!("sqlite:{}", path.display());

        let storage = QuoteStorage::connect(&url).await.unwrap();
        assert!(path.exists());
        assert_eq!(storage.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn connect_fails_when_directory_is_missing() {
        let err = QuoteStorage::connect("sqlite:/nonexistent/dir/c.db")
            .await
            .err()
            .expect("opening a file in a missing directory must fail");
        assert!(matches!(err, RelayError::DatabaseError(_)), "got {err}");
    }

    #[tokio::test]
    async fn insert_past_deadline_leaves_no_row() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("cotacoes.db").display());
        let storage = QuoteStorage::connect(&url).await.unwrap();

        // hold the write lock so the insert has to wait on SQLite's busy handler
        let mut blocker = storage.pool().begin().await.unwrap();
        sqlx::query("INSERT INTO usdbrl (bid, created_at) VALUES ('0', ?)")
            .bind(Utc::now())
            .execute(&mut *blocker)
            .await
            .unwrap();

        let err = storage
            .insert_bid("5.25", Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::PersistTimeout(_)));

        blocker.rollback().await.unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(storage.count().await.unwrap(), 0);
    }
}
