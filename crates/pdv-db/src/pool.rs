//! # SQLite Pool
//!
//! Opening the store file, sizing the pool and handing out repositories.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  DbConfig::new("./pdv.db")                                             │
//! │     .max_connections(5)              pool sizing                        │
//! │     .busy_timeout(5s)                wait on SQLite's writer lock       │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  Database::new(config)                                                 │
//! │     ├── open file (create if missing, WAL, synchronous=NORMAL)         │
//! │     ├── SqlitePool (connections borrowed per operation, RAII return)   │
//! │     └── embedded migrations ─► products, sales                         │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  db.products() / db.sales() / db.checkout(..)                          │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  db.close()   on shutdown                                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! File databases use WAL so readers never wait behind the single writer.
//! `:memory:` gets a private single-connection database for tests.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::product::ProductRepository;
use crate::repository::sale::SaleRepository;

const IN_MEMORY: &str = ":memory:";

// =============================================================================
// DbConfig
// =============================================================================

/// Store location and pool tuning.
///
/// ```rust,ignore
/// let config = DbConfig::new("./pdv.db")
///     .max_connections(8)
///     .busy_timeout(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file, or `:memory:`.
    pub database_path: PathBuf,

    /// Pool upper bound. Default 5.
    pub max_connections: u32,

    /// Connections kept open while idle. Default 1.
    pub min_connections: u32,

    /// Wait for a free pooled connection. Default 30s.
    pub acquire_timeout: Duration,

    /// Idle connections older than this are closed. Default 10 min.
    pub idle_timeout: Duration,

    /// Wait on SQLite's writer lock before reporting busy. Default 5s.
    pub busy_timeout: Duration,

    /// Apply embedded migrations in [`Database::new`]. Default true.
    pub run_migrations: bool,
}

impl DbConfig {
    /// Configuration for a file database; the file is created on first open.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Private in-memory database, one per pool.
    ///
    /// Pinned to a single connection: every `:memory:` connection would
    /// otherwise open its own empty database.
    pub fn in_memory() -> Self {
        DbConfig {
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            ..DbConfig::new(IN_MEMORY)
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY)
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
        };

        Ok(options.foreign_keys(true).busy_timeout(self.busy_timeout))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Shared store handle.
///
/// Clones share one pool and one checkout lock, so a clone per HTTP handler
/// state is the intended use.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,

    /// Serializes checkouts issued through this handle.
    checkout_lock: Arc<Mutex<()>>,
}

impl Database {
    /// Opens the pool and, unless disabled, brings the schema up to date.
    ///
    /// ## Errors
    /// * `DbError::ConnectionFailed` - file could not be opened
    /// * `DbError::MigrationFailed` - schema could not be applied
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            in_memory = config.is_in_memory(),
            "Opening store"
        );

        let options = config.connect_options()?;

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(
            max = config.max_connections,
            min = config.min_connections,
            "Pool ready"
        );

        let db = Database {
            pool,
            checkout_lock: Arc::new(Mutex::new(())),
        };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending embedded migrations. Idempotent.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await?;
        info!("Schema up to date");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.pool.clone())
    }

    pub(crate) fn checkout_lock(&self) -> &Mutex<()> {
        &self.checkout_lock
    }

    /// Waits for borrowed connections to return, then closes the pool.
    /// Every later operation fails.
    pub async fn close(&self) {
        info!("Closing store");
        self.pool.close().await;
    }

    /// `SELECT 1` round trip.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
