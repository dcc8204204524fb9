//! # Schema Migrations
//!
//! SQL files under `migrations/sqlite/` are compiled into the binary and
//! applied in filename order on startup; sqlx records each applied file in
//! `_sqlx_migrations`, so reopening an existing `pdv.db` is a no-op.
//!
//! | File | Creates |
//! |---|---|
//! | `001_initial_schema.sql` | `products`, `sales` |
//!
//! Applied files are immutable; schema changes go into a new `NNN_*.sql`.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every migration not yet recorded in `_sqlx_migrations`.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    debug!(embedded = MIGRATOR.migrations.len(), "Applying migrations");
    MIGRATOR.run(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_reapplying_is_a_no_op() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.run_migrations().await.unwrap();

        let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(applied as usize, MIGRATOR.migrations.len());
        assert!(applied >= 1);
    }

    #[tokio::test]
    async fn test_store_without_migrations_has_no_tables() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();

        assert!(db.products().count().await.is_err());

        run_migrations(db.pool()).await.unwrap();
        assert_eq!(db.products().count().await.unwrap(), 0);
    }
}
