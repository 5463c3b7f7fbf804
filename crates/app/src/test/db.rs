//! Database test utilities

use sqlx::SqlitePool;
use tempfile::TempDir;
use thiserror::Error;

use crate::database;

#[derive(Debug, Error)]
pub(crate) enum TestDbError {
    #[error("failed to create temporary directory")]
    TempDir(#[from] std::io::Error),

    #[error("failed to connect to test database")]
    Connect(#[from] sqlx::Error),

    #[error("failed to run migrations")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// A migrated `SQLite` database in its own temporary directory.
///
/// Isolation is per test: each `TestDb` is a separate file, removed when the
/// `TestDb` is dropped. Services commit normally; nothing is rolled back.
#[derive(Debug)]
pub(crate) struct TestDb {
    pool: SqlitePool,

    // Held so the database file outlives the pool.
    _dir: TempDir,
}

impl TestDb {
    pub(crate) async fn new() -> Result<Self, TestDbError> {
        let dir = TempDir::new()?;
        let url = format!("sqlite://{}", dir.path().join("tiffin.db").display());

        let pool = database::connect(&url).await?;

        database::migrate(&pool).await?;

        Ok(Self { pool, _dir: dir })
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn each_database_starts_empty() -> TestResult {
        let first = TestDb::new().await?;

        sqlx::query("INSERT INTO users (uuid, username, email, created_at, updated_at) VALUES (?1, 'asha', 'asha@example.com', 0, 0)")
            .bind(uuid::Uuid::now_v7())
            .execute(first.pool())
            .await?;

        let second = TestDb::new().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(second.pool())
            .await?;

        assert_eq!(count, 0);

        Ok(())
    }
}
