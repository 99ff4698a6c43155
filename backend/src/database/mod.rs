//! Module for database connection setup and common utilities.
//!
//! The connection pool is created lazily on first use. Initialization runs
//! exactly once even under concurrent first access: the first caller connects
//! and applies migrations, concurrent callers await that same attempt, and a
//! failed attempt leaves the handle empty so the next caller retries.

use crate::config::Config;
use anyhow::{Context, Result};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::{str::FromStr, sync::Arc, time::Duration};
use tokio::sync::OnceCell;
use tracing::{error, info};

pub mod models;

#[derive(Clone)]
pub struct Database {
    database_url: String,
    max_connections: u32,
    acquire_timeout: Duration,
    pool: Arc<OnceCell<SqlitePool>>,
}

impl Database {
    /// Prepares a lazily connected database handle. No I/O happens here.
    pub fn new(config: &Config) -> Self {
        Database {
            database_url: config.database_url.clone(),
            max_connections: config.max_connections,
            acquire_timeout: Duration::from_secs(config.acquire_timeout_seconds),
            pool: Arc::new(OnceCell::new()),
        }
    }

    /// Returns the shared connection pool, connecting on first use.
    pub async fn pool(&self) -> Result<&SqlitePool> {
        self.pool
            .get_or_try_init(|| async {
                match self.connect().await {
                    Ok(pool) => {
                        info!("Database connected");
                        Ok(pool)
                    }
                    Err(e) => {
                        error!("Database connection error: {:#}", e);
                        Err(e)
                    }
                }
            })
            .await
    }

    /// Whether a pool has been successfully established.
    pub fn is_connected(&self) -> bool {
        self.pool.initialized()
    }

    async fn connect(&self) -> Result<SqlitePool> {
        let options = SqliteConnectOptions::from_str(&self.database_url)
            .with_context(|| format!("Invalid DATABASE_URL '{}'", self.database_url))?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout);
        if self.database_url.contains(":memory:") {
            // An in-memory database lives only as long as its connection.
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;

        Ok(pool)
    }

    /// Closes the database connection pool if it was ever opened.
    pub async fn close(&self) {
        if let Some(pool) = self.pool.get() {
            pool.close().await;
            info!("Database connection pool closed.");
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::memory_config;
    use super::*;

    #[tokio::test]
    async fn test_concurrent_first_use_shares_one_pool() {
        let db = Database::new(&memory_config());
        assert!(!db.is_connected());

        let (a, b) = tokio::join!(db.pool(), db.pool());
        let a = a.unwrap();
        let b = b.unwrap();

        assert!(std::ptr::eq(a, b));
        assert!(db.is_connected());
    }

    #[tokio::test]
    async fn test_clones_share_the_same_handle() {
        let db = Database::new(&memory_config());
        let clone = db.clone();

        let pool = db.pool().await.unwrap();
        assert!(clone.is_connected());
        assert!(std::ptr::eq(pool, clone.pool().await.unwrap()));
    }

    #[tokio::test]
    async fn test_failed_init_is_not_cached() {
        let mut config = memory_config();
        config.database_url = "sqlite:///nonexistent-dir/for/sure/feedback.db".to_string();
        config.acquire_timeout_seconds = 1;
        let db = Database::new(&config);

        assert!(db.pool().await.is_err());
        assert!(!db.is_connected());
        // A second call attempts a fresh connection rather than replaying a cached failure.
        assert!(db.pool().await.is_err());
        assert!(!db.is_connected());
    }

    #[tokio::test]
    async fn test_migrations_create_tables() {
        let db = Database::new(&memory_config());
        let pool = db.pool().await.unwrap();

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'reports', 'feedback')",
        )
        .fetch_one(pool)
        .await
        .unwrap();
        assert_eq!(count, 3);
    }
}
