//! SQLite store for local files and in-memory databases.
//!
//! # Connection Modes
//! - File-based: `sqlite:///path/to/yatv.db` or `sqlite://./yatv.db`
//! - In-memory: `sqlite::memory:`
//!
//! The pool holds exactly one connection that is never recycled; an
//! in-memory database lives only as long as that connection.

use super::sql::impl_video_store;
use crate::{
    Result,
    config::{StoreConfig, StoreKind},
    error::{YatvError, redact_database_url},
};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

/// Store backed by SQLite.
pub struct SqliteStore {
    /// Single-connection pool
    pub pool: SqlitePool,
    /// Parsed connection configuration
    pub config: StoreConfig,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Opens the SQLite database named by the URL.
    ///
    /// # Errors
    /// Returns error if the URL is malformed or the database cannot be opened
    pub async fn connect(database_url: &str) -> Result<Self> {
        let config = StoreConfig::from_url(database_url)?;
        if config.kind != StoreKind::Sqlite {
            return Err(YatvError::configuration("expected a sqlite: URL"));
        }

        let options = SqliteConnectOptions::from_str(database_url).map_err(|e| {
            YatvError::configuration(format!(
                "Invalid SQLite connection string {}: {e}",
                redact_database_url(database_url)
            ))
        })?;

        tracing::info!("Opening {}", config);
        let pool = single_connection_pool(&config)
            .connect_with(options)
            .await
            .map_err(|e| YatvError::connection_failed("Failed to open SQLite database", e))?;

        Ok(Self { pool, config })
    }

    /// Opens a fresh, empty in-memory database.
    ///
    /// # Errors
    /// Returns error if SQLite cannot allocate the database
    pub async fn in_memory() -> Result<Self> {
        Self::connect("sqlite::memory:").await
    }
}

fn single_connection_pool(config: &StoreConfig) -> SqlitePoolOptions {
    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout)
        .idle_timeout(None)
        .max_lifetime(None)
}

impl_video_store!(SqliteStore);
