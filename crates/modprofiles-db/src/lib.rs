//! Module Profiles Database Layer
//!
//! Provides `SQLite` persistence for namespaced setting values. Uses `SQLx`
//! for connection pooling and embedded migrations.
//!
//! # Example
//!
//! ```ignore
//! use modprofiles_db::Database;
//!
//! let db = Database::new("settings.db", 5).await?;
//! db.run_migrations().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod connection;
pub mod error;
pub mod migrations;
pub mod settings;

// Re-export commonly used types
pub use connection::ConnectionPool;
pub use error::{DatabaseError, Result};

use modprofiles_core::StorageConfig;
use std::path::Path;

/// High-level database interface.
///
/// Wraps a `ConnectionPool` and handles migration.
#[derive(Debug, Clone)]
pub struct Database {
    pool: ConnectionPool,
}

impl Database {
    /// Open a database at `path` (or `:memory:`).
    ///
    /// # Errors
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new(path: impl AsRef<Path>, max_connections: u32) -> Result<Self> {
        let pool = ConnectionPool::new(path, max_connections).await?;
        Ok(Self { pool })
    }

    /// Open the database described by the storage configuration and bring
    /// its schema up to date.
    ///
    /// # Errors
    /// Returns `DatabaseError` if the path cannot be resolved, the database
    /// cannot be opened, or a migration fails.
    pub async fn open(config: &StorageConfig) -> Result<Self> {
        let path = config.resolve_database_path()?;
        let db = Self::new(&path, config.max_connections).await?;
        db.run_migrations().await?;
        Ok(db)
    }

    /// Run all pending database migrations.
    ///
    /// # Errors
    /// Returns `DatabaseError::Migration` if any migration fails.
    pub async fn run_migrations(&self) -> Result<()> {
        migrations::run_migrations(self.pool.pool()).await
    }

    /// Get the current schema version.
    ///
    /// # Errors
    /// Returns `DatabaseError` if the version cannot be queried.
    pub async fn get_schema_version(&self) -> Result<i64> {
        migrations::get_schema_version(self.pool.pool()).await
    }

    /// Get a reference to the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Sqlite> {
        self.pool.pool()
    }

    /// Close the database connection gracefully.
    pub async fn close(self) {
        self.pool.close().await;
    }
}
