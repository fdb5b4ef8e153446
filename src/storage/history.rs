//! Location history store backed by rusqlite.
//!
//! Append-only: rows are inserted and read back in bulk, never updated or
//! deleted. `get_all` returns rows newest first (descending id).

use crate::location::types::LocationRecord;
use crate::storage::schema::{CURRENT_VERSION, SCHEMA, SCHEMA_VERSION_TABLE};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::path::Path;
use thiserror::Error;

/// SQLite-backed store of captured locations.
pub struct LocationHistoryStore {
    conn: Connection,
}

impl LocationHistoryStore {
    /// Open or create a store at the given path.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::OpenFailed(e.to_string()))?;
        }

        let conn = Connection::open(path).map_err(|e| StorageError::OpenFailed(e.to_string()))?;

        let store = Self { conn };
        store.initialize()?;

        Ok(store)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StorageError::OpenFailed(e.to_string()))?;

        let store = Self { conn };
        store.initialize()?;

        Ok(store)
    }

    /// Provision the schema.
    ///
    /// Safe to call any number of times; existing rows are untouched.
    pub fn initialize(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;

        let current_version = self.schema_version()?;

        if current_version < CURRENT_VERSION {
            self.migrate(current_version)?;
        }

        // Re-provision in case the table was dropped behind our back
        self.conn
            .execute_batch(SCHEMA)
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;

        Ok(())
    }

    /// Get the current schema version.
    pub fn schema_version(&self) -> Result<i32, StorageError> {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(StorageError::MigrationFailed(e.to_string())),
        }
    }

    /// Run database migrations.
    fn migrate(&self, from_version: i32) -> Result<(), StorageError> {
        if from_version < 1 {
            self.conn
                .execute_batch(SCHEMA)
                .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;

            self.conn
                .execute(
                    "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
                    [CURRENT_VERSION],
                )
                .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;

            tracing::info!("Location store migrated to version {}", CURRENT_VERSION);
        }

        Ok(())
    }

    /// Append one record.
    pub fn insert(&self, record: &LocationRecord) -> Result<(), StorageError> {
        self.conn
            .execute(
                "INSERT INTO locations (id, latitude, longitude) VALUES (?1, ?2, ?3)",
                params![record.id, record.latitude, record.longitude],
            )
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        tracing::debug!("Stored location {}", record.id);
        Ok(())
    }

    /// Read every stored record, newest first.
    pub fn get_all(&self) -> Result<Vec<LocationRecord>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, latitude, longitude FROM locations ORDER BY id DESC")
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(LocationRecord {
                    id: row.get(0)?,
                    latitude: row.get(1)?,
                    longitude: row.get(2)?,
                })
            })
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;

        rows.collect::<SqliteResult<Vec<_>>>()
            .map_err(|e| StorageError::ReadFailed(e.to_string()))
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<usize, StorageError> {
        self.conn
            .query_row("SELECT COUNT(*) FROM locations", [], |row| row.get::<_, i64>(0))
            .map(|n| n as usize)
            .map_err(|e| StorageError::ReadFailed(e.to_string()))
    }

    /// Largest id in the store, if any.
    pub fn max_id(&self) -> Result<Option<i64>, StorageError> {
        self.conn
            .query_row("SELECT MAX(id) FROM locations", [], |row| row.get(0))
            .map_err(|e| StorageError::ReadFailed(e.to_string()))
    }

    /// Get a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Location history storage errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    #[error("Failed to open location store: {0}")]
    OpenFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),
}
