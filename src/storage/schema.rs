//! Database schema definitions for the location history.

/// SQL schema for creating the location history table.
pub const SCHEMA: &str = r#"
-- Captured locations table
CREATE TABLE IF NOT EXISTS locations (
    id INTEGER PRIMARY KEY,
    latitude REAL NOT NULL,
    longitude REAL NOT NULL
);
"#;

/// SQL for tracking applied migrations.
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version
pub const CURRENT_VERSION: i32 = 1;
