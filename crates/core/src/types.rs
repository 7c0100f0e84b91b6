//! Shared type aliases used across the workspace.

/// Internal database identifier. All entity tables use BIGSERIAL keys.
pub type DbId = i64;

/// UTC timestamp matching `timestamptz` columns.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
