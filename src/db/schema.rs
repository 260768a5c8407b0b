//! SQL DDL for the quote history table.

pub const QUOTES_TABLE: &str = "usdbrl";

/// Append-only log of served bids:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT
/// - `bid` kept as the exact text received upstream
/// - `created_at` insertion time; no uniqueness on any column
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS usdbrl (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    bid TEXT NOT NULL,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
);
"#;
