//! Database module: quote history persisted in SQLite.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database
//! - `sqlite.rs`: pool handle and the insert/read operations

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::QuoteRecord;
pub use schema::{QUOTES_TABLE, SQLITE_INIT};
pub use sqlite::{QuoteStorage, SqlitePool};
