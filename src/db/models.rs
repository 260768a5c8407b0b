use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of `usdbrl`: a bid as it was served at `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct QuoteRecord {
    pub id: i64,
    pub bid: String,
    pub created_at: DateTime<Utc>,
}
