use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Inclusive bounds for `completion_percentage`.
pub const MIN_COMPLETION_PERCENTAGE: i32 = 0;
pub const MAX_COMPLETION_PERCENTAGE: i32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Todo {
    pub id: i64,
    pub text: String,
    pub date: NaiveDate,
    pub completed: bool,
    pub completion_percentage: i32,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Aggregate counts for a single day.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct TodoStats {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
}

pub fn is_valid_percentage(percentage: i32) -> bool {
    (MIN_COMPLETION_PERCENTAGE..=MAX_COMPLETION_PERCENTAGE).contains(&percentage)
}

/// Collapses an empty or whitespace-only reason to `None`.
pub fn normalize_reason(reason: Option<&str>) -> Option<&str> {
    reason.filter(|r| !r.trim().is_empty())
}
