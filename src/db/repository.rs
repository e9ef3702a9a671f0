use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::todo::{is_valid_percentage, Todo, TodoStats};

pub const TEXT_AND_DATE_REQUIRED: &str = "Text and date are required";
pub const VALID_PERCENTAGE_REQUIRED: &str = "Valid completion percentage is required";

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("Todo {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Data access for the `todos` table.
///
/// Each method is a single statement; nothing spans a transaction.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Todos for `date`, oldest first. Ties keep insertion order.
    async fn list_by_date(&self, date: NaiveDate) -> RepoResult<Vec<Todo>>;

    async fn insert(&self, text: &str, date: NaiveDate) -> RepoResult<Todo>;

    /// Records a completion and stamps `completed_at` with the current time.
    /// Completing an already completed todo overwrites the previous values.
    async fn complete(
        &self,
        id: i64,
        completion_percentage: i32,
        reason: Option<&str>,
    ) -> RepoResult<Todo>;

    /// Succeeds whether or not the row existed.
    async fn delete(&self, id: i64) -> RepoResult<()>;

    async fn stats_by_date(&self, date: NaiveDate) -> RepoResult<TodoStats>;

    async fn ping(&self) -> RepoResult<()>;

    async fn close(&self);
}

pub(crate) fn check_text(text: &str) -> RepoResult<()> {
    if text.trim().is_empty() {
        return Err(RepoError::Validation(TEXT_AND_DATE_REQUIRED));
    }
    Ok(())
}

pub(crate) fn check_percentage(completion_percentage: i32) -> RepoResult<()> {
    if !is_valid_percentage(completion_percentage) {
        return Err(RepoError::Validation(VALID_PERCENTAGE_REQUIRED));
    }
    Ok(())
}
