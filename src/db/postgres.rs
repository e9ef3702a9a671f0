use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;

use super::repository::{check_percentage, check_text, RepoError, RepoResult, TodoRepository};
use crate::models::todo::{normalize_reason, Todo, TodoStats};

#[derive(Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn list_by_date(&self, date: NaiveDate) -> RepoResult<Vec<Todo>> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT * FROM todos WHERE date = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(todos)
    }

    async fn insert(&self, text: &str, date: NaiveDate) -> RepoResult<Todo> {
        check_text(text)?;

        let todo = sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (text, date, created_at) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(text)
        .bind(date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn complete(
        &self,
        id: i64,
        completion_percentage: i32,
        reason: Option<&str>,
    ) -> RepoResult<Todo> {
        check_percentage(completion_percentage)?;

        sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET completed = TRUE, completion_percentage = $1, reason = $2, completed_at = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(completion_percentage)
        .bind(normalize_reason(reason))
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepoError::NotFound(id))
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(id, rows = result.rows_affected(), "Deleted todo");
        Ok(())
    }

    async fn stats_by_date(&self, date: NaiveDate) -> RepoResult<TodoStats> {
        let stats = sqlx::query_as::<_, TodoStats>(
            r#"
            SELECT
                COUNT(*) AS total,
                COALESCE(SUM(CASE WHEN completed THEN 1 ELSE 0 END), 0) AS completed,
                COALESCE(SUM(CASE WHEN completed THEN 0 ELSE 1 END), 0) AS pending
            FROM todos
            WHERE date = $1
            "#,
        )
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
