use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::db::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Request timed out")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),

    /// Store failure; `message` is the only part the client sees.
    #[error("{message}: {source}")]
    Storage {
        message: &'static str,
        #[source]
        source: RepoError,
    },
}

impl AppError {
    /// Maps a repository failure, using `failure` as the client-facing text
    /// when the store itself failed.
    pub fn from_repo(err: RepoError, failure: &'static str) -> Self {
        match err {
            RepoError::Validation(msg) => AppError::Validation(msg.into()),
            RepoError::NotFound(_) => AppError::NotFound("Todo not found".into()),
            source @ RepoError::Database(_) => AppError::Storage {
                message: failure,
                source,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, self.to_string()),
            AppError::Timeout => (StatusCode::REQUEST_TIMEOUT, self.to_string()),
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
            AppError::Storage { message, source } => {
                tracing::error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, (*message).to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_is_bad_request_with_message() {
        let (status, body) = render(AppError::Validation("Text and date are required".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Text and date are required" }));
    }

    #[tokio::test]
    async fn repo_not_found_maps_to_404() {
        let err = AppError::from_repo(RepoError::NotFound(3), "Failed to update todo");
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Todo not found" }));
    }

    #[tokio::test]
    async fn timeout_and_method_errors_use_error_body() {
        let (status, body) = render(AppError::Timeout).await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body, json!({ "error": "Request timed out" }));

        let (status, body) = render(AppError::MethodNotAllowed).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({ "error": "Method not allowed" }));
    }

    #[tokio::test]
    async fn internal_error_hides_detail() {
        let (status, body) = render(AppError::Internal("layer exploded".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn storage_failure_hides_detail() {
        let err = AppError::from_repo(
            RepoError::Database(sqlx::Error::PoolTimedOut),
            "Failed to fetch todos",
        );
        assert!(err.to_string().contains("pool timed out"));

        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to fetch todos" }));
    }
}
