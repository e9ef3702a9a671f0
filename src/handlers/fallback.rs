use axum::BoxError;

use crate::error::AppError;

pub async fn not_found() -> AppError {
    AppError::NotFound("Not found".into())
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Turns errors raised by the middleware stack into JSON responses.
pub async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        AppError::Timeout
    } else {
        AppError::Internal(err.to_string())
    }
}
