use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::db::repository::{TEXT_AND_DATE_REQUIRED, VALID_PERCENTAGE_REQUIRED};
use crate::dto::{parse_date, parse_id, CompleteTodoRequest, CreateTodoRequest, MessageResponse};
use crate::error::{AppError, AppResult};
use crate::models::todo::Todo;
use crate::AppState;

pub async fn list_todos(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<Json<Vec<Todo>>> {
    let date = parse_date(&date)?;

    let todos = state
        .todos
        .list_by_date(date)
        .await
        .map_err(|e| AppError::from_repo(e, "Failed to fetch todos"))?;

    Ok(Json(todos))
}

pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> AppResult<Json<Todo>> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(%rejection, "Rejected todo body");
        AppError::Validation(TEXT_AND_DATE_REQUIRED.into())
    })?;
    let (text, date) = body.into_parts()?;

    let todo = state
        .todos
        .insert(&text, date)
        .await
        .map_err(|e| AppError::from_repo(e, "Failed to add todo"))?;

    tracing::info!(id = todo.id, %date, "Todo created");
    Ok(Json(todo))
}

pub async fn complete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CompleteTodoRequest>, JsonRejection>,
) -> AppResult<Json<Todo>> {
    let id = parse_id(&id)?;
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(%rejection, "Rejected completion body");
        AppError::Validation(VALID_PERCENTAGE_REQUIRED.into())
    })?;
    let completion_percentage = body.completion_percentage()?;

    let todo = state
        .todos
        .complete(id, completion_percentage, body.reason.as_deref())
        .await
        .map_err(|e| AppError::from_repo(e, "Failed to update todo"))?;

    tracing::info!(id, completion_percentage, "Todo completed");
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;

    state
        .todos
        .delete(id)
        .await
        .map_err(|e| AppError::from_repo(e, "Failed to delete todo"))?;

    Ok(Json(MessageResponse::new("Todo deleted successfully")))
}
