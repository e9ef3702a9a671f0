use axum::{
    extract::{Path, State},
    Json,
};

use crate::dto::parse_date;
use crate::error::{AppError, AppResult};
use crate::models::todo::TodoStats;
use crate::AppState;

pub async fn get_daily_stats(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<Json<TodoStats>> {
    let date = parse_date(&date)?;

    let stats = state
        .todos
        .stats_by_date(date)
        .await
        .map_err(|e| AppError::from_repo(e, "Failed to fetch statistics"))?;

    Ok(Json(stats))
}
