use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Datelike, Utc};
use sitedesk_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/dashboard
pub async fn summary(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let summary = DashboardRepo::summary(&state.pool, Utc::now().year()).await?;
    Ok(Json(DataResponse::new(summary)))
}
