//! Handlers for the `/officers` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sitedesk_core::validation::validate_input;
use sitedesk_db::models::officer::{CreateOfficer, UpdateOfficer};
use sitedesk_db::repositories::OfficerRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::handlers::{ensure_deletable, not_found};
use crate::query::{IdParam, ListParams};
use crate::response::{DataResponse, ListResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/officers
pub async fn get(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> AppResult<Response> {
    if let Some(id) = params.id {
        let officer = OfficerRepo::find_detail(&state.pool, id)
            .await?
            .ok_or_else(|| not_found("Officer", id))?;
        return Ok(Json(DataResponse::new(officer)).into_response());
    }

    let page = state.page_request(params.page, params.limit);
    let (officers, total) =
        OfficerRepo::list(&state.pool, params.search.as_deref(), &page).await?;
    Ok(Json(ListResponse::new(officers, page.meta(total))).into_response())
}

/// POST /api/officers
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateOfficer>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let officer = OfficerRepo::create(&state.pool, &input).await?;

    tracing::info!(officer_id = officer.id, "Officer created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(officer, "Officer created successfully")),
    ))
}

/// PUT /api/officers
pub async fn update(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<UpdateOfficer>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let officer = OfficerRepo::update(&state.pool, input.id, &input)
        .await?
        .ok_or_else(|| not_found("Officer", input.id))?;

    tracing::info!(officer_id = officer.id, "Officer updated");

    Ok(Json(DataResponse::with_message(
        officer,
        "Officer updated successfully",
    )))
}

/// DELETE /api/officers?id=
///
/// Refused while the officer is assigned to a project or has filed forms.
pub async fn delete(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<IdParam>,
) -> AppResult<impl IntoResponse> {
    let id = params.require()?;
    OfficerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Officer", id))?;

    let dependents = OfficerRepo::count_dependents(&state.pool, id).await?;
    ensure_deletable("officer", &dependents)?;

    let deleted = OfficerRepo::delete(&state.pool, id)
        .await
        .map_err(|e| AppError::from_delete(e, "officer"))?;
    if !deleted {
        return Err(not_found("Officer", id));
    }

    tracing::info!(officer_id = id, "Officer deleted");

    Ok(Json(MessageResponse::new("Officer deleted successfully")))
}
