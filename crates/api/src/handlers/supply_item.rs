//! Handlers for the `/supply-items` resource (the item catalogue that form
//! lines point at).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sitedesk_core::validation::validate_input;
use sitedesk_db::models::supply_item::{CreateSupplyItem, UpdateSupplyItem};
use sitedesk_db::repositories::SupplyItemRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::handlers::{ensure_deletable, not_found};
use crate::query::{IdParam, ListParams};
use crate::response::{DataResponse, ListResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/supply-items
pub async fn get(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> AppResult<Response> {
    if let Some(id) = params.id {
        let item = SupplyItemRepo::find_detail(&state.pool, id)
            .await?
            .ok_or_else(|| not_found("Supply item", id))?;
        return Ok(Json(DataResponse::new(item)).into_response());
    }

    let page = state.page_request(params.page, params.limit);
    let (items, total) =
        SupplyItemRepo::list(&state.pool, params.search.as_deref(), &page).await?;
    Ok(Json(ListResponse::new(items, page.meta(total))).into_response())
}

/// POST /api/supply-items
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateSupplyItem>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let item = SupplyItemRepo::create(&state.pool, &input).await?;

    tracing::info!(supply_item_id = item.id, "Supply item created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(item, "Supply item created successfully")),
    ))
}

/// PUT /api/supply-items
pub async fn update(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<UpdateSupplyItem>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let item = SupplyItemRepo::update(&state.pool, input.id, &input)
        .await?
        .ok_or_else(|| not_found("Supply item", input.id))?;

    tracing::info!(supply_item_id = item.id, "Supply item updated");

    Ok(Json(DataResponse::with_message(
        item,
        "Supply item updated successfully",
    )))
}

/// DELETE /api/supply-items?id=
///
/// Items used on any form line stay in the catalogue.
pub async fn delete(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<IdParam>,
) -> AppResult<impl IntoResponse> {
    let id = params.require()?;
    SupplyItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Supply item", id))?;

    let dependents = SupplyItemRepo::count_dependents(&state.pool, id).await?;
    ensure_deletable("supply item", &dependents)?;

    let deleted = SupplyItemRepo::delete(&state.pool, id)
        .await
        .map_err(|e| AppError::from_delete(e, "supply item"))?;
    if !deleted {
        return Err(not_found("Supply item", id));
    }

    tracing::info!(supply_item_id = id, "Supply item deleted");

    Ok(Json(MessageResponse::new("Supply item deleted successfully")))
}
