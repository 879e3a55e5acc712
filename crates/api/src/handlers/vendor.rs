//! Handlers for the `/vendors` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sitedesk_core::validation::validate_input;
use sitedesk_db::models::vendor::{CreateVendor, UpdateVendor};
use sitedesk_db::repositories::VendorRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::handlers::{ensure_deletable, not_found};
use crate::query::{IdParam, ListParams};
use crate::response::{DataResponse, ListResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/vendors
pub async fn get(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> AppResult<Response> {
    if let Some(id) = params.id {
        let vendor = VendorRepo::find_detail(&state.pool, id)
            .await?
            .ok_or_else(|| not_found("Vendor", id))?;
        return Ok(Json(DataResponse::new(vendor)).into_response());
    }

    let page = state.page_request(params.page, params.limit);
    let (vendors, total) = VendorRepo::list(&state.pool, params.search.as_deref(), &page).await?;
    Ok(Json(ListResponse::new(vendors, page.meta(total))).into_response())
}

/// POST /api/vendors
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateVendor>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let vendor = VendorRepo::create(&state.pool, &input).await?;

    tracing::info!(vendor_id = vendor.id, name = %vendor.name, "Vendor created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(vendor, "Vendor created successfully")),
    ))
}

/// PUT /api/vendors
pub async fn update(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<UpdateVendor>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let vendor = VendorRepo::update(&state.pool, input.id, &input)
        .await?
        .ok_or_else(|| not_found("Vendor", input.id))?;

    tracing::info!(vendor_id = vendor.id, "Vendor updated");

    Ok(Json(DataResponse::with_message(
        vendor,
        "Vendor updated successfully",
    )))
}

/// DELETE /api/vendors?id=
pub async fn delete(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<IdParam>,
) -> AppResult<impl IntoResponse> {
    let id = params.require()?;
    VendorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Vendor", id))?;

    let dependents = VendorRepo::count_dependents(&state.pool, id).await?;
    ensure_deletable("vendor", &dependents)?;

    let deleted = VendorRepo::delete(&state.pool, id)
        .await
        .map_err(|e| AppError::from_delete(e, "vendor"))?;
    if !deleted {
        return Err(not_found("Vendor", id));
    }

    tracing::info!(vendor_id = id, "Vendor deleted");

    Ok(Json(MessageResponse::new("Vendor deleted successfully")))
}
