//! Handlers for the `/clients` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sitedesk_core::validation::validate_input;
use sitedesk_db::models::client::{CreateClient, UpdateClient};
use sitedesk_db::repositories::ClientRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::handlers::{ensure_deletable, not_found};
use crate::query::{IdParam, ListParams};
use crate::response::{DataResponse, ListResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/clients
///
/// With `?id=` returns the client and its projects; otherwise a page of
/// clients matching `?search=`.
pub async fn get(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> AppResult<Response> {
    if let Some(id) = params.id {
        let client = ClientRepo::find_detail(&state.pool, id)
            .await?
            .ok_or_else(|| not_found("Client", id))?;
        return Ok(Json(DataResponse::new(client)).into_response());
    }

    let page = state.page_request(params.page, params.limit);
    let (clients, total) = ClientRepo::list(&state.pool, params.search.as_deref(), &page).await?;
    Ok(Json(ListResponse::new(clients, page.meta(total))).into_response())
}

/// POST /api/clients
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateClient>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let client = ClientRepo::create(&state.pool, &input).await?;

    tracing::info!(client_id = client.id, "Client created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(client, "Client created successfully")),
    ))
}

/// PUT /api/clients
pub async fn update(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<UpdateClient>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let client = ClientRepo::update(&state.pool, input.id, &input)
        .await?
        .ok_or_else(|| not_found("Client", input.id))?;

    tracing::info!(client_id = client.id, "Client updated");

    Ok(Json(DataResponse::with_message(
        client,
        "Client updated successfully",
    )))
}

/// DELETE /api/clients?id=
///
/// Refused while any project still belongs to the client.
pub async fn delete(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<IdParam>,
) -> AppResult<impl IntoResponse> {
    let id = params.require()?;
    ClientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Client", id))?;

    let dependents = ClientRepo::count_dependents(&state.pool, id).await?;
    ensure_deletable("client", &dependents)?;

    let deleted = ClientRepo::delete(&state.pool, id)
        .await
        .map_err(|e| AppError::from_delete(e, "client"))?;
    if !deleted {
        return Err(not_found("Client", id));
    }

    tracing::info!(client_id = id, "Client deleted");

    Ok(Json(MessageResponse::new("Client deleted successfully")))
}
