//! Handlers for the `/forms` resource (material, equipment and service
//! requests) and the printable document view.

use std::collections::BTreeSet;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Datelike, Utc};
use sitedesk_core::document::build_form_document;
use sitedesk_core::error::CoreError;
use sitedesk_core::forms::{FormStatus, FormType};
use sitedesk_core::validation::validate_input;
use sitedesk_db::models::form::{CreateForm, CreateFormItem, UpdateForm};
use sitedesk_db::repositories::{FormFilter, FormRepo, SupplyItemRepo};
use sitedesk_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::handlers::not_found;
use crate::query::{FormListParams, IdParam};
use crate::response::{DataResponse, ListResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/forms
///
/// With `?id=` returns the form header and its lines. Otherwise lists forms
/// filtered by `?search=`, `?projectId=` and `?status=`.
pub async fn get(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<FormListParams>,
) -> AppResult<Response> {
    if let Some(id) = params.id {
        let form = FormRepo::find_detail(&state.pool, id)
            .await?
            .ok_or_else(|| not_found("Form", id))?;
        return Ok(Json(DataResponse::new(form)).into_response());
    }

    let filter = FormFilter {
        search: params.search,
        project_id: params.project_id,
        status: FormStatus::parse_opt(params.status.as_deref())?,
    };
    let page = state.page_request(params.page, params.limit);
    let (forms, total) = FormRepo::list(&state.pool, &filter, &page).await?;
    Ok(Json(ListResponse::new(forms, page.meta(total))).into_response())
}

/// POST /api/forms
///
/// The form number is assigned by the repository from the current year's
/// counter; any `formNumber` in the body is ignored.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateForm>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let form_type = FormType::parse(&input.form_type)?;
    let status = FormStatus::parse_opt(input.status.as_deref())?.unwrap_or(FormStatus::DEFAULT);
    ensure_items_exist(&state.pool, &input.items).await?;

    let year = Utc::now().year();
    let form = FormRepo::create(&state.pool, &input, form_type, status, year).await?;

    tracing::info!(
        form_id = form.id,
        form_number = %form.form_number,
        project_id = form.project_id,
        items = input.items.len(),
        "Form created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(form, "Form created successfully")),
    ))
}

/// PUT /api/forms
///
/// When `items` is present the form's lines are replaced wholesale.
pub async fn update(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<UpdateForm>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let form_type = input.form_type.as_deref().map(FormType::parse).transpose()?;
    let status = FormStatus::parse_opt(input.status.as_deref())?;
    if let Some(items) = &input.items {
        ensure_items_exist(&state.pool, items).await?;
    }

    let form = FormRepo::update(&state.pool, input.id, &input, form_type, status)
        .await?
        .ok_or_else(|| not_found("Form", input.id))?;

    tracing::info!(form_id = form.id, status = %form.status, "Form updated");

    Ok(Json(DataResponse::with_message(form, "Form updated successfully")))
}

/// DELETE /api/forms?id=
pub async fn delete(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<IdParam>,
) -> AppResult<impl IntoResponse> {
    let id = params.require()?;
    let deleted = FormRepo::delete(&state.pool, id)
        .await
        .map_err(|e| AppError::from_delete(e, "form"))?;
    if !deleted {
        return Err(not_found("Form", id));
    }

    tracing::info!(form_id = id, "Form deleted");

    Ok(Json(MessageResponse::new("Form deleted successfully")))
}

/// GET /api/forms/document?id=
///
/// Page layout for printing: metadata on page one, continuation pages for
/// long forms, signatures under the last line.
pub async fn document(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<IdParam>,
) -> AppResult<impl IntoResponse> {
    let id = params.require()?;
    let detail = FormRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Form", id))?;

    let (header, lines) = detail.document_inputs();
    let document = build_form_document(&header, &lines);

    tracing::debug!(form_id = id, pages = document.pages.len(), "Form document built");

    Ok(Json(DataResponse::new(document)))
}

/// Reject lines pointing at supply items that do not exist.
async fn ensure_items_exist(pool: &DbPool, items: &[CreateFormItem]) -> AppResult<()> {
    let ids: Vec<_> = items
        .iter()
        .map(|i| i.supply_item_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let found = SupplyItemRepo::count_existing(pool, &ids).await?;
    if found != ids.len() as i64 {
        return Err(CoreError::Validation(
            "items: one or more supply items do not exist".to_string(),
        )
        .into());
    }
    Ok(())
}
