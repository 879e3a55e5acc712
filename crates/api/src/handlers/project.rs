//! Handlers for the `/projects` resource and its milestone endpoints.
//!
//! Milestone codes and statuses are parsed here, before any write, so an
//! unknown code is a 400 and never reaches the repository.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sitedesk_core::milestone::{self, Milestone, MILESTONE_TABLE};
use sitedesk_core::project_status::ProjectStatus;
use sitedesk_core::validation::validate_input;
use sitedesk_db::models::project::{ChangeMilestone, CreateProject, ProjectChange, UpdateProject};
use sitedesk_db::repositories::{MilestoneEdit, MilestoneHistoryRepo, ProjectFilter, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::handlers::{ensure_deletable, not_found};
use crate::query::{IdParam, ProjectListParams};
use crate::response::{DataResponse, ListResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/projects
///
/// With `?id=` returns the project with its client, officer, milestone
/// history and forms. Otherwise lists projects filtered by `?search=`,
/// `?status=` and `?clientId=`.
pub async fn get(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ProjectListParams>,
) -> AppResult<Response> {
    if let Some(id) = params.id {
        let project = ProjectRepo::find_detail(&state.pool, id)
            .await?
            .ok_or_else(|| not_found("Project", id))?;
        return Ok(Json(DataResponse::new(project)).into_response());
    }

    let filter = ProjectFilter {
        search: params.search,
        status: ProjectStatus::parse_opt(params.status.as_deref())?,
        client_id: params.client_id,
    };
    let page = state.page_request(params.page, params.limit);
    let (projects, total) = ProjectRepo::list(&state.pool, &filter, &page).await?;
    Ok(Json(ListResponse::new(projects, page.meta(total))).into_response())
}

/// POST /api/projects
///
/// `progress` is never taken from the body; it follows the milestone.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateProject>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let requested_status = ProjectStatus::parse_opt(input.status.as_deref())?;
    let (milestone, progress, status) =
        milestone::initial_state(input.milestone.as_deref(), requested_status)?;

    let project = ProjectRepo::create(&state.pool, &input, milestone, progress, status).await?;

    tracing::info!(
        project_id = project.id,
        client_id = project.client_id,
        milestone = %milestone,
        "Project created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(project, "Project created successfully")),
    ))
}

/// PUT /api/projects
pub async fn update(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<UpdateProject>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let edit = MilestoneEdit {
        milestone: input.milestone.as_deref().map(Milestone::parse).transpose()?,
        status: ProjectStatus::parse_opt(input.status.as_deref())?,
        note: input.milestone_note.as_deref(),
    };

    let change = ProjectRepo::update(&state.pool, input.id, &input, edit)
        .await?
        .ok_or_else(|| not_found("Project", input.id))?;

    tracing::info!(
        project_id = input.id,
        milestone_changed = change.milestone_changed,
        "Project updated",
    );

    let message = if change.milestone_changed {
        format!("Project updated; milestone moved to {}", change.project.milestone)
    } else {
        "Project updated successfully".to_string()
    };
    Ok(Json(DataResponse::with_message(change.project, message)))
}

/// DELETE /api/projects?id=
///
/// Refused while forms reference the project. Milestone history goes with it.
pub async fn delete(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<IdParam>,
) -> AppResult<impl IntoResponse> {
    let id = params.require()?;
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Project", id))?;

    let dependents = ProjectRepo::count_dependents(&state.pool, id).await?;
    ensure_deletable("project", &dependents)?;

    let deleted = ProjectRepo::delete(&state.pool, id)
        .await
        .map_err(|e| AppError::from_delete(e, "project"))?;
    if !deleted {
        return Err(not_found("Project", id));
    }

    tracing::info!(project_id = id, "Project deleted");

    Ok(Json(MessageResponse::new("Project deleted successfully")))
}

/// PATCH /api/projects/milestone
///
/// Move a project to another milestone. Progress and status are derived;
/// asking for the current milestone is a no-op apart from `status`.
pub async fn change_milestone(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ChangeMilestone>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let next = Milestone::parse(&input.milestone)?;
    let status = ProjectStatus::parse_opt(input.status.as_deref())?;

    let ProjectChange {
        project,
        milestone_changed,
    } = ProjectRepo::change_milestone(&state.pool, input.id, next, status, input.note.as_deref())
        .await?
        .ok_or_else(|| not_found("Project", input.id))?;

    let message = if milestone_changed {
        tracing::info!(
            project_id = project.id,
            milestone = %next,
            progress = project.progress,
            "Project milestone changed",
        );
        format!("Milestone changed to {}", next.label())
    } else {
        format!("Milestone is already {}", next.label())
    };

    Ok(Json(DataResponse::with_message(project, message)))
}

/// GET /api/projects/milestones?id=
///
/// Milestone history for one project, newest first.
pub async fn milestone_history(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<IdParam>,
) -> AppResult<impl IntoResponse> {
    let id = params.require()?;
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Project", id))?;

    let history = MilestoneHistoryRepo::list_by_project(&state.pool, id).await?;
    Ok(Json(DataResponse::new(history)))
}

/// GET /api/projects/milestone-table
pub async fn milestone_table() -> impl IntoResponse {
    Json(DataResponse::new(MILESTONE_TABLE))
}
