//! Project entity model and DTOs.
//!
//! `progress` is never accepted from clients: it is derived from
//! `milestone` by `sitedesk_core::milestone`.

use serde::{Deserialize, Serialize};
use sitedesk_core::types::{Date, DbId, Timestamp};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::models::client::Client;
use crate::models::form::FormSummary;
use crate::models::milestone_history::MilestoneHistory;
use crate::models::officer::Officer;
use crate::models::patch::{nullable, Nullable};

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub client_id: DbId,
    pub officer_id: Option<DbId>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub budget: Option<i64>,
    pub status: String,
    pub milestone: String,
    pub progress: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// List row: a project with the names of its client and officer.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListItem {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub project: Project,
    pub client_name: String,
    pub officer_name: Option<String>,
    pub form_count: i64,
}

/// Compact project reference embedded in client detail.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: DbId,
    pub name: String,
    pub status: String,
    pub milestone: String,
    pub progress: i16,
}

/// A project with all of its relations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub client: Client,
    pub officer: Option<Officer>,
    pub milestone_history: Vec<MilestoneHistory>,
    pub forms: Vec<FormSummary>,
}

/// Result of an update that may have moved the milestone.
#[derive(Debug, Clone)]
pub struct ProjectChange {
    pub project: Project,
    pub milestone_changed: bool,
}

fn check_date_range(start: Option<Date>, end: Option<Date>) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => {
            let mut err = ValidationError::new("date_range");
            err.message = Some("endDate must not be before startDate".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

fn validate_create_dates(input: &CreateProject) -> Result<(), ValidationError> {
    check_date_range(input.start_date, input.end_date)
}

fn validate_update_dates(input: &UpdateProject) -> Result<(), ValidationError> {
    check_date_range(input.start_date.flatten(), input.end_date.flatten())
}

/// DTO for creating a project. `milestone` defaults to the first milestone.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_dates"))]
pub struct CreateProject {
    #[validate(custom(function = "sitedesk_core::validation::not_blank"))]
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub client_id: DbId,
    pub officer_id: Option<DbId>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub budget: Option<i64>,
    pub status: Option<String>,
    pub milestone: Option<String>,
}

/// DTO for updating a project. A `milestone` that differs from the stored
/// one moves the project through the milestone state machine.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_dates"))]
pub struct UpdateProject {
    pub id: DbId,
    #[validate(custom(function = "sitedesk_core::validation::not_blank"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Nullable<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub location: Nullable<String>,
    pub client_id: Option<DbId>,
    #[serde(default, deserialize_with = "nullable")]
    pub officer_id: Nullable<DbId>,
    #[serde(default, deserialize_with = "nullable")]
    pub start_date: Nullable<Date>,
    #[serde(default, deserialize_with = "nullable")]
    pub end_date: Nullable<Date>,
    #[validate(range(min = 0, message = "must not be negative"))]
    #[serde(default, deserialize_with = "nullable")]
    pub budget: Nullable<i64>,
    pub status: Option<String>,
    pub milestone: Option<String>,
    /// Recorded on the history row when the milestone moves.
    pub milestone_note: Option<String>,
}

/// Body of `PATCH /api/projects/milestone`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangeMilestone {
    pub id: DbId,
    #[validate(custom(function = "sitedesk_core::validation::not_blank"))]
    pub milestone: String,
    pub status: Option<String>,
    pub note: Option<String>,
}
