//! Repository for the `projects` table.
//!
//! Milestone changes run inside a transaction that locks the project row,
//! so concurrent edits cannot interleave between reading the current
//! milestone and writing the derived `progress`/`status` columns.

use sitedesk_core::milestone::{self, Milestone, Transition};
use sitedesk_core::pagination::PageRequest;
use sitedesk_core::project_status::ProjectStatus;
use sitedesk_core::types::DbId;
use sitedesk_core::validation::{normalize_search, trimmed, trimmed_opt};
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::client::Client;
use crate::models::form::FormSummary;
use crate::models::officer::Officer;
use crate::models::patch;
use crate::models::project::{
    CreateProject, Project, ProjectChange, ProjectDetail, ProjectListItem, UpdateProject,
};
use crate::repositories::{Dependents, MilestoneHistoryRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, location, client_id, officer_id, \
    start_date, end_date, budget, status, milestone, progress, created_at, updated_at";

/// Same columns qualified with the `p` alias for joins.
const P_COLUMNS: &str = "p.id, p.name, p.description, p.location, p.client_id, p.officer_id, \
    p.start_date, p.end_date, p.budget, p.status, p.milestone, p.progress, \
    p.created_at, p.updated_at";

/// List filters beyond the free-text search.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub search: Option<String>,
    pub status: Option<ProjectStatus>,
    pub client_id: Option<DbId>,
}

/// Milestone/status edits requested alongside an update, already parsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct MilestoneEdit<'a> {
    pub milestone: Option<Milestone>,
    pub status: Option<ProjectStatus>,
    pub note: Option<&'a str>,
}

/// Provides CRUD and milestone operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project.
    ///
    /// `milestone`, `progress` and `status` must come from
    /// [`milestone::initial_state`] so they agree from the first row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProject,
        milestone: Milestone,
        progress: i16,
        status: ProjectStatus,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (name, description, location, client_id, officer_id,
                 start_date, end_date, budget, status, milestone, progress)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(trimmed(&input.name))
            .bind(trimmed_opt(input.description.as_deref()))
            .bind(trimmed_opt(input.location.as_deref()))
            .bind(input.client_id)
            .bind(input.officer_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.budget)
            .bind(status.as_str())
            .bind(milestone.as_str())
            .bind(progress)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project with its client, officer, milestone history and forms.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectDetail>, sqlx::Error> {
        let Some(project) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let client = sqlx::query_as::<_, Client>(
            "SELECT id, name, email, phone, address, company, created_at, updated_at
             FROM clients WHERE id = $1",
        )
        .bind(project.client_id)
        .fetch_one(pool)
        .await?;

        let officer = match project.officer_id {
            Some(officer_id) => {
                sqlx::query_as::<_, Officer>(
                    "SELECT id, name, email, phone, position, created_at, updated_at
                     FROM officers WHERE id = $1",
                )
                .bind(officer_id)
                .fetch_optional(pool)
                .await?
            }
            None => None,
        };

        let milestone_history = MilestoneHistoryRepo::list_by_project(pool, id).await?;

        let forms = sqlx::query_as::<_, FormSummary>(
            "SELECT id, form_number, form_type, status, request_date
             FROM forms WHERE project_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        Ok(Some(ProjectDetail {
            project,
            client,
            officer,
            milestone_history,
            forms,
        }))
    }

    /// List projects with client/officer names, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &ProjectFilter,
        page: &PageRequest,
    ) -> Result<(Vec<ProjectListItem>, i64), sqlx::Error> {
        let pattern = normalize_search(filter.search.as_deref());
        let status = filter.status.map(ProjectStatus::as_str);
        let conditions = "($1::text IS NULL OR p.name ILIKE $1 OR p.location ILIKE $1 OR c.name ILIKE $1)
               AND ($2::text IS NULL OR p.status = $2)
               AND ($3::bigint IS NULL OR p.client_id = $3)";

        let query = format!(
            "SELECT {P_COLUMNS},
                c.name AS client_name,
                o.name AS officer_name,
                (SELECT COUNT(*) FROM forms f WHERE f.project_id = p.id) AS form_count
             FROM projects p
             JOIN clients c ON c.id = p.client_id
             LEFT JOIN officers o ON o.id = p.officer_id
             WHERE {conditions}
             ORDER BY p.created_at DESC, p.id DESC
             LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, ProjectListItem>(&query)
            .bind(&pattern)
            .bind(status)
            .bind(filter.client_id)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!(
            "SELECT COUNT(*) FROM projects p
             JOIN clients c ON c.id = p.client_id
             WHERE {conditions}"
        );
        let total: (i64,) = sqlx::query_as(&count_query)
            .bind(&pattern)
            .bind(status)
            .bind(filter.client_id)
            .fetch_one(pool)
            .await?;

        Ok((rows, total.0))
    }

    /// Update a project, moving its milestone if `edit.milestone` differs
    /// from the stored one.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
        edit: MilestoneEdit<'_>,
    ) -> Result<Option<ProjectChange>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(current) = Self::lock_milestone(&mut tx, id).await? else {
            return Ok(None);
        };
        let transition = resolve_transition(current, edit);

        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                location = CASE WHEN $5 THEN $6 ELSE location END,
                client_id = COALESCE($7, client_id),
                officer_id = CASE WHEN $8 THEN $9 ELSE officer_id END,
                start_date = CASE WHEN $10 THEN $11 ELSE start_date END,
                end_date = CASE WHEN $12 THEN $13 ELSE end_date END,
                budget = CASE WHEN $14 THEN $15 ELSE budget END,
                status = COALESCE($16, status),
                milestone = COALESCE($17, milestone),
                progress = COALESCE($18, progress)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let (milestone, progress) = advance_columns(&transition);
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(trimmed))
            .bind(patch::is_set(&input.description))
            .bind(patch::text(&input.description))
            .bind(patch::is_set(&input.location))
            .bind(patch::text(&input.location))
            .bind(input.client_id)
            .bind(patch::is_set(&input.officer_id))
            .bind(input.officer_id.flatten())
            .bind(patch::is_set(&input.start_date))
            .bind(input.start_date.flatten())
            .bind(patch::is_set(&input.end_date))
            .bind(input.end_date.flatten())
            .bind(patch::is_set(&input.budget))
            .bind(input.budget.flatten())
            .bind(transition.status().map(ProjectStatus::as_str))
            .bind(milestone)
            .bind(progress)
            .fetch_one(&mut *tx)
            .await?;

        Self::record_transition(&mut tx, id, &transition, edit.note).await?;
        tx.commit().await?;

        Ok(Some(ProjectChange {
            project,
            milestone_changed: transition.is_advance(),
        }))
    }

    /// Apply a milestone change on its own (`PATCH /projects/milestone`).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn change_milestone(
        pool: &PgPool,
        id: DbId,
        next: Milestone,
        status: Option<ProjectStatus>,
        note: Option<&str>,
    ) -> Result<Option<ProjectChange>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(current) = Self::lock_milestone(&mut tx, id).await? else {
            return Ok(None);
        };
        let transition = milestone::plan_transition(current, next, status);
        let (milestone, progress) = advance_columns(&transition);

        let query = format!(
            "UPDATE projects SET
                status = COALESCE($2, status),
                milestone = COALESCE($3, milestone),
                progress = COALESCE($4, progress)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(transition.status().map(ProjectStatus::as_str))
            .bind(milestone)
            .bind(progress)
            .fetch_one(&mut *tx)
            .await?;

        Self::record_transition(&mut tx, id, &transition, note).await?;
        tx.commit().await?;

        if let Transition::Advance { previous, next, progress, .. } = transition {
            tracing::debug!(
                project_id = id,
                from = %previous,
                to = %next,
                progress,
                "Milestone moved"
            );
        }

        Ok(Some(ProjectChange {
            project,
            milestone_changed: transition.is_advance(),
        }))
    }

    /// Read and row-lock the stored milestone.
    async fn lock_milestone(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<Milestone>, sqlx::Error> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT milestone FROM projects WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut **tx)
                .await?;
        row.map(|(code,)| Milestone::parse(&code).map_err(|e| sqlx::Error::Decode(Box::new(e))))
            .transpose()
    }

    /// Append a history row when the transition moved the milestone.
    async fn record_transition(
        tx: &mut Transaction<'_, Postgres>,
        project_id: DbId,
        transition: &Transition,
        note: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        if let Transition::Advance {
            previous,
            next,
            progress,
            ..
        } = *transition
        {
            MilestoneHistoryRepo::insert(
                &mut **tx,
                project_id,
                previous,
                next,
                progress,
                trimmed_opt(note).as_deref(),
            )
            .await?;
        }
        Ok(())
    }

    /// Tables still pointing at this project. History rows cascade and are
    /// not counted.
    pub async fn count_dependents(pool: &PgPool, id: DbId) -> Result<Dependents, sqlx::Error> {
        let (forms,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM forms WHERE project_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(vec![("form", forms)])
    }

    /// Delete a project (milestone history cascades). Returns `true` if a
    /// row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Plan what an update does to the milestone columns.
fn resolve_transition(current: Milestone, edit: MilestoneEdit<'_>) -> Transition {
    match edit.milestone {
        Some(next) => milestone::plan_transition(current, next, edit.status),
        None => Transition::Unchanged {
            status: milestone::derive_status(current, edit.status),
        },
    }
}

/// `(milestone, progress)` to write; both `None` when nothing moves.
fn advance_columns(transition: &Transition) -> (Option<&'static str>, Option<i16>) {
    match *transition {
        Transition::Advance { next, progress, .. } => (Some(next.as_str()), Some(progress)),
        Transition::Unchanged { .. } => (None, None),
    }
}
