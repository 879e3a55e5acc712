//! Repository for the `milestone_history` table.

use sitedesk_core::milestone::Milestone;
use sitedesk_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::milestone_history::MilestoneHistory;

const COLUMNS: &str =
    "id, project_id, previous_milestone, new_milestone, progress, note, changed_at";

/// Append-only access to milestone history.
pub struct MilestoneHistoryRepo;

impl MilestoneHistoryRepo {
    /// Record a milestone move. Runs on the caller's connection so it joins
    /// the transaction that changed the project.
    pub async fn insert(
        conn: &mut PgConnection,
        project_id: DbId,
        previous: Milestone,
        next: Milestone,
        progress: i16,
        note: Option<&str>,
    ) -> Result<MilestoneHistory, sqlx::Error> {
        let query = format!(
            "INSERT INTO milestone_history
                (project_id, previous_milestone, new_milestone, progress, note)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MilestoneHistory>(&query)
            .bind(project_id)
            .bind(previous.as_str())
            .bind(next.as_str())
            .bind(progress)
            .bind(note)
            .fetch_one(conn)
            .await
    }

    /// History for one project, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<MilestoneHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM milestone_history
             WHERE project_id = $1
             ORDER BY changed_at DESC, id DESC"
        );
        sqlx::query_as::<_, MilestoneHistory>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
