//! Milestone history (audit trail of milestone moves).

use serde::Serialize;
use sitedesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `milestone_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneHistory {
    pub id: DbId,
    pub project_id: DbId,
    pub previous_milestone: String,
    pub new_milestone: String,
    pub progress: i16,
    pub note: Option<String>,
    pub changed_at: Timestamp,
}
