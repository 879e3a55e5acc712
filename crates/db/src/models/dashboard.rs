//! Dashboard summary models.

use serde::Serialize;
use sqlx::FromRow;

/// Row counts per resource.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCounts {
    pub clients: i64,
    pub officers: i64,
    pub vendors: i64,
    pub supply_items: i64,
    pub projects: i64,
    pub forms: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub counts: ResourceCounts,
    pub projects_by_status: Vec<StatusCount>,
    pub forms_by_status: Vec<StatusCount>,
    /// Mean progress over projects that are not cancelled; 0 when none.
    pub average_progress: f64,
    pub forms_this_year: i64,
}
