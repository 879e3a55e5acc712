//! Read-only aggregates for the dashboard.

use sqlx::PgPool;

use crate::models::dashboard::{DashboardSummary, ResourceCounts, StatusCount};

pub struct DashboardRepo;

impl DashboardRepo {
    /// Collect counts and progress figures. `forms_this_year` counts forms
    /// created during UTC calendar `year`, the same year that numbers them,
    /// whatever the session time zone.
    pub async fn summary(pool: &PgPool, year: i32) -> Result<DashboardSummary, sqlx::Error> {
        let counts = sqlx::query_as::<_, ResourceCounts>(
            "SELECT
                (SELECT COUNT(*) FROM clients) AS clients,
                (SELECT COUNT(*) FROM officers) AS officers,
                (SELECT COUNT(*) FROM vendors) AS vendors,
                (SELECT COUNT(*) FROM supply_items) AS supply_items,
                (SELECT COUNT(*) FROM projects) AS projects,
                (SELECT COUNT(*) FROM forms) AS forms",
        )
        .fetch_one(pool)
        .await?;

        let projects_by_status = sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM projects GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await?;

        let forms_by_status = sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM forms GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await?;

        let (average_progress,): (f64,) = sqlx::query_as(
            "SELECT COALESCE(AVG(progress), 0)::float8 FROM projects WHERE status <> 'CANCELLED'",
        )
        .fetch_one(pool)
        .await?;

        let (forms_this_year,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM forms
             WHERE created_at >= make_timestamptz($1, 1, 1, 0, 0, 0, 'UTC')
               AND created_at < make_timestamptz($1 + 1, 1, 1, 0, 0, 0, 'UTC')",
        )
        .bind(year)
        .fetch_one(pool)
        .await?;

        Ok(DashboardSummary {
            counts,
            projects_by_status,
            forms_by_status,
            average_progress,
            forms_this_year,
        })
    }
}
