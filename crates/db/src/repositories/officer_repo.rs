//! Repository for the `officers` table.

use sitedesk_core::pagination::PageRequest;
use sitedesk_core::types::DbId;
use sitedesk_core::validation::{normalize_search, trimmed, trimmed_opt};
use sqlx::PgPool;

use crate::models::officer::{CreateOfficer, Officer, OfficerDetail, UpdateOfficer};
use crate::models::patch;
use crate::repositories::Dependents;

const COLUMNS: &str = "id, name, email, phone, position, created_at, updated_at";

const SEARCH: &str =
    "($1::text IS NULL OR name ILIKE $1 OR email ILIKE $1 OR position ILIKE $1)";

/// Provides CRUD operations for officers.
pub struct OfficerRepo;

impl OfficerRepo {
    pub async fn create(pool: &PgPool, input: &CreateOfficer) -> Result<Officer, sqlx::Error> {
        let query = format!(
            "INSERT INTO officers (name, email, phone, position)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Officer>(&query)
            .bind(trimmed(&input.name))
            .bind(trimmed(&input.email))
            .bind(trimmed_opt(input.phone.as_deref()))
            .bind(trimmed_opt(input.position.as_deref()))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Officer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM officers WHERE id = $1");
        sqlx::query_as::<_, Officer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an officer with project and form counts.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OfficerDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS},
                (SELECT COUNT(*) FROM projects p WHERE p.officer_id = o.id) AS project_count,
                (SELECT COUNT(*) FROM forms f WHERE f.officer_id = o.id) AS form_count
             FROM officers o WHERE o.id = $1"
        );
        sqlx::query_as::<_, OfficerDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<(Vec<Officer>, i64), sqlx::Error> {
        let pattern = normalize_search(search);

        let query = format!(
            "SELECT {COLUMNS} FROM officers WHERE {SEARCH}
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, Officer>(&query)
            .bind(&pattern)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM officers WHERE {SEARCH}");
        let total: (i64,) = sqlx::query_as(&count_query)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

        Ok((rows, total.0))
    }

    /// Update an officer. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOfficer,
    ) -> Result<Option<Officer>, sqlx::Error> {
        let query = format!(
            "UPDATE officers SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = CASE WHEN $4 THEN $5 ELSE phone END,
                position = CASE WHEN $6 THEN $7 ELSE position END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Officer>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(trimmed))
            .bind(input.email.as_deref().map(trimmed))
            .bind(patch::is_set(&input.phone))
            .bind(patch::text(&input.phone))
            .bind(patch::is_set(&input.position))
            .bind(patch::text(&input.position))
            .fetch_optional(pool)
            .await
    }

    /// Tables still pointing at this officer.
    pub async fn count_dependents(pool: &PgPool, id: DbId) -> Result<Dependents, sqlx::Error> {
        let (forms, projects): (i64, i64) = sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM forms WHERE officer_id = $1),
                (SELECT COUNT(*) FROM projects WHERE officer_id = $1)",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(vec![("form", forms), ("project", projects)])
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM officers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
