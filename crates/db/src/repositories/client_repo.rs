//! Repository for the `clients` table.

use sitedesk_core::pagination::PageRequest;
use sitedesk_core::types::DbId;
use sitedesk_core::validation::{normalize_search, trimmed, trimmed_opt};
use sqlx::PgPool;

use crate::models::client::{Client, ClientDetail, CreateClient, UpdateClient};
use crate::models::patch;
use crate::models::project::ProjectSummary;
use crate::repositories::Dependents;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone, address, company, created_at, updated_at";

/// Search filter: name, email or company.
const SEARCH: &str =
    "($1::text IS NULL OR name ILIKE $1 OR email ILIKE $1 OR company ILIKE $1)";

/// Provides CRUD operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateClient) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (name, email, phone, address, company)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(trimmed(&input.name))
            .bind(trimmed(&input.email))
            .bind(trimmed_opt(input.phone.as_deref()))
            .bind(trimmed_opt(input.address.as_deref()))
            .bind(trimmed_opt(input.company.as_deref()))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a client with its projects, newest first.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<ClientDetail>, sqlx::Error> {
        let Some(client) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let projects = sqlx::query_as::<_, ProjectSummary>(
            "SELECT id, name, status, milestone, progress FROM projects
             WHERE client_id = $1 ORDER BY created_at DESC",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;
        Ok(Some(ClientDetail { client, projects }))
    }

    /// List clients, newest first, returning the page and the total match count.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<(Vec<Client>, i64), sqlx::Error> {
        let pattern = normalize_search(search);

        let query = format!(
            "SELECT {COLUMNS} FROM clients WHERE {SEARCH}
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, Client>(&query)
            .bind(&pattern)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM clients WHERE {SEARCH}");
        let total: (i64,) = sqlx::query_as(&count_query)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

        Ok((rows, total.0))
    }

    /// Update a client. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClient,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = CASE WHEN $4 THEN $5 ELSE phone END,
                address = CASE WHEN $6 THEN $7 ELSE address END,
                company = CASE WHEN $8 THEN $9 ELSE company END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(trimmed))
            .bind(input.email.as_deref().map(trimmed))
            .bind(patch::is_set(&input.phone))
            .bind(patch::text(&input.phone))
            .bind(patch::is_set(&input.address))
            .bind(patch::text(&input.address))
            .bind(patch::is_set(&input.company))
            .bind(patch::text(&input.company))
            .fetch_optional(pool)
            .await
    }

    /// Tables still pointing at this client.
    pub async fn count_dependents(pool: &PgPool, id: DbId) -> Result<Dependents, sqlx::Error> {
        let (projects,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM projects WHERE client_id = $1")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(vec![("project", projects)])
    }

    /// Delete a client. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
