//! Repository for the `supply_items` table.

use sitedesk_core::pagination::PageRequest;
use sitedesk_core::types::DbId;
use sitedesk_core::validation::{normalize_search, trimmed, trimmed_opt};
use sqlx::PgPool;

use crate::models::patch;
use crate::models::supply_item::{
    CreateSupplyItem, SupplyItem, SupplyItemDetail, UpdateSupplyItem,
};
use crate::repositories::Dependents;

const COLUMNS: &str =
    "id, name, unit, category, unit_price, description, created_at, updated_at";

const SEARCH: &str = "($1::text IS NULL OR name ILIKE $1 OR category ILIKE $1)";

/// Provides CRUD operations for supply items.
pub struct SupplyItemRepo;

impl SupplyItemRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateSupplyItem,
    ) -> Result<SupplyItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO supply_items (name, unit, category, unit_price, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SupplyItem>(&query)
            .bind(trimmed(&input.name))
            .bind(trimmed(&input.unit))
            .bind(trimmed_opt(input.category.as_deref()))
            .bind(input.unit_price)
            .bind(trimmed_opt(input.description.as_deref()))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SupplyItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM supply_items WHERE id = $1");
        sqlx::query_as::<_, SupplyItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SupplyItemDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS},
                (SELECT COUNT(*) FROM form_items fi WHERE fi.supply_item_id = s.id) AS usage_count
             FROM supply_items s WHERE s.id = $1"
        );
        sqlx::query_as::<_, SupplyItemDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List supply items, newest first like every other resource list.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<(Vec<SupplyItem>, i64), sqlx::Error> {
        let pattern = normalize_search(search);

        let query = format!(
            "SELECT {COLUMNS} FROM supply_items WHERE {SEARCH}
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, SupplyItem>(&query)
            .bind(&pattern)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM supply_items WHERE {SEARCH}");
        let total: (i64,) = sqlx::query_as(&count_query)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

        Ok((rows, total.0))
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSupplyItem,
    ) -> Result<Option<SupplyItem>, sqlx::Error> {
        let query = format!(
            "UPDATE supply_items SET
                name = COALESCE($2, name),
                unit = COALESCE($3, unit),
                category = CASE WHEN $4 THEN $5 ELSE category END,
                unit_price = CASE WHEN $6 THEN $7 ELSE unit_price END,
                description = CASE WHEN $8 THEN $9 ELSE description END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SupplyItem>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(trimmed))
            .bind(input.unit.as_deref().map(trimmed))
            .bind(patch::is_set(&input.category))
            .bind(patch::text(&input.category))
            .bind(patch::is_set(&input.unit_price))
            .bind(input.unit_price.flatten())
            .bind(patch::is_set(&input.description))
            .bind(patch::text(&input.description))
            .fetch_optional(pool)
            .await
    }

    /// Count how many of `ids` exist. Used to reject form lines that point
    /// at unknown items before opening a transaction.
    pub async fn count_existing(pool: &PgPool, ids: &[DbId]) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(DISTINCT id) FROM supply_items WHERE id = ANY($1)")
                .bind(ids)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    pub async fn count_dependents(pool: &PgPool, id: DbId) -> Result<Dependents, sqlx::Error> {
        let (lines,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM form_items WHERE supply_item_id = $1")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(vec![("form item", lines)])
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM supply_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
