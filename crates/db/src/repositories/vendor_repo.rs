//! Repository for the `vendors` table.

use sitedesk_core::pagination::PageRequest;
use sitedesk_core::types::DbId;
use sitedesk_core::validation::{normalize_search, trimmed, trimmed_opt};
use sqlx::PgPool;

use crate::models::patch;
use crate::models::vendor::{CreateVendor, UpdateVendor, Vendor, VendorDetail};
use crate::repositories::Dependents;

const COLUMNS: &str =
    "id, name, contact_person, email, phone, address, created_at, updated_at";

const SEARCH: &str =
    "($1::text IS NULL OR name ILIKE $1 OR contact_person ILIKE $1 OR email ILIKE $1)";

/// Provides CRUD operations for vendors.
pub struct VendorRepo;

impl VendorRepo {
    pub async fn create(pool: &PgPool, input: &CreateVendor) -> Result<Vendor, sqlx::Error> {
        let query = format!(
            "INSERT INTO vendors (name, contact_person, email, phone, address)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vendor>(&query)
            .bind(trimmed(&input.name))
            .bind(trimmed_opt(input.contact_person.as_deref()))
            .bind(trimmed_opt(input.email.as_deref()))
            .bind(trimmed_opt(input.phone.as_deref()))
            .bind(trimmed_opt(input.address.as_deref()))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vendor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vendors WHERE id = $1");
        sqlx::query_as::<_, Vendor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<VendorDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS},
                (SELECT COUNT(*) FROM forms f WHERE f.vendor_id = v.id) AS form_count
             FROM vendors v WHERE v.id = $1"
        );
        sqlx::query_as::<_, VendorDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<(Vec<Vendor>, i64), sqlx::Error> {
        let pattern = normalize_search(search);

        let query = format!(
            "SELECT {COLUMNS} FROM vendors WHERE {SEARCH}
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, Vendor>(&query)
            .bind(&pattern)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM vendors WHERE {SEARCH}");
        let total: (i64,) = sqlx::query_as(&count_query)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

        Ok((rows, total.0))
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVendor,
    ) -> Result<Option<Vendor>, sqlx::Error> {
        let query = format!(
            "UPDATE vendors SET
                name = COALESCE($2, name),
                contact_person = CASE WHEN $3 THEN $4 ELSE contact_person END,
                email = CASE WHEN $5 THEN $6 ELSE email END,
                phone = CASE WHEN $7 THEN $8 ELSE phone END,
                address = CASE WHEN $9 THEN $10 ELSE address END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vendor>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(trimmed))
            .bind(patch::is_set(&input.contact_person))
            .bind(patch::text(&input.contact_person))
            .bind(patch::is_set(&input.email))
            .bind(patch::text(&input.email))
            .bind(patch::is_set(&input.phone))
            .bind(patch::text(&input.phone))
            .bind(patch::is_set(&input.address))
            .bind(patch::text(&input.address))
            .fetch_optional(pool)
            .await
    }

    pub async fn count_dependents(pool: &PgPool, id: DbId) -> Result<Dependents, sqlx::Error> {
        let (forms,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM forms WHERE vendor_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(vec![("form", forms)])
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vendors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
