//! Repository for the `forms` and `form_items` tables.
//!
//! Form numbers come from `form_number_sequences`: the per-year counter is
//! bumped with an upsert inside the same transaction as the form insert, so
//! two concurrent creations never see the same sequence value and a failed
//! insert gives its number back.

use sitedesk_core::form_number::format_form_number;
use sitedesk_core::forms::{FormStatus, FormType};
use sitedesk_core::pagination::PageRequest;
use sitedesk_core::types::DbId;
use sitedesk_core::validation::{normalize_search, trimmed_opt};
use sqlx::{PgConnection, PgPool};

use crate::models::form::{
    CreateForm, CreateFormItem, Form, FormDetail, FormHeader, FormItemDetail, FormListItem,
    UpdateForm,
};
use crate::models::patch;

const COLUMNS: &str = "id, form_number, project_id, officer_id, vendor_id, form_type, status, \
    request_date, notes, created_at, updated_at";

const F_COLUMNS: &str = "f.id, f.form_number, f.project_id, f.officer_id, f.vendor_id, \
    f.form_type, f.status, f.request_date, f.notes, f.created_at, f.updated_at";

/// List filters beyond the free-text search.
#[derive(Debug, Clone, Default)]
pub struct FormFilter {
    pub search: Option<String>,
    pub project_id: Option<DbId>,
    pub status: Option<FormStatus>,
}

/// Provides CRUD operations for request forms and their lines.
pub struct FormRepo;

impl FormRepo {
    /// Insert a form and its lines, assigning the next number for `year`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateForm,
        form_type: FormType,
        status: FormStatus,
        year: i32,
    ) -> Result<Form, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let sequence = Self::next_sequence(&mut tx, year).await?;
        let form_number = format_form_number(year, sequence);

        let query = format!(
            "INSERT INTO forms
                (form_number, project_id, officer_id, vendor_id, form_type, status,
                 request_date, notes)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, CURRENT_DATE), $8)
             RETURNING {COLUMNS}"
        );
        let form = sqlx::query_as::<_, Form>(&query)
            .bind(&form_number)
            .bind(input.project_id)
            .bind(input.officer_id)
            .bind(input.vendor_id)
            .bind(form_type.as_str())
            .bind(status.as_str())
            .bind(input.request_date)
            .bind(trimmed_opt(input.notes.as_deref()))
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_items(&mut tx, form.id, &input.items).await?;
        tx.commit().await?;

        Ok(form)
    }

    /// Bump and return the counter for `year`; the first call in a year
    /// returns 1. Holds the counter row lock until the caller commits.
    async fn next_sequence(conn: &mut PgConnection, year: i32) -> Result<i32, sqlx::Error> {
        let (value,): (i32,) = sqlx::query_as(
            "INSERT INTO form_number_sequences (year, last_value) VALUES ($1, 1)
             ON CONFLICT (year) DO UPDATE
                SET last_value = form_number_sequences.last_value + 1
             RETURNING last_value",
        )
        .bind(year)
        .fetch_one(conn)
        .await?;
        Ok(value)
    }

    async fn insert_items(
        conn: &mut PgConnection,
        form_id: DbId,
        items: &[CreateFormItem],
    ) -> Result<(), sqlx::Error> {
        for (idx, item) in items.iter().enumerate() {
            sqlx::query(
                "INSERT INTO form_items (form_id, supply_item_id, position, quantity, notes)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(form_id)
            .bind(item.supply_item_id)
            .bind(idx as i32 + 1)
            .bind(item.quantity)
            .bind(trimmed_opt(item.notes.as_deref()))
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Form>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM forms WHERE id = $1");
        sqlx::query_as::<_, Form>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Form columns plus the project, officer and vendor it references.
    pub async fn find_header(pool: &PgPool, id: DbId) -> Result<Option<FormHeader>, sqlx::Error> {
        let query = format!(
            "SELECT {F_COLUMNS},
                p.name AS project_name,
                p.location AS project_location,
                o.name AS officer_name,
                v.name AS vendor_name
             FROM forms f
             JOIN projects p ON p.id = f.project_id
             JOIN officers o ON o.id = f.officer_id
             LEFT JOIN vendors v ON v.id = f.vendor_id
             WHERE f.id = $1"
        );
        sqlx::query_as::<_, FormHeader>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lines of a form in entry order.
    pub async fn list_items(pool: &PgPool, form_id: DbId) -> Result<Vec<FormItemDetail>, sqlx::Error> {
        sqlx::query_as::<_, FormItemDetail>(
            "SELECT fi.id, fi.supply_item_id, fi.position, s.name AS item_name, s.unit,
                    fi.quantity, fi.notes
             FROM form_items fi
             JOIN supply_items s ON s.id = fi.supply_item_id
             WHERE fi.form_id = $1
             ORDER BY fi.position, fi.id",
        )
        .bind(form_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<FormDetail>, sqlx::Error> {
        let Some(header) = Self::find_header(pool, id).await? else {
            return Ok(None);
        };
        let items = Self::list_items(pool, id).await?;
        Ok(Some(FormDetail { header, items }))
    }

    /// List forms with their references resolved, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &FormFilter,
        page: &PageRequest,
    ) -> Result<(Vec<FormListItem>, i64), sqlx::Error> {
        let pattern = normalize_search(filter.search.as_deref());
        let status = filter.status.map(FormStatus::as_str);
        let conditions = "($1::text IS NULL OR f.form_number ILIKE $1 OR p.name ILIKE $1 OR f.notes ILIKE $1)
               AND ($2::bigint IS NULL OR f.project_id = $2)
               AND ($3::text IS NULL OR f.status = $3)";

        let query = format!(
            "SELECT {F_COLUMNS},
                p.name AS project_name,
                o.name AS officer_name,
                v.name AS vendor_name,
                (SELECT COUNT(*) FROM form_items fi WHERE fi.form_id = f.id) AS item_count
             FROM forms f
             JOIN projects p ON p.id = f.project_id
             JOIN officers o ON o.id = f.officer_id
             LEFT JOIN vendors v ON v.id = f.vendor_id
             WHERE {conditions}
             ORDER BY f.created_at DESC, f.id DESC
             LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, FormListItem>(&query)
            .bind(&pattern)
            .bind(filter.project_id)
            .bind(status)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!(
            "SELECT COUNT(*) FROM forms f
             JOIN projects p ON p.id = f.project_id
             WHERE {conditions}"
        );
        let total: (i64,) = sqlx::query_as(&count_query)
            .bind(&pattern)
            .bind(filter.project_id)
            .bind(status)
            .fetch_one(pool)
            .await?;

        Ok((rows, total.0))
    }

    /// Update a form. When `input.items` is present every line is replaced.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateForm,
        form_type: Option<FormType>,
        status: Option<FormStatus>,
    ) -> Result<Option<Form>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE forms SET
                project_id = COALESCE($2, project_id),
                officer_id = COALESCE($3, officer_id),
                vendor_id = CASE WHEN $4 THEN $5 ELSE vendor_id END,
                form_type = COALESCE($6, form_type),
                status = COALESCE($7, status),
                request_date = COALESCE($8, request_date),
                notes = CASE WHEN $9 THEN $10 ELSE notes END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let form = sqlx::query_as::<_, Form>(&query)
            .bind(id)
            .bind(input.project_id)
            .bind(input.officer_id)
            .bind(patch::is_set(&input.vendor_id))
            .bind(input.vendor_id.flatten())
            .bind(form_type.map(FormType::as_str))
            .bind(status.map(FormStatus::as_str))
            .bind(input.request_date)
            .bind(patch::is_set(&input.notes))
            .bind(patch::text(&input.notes))
            .fetch_optional(&mut *tx)
            .await?;

        let Some(form) = form else {
            return Ok(None);
        };

        if let Some(items) = &input.items {
            sqlx::query("DELETE FROM form_items WHERE form_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::insert_items(&mut tx, id, items).await?;
        }

        tx.commit().await?;
        Ok(Some(form))
    }

    /// Delete a form; its lines cascade. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM forms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
