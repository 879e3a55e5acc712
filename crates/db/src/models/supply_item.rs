//! Supply item (catalogue entry) model and DTOs.

use serde::{Deserialize, Serialize};
use sitedesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

use crate::models::patch::{nullable, Nullable};

/// A row from the `supply_items` table. `unit_price` is in whole rupiah.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyItem {
    pub id: DbId,
    pub name: String,
    pub unit: String,
    pub category: Option<String>,
    pub unit_price: Option<i64>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyItemDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub item: SupplyItem,
    /// Number of form lines that request this item.
    pub usage_count: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplyItem {
    #[validate(custom(function = "sitedesk_core::validation::not_blank"))]
    pub name: String,
    #[validate(custom(function = "sitedesk_core::validation::not_blank"))]
    pub unit: String,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub unit_price: Option<i64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSupplyItem {
    pub id: DbId,
    #[validate(custom(function = "sitedesk_core::validation::not_blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "sitedesk_core::validation::not_blank"))]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub category: Nullable<String>,
    #[validate(range(min = 0, message = "must not be negative"))]
    #[serde(default, deserialize_with = "nullable")]
    pub unit_price: Nullable<i64>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Nullable<String>,
}
