//! Vendor (supplier) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sitedesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

use crate::models::patch::{nullable, Nullable};

/// A row from the `vendors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: DbId,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub vendor: Vendor,
    pub form_count: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVendor {
    #[validate(custom(function = "sitedesk_core::validation::not_blank"))]
    pub name: String,
    pub contact_person: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVendor {
    pub id: DbId,
    #[validate(custom(function = "sitedesk_core::validation::not_blank"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub contact_person: Nullable<String>,
    #[validate(email(message = "must be a valid email address"))]
    #[serde(default, deserialize_with = "nullable")]
    pub email: Nullable<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: Nullable<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub address: Nullable<String>,
}
