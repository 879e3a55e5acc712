//! Officer (site/procurement staff) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sitedesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

use crate::models::patch::{nullable, Nullable};

/// A row from the `officers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Officer {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An officer with how many projects and forms reference them.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficerDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub officer: Officer,
    pub project_count: i64,
    pub form_count: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfficer {
    #[validate(custom(function = "sitedesk_core::validation::not_blank"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub phone: Option<String>,
    pub position: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOfficer {
    pub id: DbId,
    #[validate(custom(function = "sitedesk_core::validation::not_blank"))]
    pub name: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: Nullable<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub position: Nullable<String>,
}
