//! Client entity model and DTOs.

use serde::{Deserialize, Serialize};
use sitedesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

use crate::models::patch::{nullable, Nullable};
use crate::models::project::ProjectSummary;

/// A row from the `clients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A client together with the projects it owns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetail {
    #[serde(flatten)]
    pub client: Client,
    pub projects: Vec<ProjectSummary>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClient {
    #[validate(custom(function = "sitedesk_core::validation::not_blank"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
}

/// DTO for updating a client. Only present fields are applied.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClient {
    pub id: DbId,
    #[validate(custom(function = "sitedesk_core::validation::not_blank"))]
    pub name: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: Nullable<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub address: Nullable<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub company: Nullable<String>,
}
