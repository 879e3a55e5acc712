//! Shared query parameter types for API handlers.
//!
//! Every resource is served from a single path: `GET` with `?id=` returns
//! one record, otherwise a filtered page. `DELETE` takes `?id=` as well.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use sitedesk_core::types::DbId;

use crate::error::AppError;

/// Treat a blank query value (`?page=`) as absent, otherwise parse it.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// `?id=` on `DELETE` and on lookups that need a target.
#[derive(Debug, Deserialize)]
pub struct IdParam {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<DbId>,
}

impl IdParam {
    /// The id, or a 400 when it is missing.
    pub fn require(&self) -> Result<DbId, AppError> {
        self.id
            .ok_or_else(|| AppError::BadRequest("id is required".to_string()))
    }
}

/// `GET` parameters for clients, officers, vendors and supply items.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<DbId>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub limit: Option<i64>,
}

/// `GET /api/projects` parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListParams {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<DbId>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub client_id: Option<DbId>,
}

/// `GET /api/forms` parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormListParams {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<DbId>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub project_id: Option<DbId>,
}

#[cfg(test)]
mod tests {
    use axum::extract::Query;
    use axum::http::Uri;

    use super::*;

    fn parse<T: serde::de::DeserializeOwned>(uri: &'static str) -> Result<T, String> {
        Query::<T>::try_from_uri(&Uri::from_static(uri))
            .map(|Query(params)| params)
            .map_err(|e| e.body_text())
    }

    #[test]
    fn blank_values_are_absent() {
        let params: ListParams = parse("/api/clients?id=&search=&page=&limit=").unwrap();
        assert_eq!(params.id, None);
        assert_eq!(params.page, None);
        assert_eq!(params.limit, None);
    }

    #[test]
    fn missing_values_are_absent() {
        let params: FormListParams = parse("/api/forms").unwrap();
        assert_eq!(params.project_id, None);
        assert_eq!(params.status, None);
    }

    #[test]
    fn filled_values_are_parsed() {
        let params: ProjectListParams =
            parse("/api/projects?page=2&limit=%205&status=ONGOING&clientId=9").unwrap();
        assert_eq!(params.page, Some(2));
        assert_eq!(params.limit, Some(5));
        assert_eq!(params.status.as_deref(), Some("ONGOING"));
        assert_eq!(params.client_id, Some(9));
    }

    #[test]
    fn blank_status_filter_is_absent() {
        let params: ProjectListParams = parse("/api/projects?status=&clientId=").unwrap();
        assert_eq!(params.status, None);
        assert_eq!(params.client_id, None);
    }

    #[test]
    fn non_numeric_value_is_still_rejected() {
        assert!(parse::<ListParams>("/api/clients?page=abc").is_err());
    }

    #[test]
    fn blank_id_is_required_on_delete() {
        let params: IdParam = parse("/api/vendors?id=").unwrap();
        assert!(params.require().is_err());
    }
}
