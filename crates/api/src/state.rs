use std::sync::Arc;

use sitedesk_core::pagination::PageRequest;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and config sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: sitedesk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Resolve `?page=&limit=` against the configured page sizes.
    pub fn page_request(&self, page: Option<i64>, limit: Option<i64>) -> PageRequest {
        PageRequest::resolve(
            page,
            limit,
            self.config.default_page_size,
            self.config.max_page_size,
        )
    }
}
