pub mod client;
pub mod dashboard;
pub mod form;
pub mod health;
pub mod officer;
pub mod project;
pub mod supply_item;
pub mod vendor;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /clients                       CRUD (?id= for detail / delete)
/// /officers                      CRUD
/// /vendors                       CRUD
/// /supply-items                  CRUD
///
/// /projects                      CRUD
/// /projects/milestone            change milestone (PATCH)
/// /projects/milestones           milestone history
/// /projects/milestone-table      milestone weights
///
/// /forms                         CRUD
/// /forms/document                printable layout
///
/// /dashboard                     summary counts
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/clients", client::router())
        .nest("/officers", officer::router())
        .nest("/vendors", vendor::router())
        .nest("/supply-items", supply_item::router())
        .nest("/projects", project::router())
        .nest("/forms", form::router())
        .nest("/dashboard", dashboard::router())
}
