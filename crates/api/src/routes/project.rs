//! Route definitions for the `/projects` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /?id=                        -> get (detail)
/// GET    /?search=&status=&clientId=  -> get (list)
/// POST   /                            -> create
/// PUT    /                            -> update
/// DELETE /?id=                        -> delete
///
/// PATCH  /milestone                   -> change_milestone
/// GET    /milestones?id=              -> milestone_history
/// GET    /milestone-table             -> milestone_table
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(project::get)
                .post(project::create)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/milestone", patch(project::change_milestone))
        .route("/milestones", get(project::milestone_history))
        .route("/milestone-table", get(project::milestone_table))
}
