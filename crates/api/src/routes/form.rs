//! Route definitions for the `/forms` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::form;
use crate::state::AppState;

/// Routes mounted at `/forms`.
///
/// ```text
/// GET    /?id=                         -> get (detail)
/// GET    /?search=&projectId=&status=  -> get (list)
/// POST   /                             -> create
/// PUT    /                             -> update
/// DELETE /?id=                         -> delete
/// GET    /document?id=                 -> document
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(form::get)
                .post(form::create)
                .put(form::update)
                .delete(form::delete),
        )
        .route("/document", get(form::document))
}
