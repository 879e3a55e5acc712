use axum::routing::get;
use axum::Router;

use crate::handlers::vendor;
use crate::state::AppState;

/// Routes mounted at `/vendors`.
///
/// ```text
/// GET    /?id=              -> get (detail)
/// GET    /?search=&page=    -> get (list)
/// POST   /                  -> create
/// PUT    /                  -> update
/// DELETE /?id=              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(vendor::get)
            .post(vendor::create)
            .put(vendor::update)
            .delete(vendor::delete),
    )
}
