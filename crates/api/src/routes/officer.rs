use axum::routing::get;
use axum::Router;

use crate::handlers::officer;
use crate::state::AppState;

/// Routes mounted at `/officers`.
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
        get(officer::get)
            .post(officer::create)
            .put(officer::update)
            .delete(officer::delete),
    )
}
