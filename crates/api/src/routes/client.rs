use axum::routing::get;
use axum::Router;

use crate::handlers::client;
use crate::state::AppState;

/// Routes mounted at `/clients`.
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
        get(client::get)
            .post(client::create)
            .put(client::update)
            .delete(client::delete),
    )
}
