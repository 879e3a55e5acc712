use axum::routing::get;
use axum::Router;

use crate::handlers::supply_item;
use crate::state::AppState;

/// Routes mounted at `/supply-items`.
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
        get(supply_item::get)
            .post(supply_item::create)
            .put(supply_item::update)
            .delete(supply_item::delete),
    )
}
