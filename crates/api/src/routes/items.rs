use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Item routes mounted at `/api/v1/items`.
///
/// ```text
/// GET    /            -> list_items
/// POST   /            -> create_item
/// GET    /{id}        -> get_item
/// PUT    /{id}        -> update_item
/// DELETE /{id}        -> delete_item
/// PATCH  /{id}/stock  -> update_stock
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(items::list_items).post(items::create_item))
        .route(
            "/{id}",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route("/{id}/stock", patch(items::update_stock))
}
