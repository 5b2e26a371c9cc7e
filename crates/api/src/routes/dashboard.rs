use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Dashboard page at the site root.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard::dashboard_page))
}
