pub mod dashboard;
pub mod health;
pub mod items;
pub mod machine;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /machine/status                 current snapshot, one step if running (GET)
/// /machine/signals                alarm, gauges, efficiency (GET)
/// /machine/start                  start transition (POST)
/// /machine/stop                   stop transition (POST)
/// /machine/reset                  reset counters (POST)
///
/// /health                         service health (GET)
/// /info                           version and machine running flag (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/machine", machine::router())
        .merge(health::service_router())
}

/// Build the `/api/v1` route tree.
///
/// ```text
/// /health                         basic health (GET)
/// /health/detailed                host metrics (GET)
/// /ready                          readiness probe (GET)
/// /live                           liveness probe (GET)
///
/// /items                          list, create
/// /items/{id}                     get, update, delete
/// /items/{id}/stock               adjust stock (PATCH)
///
/// /users                          list, create
/// /users/{id}                     get, update, delete
/// ```
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(health::probe_router())
        .nest("/items", items::router())
        .nest("/users", users::router())
}
