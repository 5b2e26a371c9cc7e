//! Route definitions for the machine simulator.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::machine;
use crate::state::AppState;

/// Machine routes mounted at `/api/machine`.
///
/// ```text
/// GET  /status   -> get_status
/// GET  /signals  -> get_signals
/// POST /start    -> start_machine
/// POST /stop     -> stop_machine
/// POST /reset    -> reset_counters
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(machine::get_status))
        .route("/signals", get(machine::get_signals))
        .route("/start", post(machine::start_machine))
        .route("/stop", post(machine::stop_machine))
        .route("/reset", post(machine::reset_counters))
}
