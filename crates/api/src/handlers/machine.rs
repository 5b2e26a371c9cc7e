//! Handlers for the machine simulator endpoints.
//!
//! Every handler takes the machine lock for exactly one simulator call and
//! releases it before logging or serialising.

use axum::extract::State;
use axum::Json;
use scada_core::machine::signals::{tripped_sensors, MachineSignals};
use scada_core::machine::{MachineState, TransitionAck};

use crate::state::AppState;

/// GET /api/machine/status
///
/// Returns the full snapshot. While running, one simulation step is applied
/// before the snapshot is taken.
pub async fn get_status(State(state): State<AppState>) -> Json<MachineState> {
    let snapshot = state.machine.lock().await.read_status();

    let tripped = tripped_sensors(&snapshot);
    if !tripped.is_empty() {
        tracing::warn!(
            ?tripped,
            temperature = snapshot.temperature,
            pressure = snapshot.pressure,
            vibration = snapshot.vibration,
            "Machine alarm condition",
        );
    }
    tracing::debug!(
        running = snapshot.running,
        production_count = snapshot.production_count,
        error_count = snapshot.error_count,
        "Machine status read",
    );

    Json(snapshot)
}

/// GET /api/machine/signals
///
/// Alarm, gauge levels, and the placeholder efficiency for the current
/// state. Never advances the simulation.
pub async fn get_signals(State(state): State<AppState>) -> Json<MachineSignals> {
    let signals = state.machine.lock().await.signals();
    Json(signals)
}

/// POST /api/machine/start
pub async fn start_machine(State(state): State<AppState>) -> Json<TransitionAck> {
    let ack = state.machine.lock().await.start();
    tracing::info!(timestamp = %ack.timestamp, "Machine started");
    Json(ack)
}

/// POST /api/machine/stop
pub async fn stop_machine(State(state): State<AppState>) -> Json<TransitionAck> {
    let ack = state.machine.lock().await.stop();
    tracing::info!(timestamp = %ack.timestamp, "Machine stopped");
    Json(ack)
}

/// POST /api/machine/reset
///
/// Zeroes production/error counters and uptime.
pub async fn reset_counters(State(state): State<AppState>) -> Json<TransitionAck> {
    let ack = state.machine.lock().await.reset();
    tracing::info!(timestamp = %ack.timestamp, "Machine counters reset");
    Json(ack)
}
