//! Bounded random-walk simulator for the machine state.
//!
//! Pure logic: the caller owns synchronisation. The API layer keeps one
//! simulator behind a single `Mutex` so every operation is atomic.

use chrono::{NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::signals::{self, MachineSignals};
use super::{MachineState, Sensor};
use crate::types::Timestamp;

/// Simulated uptime added per status read while running.
///
/// Uptime is a function of how often the status is polled, not of wall-clock
/// time: at the dashboard's 2 s cadence an hour of polling adds ~1.08 hours.
pub const UPTIME_HOURS_PER_STEP: f64 = 0.0006;

/// A unit is produced when a uniform draw exceeds this value (p = 0.3).
pub const PRODUCTION_DRAW_THRESHOLD: f64 = 0.7;

/// An error is recorded when a uniform draw exceeds this value (p = 0.05).
pub const ERROR_DRAW_THRESHOLD: f64 = 0.95;

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// A lifecycle transition that sets a fixed subset of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Start,
    Stop,
    Reset,
}

impl Transition {
    /// Human-readable acknowledgement returned to the caller.
    pub const fn message(self) -> &'static str {
        match self {
            Transition::Start => "Machine started",
            Transition::Stop => "Machine stopped",
            Transition::Reset => "Counters reset",
        }
    }
}

/// Acknowledgement of an applied transition: `{ "status", "timestamp" }`.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionAck {
    #[serde(skip)]
    pub transition: Transition,
    pub status: &'static str,
    pub timestamp: Timestamp,
}

impl TransitionAck {
    fn now(transition: Transition) -> Self {
        Self {
            transition,
            status: transition.message(),
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

/// Owns the machine state and the random source that evolves it.
///
/// The random source is a type parameter so tests can inject a seeded or
/// fully deterministic generator.
#[derive(Debug)]
pub struct MachineSimulator<R = StdRng> {
    state: MachineState,
    rng: R,
}

impl MachineSimulator<StdRng> {
    /// Initial snapshot driven by a generator seeded from the OS.
    pub fn from_os_rng(last_maintenance: NaiveDate) -> Self {
        Self::new(MachineState::initial(last_maintenance), StdRng::from_os_rng())
    }

    /// Initial snapshot driven by a fixed seed; trajectories are reproducible.
    pub fn seeded(seed: u64, last_maintenance: NaiveDate) -> Self {
        Self::new(
            MachineState::initial(last_maintenance),
            StdRng::seed_from_u64(seed),
        )
    }
}

impl<R: Rng> MachineSimulator<R> {
    pub fn new(state: MachineState, rng: R) -> Self {
        Self { state, rng }
    }

    /// Current state without advancing the simulation.
    pub fn snapshot(&self) -> &MachineState {
        &self.state
    }

    /// Read the status. While running, applies exactly one simulation step
    /// first; while stopped, the state is returned untouched.
    pub fn read_status(&mut self) -> MachineState {
        if self.state.running {
            self.step();
        }
        self.state.clone()
    }

    /// Set `running` and restore every sensor to its nominal value.
    /// Counters and uptime are kept.
    pub fn start(&mut self) -> TransitionAck {
        self.state.running = true;
        self.state.restore_nominal();
        TransitionAck::now(Transition::Start)
    }

    /// Clear `running` and zero speed and power. Temperature, pressure and
    /// vibration keep their last readings.
    pub fn stop(&mut self) -> TransitionAck {
        self.state.running = false;
        self.state.speed = 0.0;
        self.state.power = 0.0;
        TransitionAck::now(Transition::Stop)
    }

    /// Zero the production/error counters and uptime.
    pub fn reset(&mut self) -> TransitionAck {
        self.state.production_count = 0;
        self.state.error_count = 0;
        self.state.uptime_hours = 0.0;
        TransitionAck::now(Transition::Reset)
    }

    /// Derived alarm, gauge, and efficiency signals for the current state.
    /// Does not advance the simulation.
    pub fn signals(&mut self) -> MachineSignals {
        signals::evaluate(&self.state, &mut self.rng)
    }

    /// One bounded random-walk step plus the two counter trials.
    fn step(&mut self) {
        for sensor in Sensor::ALL {
            let spec = sensor.spec();
            let delta = self.rng.random_range(-spec.jitter..=spec.jitter);
            let value = self.state.reading_mut(sensor);
            *value = (*value + delta).clamp(spec.min, spec.max);
        }

        self.state.uptime_hours += UPTIME_HOURS_PER_STEP;

        if self.rng.random::<f64>() > PRODUCTION_DRAW_THRESHOLD {
            self.state.production_count += 1;
        }
        if self.rng.random::<f64>() > ERROR_DRAW_THRESHOLD {
            self.state.error_count += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
