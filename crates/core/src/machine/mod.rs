//! Simulated industrial machine: the state record and its sensor limits.
//!
//! [`MachineState`] is a plain value. All mutation goes through
//! [`MachineSimulator`], which owns the single process-wide instance and the
//! random source that drives it.

pub mod signals;
pub mod simulator;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use simulator::{MachineSimulator, Transition, TransitionAck};

/// Uptime reported by a freshly constructed machine.
pub const INITIAL_UPTIME_HOURS: f64 = 245.5;

/// Maintenance date shown when none is configured.
pub fn default_last_maintenance() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 1).expect("valid calendar date")
}

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// One of the five bounded analogue readings on the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensor {
    Speed,
    Temperature,
    Pressure,
    Vibration,
    Power,
}

/// Static limits for a sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSpec {
    /// Lower bound of the closed interval.
    pub min: f64,
    /// Upper bound of the closed interval. Also the denominator for
    /// fraction-of-max signals.
    pub max: f64,
    /// Half-width of the uniform perturbation applied per simulation step.
    pub jitter: f64,
    /// Value restored by a `start` transition.
    pub nominal: f64,
    /// Display unit.
    pub unit: &'static str,
}

impl Sensor {
    /// Every sensor, in the order the simulation step draws them.
    pub const ALL: [Sensor; 5] = [
        Sensor::Speed,
        Sensor::Temperature,
        Sensor::Pressure,
        Sensor::Vibration,
        Sensor::Power,
    ];

    pub const fn spec(self) -> SensorSpec {
        match self {
            Sensor::Speed => SensorSpec {
                min: 0.0,
                max: 100.0,
                jitter: 3.0,
                nominal: 75.0,
                unit: "units",
            },
            Sensor::Temperature => SensorSpec {
                min: 20.0,
                max: 95.0,
                jitter: 2.0,
                nominal: 68.5,
                unit: "°C",
            },
            Sensor::Pressure => SensorSpec {
                min: 0.0,
                max: 6.5,
                jitter: 0.3,
                nominal: 4.2,
                unit: "bar",
            },
            Sensor::Vibration => SensorSpec {
                min: 0.0,
                max: 3.0,
                jitter: 0.2,
                nominal: 0.8,
                unit: "mm/s",
            },
            Sensor::Power => SensorSpec {
                min: 0.0,
                max: 120.0,
                jitter: 5.0,
                nominal: 85.0,
                unit: "kW",
            },
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Sensor::Speed => "speed",
            Sensor::Temperature => "temperature",
            Sensor::Pressure => "pressure",
            Sensor::Vibration => "vibration",
            Sensor::Power => "power",
        }
    }
}

// ---------------------------------------------------------------------------
// State record
// ---------------------------------------------------------------------------

/// Full snapshot of the simulated machine.
///
/// Serialises to the flat JSON object returned by `GET /api/machine/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineState {
    pub running: bool,
    pub speed: f64,
    pub temperature: f64,
    pub pressure: f64,
    pub vibration: f64,
    pub power: f64,
    pub production_count: u64,
    pub error_count: u64,
    pub last_maintenance: NaiveDate,
    pub uptime_hours: f64,
}

impl MachineState {
    /// The snapshot every process starts from: running at nominal values,
    /// counters at zero.
    pub fn initial(last_maintenance: NaiveDate) -> Self {
        let mut state = Self {
            running: true,
            speed: 0.0,
            temperature: 0.0,
            pressure: 0.0,
            vibration: 0.0,
            power: 0.0,
            production_count: 0,
            error_count: 0,
            last_maintenance,
            uptime_hours: INITIAL_UPTIME_HOURS,
        };
        state.restore_nominal();
        state
    }

    pub fn reading(&self, sensor: Sensor) -> f64 {
        match sensor {
            Sensor::Speed => self.speed,
            Sensor::Temperature => self.temperature,
            Sensor::Pressure => self.pressure,
            Sensor::Vibration => self.vibration,
            Sensor::Power => self.power,
        }
    }

    pub(crate) fn reading_mut(&mut self, sensor: Sensor) -> &mut f64 {
        match sensor {
            Sensor::Speed => &mut self.speed,
            Sensor::Temperature => &mut self.temperature,
            Sensor::Pressure => &mut self.pressure,
            Sensor::Vibration => &mut self.vibration,
            Sensor::Power => &mut self.power,
        }
    }

    /// Put every sensor back at its nominal value.
    pub(crate) fn restore_nominal(&mut self) {
        for sensor in Sensor::ALL {
            *self.reading_mut(sensor) = sensor.spec().nominal;
        }
    }

    /// True when every bounded reading lies inside its closed interval.
    pub fn within_limits(&self) -> bool {
        Sensor::ALL.iter().all(|&sensor| {
            let spec = sensor.spec();
            let value = self.reading(sensor);
            value >= spec.min && value <= spec.max
        })
    }
}

impl Default for MachineState {
    fn default() -> Self {
        Self::initial(default_last_maintenance())
    }
}
