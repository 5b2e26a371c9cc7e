//! Derived signals computed from a machine snapshot.
//!
//! Nothing here is stored on the state record. Alarm and gauge levels are
//! threshold comparisons against each sensor's documented maximum.

use rand::Rng;
use serde::Serialize;

use super::{MachineState, Sensor};

/// Alarm trips when temperature exceeds this fraction of its maximum.
pub const TEMPERATURE_ALARM_FRACTION: f64 = 0.90;
/// Alarm trips when pressure exceeds this fraction of its maximum.
pub const PRESSURE_ALARM_FRACTION: f64 = 0.90;
/// Alarm trips when vibration exceeds this fraction of its maximum.
pub const VIBRATION_ALARM_FRACTION: f64 = 0.85;

/// Gauge fraction above which a reading is shown as `danger`.
pub const DANGER_FRACTION: f64 = 0.90;
/// Gauge fraction above which a reading is shown as `warning`.
pub const WARNING_FRACTION: f64 = 0.75;

/// Speed is displayed in RPM as `speed * SPEED_RPM_FACTOR`.
pub const SPEED_RPM_FACTOR: f64 = 20.0;
/// Speed gauge full-scale, in RPM.
pub const SPEED_TARGET_RPM: f64 = 1500.0;

/// Bounds of the placeholder efficiency value while running.
pub const EFFICIENCY_MIN: f64 = 60.0;
pub const EFFICIENCY_MAX: f64 = 95.0;

/// Colour band for a gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorLevel {
    Normal,
    Warning,
    Danger,
}

/// One gauge as the dashboard renders it.
#[derive(Debug, Clone, Serialize)]
pub struct GaugeReading {
    pub sensor: Sensor,
    /// Value in display units (speed in RPM, the rest unchanged).
    pub display_value: f64,
    pub unit: &'static str,
    /// Fraction of full scale as a percentage, capped at 100.
    pub percent: f64,
    pub level: IndicatorLevel,
}

/// Everything the dashboard derives from one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct MachineSignals {
    pub running: bool,
    pub alarm: bool,
    /// Sensors whose alarm threshold is exceeded, in draw order.
    pub tripped: Vec<Sensor>,
    pub gauges: Vec<GaugeReading>,
    /// Placeholder: uniform noise in `[60, 95]` while running, `0` when
    /// stopped. Not derived from any sensor reading.
    pub efficiency: f64,
}

/// Reading divided by the sensor's documented maximum.
pub fn fraction_of_max(state: &MachineState, sensor: Sensor) -> f64 {
    state.reading(sensor) / sensor.spec().max
}

/// Alarm threshold for a sensor, if it participates in the alarm.
pub const fn alarm_fraction(sensor: Sensor) -> Option<f64> {
    match sensor {
        Sensor::Temperature => Some(TEMPERATURE_ALARM_FRACTION),
        Sensor::Pressure => Some(PRESSURE_ALARM_FRACTION),
        Sensor::Vibration => Some(VIBRATION_ALARM_FRACTION),
        Sensor::Speed | Sensor::Power => None,
    }
}

/// Sensors currently above their alarm threshold.
pub fn tripped_sensors(state: &MachineState) -> Vec<Sensor> {
    Sensor::ALL
        .into_iter()
        .filter(|&sensor| {
            alarm_fraction(sensor).is_some_and(|limit| fraction_of_max(state, sensor) > limit)
        })
        .collect()
}

pub fn alarm_active(state: &MachineState) -> bool {
    !tripped_sensors(state).is_empty()
}

/// Gauge reading for one sensor. Speed is scaled to RPM against the
/// 1500 RPM target; every other sensor is scaled against its maximum.
pub fn gauge(state: &MachineState, sensor: Sensor) -> GaugeReading {
    let (display_value, unit, fraction) = match sensor {
        Sensor::Speed => {
            let rpm = state.speed * SPEED_RPM_FACTOR;
            (rpm, "RPM", rpm / SPEED_TARGET_RPM)
        }
        other => (
            state.reading(other),
            other.spec().unit,
            fraction_of_max(state, other),
        ),
    };

    let level = if fraction > DANGER_FRACTION {
        IndicatorLevel::Danger
    } else if fraction > WARNING_FRACTION {
        IndicatorLevel::Warning
    } else {
        IndicatorLevel::Normal
    };

    GaugeReading {
        sensor,
        display_value,
        unit,
        percent: (fraction * 100.0).min(100.0),
        level,
    }
}

/// Placeholder efficiency. See [`MachineSignals::efficiency`].
pub fn placeholder_efficiency<R: Rng + ?Sized>(state: &MachineState, rng: &mut R) -> f64 {
    if state.running {
        rng.random_range(EFFICIENCY_MIN..=EFFICIENCY_MAX)
    } else {
        0.0
    }
}

/// Compute every derived signal for a snapshot.
pub fn evaluate<R: Rng + ?Sized>(state: &MachineState, rng: &mut R) -> MachineSignals {
    let tripped = tripped_sensors(state);
    MachineSignals {
        running: state.running,
        alarm: !tripped.is_empty(),
        tripped,
        gauges: Sensor::ALL.into_iter().map(|s| gauge(state, s)).collect(),
        efficiency: placeholder_efficiency(state, rng),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
