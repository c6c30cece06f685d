//! Battery voltage → charge percentage and low-battery flag.
//!
//! The LiPo discharge curve is approximated as a straight line between the
//! empty-cell and full-cell voltages, clamped at both ends.  The real curve
//! is sigmoidal; a lookup table may replace the interpolation as long as
//! the mapping stays monotonic and clamped to 0–100.
//!
//! ## Non-finite inputs
//!
//! | Input | Percentage | Low |
//! |-------|-----------:|-----|
//! | NaN   | 0          | yes |
//! | +inf  | 100        | no  |
//! | -inf  | 0          | yes |

use serde::{Deserialize, Serialize};

/// Cell voltage at which the battery reads 0 %.
pub const EMPTY_CELL_VOLTS: f32 = 3.4;
/// Cell voltage at which the battery reads 100 %.
pub const FULL_CELL_VOLTS: f32 = 4.2;
/// Percentages at or below this value raise the low-battery flag.
pub const LOW_BATTERY_PERCENT: u8 = 20;

/// Slack (in percentage points) added before truncation so that decimal
/// voltages landing exactly on an integer percentage are not pushed one
/// step down by binary rounding.  Equivalent to ~8 µV on the cell.
const PERCENT_TOLERANCE: f32 = 1e-3;

/// A single battery voltage sample, already scaled back through the divider.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BatteryReading {
    pub voltage_volts: f32,
}

impl BatteryReading {
    pub fn new(voltage_volts: f32) -> Self {
        Self { voltage_volts }
    }
}

/// Classified battery state.
///
/// Invariant: `is_low == (percentage <= low threshold)`; only
/// [`BatteryClassifier`] constructs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryStatus {
    /// Charge estimate, 0–100.
    pub percentage: u8,
    pub is_low: bool,
}

impl BatteryStatus {
    /// Value for the accessory StatusLowBattery characteristic (0 = normal, 1 = low).
    pub fn low_battery_flag(&self) -> u8 {
        u8::from(self.is_low)
    }
}

/// Calibration endpoints for the voltage curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryCalibration {
    /// Voltage mapped to 0 %.
    pub empty_volts: f32,
    /// Voltage mapped to 100 %.
    pub full_volts: f32,
    /// Low-battery threshold (inclusive), percent.
    pub low_percent: u8,
}

impl Default for BatteryCalibration {
    fn default() -> Self {
        Self {
            empty_volts: EMPTY_CELL_VOLTS,
            full_volts: FULL_CELL_VOLTS,
            low_percent: LOW_BATTERY_PERCENT,
        }
    }
}

/// Pure voltage classifier.  Holds only its calibration; every call is
/// independent.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatteryClassifier {
    cal: BatteryCalibration,
}

impl BatteryClassifier {
    /// Build a classifier from a calibration.  The caller is expected to
    /// have validated it (`empty_volts < full_volts`), see
    /// [`MonitorConfig::validate`](crate::config::MonitorConfig::validate).
    pub fn new(cal: BatteryCalibration) -> Self {
        Self { cal }
    }

    pub fn calibration(&self) -> &BatteryCalibration {
        &self.cal
    }

    /// Map a voltage to percentage and low flag.
    pub fn classify(&self, voltage_volts: f32) -> BatteryStatus {
        let percentage = self.percentage(voltage_volts);
        BatteryStatus {
            percentage,
            is_low: percentage <= self.cal.low_percent,
        }
    }

    /// Classify a [`BatteryReading`].
    pub fn classify_reading(&self, reading: BatteryReading) -> BatteryStatus {
        self.classify(reading.voltage_volts)
    }

    fn percentage(&self, volts: f32) -> u8 {
        let BatteryCalibration {
            empty_volts,
            full_volts,
            ..
        } = self.cal;

        if volts.is_nan() {
            return 0;
        }
        if volts >= full_volts {
            return 100;
        }
        if volts <= empty_volts {
            return 0;
        }

        let scaled = (volts - empty_volts) * 100.0 / (full_volts - empty_volts);
        // 100 is reserved for `volts >= full_volts`.
        ((scaled + PERCENT_TOLERANCE).floor() as u8).min(99)
    }
}
