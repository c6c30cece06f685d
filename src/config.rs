//! System configuration parameters
//!
//! All tunable parameters for the AirSense monitor.  Defaults reproduce the
//! factory calibration; values can be overridden from persistent storage
//! via [`ConfigStore`](crate::adapters::config_store::ConfigStore).

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::classify::{BatteryCalibration, IaqThresholds};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    // --- Classification ---
    /// Battery curve endpoints and low threshold.
    pub battery: BatteryCalibration,
    /// IAQ category boundaries.
    pub iaq: IaqThresholds,

    // --- Battery sampling ---
    /// ADC samples averaged per battery reading.
    pub battery_samples: u8,
    /// Voltage divider ratio between the cell and the ADC pin.
    pub divider_ratio: f32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            battery: BatteryCalibration::default(),
            iaq: IaqThresholds::default(),

            battery_samples: 16,
            divider_ratio: 2.0, // 1/2 attenuation
        }
    }
}

impl MonitorConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = &self.battery;
        if !b.empty_volts.is_finite() || !b.full_volts.is_finite() {
            return Err(ConfigError::ValidationFailed(
                "battery calibration voltages must be finite",
            ));
        }
        if b.empty_volts >= b.full_volts {
            return Err(ConfigError::ValidationFailed(
                "battery empty_volts must be below full_volts",
            ));
        }
        if b.low_percent > 100 {
            return Err(ConfigError::ValidationFailed(
                "battery low_percent must be 0-100",
            ));
        }

        let t = &self.iaq;
        let bounds = [t.excellent_max, t.good_max, t.fair_max, t.inferior_max];
        if bounds.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::ValidationFailed(
                "IAQ thresholds must be finite",
            ));
        }
        if bounds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::ValidationFailed(
                "IAQ thresholds must be strictly increasing",
            ));
        }

        if self.battery_samples == 0 {
            return Err(ConfigError::ValidationFailed(
                "battery_samples must be at least 1",
            ));
        }
        if !(self.divider_ratio.is_finite() && self.divider_ratio > 0.0) {
            return Err(ConfigError::ValidationFailed(
                "divider_ratio must be positive",
            ));
        }
        Ok(())
    }
}
