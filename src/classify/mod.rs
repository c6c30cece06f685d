//! Classification core — pure, hardware-independent decision logic.
//!
//! ```text
//!  battery volts ──▶ BatteryClassifier     ──▶ BatteryStatus
//!  fused reading ──▶ AirQualityClassifier  ──▶ EnvironmentalStatus
//! ```
//!
//! Both classifiers are `Copy`, hold only their calibration constants, and
//! never touch I/O.  They can be called from any context without
//! coordination.

pub mod air_quality;
pub mod battery;

pub use air_quality::{
    AirQualityCategory, AirQualityClassifier, EnvironmentalReading, EnvironmentalStatus,
    IaqThresholds,
};
pub use battery::{BatteryCalibration, BatteryClassifier, BatteryReading, BatteryStatus};
