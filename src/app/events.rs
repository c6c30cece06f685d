//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them — log to serial, update
//! accessory characteristics, etc.

use crate::classify::{AirQualityCategory, BatteryStatus, EnvironmentalStatus};
use crate::error::SensorError;
use crate::sensors::fusion::FusionExtras;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// One classified fusion cycle.
    Report(Report),

    /// The air-quality category moved between cycles.
    AirQualityChanged {
        from: AirQualityCategory,
        to: AirQualityCategory,
    },

    /// The low-battery flag flipped (`true` = now low).
    BatteryLowChanged(bool),

    /// A reading could not be taken this cycle.
    SensorFault(SensorError),

    /// The monitor has started.
    Started,
}

/// Classified output of a single cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    /// Cycle number since start (1-based).
    pub cycle: u64,
    /// Raw IAQ score the category was derived from.
    pub iaq: f32,
    /// `None` when the battery read failed this cycle; the fault is
    /// emitted separately as [`AppEvent::SensorFault`].
    pub battery_volts: Option<f32>,
    pub battery: Option<BatteryStatus>,
    pub environment: EnvironmentalStatus,
    pub extras: FusionExtras,
}
