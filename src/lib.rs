//! AirSense firmware library.
//!
//! Battery-state and air-quality classification for a BME680 + LiPo
//! monitor, plus the ports and adapters that feed it readings and publish
//! its output.  Everything here runs on the host for testing.
//!
//! ```text
//!  SensorReadings ──▶ MonitorService ──▶ LogEventSink / AccessoryState
//!                    (classify core)
//! ```

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod classify;
pub mod config;
pub mod error;
pub mod sensors;
