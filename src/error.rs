//! Unified error types for the AirSense firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! monitor loop's error handling uniform.  All variants are `Copy` so they
//! can be passed through events and logs without allocation.
//!
//! The classifiers themselves never fail; only the readings side
//! (ADC sampling, fusion-frame assembly) and configuration produce errors.

use core::fmt;

use crate::sensors::fusion::OutputKind;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read or its output was unusable.
    Sensor(SensorError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Battery ADC read returned an error.
    AdcReadFailed,
    /// The fusion library reported a negative status code.
    FusionLibrary(i32),
    /// The gas sensor driver reported a negative status code.
    SensorBus(i8),
    /// A fusion frame lacked an output required to build a reading.
    MissingOutput(OutputKind),
    /// A fusion frame received more outputs than it can hold.
    FrameFull,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcReadFailed => write!(f, "ADC read failed"),
            Self::FusionLibrary(code) => write!(f, "fusion library error {code}"),
            Self::SensorBus(code) => write!(f, "sensor bus error {code}"),
            Self::MissingOutput(kind) => write!(f, "missing fusion output {kind:?}"),
            Self::FrameFull => write!(f, "fusion frame full"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
