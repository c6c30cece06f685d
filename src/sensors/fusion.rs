//! BME680 fusion-library output frames.
//!
//! The vendor fusion library hands back a bag of tagged outputs once per
//! cycle.  The glue code copies them into a [`FusionFrame`] and the
//! readings adapter folds the frame into a single [`FusionSample`]: the
//! [`EnvironmentalReading`] that gets classified plus the remaining
//! outputs as [`FusionExtras`].  Nothing above this module depends on the
//! callback shape.
//!
//! ## Output ids
//!
//! | Id | Kind                          | Unit |
//! |---:|-------------------------------|------|
//! |  1 | IAQ                           | –    |
//! |  2 | Static IAQ                    | –    |
//! |  3 | CO2 equivalent                | ppm  |
//! |  4 | Breath-VOC equivalent         | ppb  |
//! |  6 | Raw temperature               | °C   |
//! |  7 | Raw pressure                  | Pa   |
//! |  8 | Raw humidity                  | %    |
//! |  9 | Raw gas resistance            | Ω    |
//! | 12 | Stabilization status          | 0/1  |
//! | 13 | Run-in status                 | 0/1  |
//! | 14 | Heat-compensated temperature  | °C   |
//! | 15 | Heat-compensated humidity     | %    |
//! | 21 | Gas percentage                | %    |

use heapless::Vec;
use log::{debug, error, warn};

use crate::classify::EnvironmentalReading;
use crate::error::SensorError;

/// Maximum outputs held per frame.  Matches the subscription list size
/// with headroom.
pub const MAX_OUTPUTS: usize = 16;

/// Fusion output kinds this firmware subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputKind {
    Iaq = 1,
    StaticIaq = 2,
    Co2Equivalent = 3,
    BreathVocEquivalent = 4,
    RawTemperature = 6,
    RawPressure = 7,
    RawHumidity = 8,
    RawGas = 9,
    StabilizationStatus = 12,
    RunInStatus = 13,
    CompensatedTemperature = 14,
    CompensatedHumidity = 15,
    GasPercentage = 21,
}

impl OutputKind {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Iaq),
            2 => Some(Self::StaticIaq),
            3 => Some(Self::Co2Equivalent),
            4 => Some(Self::BreathVocEquivalent),
            6 => Some(Self::RawTemperature),
            7 => Some(Self::RawPressure),
            8 => Some(Self::RawHumidity),
            9 => Some(Self::RawGas),
            12 => Some(Self::StabilizationStatus),
            13 => Some(Self::RunInStatus),
            14 => Some(Self::CompensatedTemperature),
            15 => Some(Self::CompensatedHumidity),
            21 => Some(Self::GasPercentage),
            _ => None,
        }
    }

    pub const fn id(self) -> u8 {
        self as u8
    }
}

/// One tagged output as delivered by the fusion library.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionOutput {
    /// Raw output id (see module table).
    pub id: u8,
    pub signal: f32,
    /// Calibration accuracy 0–3 (IAQ-family outputs only).
    pub accuracy: u8,
    pub timestamp_ns: i64,
}

impl FusionOutput {
    pub fn new(kind: OutputKind, signal: f32) -> Self {
        Self {
            id: kind.id(),
            signal,
            accuracy: 0,
            timestamp_ns: 0,
        }
    }

    pub fn with_accuracy(mut self, accuracy: u8) -> Self {
        self.accuracy = accuracy;
        self
    }

    pub fn at(mut self, timestamp_ns: i64) -> Self {
        self.timestamp_ns = timestamp_ns;
        self
    }

    pub fn kind(&self) -> Option<OutputKind> {
        OutputKind::from_id(self.id)
    }
}

/// Secondary fusion outputs carried alongside the classified reading for
/// diagnostics.  Every field is optional; the subscription may omit any.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FusionExtras {
    pub timestamp_ms: Option<i64>,
    /// IAQ calibration accuracy (0 = stabilising … 3 = high).
    pub iaq_accuracy: Option<u8>,
    pub static_iaq: Option<f32>,
    pub pressure_hpa: Option<f32>,
    pub gas_resistance_kohm: Option<f32>,
    pub gas_percentage: Option<f32>,
    pub stabilized: Option<bool>,
    pub run_in_complete: Option<bool>,
}

/// A fused reading plus its diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FusionSample {
    pub reading: EnvironmentalReading,
    pub extras: FusionExtras,
}

impl FusionSample {
    /// Sample with no diagnostics attached.
    pub fn new(reading: EnvironmentalReading) -> Self {
        Self {
            reading,
            extras: FusionExtras::default(),
        }
    }
}

/// All outputs from a single fusion cycle.
#[derive(Debug, Clone, Default)]
pub struct FusionFrame {
    outputs: Vec<FusionOutput, MAX_OUTPUTS>,
}

impl FusionFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an output.  Unknown ids are accepted and later ignored.
    pub fn push(&mut self, output: FusionOutput) -> Result<(), SensorError> {
        self.outputs
            .push(output)
            .map_err(|_| SensorError::FrameFull)
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn outputs(&self) -> &[FusionOutput] {
        &self.outputs
    }

    /// First output of the given kind, if present.
    pub fn get(&self, kind: OutputKind) -> Option<&FusionOutput> {
        self.outputs.iter().find(|o| o.id == kind.id())
    }

    fn signal(&self, kind: OutputKind) -> Option<f32> {
        self.get(kind).map(|o| o.signal)
    }

    fn require(&self, kind: OutputKind) -> Result<f32, SensorError> {
        self.signal(kind).ok_or(SensorError::MissingOutput(kind))
    }

    /// Frame timestamp in milliseconds, taken from the first output.
    pub fn timestamp_ms(&self) -> Option<i64> {
        self.outputs.first().map(|o| o.timestamp_ns / 1_000_000)
    }

    /// IAQ calibration accuracy (0 = stabilising … 3 = high).
    pub fn iaq_accuracy(&self) -> Option<u8> {
        self.get(OutputKind::Iaq).map(|o| o.accuracy)
    }

    pub fn static_iaq(&self) -> Option<f32> {
        self.signal(OutputKind::StaticIaq)
    }

    pub fn gas_percentage(&self) -> Option<f32> {
        self.signal(OutputKind::GasPercentage)
    }

    pub fn pressure_hpa(&self) -> Option<f32> {
        self.signal(OutputKind::RawPressure).map(|pa| pa / 100.0)
    }

    pub fn gas_resistance_kohm(&self) -> Option<f32> {
        self.signal(OutputKind::RawGas).map(|ohm| ohm / 1000.0)
    }

    pub fn is_stabilized(&self) -> Option<bool> {
        self.signal(OutputKind::StabilizationStatus)
            .map(|s| s >= 1.0)
    }

    pub fn run_in_complete(&self) -> Option<bool> {
        self.signal(OutputKind::RunInStatus).map(|s| s >= 1.0)
    }

    pub fn extras(&self) -> FusionExtras {
        FusionExtras {
            timestamp_ms: self.timestamp_ms(),
            iaq_accuracy: self.iaq_accuracy(),
            static_iaq: self.static_iaq(),
            pressure_hpa: self.pressure_hpa(),
            gas_resistance_kohm: self.gas_resistance_kohm(),
            gas_percentage: self.gas_percentage(),
            stabilized: self.is_stabilized(),
            run_in_complete: self.run_in_complete(),
        }
    }

    /// Fold the frame into a reading plus diagnostics; see [`Self::to_reading`].
    pub fn to_sample(&self) -> Result<Option<FusionSample>, SensorError> {
        Ok(self.to_reading()?.map(|reading| FusionSample {
            reading,
            extras: self.extras(),
        }))
    }

    /// Fold the frame into a reading.
    ///
    /// Returns `Ok(None)` for an empty frame (no new cycle).  Temperature
    /// and humidity prefer the heat-compensated outputs and fall back to
    /// the raw ones.
    pub fn to_reading(&self) -> Result<Option<EnvironmentalReading>, SensorError> {
        if self.is_empty() {
            return Ok(None);
        }

        for o in &self.outputs {
            if o.kind().is_none() {
                debug!("fusion: ignoring unknown output id {}", o.id);
            }
        }

        let temperature_celsius = self
            .signal(OutputKind::CompensatedTemperature)
            .or_else(|| self.signal(OutputKind::RawTemperature))
            .ok_or(SensorError::MissingOutput(OutputKind::CompensatedTemperature))?;
        let relative_humidity_percent = self
            .signal(OutputKind::CompensatedHumidity)
            .or_else(|| self.signal(OutputKind::RawHumidity))
            .ok_or(SensorError::MissingOutput(OutputKind::CompensatedHumidity))?;

        Ok(Some(EnvironmentalReading {
            index_air_quality: self.require(OutputKind::Iaq)?,
            voc_ppb: self.require(OutputKind::BreathVocEquivalent)?,
            temperature_celsius,
            relative_humidity_percent,
            co2_equivalent_ppm: self.require(OutputKind::Co2Equivalent)?,
        }))
    }
}

/// Interpret the status codes reported by the fusion library and the
/// sensor driver after a call.  Negative codes are errors, positive codes
/// are warnings that are logged but do not fail the cycle.
pub fn check_status(library_status: i32, sensor_status: i8) -> Result<(), SensorError> {
    if library_status < 0 {
        error!("fusion library error code: {}", library_status);
        return Err(SensorError::FusionLibrary(library_status));
    }
    if library_status > 0 {
        warn!("fusion library warning code: {}", library_status);
    }

    if sensor_status < 0 {
        error!("sensor error code: {}", sensor_status);
        return Err(SensorError::SensorBus(sensor_status));
    }
    if sensor_status > 0 {
        warn!("sensor warning code: {}", sensor_status);
    }
    Ok(())
}
