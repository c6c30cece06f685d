//! Readings adapter — bridges the sensor drivers to [`ReadingsPort`].
//!
//! The fusion library runs on its own schedule and hands over a frame (or
//! a status code) through [`SensorReadings::deliver`] /
//! [`SensorReadings::deliver_status`].  The monitor later pulls the frame
//! through [`ReadingsPort::read_environment`], which folds it into one
//! [`FusionSample`].  At most one frame is held; a newer frame
//! replaces an unread one.

use log::warn;

use crate::app::ports::ReadingsPort;
use crate::classify::BatteryReading;
use crate::config::MonitorConfig;
use crate::error::SensorError;
use crate::sensors::battery::{BatterySampler, MillivoltAdc};
use crate::sensors::fusion::{FusionFrame, FusionSample, check_status};

pub struct SensorReadings<A> {
    battery: BatterySampler<A>,
    pending: Option<FusionFrame>,
    fault: Option<SensorError>,
}

impl<A: MillivoltAdc> SensorReadings<A> {
    pub fn new(adc: A, config: &MonitorConfig) -> Self {
        Self {
            battery: BatterySampler::new(adc, config.battery_samples, config.divider_ratio),
            pending: None,
            fault: None,
        }
    }

    /// Hand over the outputs of a completed fusion cycle.
    pub fn deliver(&mut self, frame: FusionFrame) {
        if self.pending.is_some() {
            warn!("readings: unread fusion frame replaced");
        }
        self.pending = Some(frame);
    }

    /// Record the status codes of the last fusion call.  An error is
    /// surfaced on the next [`ReadingsPort::read_environment`].
    pub fn deliver_status(&mut self, library_status: i32, sensor_status: i8) {
        if let Err(e) = check_status(library_status, sensor_status) {
            self.fault = Some(e);
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<A: MillivoltAdc> ReadingsPort for SensorReadings<A> {
    fn read_environment(&mut self) -> Result<Option<FusionSample>, SensorError> {
        if let Some(e) = self.fault.take() {
            return Err(e);
        }
        match self.pending.take() {
            Some(frame) => frame.to_sample(),
            None => Ok(None),
        }
    }

    fn read_battery(&mut self) -> Result<BatteryReading, SensorError> {
        self.battery.read()
    }
}
