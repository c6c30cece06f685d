//! Battery voltage sampler.
//!
//! The cell is wired through a 1/2 resistor divider into an ESP32-C3 ADC
//! pin.  Each reading averages a burst of calibrated millivolt samples
//! (integer average), scales back through the divider, and converts to
//! volts.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: the [`MillivoltAdc`] impl wraps the oneshot ADC channel.
//! On host/test: [`SimAdc`] reads from a static `AtomicU16` for injection.

use crate::classify::BatteryReading;
use crate::error::SensorError;

/// A calibrated ADC channel that reports pin voltage in millivolts.
pub trait MillivoltAdc {
    fn read_millivolts(&mut self) -> Result<u16, SensorError>;
}

pub struct BatterySampler<A> {
    adc: A,
    samples: u8,
    divider_ratio: f32,
}

impl<A: MillivoltAdc> BatterySampler<A> {
    /// `samples` must be at least 1; config validation enforces this.
    pub fn new(adc: A, samples: u8, divider_ratio: f32) -> Self {
        Self {
            adc,
            samples: samples.max(1),
            divider_ratio,
        }
    }

    /// Take one averaged reading.  Any failed sample aborts the burst.
    pub fn read(&mut self) -> Result<BatteryReading, SensorError> {
        let mut sum: u32 = 0;
        for _ in 0..self.samples {
            sum += u32::from(self.adc.read_millivolts()?);
        }
        let avg_mv = sum / u32::from(self.samples);
        Ok(BatteryReading::new(
            avg_mv as f32 * self.divider_ratio / 1000.0,
        ))
    }

    pub fn adc_mut(&mut self) -> &mut A {
        &mut self.adc
    }
}

#[cfg(not(target_os = "espidf"))]
pub use sim::{SimAdc, sim_set_battery_mv};

#[cfg(not(target_os = "espidf"))]
mod sim {
    use core::sync::atomic::{AtomicU16, Ordering};

    use super::MillivoltAdc;
    use crate::error::SensorError;

    // 1.9 V at the pin = 3.8 V at the cell.
    static SIM_BATTERY_MV: AtomicU16 = AtomicU16::new(1900);

    pub fn sim_set_battery_mv(mv: u16) {
        SIM_BATTERY_MV.store(mv, Ordering::Relaxed);
    }

    /// Host-side ADC backed by an injectable static.
    #[derive(Debug, Default)]
    pub struct SimAdc;

    impl MillivoltAdc for SimAdc {
        fn read_millivolts(&mut self) -> Result<u16, SensorError> {
            Ok(SIM_BATTERY_MV.load(Ordering::Relaxed))
        }
    }
}
