//! Smart-home accessory adapter.
//!
//! Mirrors the characteristic values of the AirQualitySensor and
//! BatteryService accessory services.  Implements [`EventSink`]: each
//! report overwrites the values, and the accessory-protocol layer reads
//! them back through [`AccessoryState::characteristics`] when it services
//! its own loop.  Protocol framing and pairing live outside this crate.

use log::debug;

use crate::app::events::{AppEvent, Report};
use crate::app::ports::EventSink;

/// ChargingState characteristic values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ChargingState {
    NotCharging = 0,
    Charging = 1,
    NotChargeable = 2,
}

/// Snapshot of every published characteristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Characteristics {
    /// AirQuality, 1 (excellent) – 5 (poor).
    pub air_quality: u8,
    pub voc_density: f32,
    pub current_temperature: f32,
    pub current_relative_humidity: f32,
    pub carbon_dioxide_level: f32,
    pub battery_level: u8,
    pub charging_state: ChargingState,
    /// StatusLowBattery, 0 = normal, 1 = low.
    pub status_low_battery: u8,
}

impl Default for Characteristics {
    fn default() -> Self {
        Self {
            air_quality: 1,
            voc_density: 0.0,
            current_temperature: 20.0,
            current_relative_humidity: 50.0,
            carbon_dioxide_level: 400.0,
            battery_level: 100,
            charging_state: ChargingState::NotChargeable,
            status_low_battery: 0,
        }
    }
}

#[derive(Debug, Default)]
pub struct AccessoryState {
    values: Characteristics,
    updates: u32,
}

impl AccessoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn characteristics(&self) -> &Characteristics {
        &self.values
    }

    /// Number of reports applied since start.
    pub fn updates(&self) -> u32 {
        self.updates
    }

    fn apply(&mut self, r: &Report) {
        let env = &r.environment;
        let v = &mut self.values;
        v.air_quality = env.category.characteristic_value();
        v.voc_density = env.voc_ppb;
        v.current_temperature = env.temperature_celsius;
        v.current_relative_humidity = env.relative_humidity_percent;
        v.carbon_dioxide_level = env.co2_equivalent_ppm;
        // Keep the last good battery values when the read failed.
        if let Some(battery) = r.battery {
            v.battery_level = battery.percentage;
            v.status_low_battery = battery.low_battery_flag();
        }
        self.updates = self.updates.wrapping_add(1);
        debug!(
            "accessory: air_quality={} battery={}% low={}",
            v.air_quality, v.battery_level, v.status_low_battery
        );
    }
}

impl EventSink for AccessoryState {
    fn emit(&mut self, event: &AppEvent) {
        if let AppEvent::Report(r) = event {
            self.apply(r);
        }
    }
}
