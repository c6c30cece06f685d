//! Monitor service — the hexagonal core.
//!
//! [`MonitorService`] owns the two classifiers and the little state needed
//! to detect transitions between cycles.  All I/O flows through port
//! traits injected at call sites, making the service testable with mock
//! adapters.
//!
//! ```text
//!  ReadingsPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                   │      MonitorService       │
//!                   │  Battery · Air quality    │
//!                   └──────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::classify::{AirQualityCategory, AirQualityClassifier, BatteryClassifier};
use crate::config::MonitorConfig;
use crate::error::Result;

use super::events::{AppEvent, Report};
use super::ports::{ConfigPort, EventSink, ReadingsPort};

pub struct MonitorService {
    battery: BatteryClassifier,
    air: AirQualityClassifier,
    last_category: Option<AirQualityCategory>,
    last_low: Option<bool>,
    cycle_count: u64,
}

impl MonitorService {
    /// Construct the service from a validated configuration.
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            battery: BatteryClassifier::new(config.battery),
            air: AirQualityClassifier::new(config.iaq),
            last_category: None,
            last_low: None,
            cycle_count: 0,
        }
    }

    /// Construct the service from whatever configuration `store` holds.
    ///
    /// A missing blob yields factory defaults; a corrupt or out-of-range
    /// one is an [`Error::Config`](crate::error::Error::Config).
    pub fn from_config_port(store: &impl ConfigPort) -> Result<Self> {
        let config = store.load()?;
        Ok(Self::new(&config))
    }

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        info!("MonitorService started");
    }

    /// Run one fusion cycle: read → classify → emit.
    ///
    /// Returns `Ok(None)` when the fusion library had nothing new; the
    /// battery is not sampled in that case.  An environment read error is
    /// emitted as [`AppEvent::SensorFault`] and returned.  A battery read
    /// error is emitted the same way, but the environment is still
    /// classified and reported with the battery fields set to `None`.
    pub fn cycle(
        &mut self,
        source: &mut impl ReadingsPort,
        sink: &mut impl EventSink,
    ) -> Result<Option<Report>> {
        let sample = match source.read_environment() {
            Ok(Some(s)) => s,
            Ok(None) => {
                debug!("no new fusion outputs");
                return Ok(None);
            }
            Err(e) => {
                warn!("environment read failed: {e}");
                sink.emit(&AppEvent::SensorFault(e));
                return Err(e.into());
            }
        };

        let battery_reading = match source.read_battery() {
            Ok(r) => Some(r),
            Err(e) => {
                warn!("battery read failed: {e}");
                sink.emit(&AppEvent::SensorFault(e));
                None
            }
        };

        self.cycle_count += 1;
        let battery = battery_reading.map(|r| self.battery.classify_reading(r));
        let environment = self.air.classify(sample.reading);

        let report = Report {
            cycle: self.cycle_count,
            iaq: sample.reading.index_air_quality,
            battery_volts: battery_reading.map(|r| r.voltage_volts),
            battery,
            environment,
            extras: sample.extras,
        };
        sink.emit(&AppEvent::Report(report));

        if let Some(prev) = self.last_category {
            if prev != environment.category {
                sink.emit(&AppEvent::AirQualityChanged {
                    from: prev,
                    to: environment.category,
                });
            }
        }
        self.last_category = Some(environment.category);

        // A failed battery read leaves the previous flag in place.
        if let Some(battery) = battery {
            if self.last_low != Some(battery.is_low) {
                // Only announce a first-cycle flag when it is already low.
                if self.last_low.is_some() || battery.is_low {
                    sink.emit(&AppEvent::BatteryLowChanged(battery.is_low));
                }
                self.last_low = Some(battery.is_low);
            }
        }

        Ok(Some(report))
    }

    /// Cycles that produced a report since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn last_category(&self) -> Option<AirQualityCategory> {
        self.last_category
    }
}
