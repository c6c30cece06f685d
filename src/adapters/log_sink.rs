//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production).

use core::fmt;

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::classify::BatteryStatus;
use crate::sensors::fusion::FusionExtras;

/// `{:.3}V {}%` with a ` LOW` suffix, or `n/a` when the read failed.
struct BatteryField(Option<f32>, Option<BatteryStatus>);

impl fmt::Display for BatteryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.0, self.1) {
            (Some(volts), Some(status)) => write!(
                f,
                "{:.3}V {}%{}",
                volts,
                status.percentage,
                if status.is_low { " LOW" } else { "" }
            ),
            _ => f.write_str("n/a"),
        }
    }
}

/// Only the diagnostics the frame carried, space separated.
struct ExtrasField<'a>(&'a FusionExtras);

impl fmt::Display for ExtrasField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = self.0;
        if let Some(ts) = x.timestamp_ms {
            write!(f, "t={ts}ms ")?;
        }
        if let Some(v) = x.static_iaq {
            write!(f, "sIAQ={v:.1} ")?;
        }
        if let Some(v) = x.iaq_accuracy {
            write!(f, "acc={v} ")?;
        }
        if let Some(v) = x.pressure_hpa {
            write!(f, "P={v:.1}hPa ")?;
        }
        if let Some(v) = x.gas_resistance_kohm {
            write!(f, "gas={v:.1}k\u{2126} ")?;
        }
        if let Some(v) = x.gas_percentage {
            write!(f, "gas%={v:.0} ")?;
        }
        if let Some(v) = x.stabilized {
            write!(f, "stab={} ", u8::from(v))?;
        }
        if let Some(v) = x.run_in_complete {
            write!(f, "runin={}", u8::from(v))?;
        }
        Ok(())
    }
}

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Report(r) => {
                let env = &r.environment;
                info!(
                    "REPORT #{} | IAQ={:.1} ({}) | VOC={:.2}ppb | \
                     T={:.1}\u{00b0}C | RH={:.1}% | CO2={:.0}ppm | \
                     batt={}",
                    r.cycle,
                    r.iaq,
                    env.category.label(),
                    env.voc_ppb,
                    env.temperature_celsius,
                    env.relative_humidity_percent,
                    env.co2_equivalent_ppm,
                    BatteryField(r.battery_volts, r.battery),
                );
                if r.extras != FusionExtras::default() {
                    debug!("REPORT #{} | {}", r.cycle, ExtrasField(&r.extras));
                }
            }
            AppEvent::AirQualityChanged { from, to } => {
                info!("AIR | {} -> {}", from.label(), to.label());
            }
            AppEvent::BatteryLowChanged(true) => {
                warn!("BATT | low");
            }
            AppEvent::BatteryLowChanged(false) => {
                info!("BATT | recovered");
            }
            AppEvent::SensorFault(e) => {
                warn!("FAULT | {}", e);
            }
            AppEvent::Started => {
                info!("START | AirSense v{}", env!("CARGO_PKG_VERSION"));
            }
        }
    }
}
