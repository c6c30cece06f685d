//! IAQ score → five-level air-quality category.
//!
//! Ties resolve toward the better category: an IAQ of exactly 50 is
//! `Excellent`, 50.01 is `Good`.  The other fused readings (VOC,
//! temperature, humidity, CO2-equivalent) pass through untouched.
//!
//! NaN IAQ is reported as `Poor`; an unreadable score is treated as the
//! worst case.

use serde::{Deserialize, Serialize};

pub const IAQ_EXCELLENT_MAX: f32 = 50.0;
pub const IAQ_GOOD_MAX: f32 = 100.0;
pub const IAQ_FAIR_MAX: f32 = 150.0;
pub const IAQ_INFERIOR_MAX: f32 = 200.0;

/// One fusion cycle's worth of derived readings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EnvironmentalReading {
    /// Index of Air Quality, unitless (0–500).
    pub index_air_quality: f32,
    /// Breath-VOC equivalent, ppb.
    pub voc_ppb: f32,
    pub temperature_celsius: f32,
    pub relative_humidity_percent: f32,
    /// CO2 equivalent, ppm.
    pub co2_equivalent_ppm: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AirQualityCategory {
    Excellent,
    Good,
    Fair,
    Inferior,
    Poor,
}

impl AirQualityCategory {
    /// Accessory AirQuality characteristic code (1 = Excellent … 5 = Poor).
    pub const fn characteristic_value(self) -> u8 {
        match self {
            Self::Excellent => 1,
            Self::Good => 2,
            Self::Fair => 3,
            Self::Inferior => 4,
            Self::Poor => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Inferior => "inferior",
            Self::Poor => "poor",
        }
    }
}

/// Classified environmental output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalStatus {
    pub category: AirQualityCategory,
    pub voc_ppb: f32,
    pub temperature_celsius: f32,
    pub relative_humidity_percent: f32,
    pub co2_equivalent_ppm: f32,
}

/// Upper (inclusive) IAQ bound of each category; anything above
/// `inferior_max` is `Poor`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IaqThresholds {
    pub excellent_max: f32,
    pub good_max: f32,
    pub fair_max: f32,
    pub inferior_max: f32,
}

impl Default for IaqThresholds {
    fn default() -> Self {
        Self {
            excellent_max: IAQ_EXCELLENT_MAX,
            good_max: IAQ_GOOD_MAX,
            fair_max: IAQ_FAIR_MAX,
            inferior_max: IAQ_INFERIOR_MAX,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AirQualityClassifier {
    thresholds: IaqThresholds,
}

impl AirQualityClassifier {
    pub fn new(thresholds: IaqThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &IaqThresholds {
        &self.thresholds
    }

    /// Bucket a raw IAQ score.
    pub fn category(&self, iaq: f32) -> AirQualityCategory {
        let t = &self.thresholds;
        if iaq.is_nan() {
            return AirQualityCategory::Poor;
        }
        if iaq <= t.excellent_max {
            AirQualityCategory::Excellent
        } else if iaq <= t.good_max {
            AirQualityCategory::Good
        } else if iaq <= t.fair_max {
            AirQualityCategory::Fair
        } else if iaq <= t.inferior_max {
            AirQualityCategory::Inferior
        } else {
            AirQualityCategory::Poor
        }
    }

    pub fn classify(&self, reading: EnvironmentalReading) -> EnvironmentalStatus {
        EnvironmentalStatus {
            category: self.category(reading.index_air_quality),
            voc_ppb: reading.voc_ppb,
            temperature_celsius: reading.temperature_celsius,
            relative_humidity_percent: reading.relative_humidity_percent,
            co2_equivalent_ppm: reading.co2_equivalent_ppm,
        }
    }
}
