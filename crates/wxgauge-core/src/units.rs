//! Display unit systems and native-unit conversions.
//!
//! The hub always reports metric values (m/s, hPa, °C, km, lux, W/m², mm).
//! Records keep those native values untouched and convert on read through
//! [`UnitSystem`], so a conversion never mutates stored data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Miles per hour in one metre per second.
pub const MPH_PER_MPS: f32 = 2.237;
/// Hectopascals in one inch of mercury.
pub const HPA_PER_INHG: f32 = 33.864;
/// Kilometres in one statute mile.
pub const KM_PER_MILE: f32 = 1.609;
/// Lux in one foot-candle (also square feet in one square metre).
pub const LUX_PER_FOOTCANDLE: f32 = 10.764;
/// Millimetres in one inch.
pub const MM_PER_INCH: f32 = 25.4;

/// Unit system used by converted record accessors.
///
/// # Examples
/// ```
/// use wxgauge_core::UnitSystem;
///
/// assert!((UnitSystem::Imperial.speed(10.0) - 22.37).abs() < 1e-4);
/// assert_eq!(UnitSystem::Metric.speed(10.0), 10.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Imperial,
    Metric,
}

impl UnitSystem {
    /// m/s → mph.
    pub fn speed(self, mps: f32) -> f32 {
        match self {
            UnitSystem::Imperial => mps * MPH_PER_MPS,
            UnitSystem::Metric => mps,
        }
    }

    /// hPa → inHg.
    pub fn pressure(self, hpa: f32) -> f32 {
        match self {
            UnitSystem::Imperial => hpa / HPA_PER_INHG,
            UnitSystem::Metric => hpa,
        }
    }

    /// °C → °F, computed in floating point.
    pub fn temperature(self, celsius: f32) -> f32 {
        match self {
            UnitSystem::Imperial => celsius * 9.0 / 5.0 + 32.0,
            UnitSystem::Metric => celsius,
        }
    }

    /// km → miles.
    pub fn distance(self, km: f32) -> f32 {
        match self {
            UnitSystem::Imperial => km / KM_PER_MILE,
            UnitSystem::Metric => km,
        }
    }

    /// lux → foot-candles.
    pub fn illuminance(self, lux: f32) -> f32 {
        match self {
            UnitSystem::Imperial => lux / LUX_PER_FOOTCANDLE,
            UnitSystem::Metric => lux,
        }
    }

    /// W/m² → W/ft².
    pub fn radiation(self, w_per_m2: f32) -> f32 {
        match self {
            UnitSystem::Imperial => w_per_m2 / LUX_PER_FOOTCANDLE,
            UnitSystem::Metric => w_per_m2,
        }
    }

    /// mm → inches.
    pub fn precipitation(self, mm: f32) -> f32 {
        match self {
            UnitSystem::Imperial => mm / MM_PER_INCH,
            UnitSystem::Metric => mm,
        }
    }

    /// Unit label for speeds.
    pub fn speed_label(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "mph",
            UnitSystem::Metric => "m/s",
        }
    }

    /// Unit label for temperatures.
    pub fn temperature_label(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "°F",
            UnitSystem::Metric => "°C",
        }
    }

    /// Unit label for distances.
    pub fn distance_label(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "mi",
            UnitSystem::Metric => "km",
        }
    }

    /// Unit label for pressures.
    pub fn pressure_label(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "inHg",
            UnitSystem::Metric => "hPa",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "imperial",
            UnitSystem::Metric => "metric",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a unit system name is not recognized.
#[derive(Debug, thiserror::Error)]
#[error("unknown unit system '{0}' (expected 'imperial' or 'metric')")]
pub struct ParseUnitSystemError(String);

impl FromStr for UnitSystem {
    type Err = ParseUnitSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "imperial" => Ok(UnitSystem::Imperial),
            "metric" => Ok(UnitSystem::Metric),
            _ => Err(ParseUnitSystemError(s.to_string())),
        }
    }
}
