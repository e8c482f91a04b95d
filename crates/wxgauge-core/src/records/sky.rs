use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Decode, Record};
use crate::protocol::MessageKind;
use crate::protocol::error::DecodeError;
use crate::protocol::layout::obs_sky;
use crate::protocol::reader::SlotReader;

/// Precipitation type reported by a sky station. Codes newer firmware may
/// add are kept as `Unknown` so the rest of the observation stays usable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkyPrecipitation {
    #[default]
    None,
    Rain,
    Hail,
    Unknown(u32),
}

impl From<u32> for SkyPrecipitation {
    fn from(value: u32) -> Self {
        match value {
            0 => SkyPrecipitation::None,
            1 => SkyPrecipitation::Rain,
            2 => SkyPrecipitation::Hail,
            other => SkyPrecipitation::Unknown(other),
        }
    }
}

/// Sky station observation (`obs_sky`): light, rain and wind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationSkyData {
    pub epoch: u64,
    /// lux
    pub illuminance: f32,
    /// UV index
    pub uv: f32,
    /// mm over the previous minute
    pub rain_previous_minute: f32,
    /// m/s
    pub wind_lull: f32,
    /// m/s
    pub wind_average: f32,
    /// m/s
    pub wind_gust: f32,
    /// Degrees from north.
    pub wind_direction: u32,
    /// V
    pub battery: f32,
    /// minutes
    pub report_interval: u32,
    /// W/m²
    pub solar_radiation: f32,
    /// mm since local midnight
    pub local_day_rain_accumulation: f32,
    pub precipitation_type: SkyPrecipitation,
    /// seconds
    pub wind_sample_interval: u32,
}

impl Decode for ObservationSkyData {
    const KIND: MessageKind = MessageKind::ObservationSky;

    fn decode(doc: &Value) -> Result<Self, DecodeError> {
        let reader = SlotReader::observation(doc)?;
        reader.require_len(obs_sky::MIN_COUNT)?;
        Ok(Self {
            epoch: reader.read_epoch(obs_sky::EPOCH)?,
            illuminance: reader.read_f32(obs_sky::ILLUMINANCE)?,
            uv: reader.read_f32(obs_sky::UV)?,
            rain_previous_minute: reader.read_f32(obs_sky::RAIN_PREVIOUS_MINUTE)?,
            wind_lull: reader.read_f32(obs_sky::WIND_LULL)?,
            wind_average: reader.read_f32(obs_sky::WIND_AVERAGE)?,
            wind_gust: reader.read_f32(obs_sky::WIND_GUST)?,
            wind_direction: reader.read_u32(obs_sky::WIND_DIRECTION)?,
            battery: reader.read_f32(obs_sky::BATTERY)?,
            report_interval: reader.read_u32(obs_sky::REPORT_INTERVAL)?,
            solar_radiation: reader.read_f32(obs_sky::SOLAR_RADIATION)?,
            local_day_rain_accumulation: reader.read_f32(obs_sky::LOCAL_DAY_RAIN)?,
            precipitation_type: reader.read_u32(obs_sky::PRECIPITATION_TYPE)?.into(),
            wind_sample_interval: reader.read_u32(obs_sky::WIND_SAMPLE_INTERVAL)?,
        })
    }

    fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl Record<ObservationSkyData> {
    pub fn illuminance(&self) -> f32 {
        self.units().illuminance(self.data().illuminance)
    }

    pub fn uv(&self) -> f32 {
        self.data().uv
    }

    pub fn rain_over_previous_minute(&self) -> f32 {
        self.units().precipitation(self.data().rain_previous_minute)
    }

    pub fn wind_lull(&self) -> f32 {
        self.units().speed(self.data().wind_lull)
    }

    pub fn wind_average(&self) -> f32 {
        self.units().speed(self.data().wind_average)
    }

    pub fn wind_gust(&self) -> f32 {
        self.units().speed(self.data().wind_gust)
    }

    pub fn wind_direction(&self) -> u32 {
        self.data().wind_direction
    }

    pub fn battery_voltage(&self) -> f32 {
        self.data().battery
    }

    pub fn report_interval(&self) -> u32 {
        self.data().report_interval
    }

    pub fn solar_radiation(&self) -> f32 {
        self.units().radiation(self.data().solar_radiation)
    }

    pub fn local_day_rain_accumulation(&self) -> f32 {
        self.units()
            .precipitation(self.data().local_day_rain_accumulation)
    }

    pub fn precipitation_type(&self) -> SkyPrecipitation {
        self.data().precipitation_type
    }

    pub fn wind_sample_interval(&self) -> u32 {
        self.data().wind_sample_interval
    }
}
