use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Decode, Record};
use crate::protocol::MessageKind;
use crate::protocol::error::DecodeError;
use crate::protocol::layout::obs_st;
use crate::protocol::reader::SlotReader;

/// Precipitation type reported by an all-in-one Tempest station. Unlike the
/// sky station it can report rain and hail together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TempestPrecipitation {
    #[default]
    None,
    Rain,
    Hail,
    RainPlusHail,
    Unknown(u32),
}

impl From<u32> for TempestPrecipitation {
    fn from(value: u32) -> Self {
        match value {
            0 => TempestPrecipitation::None,
            1 => TempestPrecipitation::Rain,
            2 => TempestPrecipitation::Hail,
            3 => TempestPrecipitation::RainPlusHail,
            other => TempestPrecipitation::Unknown(other),
        }
    }
}

/// Tempest observation (`obs_st`), the union of the air and sky readings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationTempestData {
    pub epoch: u64,
    /// m/s
    pub wind_lull: f32,
    /// m/s
    pub wind_average: f32,
    /// m/s
    pub wind_gust: f32,
    pub wind_direction: u32,
    /// seconds
    pub wind_sample_interval: u32,
    /// hPa
    pub station_pressure: f32,
    /// °C
    pub air_temperature: f32,
    /// %
    pub relative_humidity: f32,
    /// lux
    pub illuminance: f32,
    pub uv: f32,
    /// W/m²
    pub solar_radiation: f32,
    /// mm
    pub rain_previous_minute: f32,
    pub precipitation_type: TempestPrecipitation,
    /// km
    pub lightning_strike_avg_distance: f32,
    pub lightning_strike_count: u32,
    /// V
    pub battery: f32,
    /// minutes
    pub report_interval: u32,
}

impl Decode for ObservationTempestData {
    const KIND: MessageKind = MessageKind::ObservationTempest;

    fn decode(doc: &Value) -> Result<Self, DecodeError> {
        let reader = SlotReader::observation(doc)?;
        reader.require_len(obs_st::MIN_COUNT)?;
        Ok(Self {
            epoch: reader.read_epoch(obs_st::EPOCH)?,
            wind_lull: reader.read_f32(obs_st::WIND_LULL)?,
            wind_average: reader.read_f32(obs_st::WIND_AVERAGE)?,
            wind_gust: reader.read_f32(obs_st::WIND_GUST)?,
            wind_direction: reader.read_u32(obs_st::WIND_DIRECTION)?,
            wind_sample_interval: reader.read_u32(obs_st::WIND_SAMPLE_INTERVAL)?,
            station_pressure: reader.read_f32(obs_st::STATION_PRESSURE)?,
            air_temperature: reader.read_f32(obs_st::AIR_TEMPERATURE)?,
            relative_humidity: reader.read_f32(obs_st::RELATIVE_HUMIDITY)?,
            illuminance: reader.read_f32(obs_st::ILLUMINANCE)?,
            uv: reader.read_f32(obs_st::UV)?,
            solar_radiation: reader.read_f32(obs_st::SOLAR_RADIATION)?,
            rain_previous_minute: reader.read_f32(obs_st::RAIN_PREVIOUS_MINUTE)?,
            precipitation_type: reader.read_u32(obs_st::PRECIPITATION_TYPE)?.into(),
            lightning_strike_avg_distance: reader.read_f32(obs_st::STRIKE_AVG_DISTANCE)?,
            lightning_strike_count: reader.read_u32(obs_st::STRIKE_COUNT)?,
            battery: reader.read_f32(obs_st::BATTERY)?,
            report_interval: reader.read_u32(obs_st::REPORT_INTERVAL)?,
        })
    }

    fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl Record<ObservationTempestData> {
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

    pub fn wind_sample_interval(&self) -> u32 {
        self.data().wind_sample_interval
    }

    pub fn station_pressure(&self) -> f32 {
        self.units().pressure(self.data().station_pressure)
    }

    pub fn air_temperature(&self) -> f32 {
        self.units().temperature(self.data().air_temperature)
    }

    pub fn relative_humidity(&self) -> f32 {
        self.data().relative_humidity
    }

    pub fn illuminance(&self) -> f32 {
        self.units().illuminance(self.data().illuminance)
    }

    pub fn uv(&self) -> f32 {
        self.data().uv
    }

    pub fn solar_radiation(&self) -> f32 {
        self.units().radiation(self.data().solar_radiation)
    }

    pub fn rain_over_previous_minute(&self) -> f32 {
        self.units().precipitation(self.data().rain_previous_minute)
    }

    pub fn precipitation_type(&self) -> TempestPrecipitation {
        self.data().precipitation_type
    }

    pub fn lightning_strike_avg_distance(&self) -> f32 {
        self.units().distance(self.data().lightning_strike_avg_distance)
    }

    pub fn lightning_strike_count(&self) -> u32 {
        self.data().lightning_strike_count
    }

    pub fn battery_voltage(&self) -> f32 {
        self.data().battery
    }

    pub fn report_interval(&self) -> u32 {
        self.data().report_interval
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::TempestPrecipitation;
    use crate::records::{Decode, ObservationTempest, ObservationTempestData};
    use crate::units::UnitSystem;

    fn tempest_doc() -> serde_json::Value {
        json!({
            "serial_number": "ST-00000512",
            "type": "obs_st",
            "hub_sn": "HB-00013030",
            "obs": [[1588948614, 0.18, 0.22, 0.27, 144, 6, 1017.57, 22.0, 50.26, 328, 0.03, 3, 0.000000, 3, 0, 0, 2.410, 1]],
            "firmware_revision": 129
        })
    }

    #[test]
    fn decodes_all_eighteen_fields() {
        let data = ObservationTempestData::decode(&tempest_doc()).unwrap();
        assert_eq!(data.epoch, 1588948614);
        assert_eq!(data.wind_direction, 144);
        assert_eq!(data.wind_sample_interval, 6);
        assert_eq!(data.station_pressure, 1017.57);
        assert_eq!(data.illuminance, 328.0);
        assert_eq!(data.precipitation_type, TempestPrecipitation::RainPlusHail);
        assert_eq!(data.lightning_strike_count, 0);
        assert_eq!(data.report_interval, 1);
    }

    #[test]
    fn air_temperature_is_not_truncated() {
        let mut record = ObservationTempest::new(UnitSystem::Imperial);
        record.update(&tempest_doc()).unwrap();
        assert!((record.air_temperature() - 71.6).abs() < 1e-3);

        let mut metric = ObservationTempest::new(UnitSystem::Metric);
        metric.update(&tempest_doc()).unwrap();
        assert_eq!(metric.air_temperature(), 22.0);
        assert_eq!(metric.station_pressure(), 1017.57);
    }

    #[test]
    fn unknown_precipitation_code_keeps_observation() {
        let mut doc = tempest_doc();
        doc["obs"][0][13] = json!(7);
        let mut record = ObservationTempest::new(UnitSystem::Metric);
        record.update(&doc).unwrap();
        assert!(record.is_valid());
        assert_eq!(record.precipitation_type(), TempestPrecipitation::Unknown(7));
        assert_eq!(record.air_temperature(), 22.0);
    }

    #[test]
    fn null_sensor_value_rejects_observation() {
        let mut doc = tempest_doc();
        doc["obs"][0][7] = serde_json::Value::Null;
        assert!(ObservationTempestData::decode(&doc).is_err());
    }
}
