use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Decode, Record};
use crate::protocol::MessageKind;
use crate::protocol::error::DecodeError;
use crate::protocol::layout::obs_air;
use crate::protocol::reader::SlotReader;

/// Air station observation (`obs_air`): pressure, temperature, humidity and
/// lightning totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationAirData {
    pub epoch: u64,
    /// hPa
    pub station_pressure: f32,
    /// °C
    pub air_temperature: f32,
    /// %
    pub relative_humidity: f32,
    pub lightning_strike_count: u32,
    /// km
    pub lightning_strike_avg_distance: f32,
    /// V
    pub battery: f32,
    /// minutes
    pub report_interval: u32,
}

impl Decode for ObservationAirData {
    const KIND: MessageKind = MessageKind::ObservationAir;

    fn decode(doc: &Value) -> Result<Self, DecodeError> {
        let reader = SlotReader::observation(doc)?;
        reader.require_len(obs_air::MIN_COUNT)?;
        Ok(Self {
            epoch: reader.read_epoch(obs_air::EPOCH)?,
            station_pressure: reader.read_f32(obs_air::STATION_PRESSURE)?,
            air_temperature: reader.read_f32(obs_air::AIR_TEMPERATURE)?,
            relative_humidity: reader.read_f32(obs_air::RELATIVE_HUMIDITY)?,
            lightning_strike_count: reader.read_u32(obs_air::STRIKE_COUNT)?,
            lightning_strike_avg_distance: reader.read_f32(obs_air::STRIKE_AVG_DISTANCE)?,
            battery: reader.read_f32(obs_air::BATTERY)?,
            report_interval: reader.read_u32(obs_air::REPORT_INTERVAL)?,
        })
    }

    fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl Record<ObservationAirData> {
    pub fn station_pressure(&self) -> f32 {
        self.units().pressure(self.data().station_pressure)
    }

    pub fn air_temperature(&self) -> f32 {
        self.units().temperature(self.data().air_temperature)
    }

    pub fn relative_humidity(&self) -> f32 {
        self.data().relative_humidity
    }

    pub fn lightning_strike_count(&self) -> u32 {
        self.data().lightning_strike_count
    }

    pub fn lightning_strike_avg_distance(&self) -> f32 {
        self.units().distance(self.data().lightning_strike_avg_distance)
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

    use crate::protocol::error::DecodeError;
    use crate::records::{Decode, ObservationAir, ObservationAirData};
    use crate::units::UnitSystem;

    fn air_doc() -> serde_json::Value {
        json!({
            "serial_number": "AR-00004049",
            "type": "obs_air",
            "hub_sn": "HB-00000001",
            "obs": [[1493164835, 835.0, 10.0, 45, 0, 0, 3.46, 1]],
            "firmware_revision": 17
        })
    }

    #[test]
    fn decodes_air_observation() {
        let data = ObservationAirData::decode(&air_doc()).unwrap();
        assert_eq!(data.epoch, 1493164835);
        assert_eq!(data.station_pressure, 835.0);
        assert_eq!(data.relative_humidity, 45.0);
        assert_eq!(data.lightning_strike_count, 0);
        assert_eq!(data.report_interval, 1);
    }

    #[test]
    fn seven_fields_are_too_few() {
        let doc = json!({"obs": [[1493164835, 835.0, 10.0, 45, 0, 0, 3.46]]});
        let err = ObservationAirData::decode(&doc).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TooShort {
                needed: 8,
                actual: 7
            }
        );
    }

    #[test]
    fn converted_accessors_and_identity() {
        let mut record = ObservationAir::new(UnitSystem::Imperial);
        record.update(&air_doc()).unwrap();
        assert!((record.air_temperature() - 50.0).abs() < 1e-3);
        assert!((record.station_pressure() - 835.0 / 33.864).abs() < 1e-3);
        assert_eq!(record.battery_voltage(), 3.46);
        assert_eq!(
            record.identity().serial_number.as_deref(),
            Some("AR-00004049")
        );
        assert_eq!(record.identity().firmware_revision, Some(17));
    }
}
