//! Flat status messages (`device_status`, `hub_status`).
//!
//! These use named keys instead of positional arrays. Missing or mistyped
//! keys fall back to zero / empty values, so a status message only fails to
//! decode when it is not a JSON object at all.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Decode, Identity, Record};
use crate::protocol::MessageKind;
use crate::protocol::error::DecodeError;
use crate::protocol::layout::{self, device_status, hub_status};
use crate::protocol::reader::FieldReader;

/// Sensor failure bitmask from `device_status`.
///
/// # Examples
/// ```
/// use wxgauge_core::SensorStatus;
///
/// let status = SensorStatus::from_bits(0x0000_0048);
/// assert!(status.pressure_failed());
/// assert!(status.wind_failed());
/// assert!(!status.is_ok());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorStatus(u32);

impl SensorStatus {
    pub const LIGHTNING_FAILED: u32 = 0x0000_0001;
    pub const LIGHTNING_NOISE: u32 = 0x0000_0002;
    pub const LIGHTNING_DISTURBER: u32 = 0x0000_0004;
    pub const PRESSURE_FAILED: u32 = 0x0000_0008;
    pub const TEMPERATURE_FAILED: u32 = 0x0000_0010;
    pub const HUMIDITY_FAILED: u32 = 0x0000_0020;
    pub const WIND_FAILED: u32 = 0x0000_0040;
    pub const PRECIPITATION_FAILED: u32 = 0x0000_0080;
    pub const LIGHT_UV_FAILED: u32 = 0x0000_0100;
    pub const POWER_BOOSTER_DEPLETED: u32 = 0x0000_8000;
    pub const POWER_BOOSTER_SHORE_POWER: u32 = 0x0001_0000;

    /// Bits that report a sensor fault. Power booster bits are state only.
    pub const FAILURE_MASK: u32 = 0x0000_01ff;

    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, flag: u32) -> bool {
        self.0 & flag == flag
    }

    pub fn is_ok(self) -> bool {
        self.0 & Self::FAILURE_MASK == 0
    }

    pub fn lightning_failed(self) -> bool {
        self.contains(Self::LIGHTNING_FAILED)
    }

    pub fn lightning_noise(self) -> bool {
        self.contains(Self::LIGHTNING_NOISE)
    }

    pub fn lightning_disturber(self) -> bool {
        self.contains(Self::LIGHTNING_DISTURBER)
    }

    pub fn pressure_failed(self) -> bool {
        self.contains(Self::PRESSURE_FAILED)
    }

    pub fn temperature_failed(self) -> bool {
        self.contains(Self::TEMPERATURE_FAILED)
    }

    pub fn humidity_failed(self) -> bool {
        self.contains(Self::HUMIDITY_FAILED)
    }

    pub fn wind_failed(self) -> bool {
        self.contains(Self::WIND_FAILED)
    }

    pub fn precipitation_failed(self) -> bool {
        self.contains(Self::PRECIPITATION_FAILED)
    }

    pub fn light_uv_failed(self) -> bool {
        self.contains(Self::LIGHT_UV_FAILED)
    }

    pub fn power_booster_depleted(self) -> bool {
        self.contains(Self::POWER_BOOSTER_DEPLETED)
    }

    pub fn power_booster_shore_power(self) -> bool {
        self.contains(Self::POWER_BOOSTER_SHORE_POWER)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebugMode {
    #[default]
    Disabled,
    Enabled,
}

impl From<u32> for DebugMode {
    fn from(value: u32) -> Self {
        if value == 0 {
            DebugMode::Disabled
        } else {
            DebugMode::Enabled
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceStatusData {
    pub timestamp: u64,
    /// seconds
    pub uptime: u64,
    /// V
    pub voltage: f32,
    /// dBm
    pub rssi: i32,
    /// dBm
    pub hub_rssi: i32,
    pub sensor_status: SensorStatus,
    pub debug: DebugMode,
}

impl Decode for DeviceStatusData {
    const KIND: MessageKind = MessageKind::DeviceStatus;

    fn decode(doc: &Value) -> Result<Self, DecodeError> {
        let fields = FieldReader::new(doc)?;
        Ok(Self {
            timestamp: fields.u64_or(device_status::TIMESTAMP, 0),
            uptime: fields.u64_or(device_status::UPTIME, 0),
            voltage: fields.f32_or(device_status::VOLTAGE, 0.0),
            rssi: fields.i32_or(device_status::RSSI, 0),
            hub_rssi: fields.i32_or(device_status::HUB_RSSI, 0),
            sensor_status: SensorStatus::from_bits(fields.u32_or(device_status::SENSOR_STATUS, 0)),
            debug: DebugMode::from(fields.u32_or(device_status::DEBUG, 0)),
        })
    }

    fn epoch(&self) -> u64 {
        self.timestamp
    }
}

impl Record<DeviceStatusData> {
    pub fn uptime(&self) -> u64 {
        self.data().uptime
    }

    pub fn voltage(&self) -> f32 {
        self.data().voltage
    }

    pub fn firmware_revision(&self) -> u32 {
        self.identity().firmware_revision.unwrap_or(0)
    }

    pub fn rssi(&self) -> i32 {
        self.data().rssi
    }

    pub fn hub_rssi(&self) -> i32 {
        self.data().hub_rssi
    }

    pub fn sensor_status(&self) -> SensorStatus {
        self.data().sensor_status
    }

    pub fn debug(&self) -> DebugMode {
        self.data().debug
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HubStatusData {
    /// Hub firmware is reported as a string, unlike station firmware.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware_revision: Option<String>,
    pub timestamp: u64,
    /// seconds
    pub uptime: u64,
    /// dBm
    pub rssi: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_flags: Option<String>,
    pub seq: u32,
}

impl Decode for HubStatusData {
    const KIND: MessageKind = MessageKind::HubStatus;

    fn decode(doc: &Value) -> Result<Self, DecodeError> {
        let fields = FieldReader::new(doc)?;
        Ok(Self {
            firmware_revision: fields.string(layout::FIRMWARE_REVISION_KEY),
            timestamp: fields.u64_or(hub_status::TIMESTAMP, 0),
            uptime: fields.u64_or(hub_status::UPTIME, 0),
            rssi: fields.i32_or(hub_status::RSSI, 0),
            reset_flags: fields.string(hub_status::RESET_FLAGS),
            seq: fields.u32_or(hub_status::SEQ, 0),
        })
    }

    /// A hub's own `serial_number` is the hub serial.
    fn identity(doc: &Value) -> Identity {
        let hub_sn = FieldReader::new(doc)
            .ok()
            .and_then(|fields| fields.string(layout::SERIAL_NUMBER_KEY));
        Identity {
            serial_number: None,
            hub_sn,
            firmware_revision: None,
        }
    }

    fn epoch(&self) -> u64 {
        self.timestamp
    }
}

impl Record<HubStatusData> {
    pub fn hub_serial(&self) -> Option<&str> {
        self.identity().hub_sn.as_deref()
    }

    pub fn firmware_revision(&self) -> Option<&str> {
        self.data().firmware_revision.as_deref()
    }

    pub fn uptime(&self) -> u64 {
        self.data().uptime
    }

    pub fn rssi(&self) -> i32 {
        self.data().rssi
    }

    pub fn reset_flags(&self) -> Option<&str> {
        self.data().reset_flags.as_deref()
    }

    pub fn seq(&self) -> u32 {
        self.data().seq
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{DebugMode, SensorStatus};
    use crate::protocol::error::DecodeError;
    use crate::records::{Decode, DeviceStatus, DeviceStatusData, HubStatus};
    use crate::units::UnitSystem;

    #[test]
    fn device_status_reads_named_fields() {
        let doc = json!({
            "serial_number": "AR-00004049",
            "type": "device_status",
            "hub_sn": "HB-00000001",
            "timestamp": 1510855923,
            "uptime": 2189,
            "voltage": 3.50,
            "firmware_revision": 17,
            "rssi": -17,
            "hub_rssi": -87,
            "sensor_status": 0,
            "debug": 1
        });
        let mut record = DeviceStatus::new(UnitSystem::Imperial);
        record.update(&doc).unwrap();
        assert!(record.is_valid());
        assert_eq!(record.epoch_time(), 1510855923);
        assert_eq!(record.uptime(), 2189);
        assert_eq!(record.voltage(), 3.5);
        assert_eq!(record.firmware_revision(), 17);
        assert_eq!(record.rssi(), -17);
        assert_eq!(record.hub_rssi(), -87);
        assert!(record.sensor_status().is_ok());
        assert_eq!(record.debug(), DebugMode::Enabled);
        assert_eq!(record.identity().hub_sn.as_deref(), Some("HB-00000001"));
    }

    #[test]
    fn device_status_defaults_missing_keys() {
        let data = DeviceStatusData::decode(&json!({"type": "device_status"})).unwrap();
        assert_eq!(data, DeviceStatusData::default());
    }

    #[test]
    fn device_status_requires_object() {
        let err = DeviceStatusData::decode(&json!("device_status")).unwrap_err();
        assert_eq!(err, DecodeError::NotAnObject);
    }

    #[test]
    fn sensor_status_bits() {
        let status = SensorStatus::from_bits(
            SensorStatus::LIGHTNING_NOISE | SensorStatus::POWER_BOOSTER_SHORE_POWER,
        );
        assert!(status.lightning_noise());
        assert!(status.power_booster_shore_power());
        assert!(!status.lightning_failed());
        assert!(!status.is_ok());

        let booster_only = SensorStatus::from_bits(SensorStatus::POWER_BOOSTER_DEPLETED);
        assert!(booster_only.is_ok());
        assert!(booster_only.power_booster_depleted());
    }

    #[test]
    fn hub_status_uses_serial_as_hub_serial() {
        let doc = json!({
            "serial_number": "HB-00000001",
            "type": "hub_status",
            "firmware_revision": "35",
            "uptime": 1670133,
            "rssi": -62,
            "timestamp": 1495724691,
            "reset_flags": "BOR,PIN,POR",
            "seq": 48,
            "fs": [1, 0, 15675411, 524288],
            "radio_stats": [2, 1, 0, 3, 2839],
            "mqtt_stats": [1, 0]
        });
        let mut record = HubStatus::new(UnitSystem::Metric);
        record.update(&doc).unwrap();
        assert_eq!(record.hub_serial(), Some("HB-00000001"));
        assert_eq!(record.identity().serial_number, None);
        assert_eq!(record.firmware_revision(), Some("35"));
        assert_eq!(record.reset_flags(), Some("BOR,PIN,POR"));
        assert_eq!(record.seq(), 48);
        assert_eq!(record.rssi(), -62);
        assert_eq!(record.uptime(), 1670133);
    }
}
