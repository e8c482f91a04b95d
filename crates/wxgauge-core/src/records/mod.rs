//! Typed observation records.
//!
//! Every message kind decodes into one `T: Decode` payload held inside a
//! [`Record<T>`]. The record carries the payload in the hub's native metric
//! units, the reporting identity, a validity flag and the unit system its
//! converted accessors use.
//!
//! Record lifecycle: `new` (empty, invalid) → successful `update` (valid) →
//! failed `update` or unit change (invalid again). Payload values are only
//! meaningful while [`Record::is_valid`] returns `true`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::protocol::MessageKind;
use crate::protocol::error::DecodeError;
use crate::protocol::layout;
use crate::protocol::reader::FieldReader;
use crate::units::UnitSystem;

pub mod air;
pub mod event;
pub mod sky;
pub mod status;
pub mod tempest;
pub mod wind;

pub use air::ObservationAirData;
pub use event::{LightningStrikeData, RainStartData};
pub use sky::{ObservationSkyData, SkyPrecipitation};
pub use status::{DebugMode, DeviceStatusData, HubStatusData, SensorStatus};
pub use tempest::{ObservationTempestData, TempestPrecipitation};
pub use wind::RapidWindData;

pub type RainStart = Record<RainStartData>;
pub type LightningStrike = Record<LightningStrikeData>;
pub type RapidWind = Record<RapidWindData>;
pub type ObservationAir = Record<ObservationAirData>;
pub type ObservationSky = Record<ObservationSkyData>;
pub type ObservationTempest = Record<ObservationTempestData>;
pub type DeviceStatus = Record<DeviceStatusData>;
pub type HubStatus = Record<HubStatusData>;

/// Payload decoder for one message kind.
pub trait Decode: Default + Sized {
    const KIND: MessageKind;

    /// Decode the payload fields. Must not touch any existing state.
    fn decode(doc: &Value) -> Result<Self, DecodeError>;

    /// Reporting identity carried next to the payload.
    fn identity(doc: &Value) -> Identity {
        Identity::read(doc)
    }

    /// Epoch seconds carried by the message (0 when absent).
    fn epoch(&self) -> u64;
}

/// Station / hub identity. Early protocol revisions omit all three keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hub_sn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware_revision: Option<u32>,
}

impl Identity {
    pub(crate) fn read(doc: &Value) -> Self {
        let Ok(fields) = FieldReader::new(doc) else {
            return Self::default();
        };
        Self {
            serial_number: fields.string(layout::SERIAL_NUMBER_KEY),
            hub_sn: fields.string(layout::HUB_SN_KEY),
            firmware_revision: fields
                .unsigned(layout::FIRMWARE_REVISION_KEY)
                .and_then(|value| u32::try_from(value).ok()),
        }
    }
}

/// The current decoded state of one message kind.
///
/// # Examples
/// ```
/// use wxgauge_core::{RapidWind, UnitSystem};
///
/// let record = RapidWind::new(UnitSystem::Metric);
/// assert!(!record.is_valid());
/// assert_eq!(record.units(), UnitSystem::Metric);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    units: UnitSystem,
    valid: bool,
    identity: Identity,
    data: T,
}

impl<T: Decode> Record<T> {
    pub fn new(units: UnitSystem) -> Self {
        Self {
            units,
            valid: false,
            identity: Identity::default(),
            data: T::default(),
        }
    }

    pub fn kind(&self) -> MessageKind {
        T::KIND
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Raw payload in native metric units.
    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn epoch_time(&self) -> u64 {
        self.data.epoch()
    }

    /// Message timestamp, when the record holds one.
    pub fn observed_at(&self) -> Option<OffsetDateTime> {
        let epoch = self.epoch_time();
        if !self.valid || epoch == 0 {
            return None;
        }
        i64::try_from(epoch)
            .ok()
            .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
    }

    pub fn observed_at_rfc3339(&self) -> Option<String> {
        self.observed_at().and_then(|ts| ts.format(&Rfc3339).ok())
    }

    /// Overwrite the record from `doc`. On failure the record is left
    /// invalid; its previous payload is kept but must not be trusted.
    pub(crate) fn update(&mut self, doc: &Value) -> Result<(), DecodeError> {
        match T::decode(doc) {
            Ok(data) => {
                self.identity = T::identity(doc);
                self.data = data;
                self.valid = true;
                Ok(())
            }
            Err(err) => {
                self.valid = false;
                Err(err)
            }
        }
    }

    pub(crate) fn reset(&mut self, units: UnitSystem) {
        *self = Self::new(units);
    }

    /// Change the unit system without touching the payload. Only for kinds
    /// whose accessors do not convert.
    pub(crate) fn relabel(&mut self, units: UnitSystem) {
        debug_assert!(!T::KIND.is_unit_sensitive());
        self.units = units;
    }
}

impl<T: Decode> Default for Record<T> {
    fn default() -> Self {
        Self::new(UnitSystem::default())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Identity, RapidWind};
    use crate::units::UnitSystem;

    #[test]
    fn identity_keys_are_optional() {
        let full = json!({
            "serial_number": "SK-00008453",
            "hub_sn": "HB-00000001",
            "firmware_revision": 17,
        });
        let identity = Identity::read(&full);
        assert_eq!(identity.serial_number.as_deref(), Some("SK-00008453"));
        assert_eq!(identity.hub_sn.as_deref(), Some("HB-00000001"));
        assert_eq!(identity.firmware_revision, Some(17));

        assert_eq!(Identity::read(&json!({"type": "rapid_wind"})), Identity::default());
    }

    #[test]
    fn failed_update_invalidates() {
        let mut record = RapidWind::new(UnitSystem::Metric);
        record
            .update(&json!({"ob": [1588948614, 2.3, 128]}))
            .unwrap();
        assert!(record.is_valid());

        assert!(record.update(&json!({"ob": [1588948620, 2.3]})).is_err());
        assert!(!record.is_valid());
    }

    #[test]
    fn observed_at_formats_rfc3339() {
        let mut record = RapidWind::new(UnitSystem::Metric);
        assert_eq!(record.observed_at(), None);
        record.update(&json!({"ob": [1588948614, 2.3, 128]})).unwrap();
        assert_eq!(
            record.observed_at_rfc3339().as_deref(),
            Some("2020-05-08T14:36:54Z")
        );
    }

    #[test]
    fn reset_clears_payload() {
        let mut record = RapidWind::new(UnitSystem::Imperial);
        record.update(&json!({"ob": [1588948614, 2.3, 128]})).unwrap();
        record.reset(UnitSystem::Metric);
        assert!(!record.is_valid());
        assert_eq!(record.units(), UnitSystem::Metric);
        assert_eq!(record.epoch_time(), 0);
    }
}
