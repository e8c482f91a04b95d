use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::protocol::error::{DecodeError, DispatchError};
use crate::protocol::{MessageKind, layout};
use crate::records::{
    DeviceStatus, HubStatus, LightningStrike, ObservationAir, ObservationSky, ObservationTempest,
    RainStart, RapidWind,
};
use crate::units::UnitSystem;

/// Message dispatcher owning the latest record of every message kind.
///
/// Each call decodes one complete payload and overwrites at most one record.
/// Readers check [`crate::Record::is_valid`] before trusting a record.
///
/// # Examples
/// ```
/// use wxgauge_core::{UnitSystem, WeatherStation};
///
/// let mut station = WeatherStation::new(UnitSystem::Imperial);
/// assert!(station.dispatch(r#"{"type":"rapid_wind","ob":[1588948614,2.3,128]}"#));
/// assert!(station.rapid_wind().is_valid());
/// assert_eq!(station.rapid_wind().wind_direction(), 128);
/// ```
#[derive(Debug, Clone)]
pub struct WeatherStation {
    units: UnitSystem,
    rain_start: RainStart,
    lightning_strike: LightningStrike,
    rapid_wind: RapidWind,
    observation_air: ObservationAir,
    observation_sky: ObservationSky,
    observation_tempest: ObservationTempest,
    device_status: DeviceStatus,
    hub_status: HubStatus,
}

/// Owned copy of every record, suitable for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSnapshot {
    pub units: UnitSystem,
    pub rain_start: RainStart,
    pub lightning_strike: LightningStrike,
    pub rapid_wind: RapidWind,
    pub observation_air: ObservationAir,
    pub observation_sky: ObservationSky,
    pub observation_tempest: ObservationTempest,
    pub device_status: DeviceStatus,
    pub hub_status: HubStatus,
}

impl WeatherStation {
    pub fn new(units: UnitSystem) -> Self {
        Self {
            units,
            rain_start: RainStart::new(units),
            lightning_strike: LightningStrike::new(units),
            rapid_wind: RapidWind::new(units),
            observation_air: ObservationAir::new(units),
            observation_sky: ObservationSky::new(units),
            observation_tempest: ObservationTempest::new(units),
            device_status: DeviceStatus::new(units),
            hub_status: HubStatus::new(units),
        }
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    /// Switch display units. Every unit-sensitive record is reset to empty;
    /// the two status records keep their contents.
    pub fn set_units(&mut self, units: UnitSystem) {
        debug!(from = %self.units, to = %units, "unit system changed, resetting records");
        self.units = units;
        self.rain_start.reset(units);
        self.lightning_strike.reset(units);
        self.rapid_wind.reset(units);
        self.observation_air.reset(units);
        self.observation_sky.reset(units);
        self.observation_tempest.reset(units);
        self.device_status.relabel(units);
        self.hub_status.relabel(units);
    }

    /// Decode one payload. Returns `true` when a record was updated.
    pub fn dispatch(&mut self, payload: &str) -> bool {
        self.decode_message(payload).is_ok()
    }

    /// Decode one payload, reporting which record was updated or why none was.
    pub fn decode_message(&mut self, payload: &str) -> Result<MessageKind, DispatchError> {
        let doc = serde_json::from_str::<Value>(payload).inspect_err(|err| {
            debug!(error = %err, len = payload.len(), "malformed payload ignored");
        })?;
        self.route(&doc)
    }

    /// Same as [`WeatherStation::decode_message`] for a raw datagram.
    /// Invalid UTF-8 is reported as a malformed payload.
    pub fn decode_datagram(&mut self, datagram: &[u8]) -> Result<MessageKind, DispatchError> {
        let doc = serde_json::from_slice::<Value>(datagram).inspect_err(|err| {
            debug!(error = %err, len = datagram.len(), "malformed datagram ignored");
        })?;
        self.route(&doc)
    }

    fn route(&mut self, doc: &Value) -> Result<MessageKind, DispatchError> {
        let type_name = doc
            .get(layout::TYPE_KEY)
            .and_then(Value::as_str)
            .ok_or(DispatchError::MissingType)?;
        let Some(kind) = MessageKind::from_type(type_name) else {
            debug!(message_type = type_name, "unknown message type ignored");
            return Err(DispatchError::UnknownType(type_name.to_string()));
        };

        match self.update(kind, doc) {
            Ok(()) => {
                debug!(%kind, epoch = self.epoch_of(kind), "record updated");
                Ok(kind)
            }
            Err(source) => {
                warn!(%kind, error = %source, "message rejected, record invalidated");
                Err(DispatchError::Decode { kind, source })
            }
        }
    }

    fn update(&mut self, kind: MessageKind, doc: &Value) -> Result<(), DecodeError> {
        match kind {
            MessageKind::RainStart => self.rain_start.update(doc),
            MessageKind::LightningStrike => self.lightning_strike.update(doc),
            MessageKind::RapidWind => self.rapid_wind.update(doc),
            MessageKind::ObservationAir => self.observation_air.update(doc),
            MessageKind::ObservationSky => self.observation_sky.update(doc),
            MessageKind::ObservationTempest => self.observation_tempest.update(doc),
            MessageKind::DeviceStatus => self.device_status.update(doc),
            MessageKind::HubStatus => self.hub_status.update(doc),
        }
    }

    /// Validity of the record held for `kind`.
    pub fn is_valid(&self, kind: MessageKind) -> bool {
        match kind {
            MessageKind::RainStart => self.rain_start.is_valid(),
            MessageKind::LightningStrike => self.lightning_strike.is_valid(),
            MessageKind::RapidWind => self.rapid_wind.is_valid(),
            MessageKind::ObservationAir => self.observation_air.is_valid(),
            MessageKind::ObservationSky => self.observation_sky.is_valid(),
            MessageKind::ObservationTempest => self.observation_tempest.is_valid(),
            MessageKind::DeviceStatus => self.device_status.is_valid(),
            MessageKind::HubStatus => self.hub_status.is_valid(),
        }
    }

    /// Epoch seconds of the record held for `kind`.
    pub fn epoch_of(&self, kind: MessageKind) -> u64 {
        match kind {
            MessageKind::RainStart => self.rain_start.epoch_time(),
            MessageKind::LightningStrike => self.lightning_strike.epoch_time(),
            MessageKind::RapidWind => self.rapid_wind.epoch_time(),
            MessageKind::ObservationAir => self.observation_air.epoch_time(),
            MessageKind::ObservationSky => self.observation_sky.epoch_time(),
            MessageKind::ObservationTempest => self.observation_tempest.epoch_time(),
            MessageKind::DeviceStatus => self.device_status.epoch_time(),
            MessageKind::HubStatus => self.hub_status.epoch_time(),
        }
    }

    pub fn rain_start(&self) -> &RainStart {
        &self.rain_start
    }

    pub fn lightning_strike(&self) -> &LightningStrike {
        &self.lightning_strike
    }

    pub fn rapid_wind(&self) -> &RapidWind {
        &self.rapid_wind
    }

    pub fn observation_air(&self) -> &ObservationAir {
        &self.observation_air
    }

    pub fn observation_sky(&self) -> &ObservationSky {
        &self.observation_sky
    }

    pub fn observation_tempest(&self) -> &ObservationTempest {
        &self.observation_tempest
    }

    pub fn device_status(&self) -> &DeviceStatus {
        &self.device_status
    }

    pub fn hub_status(&self) -> &HubStatus {
        &self.hub_status
    }

    pub fn snapshot(&self) -> StationSnapshot {
        StationSnapshot {
            units: self.units,
            rain_start: self.rain_start.clone(),
            lightning_strike: self.lightning_strike.clone(),
            rapid_wind: self.rapid_wind.clone(),
            observation_air: self.observation_air.clone(),
            observation_sky: self.observation_sky.clone(),
            observation_tempest: self.observation_tempest.clone(),
            device_status: self.device_status.clone(),
            hub_status: self.hub_status.clone(),
        }
    }
}

impl Default for WeatherStation {
    fn default() -> Self {
        Self::new(UnitSystem::default())
    }
}
