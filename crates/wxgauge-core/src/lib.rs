//! wxgauge core library: weather hub message decoding.
//!
//! A weather hub broadcasts one JSON message per UDP datagram. This crate
//! turns such a payload into typed, validated records that a gauge loop can
//! read: the [`WeatherStation`] dispatcher classifies the message by its
//! `type`, routes it to the decoder of that kind, and overwrites the single
//! record it keeps for the kind. Values are stored in the hub's native
//! metric units and converted on read through [`UnitSystem`].
//!
//! Decoding is pure and synchronous: no sockets, no files, no background
//! work. Receiving datagrams is the caller's job (see the `wxgauge` CLI).
//!
//! Invariants:
//! - A record's payload is meaningful only while `is_valid()` is `true`.
//! - Positional arrays shorter than a kind's minimum field count are
//!   rejected; longer arrays are accepted and the extra fields ignored.
//! - Unknown message types and malformed payloads leave every record as is.
//! - Changing the unit system empties every unit-sensitive record.
//!
//! # Examples
//! ```
//! use wxgauge_core::{UnitSystem, WeatherStation};
//!
//! let mut station = WeatherStation::new(UnitSystem::Metric);
//! let updated = station.dispatch(r#"{"type":"evt_strike","evt":[1588948614,6.0,18]}"#);
//! assert!(updated);
//! let strike = station.lightning_strike();
//! assert!(strike.is_valid());
//! assert_eq!(strike.distance(), 6.0);
//! assert_eq!(strike.energy(), 18);
//! ```

pub mod protocol;
pub mod records;
mod station;
mod units;

pub use protocol::{
    DEFAULT_UDP_PORT, DecodeError, DispatchError, MAX_PAYLOAD_LEN, MESSAGE_TYPES, MessageKind,
};
pub use records::{
    DebugMode, Decode, DeviceStatus, DeviceStatusData, HubStatus, HubStatusData, Identity,
    LightningStrike, LightningStrikeData, ObservationAir, ObservationAirData, ObservationSky,
    ObservationSkyData, ObservationTempest, ObservationTempestData, RainStart, RainStartData,
    RapidWind, RapidWindData, Record, SensorStatus, SkyPrecipitation, TempestPrecipitation,
};
pub use station::{StationSnapshot, WeatherStation};
pub use units::{
    HPA_PER_INHG, KM_PER_MILE, LUX_PER_FOOTCANDLE, MM_PER_INCH, MPH_PER_MPS,
    ParseUnitSystemError, UnitSystem,
};
