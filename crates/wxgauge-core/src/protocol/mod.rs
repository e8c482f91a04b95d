//! Hub UDP message protocol.
//!
//! Messages are JSON objects tagged by a `type` string. Each known type maps
//! to one [`MessageKind`]; the lookup table is static data so an unknown
//! type is a plain `None`, never a failed lookup.
//!
//! The module follows a layered structure:
//! - `layout`: wire keys, slot indices and minimum field counts
//! - `reader`: typed access to positional arrays and flat keys
//! - `error`: explicit decode and dispatch errors
//!
//! Record decoders built on these live in `crate::records`.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod error;
pub mod layout;
pub mod reader;

pub use error::{DecodeError, DispatchError};

/// Transport ceiling for a single hub datagram, in bytes.
pub const MAX_PAYLOAD_LEN: usize = 1460;
/// UDP port the hub broadcasts on.
pub const DEFAULT_UDP_PORT: u16 = 50222;

/// The closed set of message kinds this decoder understands. Serialized as
/// its wire `type` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum MessageKind {
    RainStart,
    LightningStrike,
    RapidWind,
    ObservationAir,
    ObservationSky,
    ObservationTempest,
    DeviceStatus,
    HubStatus,
}

/// `type` string → message kind.
pub const MESSAGE_TYPES: [(&str, MessageKind); 8] = [
    ("evt_precip", MessageKind::RainStart),
    ("evt_strike", MessageKind::LightningStrike),
    ("rapid_wind", MessageKind::RapidWind),
    ("obs_air", MessageKind::ObservationAir),
    ("obs_sky", MessageKind::ObservationSky),
    ("obs_st", MessageKind::ObservationTempest),
    ("device_status", MessageKind::DeviceStatus),
    ("hub_status", MessageKind::HubStatus),
];

impl MessageKind {
    /// Resolve a wire `type` string. Unknown strings return `None`.
    ///
    /// # Examples
    /// ```
    /// use wxgauge_core::MessageKind;
    ///
    /// assert_eq!(MessageKind::from_type("obs_st"), Some(MessageKind::ObservationTempest));
    /// assert_eq!(MessageKind::from_type("obs_unknown"), None);
    /// ```
    pub fn from_type(name: &str) -> Option<Self> {
        MESSAGE_TYPES
            .iter()
            .find(|(wire, _)| *wire == name)
            .map(|(_, kind)| *kind)
    }

    /// Wire `type` string for this kind.
    pub fn as_str(self) -> &'static str {
        MESSAGE_TYPES
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(wire, _)| *wire)
            .unwrap_or("unknown")
    }

    /// Whether converted accessors of this kind depend on the unit system.
    pub fn is_unit_sensitive(self) -> bool {
        !matches!(self, MessageKind::DeviceStatus | MessageKind::HubStatus)
    }

    /// Minimum positional field count, `None` for flat status messages.
    pub fn min_count(self) -> Option<usize> {
        match self {
            MessageKind::RainStart => Some(layout::rain_start::MIN_COUNT),
            MessageKind::LightningStrike => Some(layout::lightning_strike::MIN_COUNT),
            MessageKind::RapidWind => Some(layout::rapid_wind::MIN_COUNT),
            MessageKind::ObservationAir => Some(layout::obs_air::MIN_COUNT),
            MessageKind::ObservationSky => Some(layout::obs_sky::MIN_COUNT),
            MessageKind::ObservationTempest => Some(layout::obs_st::MIN_COUNT),
            MessageKind::DeviceStatus | MessageKind::HubStatus => None,
        }
    }
}

impl From<MessageKind> for &'static str {
    fn from(kind: MessageKind) -> Self {
        kind.as_str()
    }
}

impl TryFrom<String> for MessageKind {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        MessageKind::from_type(&name).ok_or_else(|| format!("unknown message type '{name}'"))
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{MESSAGE_TYPES, MessageKind};

    #[test]
    fn type_table_round_trips() {
        for (wire, kind) in MESSAGE_TYPES {
            assert_eq!(MessageKind::from_type(wire), Some(kind));
            assert_eq!(kind.as_str(), wire);
        }
    }

    #[test]
    fn serializes_as_wire_type() {
        let json = serde_json::to_string(&MessageKind::ObservationTempest).unwrap();
        assert_eq!(json, "\"obs_st\"");
        assert_eq!(
            serde_json::from_str::<MessageKind>("\"evt_precip\"").unwrap(),
            MessageKind::RainStart
        );
        assert!(serde_json::from_str::<MessageKind>("\"rain_start\"").is_err());
    }

    #[test]
    fn unknown_and_case_sensitive_types() {
        assert_eq!(MessageKind::from_type("obs_unknown"), None);
        assert_eq!(MessageKind::from_type("RAPID_WIND"), None);
        assert_eq!(MessageKind::from_type(""), None);
    }

    #[test]
    fn status_kinds_are_not_unit_sensitive() {
        let sensitive = MESSAGE_TYPES
            .iter()
            .filter(|(_, kind)| kind.is_unit_sensitive())
            .count();
        assert_eq!(sensitive, 6);
        assert!(!MessageKind::HubStatus.is_unit_sensitive());
        assert_eq!(MessageKind::DeviceStatus.min_count(), None);
        assert_eq!(MessageKind::ObservationTempest.min_count(), Some(18));
    }
}
