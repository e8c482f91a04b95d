use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Decode, Record};
use crate::protocol::MessageKind;
use crate::protocol::error::DecodeError;
use crate::protocol::layout::{self, rapid_wind};
use crate::protocol::reader::SlotReader;

/// Rapid wind sample (`rapid_wind`), sent every few seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RapidWindData {
    pub epoch: u64,
    /// m/s
    pub wind_speed: f32,
    /// Degrees from north.
    pub wind_direction: u32,
}

impl Decode for RapidWindData {
    const KIND: MessageKind = MessageKind::RapidWind;

    fn decode(doc: &Value) -> Result<Self, DecodeError> {
        let reader = SlotReader::from_key(doc, layout::RAPID_KEY)?;
        reader.require_len(rapid_wind::MIN_COUNT)?;
        Ok(Self {
            epoch: reader.read_epoch(rapid_wind::EPOCH)?,
            wind_speed: reader.read_f32(rapid_wind::WIND_SPEED)?,
            wind_direction: reader.read_u32(rapid_wind::WIND_DIRECTION)?,
        })
    }

    fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl Record<RapidWindData> {
    pub fn wind_speed(&self) -> f32 {
        self.units().speed(self.data().wind_speed)
    }

    pub fn wind_direction(&self) -> u32 {
        self.data().wind_direction
    }
}
