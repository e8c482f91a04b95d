//! One-off event messages: rain start (`evt_precip`) and lightning strike
//! (`evt_strike`). Both carry their fields in the `evt` array.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Decode, Record};
use crate::protocol::MessageKind;
use crate::protocol::error::DecodeError;
use crate::protocol::layout::{self, lightning_strike, rain_start};
use crate::protocol::reader::SlotReader;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RainStartData {
    pub epoch: u64,
}

impl Decode for RainStartData {
    const KIND: MessageKind = MessageKind::RainStart;

    fn decode(doc: &Value) -> Result<Self, DecodeError> {
        let reader = SlotReader::from_key(doc, layout::EVENT_KEY)?;
        reader.require_len(rain_start::MIN_COUNT)?;
        Ok(Self {
            epoch: reader.read_epoch(rain_start::EPOCH)?,
        })
    }

    fn epoch(&self) -> u64 {
        self.epoch
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightningStrikeData {
    pub epoch: u64,
    /// Strike distance in km.
    pub distance: f32,
    pub energy: u32,
}

impl Decode for LightningStrikeData {
    const KIND: MessageKind = MessageKind::LightningStrike;

    fn decode(doc: &Value) -> Result<Self, DecodeError> {
        let reader = SlotReader::from_key(doc, layout::EVENT_KEY)?;
        reader.require_len(lightning_strike::MIN_COUNT)?;
        Ok(Self {
            epoch: reader.read_epoch(lightning_strike::EPOCH)?,
            distance: reader.read_f32(lightning_strike::DISTANCE)?,
            energy: reader.read_u32(lightning_strike::ENERGY)?,
        })
    }

    fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl Record<LightningStrikeData> {
    /// Strike distance in miles (Imperial) or km (Metric).
    pub fn distance(&self) -> f32 {
        self.units().distance(self.data().distance)
    }

    pub fn energy(&self) -> u32 {
        self.data().energy
    }
}
