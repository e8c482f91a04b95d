use serde_json::{Map, Value};

use super::error::DecodeError;
use super::layout;

/// Typed access to a positional field array (`evt`, `ob` or `obs[0]`).
pub struct SlotReader<'a> {
    slots: &'a [Value],
}

impl<'a> SlotReader<'a> {
    pub fn new(slots: &'a [Value]) -> Self {
        Self { slots }
    }

    /// Locate a flat positional array stored under `key`.
    pub fn from_key(doc: &'a Value, key: &'static str) -> Result<Self, DecodeError> {
        let value = object(doc)?
            .get(key)
            .ok_or(DecodeError::MissingKey { key })?;
        let slots = value.as_array().ok_or(DecodeError::NotAnArray { key })?;
        Ok(Self::new(slots))
    }

    /// Locate the first observation row of `obs`, an array of arrays.
    pub fn observation(doc: &'a Value) -> Result<Self, DecodeError> {
        let key = layout::OBSERVATION_KEY;
        let rows = Self::from_key(doc, key)?;
        let first = rows.slots.first().ok_or(DecodeError::EmptyObservation)?;
        let slots = first.as_array().ok_or(DecodeError::NotAnArray { key })?;
        Ok(Self::new(slots))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn require_len(&self, needed: usize) -> Result<(), DecodeError> {
        if self.slots.len() < needed {
            return Err(DecodeError::TooShort {
                needed,
                actual: self.slots.len(),
            });
        }
        Ok(())
    }

    pub fn read_epoch(&self, index: usize) -> Result<u64, DecodeError> {
        self.slot(index)
            .and_then(as_unsigned)
            .ok_or(DecodeError::InvalidSlot {
                index,
                expected: "epoch timestamp",
            })
    }

    pub fn read_f32(&self, index: usize) -> Result<f32, DecodeError> {
        self.slot(index)
            .and_then(Value::as_f64)
            .map(|value| value as f32)
            .ok_or(DecodeError::InvalidSlot {
                index,
                expected: "number",
            })
    }

    pub fn read_u32(&self, index: usize) -> Result<u32, DecodeError> {
        self.slot(index)
            .and_then(as_unsigned)
            .and_then(|value| u32::try_from(value).ok())
            .ok_or(DecodeError::InvalidSlot {
                index,
                expected: "unsigned integer",
            })
    }

    fn slot(&self, index: usize) -> Option<&'a Value> {
        self.slots.get(index)
    }
}

/// Named-field access with fallbacks for flat status messages.
///
/// Absent or mistyped keys yield the caller's default instead of an error.
pub struct FieldReader<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> FieldReader<'a> {
    pub fn new(doc: &'a Value) -> Result<Self, DecodeError> {
        Ok(Self {
            fields: object(doc)?,
        })
    }

    /// Non-empty string value of `key`.
    pub fn string(&self, key: &str) -> Option<String> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    pub fn unsigned(&self, key: &str) -> Option<u64> {
        self.fields.get(key).and_then(as_unsigned)
    }

    pub fn u64_or(&self, key: &str, default: u64) -> u64 {
        self.unsigned(key).unwrap_or(default)
    }

    pub fn u32_or(&self, key: &str, default: u32) -> u32 {
        self.unsigned(key)
            .and_then(|value| u32::try_from(value).ok())
            .unwrap_or(default)
    }

    pub fn i32_or(&self, key: &str, default: i32) -> i32 {
        self.fields
            .get(key)
            .and_then(as_signed)
            .and_then(|value| i32::try_from(value).ok())
            .unwrap_or(default)
    }

    pub fn f32_or(&self, key: &str, default: f32) -> f32 {
        self.fields
            .get(key)
            .and_then(Value::as_f64)
            .map(|value| value as f32)
            .unwrap_or(default)
    }
}

fn object(doc: &Value) -> Result<&Map<String, Value>, DecodeError> {
    doc.as_object().ok_or(DecodeError::NotAnObject)
}

/// Integer value of a JSON number, accepting whole-valued floats (`128.0`).
fn as_unsigned(value: &Value) -> Option<u64> {
    if let Some(int) = value.as_u64() {
        return Some(int);
    }
    let float = value.as_f64()?;
    if float >= 0.0 && float.fract() == 0.0 && float <= u64::MAX as f64 {
        Some(float as u64)
    } else {
        None
    }
}

fn as_signed(value: &Value) -> Option<i64> {
    if let Some(int) = value.as_i64() {
        return Some(int);
    }
    let float = value.as_f64()?;
    if float.fract() == 0.0 && float >= i64::MIN as f64 && float <= i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}
