use thiserror::Error;

use super::MessageKind;

/// Shape errors raised while decoding one message into its record.
///
/// # Examples
/// ```
/// use wxgauge_core::DecodeError;
///
/// let err = DecodeError::TooShort { needed: 3, actual: 2 };
/// assert!(err.to_string().contains("need 3 fields, got 2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("message is not a JSON object")]
    NotAnObject,
    #[error("missing required key '{key}'")]
    MissingKey { key: &'static str },
    #[error("key '{key}' is not an array")]
    NotAnArray { key: &'static str },
    #[error("'obs' holds no observation row")]
    EmptyObservation,
    #[error("array too short: need {needed} fields, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("field {index} is not a valid {expected}")]
    InvalidSlot {
        index: usize,
        expected: &'static str,
    },
}

/// Errors returned by [`crate::WeatherStation::decode_message`].
///
/// `Malformed` and `UnknownType` leave every record untouched; `Decode`
/// invalidates the record the message was routed to.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("payload has no string 'type' field")]
    MissingType,
    #[error("unknown message type '{0}'")]
    UnknownType(String),
    #[error("{kind} rejected: {source}")]
    Decode {
        kind: MessageKind,
        #[source]
        source: DecodeError,
    },
}
