//! JSON codec for the persisted guestbook slot.
//!
//! The slot holds a bare JSON array of messages with no version field.
//! Anything else is corrupt.

use crate::model::message::Message;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why a stored payload could not be decoded.
#[derive(Debug)]
pub enum PayloadError {
    /// Not JSON at all.
    Malformed(serde_json::Error),
    /// Valid JSON whose top level is not an array.
    NotAnArray,
    /// An array whose elements do not match the message shape.
    InvalidEntry(serde_json::Error),
    /// Serialization failed.
    Encode(serde_json::Error),
}

impl Display for PayloadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "payload is not valid JSON: {err}"),
            Self::NotAnArray => write!(f, "payload is not a JSON array"),
            Self::InvalidEntry(err) => write!(f, "payload entry has invalid shape: {err}"),
            Self::Encode(err) => write!(f, "failed to encode payload: {err}"),
        }
    }
}

impl Error for PayloadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) | Self::InvalidEntry(err) | Self::Encode(err) => Some(err),
            Self::NotAnArray => None,
        }
    }
}

/// Encodes messages in collection order.
pub fn encode_messages(messages: &[Message]) -> Result<String, PayloadError> {
    serde_json::to_string(messages).map_err(PayloadError::Encode)
}

/// Decodes a stored slot, preserving element order.
pub fn decode_messages(raw: &str) -> Result<Vec<Message>, PayloadError> {
    let value: Value = serde_json::from_str(raw).map_err(PayloadError::Malformed)?;
    if !value.is_array() {
        return Err(PayloadError::NotAnArray);
    }
    serde_json::from_value(value).map_err(PayloadError::InvalidEntry)
}
