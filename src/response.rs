//! Response value with typed accessors.
//!
//! A [`Response`] wraps one decoded frame together with the key that was
//! queried. It is created fresh per query and immutable afterwards. The
//! accessors parse the payload text locally; none of them touch the network.

use std::borrow::Cow;

use bytes::Bytes;

use crate::error::{Result, ZabbixError};
use crate::protocol::{Frame, HEADER_SIZE, NOT_SUPPORTED};

/// The agent's answer to a single query.
#[derive(Debug, Clone)]
pub struct Response {
    key: String,
    header: [u8; HEADER_SIZE],
    declared_len: u64,
    payload: Bytes,
}

/// Best-effort typed view of a payload, produced by [`Response::value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Response {
    pub(crate) fn new(key: impl Into<String>, frame: Frame) -> Self {
        Self {
            key: key.into(),
            header: frame.header,
            declared_len: frame.declared_len,
            payload: frame.payload,
        }
    }

    /// The key that was sent to the agent for this response.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw header bytes, normally `ZBXD\x01`.
    pub fn header(&self) -> &[u8] {
        &self.header
    }

    /// The payload length the agent declared. Informational only; the
    /// payload itself is read to end of stream.
    pub fn declared_len(&self) -> u64 {
        self.declared_len
    }

    /// Raw payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload as text, with invalid UTF-8 replaced.
    pub fn payload_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }

    /// Whether the agent recognized the key. False when the payload carries
    /// the `ZBX_NOTSUPPORTED` marker.
    pub fn supported(&self) -> bool {
        !self.payload_str().contains(NOT_SUPPORTED)
    }

    /// Payload as an owned string.
    pub fn as_str(&self) -> String {
        self.payload_str().into_owned()
    }

    /// Parse the payload as a boolean. Accepts `1`, `t`, `true` and
    /// `0`, `f`, `false` in any common casing.
    pub fn as_bool(&self) -> Result<bool> {
        let text = self.payload_str();
        parse_bool(&text).ok_or_else(|| conversion_error(&text, "bool"))
    }

    /// Parse the payload as an `i32`.
    pub fn as_int(&self) -> Result<i32> {
        let text = self.payload_str();
        text.parse().map_err(|_| conversion_error(&text, "i32"))
    }

    /// Parse the payload as an `i64`.
    pub fn as_i64(&self) -> Result<i64> {
        let text = self.payload_str();
        text.parse().map_err(|_| conversion_error(&text, "i64"))
    }

    /// Parse the payload as an `f64`.
    pub fn as_f64(&self) -> Result<f64> {
        let text = self.payload_str();
        text.parse().map_err(|_| conversion_error(&text, "f64"))
    }

    /// Infer the most appropriate type for the payload.
    ///
    /// Tries `i64`, then `f64`, then bool, and falls back to the original
    /// string. The order matters: `"42"` must come back as an integer, not
    /// a float, and `"1"` as an integer, not a bool.
    pub fn value(&self) -> Value {
        let text = self.payload_str();
        if let Ok(i) = text.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(f) = text.parse::<f64>() {
            return Value::Float(f);
        }
        if let Some(b) = parse_bool(&text) {
            return Value::Bool(b);
        }
        Value::Text(text.into_owned())
    }
}

fn conversion_error(value: &str, target: &'static str) -> ZabbixError {
    ZabbixError::Conversion {
        value: value.to_string(),
        target,
    }
}

/// Boolean convention of the agent protocol: `1/t/true` and `0/f/false`,
/// with the usual casings.
fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
