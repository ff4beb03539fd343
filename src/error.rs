//! Error types for the agent client.

use thiserror::Error;

use crate::response::Response;

/// Main error type for all agent query operations.
#[derive(Debug, Error)]
pub enum ZabbixError {
    /// I/O error while connecting, writing the key, or reading the frame.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The connect or read deadline expired.
    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The stream ended before any byte of the length field arrived.
    #[error("data length buffer too small")]
    LengthBufferTooSmall,

    /// No terminating byte within the 8-byte length window.
    #[error("data length is too large")]
    LengthOverflow,

    /// Frame header does not match `ZBXD\x01` (strict header mode only).
    #[error("header mismatch: expected {expected:02x?}, got {actual:02x?}")]
    HeaderMismatch {
        expected: [u8; 5],
        actual: [u8; 5],
    },

    /// Payload length differs from the declared length (strict length mode only).
    #[error("frame length mismatch: declared {declared}, read {actual}")]
    FrameLengthMismatch { declared: u64, actual: u64 },

    /// The agent answered with the `ZBX_NOTSUPPORTED` marker. The parsed
    /// response rides along so callers can still inspect it.
    #[error("{key} is not supported")]
    NotSupported { key: String, response: Response },

    /// A typed accessor could not parse the payload text.
    #[error("cannot convert {value:?} to {target}")]
    Conversion {
        value: String,
        target: &'static str,
    },

    /// Discovery payload was not valid JSON of the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using ZabbixError.
pub type Result<T> = std::result::Result<T, ZabbixError>;
