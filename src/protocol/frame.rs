//! Frame struct and the stream decoder.
//!
//! [`read_frame`] consumes any `AsyncRead` stream: 5 header bytes, an
//! 8-byte length field, then payload until EOF. The declared length is
//! decoded and kept but does not bound the payload read — agents are
//! trusted to close the connection after the payload, and the protocol
//! tolerates trailing data silently. [`FrameOptions`] offers
//! opt-in hardening for callers that want the header and length checked.

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, warn};

use super::wire_format::{decode_uvarint, HEADER_SIZE, LENGTH_FIELD_SIZE, MAGIC};
use crate::error::{Result, ZabbixError};

/// Decoding policy knobs. Both default to the protocol's lenient
/// behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameOptions {
    /// Reject frames whose header is not `ZBXD\x01`.
    pub strict_header: bool,
    /// Reject frames whose payload length differs from the declared length.
    pub enforce_declared_length: bool,
}

/// A decoded response frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw header bytes; expected to equal `ZBXD\x01` but not required to.
    pub header: [u8; HEADER_SIZE],
    /// Length the agent declared for the payload. Informational unless
    /// [`FrameOptions::enforce_declared_length`] is set.
    pub declared_len: u64,
    /// Payload bytes, read to end of stream.
    pub payload: Bytes,
}

impl Frame {
    /// Whether the header equals the expected magic.
    pub fn header_matches(&self) -> bool {
        self.header == MAGIC
    }

    /// Get a reference to the payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Get the payload length actually read.
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }
}

/// Read a single frame from `stream`.
///
/// Imposes no timeout of its own; the caller bounds the read through the
/// connection deadline. Framing errors ([`ZabbixError::LengthBufferTooSmall`],
/// [`ZabbixError::LengthOverflow`]) are fatal for the call.
pub async fn read_frame<R>(stream: &mut R, options: &FrameOptions) -> Result<Frame>
where
    R: AsyncRead + Unpin,
{
    let mut header = [0u8; HEADER_SIZE];
    stream.read_exact(&mut header).await?;

    // The length field occupies 8 bytes on the wire, but a short stream may
    // cut it off. Fill what is available and decode from that.
    let mut length_field = [0u8; LENGTH_FIELD_SIZE];
    let mut filled = 0;
    while filled < LENGTH_FIELD_SIZE {
        let n = stream.read(&mut length_field[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    let (declared_len, _) = decode_uvarint(&length_field[..filled])?;

    // Payload size is determined by stream EOF, not by the declared length.
    let mut payload = Vec::new();
    stream.read_to_end(&mut payload).await?;

    let frame = Frame {
        header,
        declared_len,
        payload: Bytes::from(payload),
    };

    if !frame.header_matches() {
        if options.strict_header {
            return Err(ZabbixError::HeaderMismatch {
                expected: MAGIC,
                actual: frame.header,
            });
        }
        warn!(header = ?frame.header, "frame header does not match ZBXD\\x01");
    }

    if options.enforce_declared_length && frame.payload_len() as u64 != frame.declared_len {
        return Err(ZabbixError::FrameLengthMismatch {
            declared: frame.declared_len,
            actual: frame.payload_len() as u64,
        });
    }

    debug!(
        declared_len = frame.declared_len,
        payload_len = frame.payload_len(),
        "decoded frame"
    );

    Ok(frame)
}
