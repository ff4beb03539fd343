//! Wire format constants and varint encoding.
//!
//! A passive-agent response frame looks like this on the wire:
//!
//! ```text
//! ┌──────────────┬─────────────────┬──────────────────┐
//! │ Header       │ Data length     │ Payload          │
//! │ 5 bytes      │ 8-byte field    │ until EOF        │
//! │ ZBXD\x01     │ uvarint + pad   │                  │
//! └──────────────┴─────────────────┴──────────────────┘
//! ```
//!
//! The data length is a little-endian base-128 varint: the low 7 bits of
//! each byte contribute to the value, the high bit signals continuation.
//! Decoding stops at the first byte without the continuation bit; the rest
//! of the 8-byte field is padding.

use crate::error::{Result, ZabbixError};

/// Header size in bytes (fixed, exactly 5).
pub const HEADER_SIZE: usize = 5;

/// The magic header every agent response starts with.
pub const MAGIC: [u8; HEADER_SIZE] = *b"ZBXD\x01";

/// Size of the data length field in bytes.
pub const LENGTH_FIELD_SIZE: usize = 8;

/// Marker payload the agent returns for keys it does not recognize.
pub const NOT_SUPPORTED: &str = "ZBX_NOTSUPPORTED";

/// Decode a varint from the start of `buf`.
///
/// Returns the value and the number of bytes consumed. An empty buffer
/// yields [`ZabbixError::LengthBufferTooSmall`]; a full window with no
/// terminating byte yields [`ZabbixError::LengthOverflow`].
///
/// # Example
///
/// ```
/// use zabbix_agent_client::protocol::decode_uvarint;
///
/// let (value, read) = decode_uvarint(&[0xAC, 0x02, 0, 0]).unwrap();
/// assert_eq!(value, 300);
/// assert_eq!(read, 2);
/// ```
pub fn decode_uvarint(buf: &[u8]) -> Result<(u64, usize)> {
    if buf.is_empty() {
        return Err(ZabbixError::LengthBufferTooSmall);
    }

    let window = &buf[..buf.len().min(LENGTH_FIELD_SIZE)];
    let mut value = 0u64;
    for (i, &byte) in window.iter().enumerate() {
        value |= u64::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }

    // Every byte had the continuation bit set. A short buffer may simply
    // have been cut off; a full window means the value cannot terminate.
    if buf.len() >= LENGTH_FIELD_SIZE {
        Err(ZabbixError::LengthOverflow)
    } else {
        Err(ZabbixError::LengthBufferTooSmall)
    }
}

/// Append the varint encoding of `value` to `buf`.
///
/// Returns the number of bytes written. Values below 2^56 fit the 8-byte
/// window used by the frame format.
///
/// # Example
///
/// ```
/// use zabbix_agent_client::protocol::{decode_uvarint, encode_uvarint};
///
/// let mut buf = Vec::new();
/// let written = encode_uvarint(300, &mut buf);
/// assert_eq!(written, 2);
/// assert_eq!(decode_uvarint(&buf).unwrap(), (300, 2));
/// ```
pub fn encode_uvarint(mut value: u64, buf: &mut Vec<u8>) -> usize {
    let start = buf.len();
    while value >= 0x80 {
        buf.push(value as u8 | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
    buf.len() - start
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(value: u64) -> (u64, usize) {
        let mut buf = Vec::new();
        let written = encode_uvarint(value, &mut buf);
        let (decoded, read) = decode_uvarint(&buf).unwrap();
        assert_eq!(written, read);
        (decoded, read)
    }

    #[test]
    fn test_round_trip_small_values() {
        for value in [0u64, 1, 2, 63, 64, 100, 126, 127] {
            let (decoded, read) = round_trip(value);
            assert_eq!(decoded, value);
            assert_eq!(read, 1);
        }
    }

    #[test]
    fn test_round_trip_multi_byte_values() {
        for value in [128u64, 300, 16_383, 16_384, 1 << 21, 1 << 35, (1 << 56) - 1] {
            let (decoded, _) = round_trip(value);
            assert_eq!(decoded, value);
        }
    }

    #[test]
    fn test_encode_known_bytes() {
        let mut buf = Vec::new();
        encode_uvarint(300, &mut buf);
        assert_eq!(buf, vec![0xAC, 0x02]);
    }

    #[test]
    fn test_largest_value_in_window() {
        let mut buf = Vec::new();
        let written = encode_uvarint((1 << 56) - 1, &mut buf);
        assert_eq!(written, LENGTH_FIELD_SIZE);
    }

    #[test]
    fn test_decode_ignores_padding() {
        // A real length field is 8 bytes with zero padding after the varint.
        let field = [0x05, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(decode_uvarint(&field).unwrap(), (5, 1));
    }

    #[test]
    fn test_empty_buffer_is_too_small() {
        assert!(matches!(
            decode_uvarint(&[]),
            Err(ZabbixError::LengthBufferTooSmall)
        ));
    }

    #[test]
    fn test_truncated_varint_is_too_small() {
        // Continuation bits with no terminator, but window not full.
        assert!(matches!(
            decode_uvarint(&[0x80, 0x80, 0x80]),
            Err(ZabbixError::LengthBufferTooSmall)
        ));
    }

    #[test]
    fn test_unterminated_window_overflows() {
        assert!(matches!(
            decode_uvarint(&[0x80; LENGTH_FIELD_SIZE]),
            Err(ZabbixError::LengthOverflow)
        ));
    }

    #[test]
    fn test_overflow_even_with_terminator_past_window() {
        // A 9th terminating byte does not help; decoding never looks past
        // the 8-byte window.
        let mut buf = vec![0x80; LENGTH_FIELD_SIZE];
        buf.push(0x01);
        assert!(matches!(
            decode_uvarint(&buf),
            Err(ZabbixError::LengthOverflow)
        ));
    }
}
