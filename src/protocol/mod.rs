//! Protocol module - wire format constants, varint codec, and frame decoding.

mod frame;
mod wire_format;

pub use frame::{read_frame, Frame, FrameOptions};
pub use wire_format::{
    decode_uvarint, encode_uvarint, HEADER_SIZE, LENGTH_FIELD_SIZE, MAGIC, NOT_SUPPORTED,
};
