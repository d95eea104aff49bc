//! Wire framing for record streams.
//!
//! Responsibilities:
//! - Encode one record into a self-delimiting frame
//! - Decode frames with strict validation (length, checksum)
//!
//! Non-responsibilities:
//! - Buffering
//! - IO
//! - Record semantics

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{
    FrameView,
    FrameError,
};

pub use encode::{
    encode_frame,
    encoded_len,
    max_encoded_len,
    put_uvarint,
    uvarint_len,
};

pub use decode::{
    decode_frame,
    decode_frame_with_limit,
    decode_stream,
    decode_stream_bytes,
    decode_uvarint,
    FrameIter,
};
