//! Canonical Recursive Length Prefix (RLP) encoding and decoding.
//!
//! The codec works on raw byte strings and lists of already-encoded items.
//! Turning integers, strings or structures into bytes is left to the caller.

pub mod decode;
pub mod encode;
pub mod error;
pub mod item;
pub mod length;

pub use decode::{decode_bytes, decode_list, decode_list_payloads, item_width};
pub use encode::{encode_bytes, encode_list, header_len, ListBuilder};
pub use error::{DecoderError, Result, RlpError};
pub use item::{decode_tree, decode_tree_with, DecodeLimits, RlpItem};
pub use length::{
    minimal_length_bytes, read_length, validate_item, Header, PrefixClass, EMPTY_LIST_CODE,
    EMPTY_STRING_CODE, SHORT_PAYLOAD_MAX,
};
