//! Length-prefix arithmetic and canonical item validation.
//!
//! Every other part of the codec goes through [`Header::parse`] to find out
//! how wide an item is, so the encoder, the decoder and validation all agree
//! on item boundaries.

use std::mem::size_of;
use std::ops::Range;

use crate::error::{DecoderError, Result, RlpError};

/// Prefix byte of the empty byte string.
pub const EMPTY_STRING_CODE: u8 = 0x80;

/// Prefix byte of the empty list.
pub const EMPTY_LIST_CODE: u8 = 0xc0;

/// Largest payload that still uses the one-byte short form.
pub const SHORT_PAYLOAD_MAX: usize = 55;

const LONG_STRING_OFFSET: u8 = 0xb7;
const LONG_LIST_OFFSET: u8 = 0xf7;

/// The five classes a prefix byte can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixClass {
    /// `0x00..=0x7f`: the byte is the whole value.
    SingleByte,
    /// `0x80..=0xb7`: string of up to 55 bytes.
    ShortString,
    /// `0xb8..=0xbf`: string with an explicit length field.
    LongString,
    /// `0xc0..=0xf7`: list whose payload is up to 55 bytes.
    ShortList,
    /// `0xf8..=0xff`: list with an explicit length field.
    LongList,
}

impl PrefixClass {
    pub const fn of(prefix: u8) -> Self {
        match prefix {
            0x00..=0x7f => PrefixClass::SingleByte,
            0x80..=0xb7 => PrefixClass::ShortString,
            0xb8..=0xbf => PrefixClass::LongString,
            0xc0..=0xf7 => PrefixClass::ShortList,
            0xf8..=0xff => PrefixClass::LongList,
        }
    }

    pub const fn is_list(self) -> bool {
        matches!(self, PrefixClass::ShortList | PrefixClass::LongList)
    }
}

/// Shape of one wire item: its class, how many bytes precede the payload,
/// and how many payload bytes follow.
///
/// A single byte below `0x80` has no header at all; it is described as a
/// zero-width header over a one-byte payload, so `payload_range` yields the
/// byte itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub class: PrefixClass,
    pub header_len: usize,
    pub payload_len: usize,
}

impl Header {
    /// Parses the header of the item starting at `offset` in `buf`.
    ///
    /// The whole item must fit inside `buf` and its header must be in
    /// canonical form. Error offsets are absolute positions in `buf`.
    pub fn parse(buf: &[u8], offset: usize) -> Result<Self> {
        if buf.is_empty() {
            return Err(RlpError::malformed(0, DecoderError::Empty));
        }
        let prefix = *buf
            .get(offset)
            .ok_or_else(|| RlpError::malformed(offset, DecoderError::UnexpectedEof))?;

        let class = PrefixClass::of(prefix);
        let header = match class {
            PrefixClass::SingleByte => Header { class, header_len: 0, payload_len: 1 },
            PrefixClass::ShortString => {
                Header { class, header_len: 1, payload_len: (prefix - EMPTY_STRING_CODE) as usize }
            }
            PrefixClass::ShortList => {
                Header { class, header_len: 1, payload_len: (prefix - EMPTY_LIST_CODE) as usize }
            }
            PrefixClass::LongString => {
                Self::parse_long(buf, offset, class, (prefix - LONG_STRING_OFFSET) as usize)?
            }
            PrefixClass::LongList => {
                Self::parse_long(buf, offset, class, (prefix - LONG_LIST_OFFSET) as usize)?
            }
        };

        let end = offset
            .checked_add(header.total_len())
            .ok_or_else(|| RlpError::malformed(offset, DecoderError::IntegerOverflow))?;
        if end > buf.len() {
            return Err(RlpError::malformed(offset, DecoderError::UnexpectedEof));
        }

        if class == PrefixClass::ShortString
            && header.payload_len == 1
            && buf[offset + 1] < EMPTY_STRING_CODE
        {
            return Err(RlpError::malformed(offset, DecoderError::NonCanonicalSingleByte));
        }

        Ok(header)
    }

    fn parse_long(buf: &[u8], offset: usize, class: PrefixClass, width: usize) -> Result<Self> {
        let field_start = offset + 1;
        let field_end = field_start + width;
        if field_end > buf.len() {
            return Err(RlpError::malformed(field_start, DecoderError::UnexpectedEof));
        }

        let payload_len = read_length(&buf[field_start..field_end])
            .map_err(|reason| RlpError::malformed(field_start, reason))?;
        if payload_len <= SHORT_PAYLOAD_MAX {
            return Err(RlpError::malformed(offset, DecoderError::NonCanonicalLength));
        }

        // `total_len` on a header this size can still overflow on narrow targets.
        payload_len
            .checked_add(1 + width)
            .ok_or_else(|| RlpError::malformed(offset, DecoderError::IntegerOverflow))?;

        Ok(Header { class, header_len: 1 + width, payload_len })
    }

    pub fn is_list(&self) -> bool {
        self.class.is_list()
    }

    /// Width of the whole item on the wire.
    pub fn total_len(&self) -> usize {
        self.header_len + self.payload_len
    }

    /// Payload position for an item that starts at `offset`.
    pub fn payload_range(&self, offset: usize) -> Range<usize> {
        let start = offset + self.header_len;
        start..start + self.payload_len
    }
}

/// Fewest big-endian bytes that represent `n`; empty for zero.
pub fn minimal_length_bytes(n: usize) -> Vec<u8> {
    let bytes = n.to_be_bytes();
    let first_non_zero = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    bytes[first_non_zero..].to_vec()
}

/// Number of bytes [`minimal_length_bytes`] would produce for `n`.
pub fn length_of_length(n: usize) -> usize {
    (usize::BITS - n.leading_zeros()).div_ceil(8) as usize
}

/// Reads a big-endian length field, rejecting leading zeros.
pub fn read_length(bytes: &[u8]) -> std::result::Result<usize, DecoderError> {
    match bytes.first() {
        None => return Err(DecoderError::UnexpectedEof),
        Some(0) => return Err(DecoderError::LeadingZeros),
        Some(_) => {}
    }
    if bytes.len() > size_of::<usize>() {
        return Err(DecoderError::IntegerOverflow);
    }

    Ok(bytes.iter().fold(0usize, |len, &byte| (len << 8) | byte as usize))
}

/// Checks that `bytes` is exactly one canonical wire item.
///
/// Only the outermost header is inspected; a list's contents are not
/// descended into.
pub fn validate_item(bytes: &[u8]) -> Result<Header> {
    let header = Header::parse(bytes, 0)?;
    let total = header.total_len();
    if total != bytes.len() {
        return Err(RlpError::malformed(
            total,
            DecoderError::LengthMismatch { expected: total, actual: bytes.len() },
        ));
    }
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_length_bytes() {
        assert_eq!(minimal_length_bytes(0), Vec::<u8>::new());
        assert_eq!(minimal_length_bytes(56), vec![56]);
        assert_eq!(minimal_length_bytes(255), vec![0xff]);
        assert_eq!(minimal_length_bytes(256), vec![0x01, 0x00]);
        assert_eq!(minimal_length_bytes(260), vec![0x01, 0x04]);
        assert_eq!(minimal_length_bytes(0x01_00_00), vec![0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_length_of_length_matches_bytes() {
        for n in [0usize, 1, 55, 56, 255, 256, 65535, 65536, 1 << 24, usize::MAX] {
            assert_eq!(length_of_length(n), minimal_length_bytes(n).len(), "n = {}", n);
        }
    }

    #[test]
    fn test_read_length() {
        assert_eq!(read_length(&[0x38]), Ok(56));
        assert_eq!(read_length(&[0x04, 0x00]), Ok(1024));
        assert_eq!(read_length(&[0x00, 0x40]), Err(DecoderError::LeadingZeros));
        assert_eq!(read_length(&[]), Err(DecoderError::UnexpectedEof));
        assert_eq!(read_length(&[0xff; 9]), Err(DecoderError::IntegerOverflow));
    }

    #[test]
    fn test_prefix_classes() {
        assert_eq!(PrefixClass::of(0x00), PrefixClass::SingleByte);
        assert_eq!(PrefixClass::of(0x7f), PrefixClass::SingleByte);
        assert_eq!(PrefixClass::of(0x80), PrefixClass::ShortString);
        assert_eq!(PrefixClass::of(0xb7), PrefixClass::ShortString);
        assert_eq!(PrefixClass::of(0xb8), PrefixClass::LongString);
        assert_eq!(PrefixClass::of(0xbf), PrefixClass::LongString);
        assert_eq!(PrefixClass::of(0xc0), PrefixClass::ShortList);
        assert_eq!(PrefixClass::of(0xf7), PrefixClass::ShortList);
        assert_eq!(PrefixClass::of(0xf8), PrefixClass::LongList);
        assert_eq!(PrefixClass::of(0xff), PrefixClass::LongList);
    }

    #[test]
    fn test_validate_accepts_canonical_items() {
        assert!(validate_item(&[0x00]).is_ok());
        assert!(validate_item(&[0x80]).is_ok());
        assert!(validate_item(&[0xc0]).is_ok());
        assert!(validate_item(&[0x83, b'd', b'o', b'g']).is_ok());

        let mut long = vec![0xb8, 56];
        long.extend_from_slice(&[b'a'; 56]);
        let header = validate_item(&long).unwrap();
        assert_eq!(header.class, PrefixClass::LongString);
        assert_eq!(header.header_len, 2);
        assert_eq!(header.payload_len, 56);
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert_eq!(
            validate_item(&[]),
            Err(RlpError::MalformedInput { offset: 0, reason: DecoderError::Empty })
        );
    }

    #[test]
    fn test_validate_rejects_length_mismatch() {
        assert_eq!(
            validate_item(&[0x83, b'd', b'o']),
            Err(RlpError::MalformedInput { offset: 0, reason: DecoderError::UnexpectedEof })
        );
        assert_eq!(
            validate_item(&[0x82, b'd', b'o', b'g']),
            Err(RlpError::MalformedInput {
                offset: 3,
                reason: DecoderError::LengthMismatch { expected: 3, actual: 4 },
            })
        );
        assert_eq!(
            validate_item(&[0x05, 0x06]),
            Err(RlpError::MalformedInput {
                offset: 1,
                reason: DecoderError::LengthMismatch { expected: 1, actual: 2 },
            })
        );
    }

    #[test]
    fn test_validate_rejects_non_canonical_forms() {
        // long form for a 3-byte payload
        assert_eq!(
            validate_item(&[0xb8, 0x03, b'd', b'o', b'g']),
            Err(RlpError::MalformedInput { offset: 0, reason: DecoderError::NonCanonicalLength })
        );
        assert_eq!(
            validate_item(&[0xf8, 0x01, 0x80]),
            Err(RlpError::MalformedInput { offset: 0, reason: DecoderError::NonCanonicalLength })
        );

        let mut padded = vec![0xb9, 0x00, 0x38];
        padded.extend_from_slice(&[b'a'; 56]);
        assert_eq!(
            validate_item(&padded),
            Err(RlpError::MalformedInput { offset: 1, reason: DecoderError::LeadingZeros })
        );

        assert_eq!(
            validate_item(&[0x81, 0x7f]),
            Err(RlpError::MalformedInput {
                offset: 0,
                reason: DecoderError::NonCanonicalSingleByte,
            })
        );
        assert!(validate_item(&[0x81, 0x80]).is_ok());
    }

    #[test]
    fn test_truncated_length_field() {
        assert_eq!(
            validate_item(&[0xb9, 0x01]),
            Err(RlpError::MalformedInput { offset: 1, reason: DecoderError::UnexpectedEof })
        );
    }

    #[test]
    fn test_parse_at_offset() {
        let buf = [0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g'];
        let header = Header::parse(&buf, 5).unwrap();
        assert_eq!(header.class, PrefixClass::ShortString);
        assert_eq!(header.payload_range(5), 6..9);
        assert_eq!(
            Header::parse(&buf, 9),
            Err(RlpError::MalformedInput { offset: 9, reason: DecoderError::UnexpectedEof })
        );
    }

    #[test]
    fn test_single_byte_header() {
        let header = Header::parse(&[0x42], 0).unwrap();
        assert_eq!(header.header_len, 0);
        assert_eq!(header.payload_range(0), 0..1);
        assert_eq!(header.total_len(), 1);
    }
}
