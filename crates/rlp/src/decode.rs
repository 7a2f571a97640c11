use std::ops::Range;

use crate::error::{DecoderError, Result, RlpError};
use crate::length::{validate_item, Header, PrefixClass};

/// Strips the envelope from an encoded byte string.
///
/// `wire` must be exactly one canonical string item; lists are rejected.
pub fn decode_bytes(wire: &[u8]) -> Result<Vec<u8>> {
    let prefix = *wire.first().ok_or_else(|| RlpError::malformed(0, DecoderError::Empty))?;
    if PrefixClass::of(prefix).is_list() {
        return Err(RlpError::malformed(0, DecoderError::ExpectedData));
    }

    let header = validate_item(wire)?;
    Ok(wire[header.payload_range(0)].to_vec())
}

/// Peels one list layer and returns each contained item still encoded.
///
/// Strings come back with their prefix and nested lists come back whole, so
/// every returned item can be handed straight to [`decode_bytes`] or
/// `decode_list` again. Feeding the result back into
/// [`encode_list`](crate::encode_list) reproduces `wire`.
pub fn decode_list(wire: &[u8]) -> Result<Vec<Vec<u8>>> {
    collect_items(wire, |start, header| wire[start..start + header.total_len()].to_vec())
}

/// Peels one list layer and returns each contained item's payload.
///
/// Strings come back as their raw bytes. Nested lists come back as their
/// payload: the concatenated, still-encoded children without the nested
/// list's own prefix and length field.
pub fn decode_list_payloads(wire: &[u8]) -> Result<Vec<Vec<u8>>> {
    collect_items(wire, |start, header| wire[header.payload_range(start)].to_vec())
}

/// Total wire width of the item starting at `offset` in `wire`.
pub fn item_width(wire: &[u8], offset: usize) -> Result<usize> {
    Header::parse(wire, offset).map(|header| header.total_len())
}

/// Validates the outer list header and returns the payload range.
fn list_payload(wire: &[u8]) -> Result<Range<usize>> {
    let prefix = *wire.first().ok_or_else(|| RlpError::malformed(0, DecoderError::Empty))?;
    if !PrefixClass::of(prefix).is_list() {
        return Err(RlpError::malformed(0, DecoderError::ExpectedList));
    }

    let header = validate_item(wire)?;
    Ok(header.payload_range(0))
}

/// Header of the next item inside a list payload ending at `end`. Items may
/// not run past the end of their enclosing list.
fn next_item(wire: &[u8], offset: usize, end: usize) -> Result<Header> {
    Header::parse(&wire[..end], offset)
}

fn count_items(wire: &[u8], payload: Range<usize>) -> Result<usize> {
    let mut count = 0;
    let mut offset = payload.start;
    while offset < payload.end {
        offset += next_item(wire, offset, payload.end)?.total_len();
        count += 1;
    }
    Ok(count)
}

fn collect_items<F>(wire: &[u8], extract: F) -> Result<Vec<Vec<u8>>>
where
    F: Fn(usize, &Header) -> Vec<u8>,
{
    let payload = list_payload(wire)?;
    let count = count_items(wire, payload.clone())?;

    let mut items = Vec::with_capacity(count);
    let mut offset = payload.start;
    while offset < payload.end {
        let header = next_item(wire, offset, payload.end)?;
        items.push(extract(offset, &header));
        offset += header.total_len();
    }

    if items.len() != count {
        return Err(RlpError::malformed(
            offset,
            DecoderError::LengthMismatch { expected: count, actual: items.len() },
        ));
    }
    Ok(items)
}
