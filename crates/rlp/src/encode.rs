use bytes::{BufMut, BytesMut};

use crate::error::Result;
use crate::length::{
    length_of_length, minimal_length_bytes, validate_item, EMPTY_LIST_CODE, EMPTY_STRING_CODE,
    SHORT_PAYLOAD_MAX,
};

/// Encodes a raw byte string into its canonical wire form.
pub fn encode_bytes(value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(header_len(value.len()) + value.len());
    write_bytes(&mut out, value);
    out
}

/// Wraps already-encoded items in a list prefix.
///
/// Every element must be a single canonical wire item, typically the output
/// of [`encode_bytes`] or an earlier `encode_list`. The first element that is
/// not fails the call with [`RlpError::InvalidElement`](crate::RlpError).
pub fn encode_list<T: AsRef<[u8]>>(items: &[T]) -> Result<Vec<u8>> {
    let mut payload_len = 0usize;
    for (index, item) in items.iter().enumerate() {
        let item = item.as_ref();
        validate_item(item).map_err(|e| e.into_element_error(index))?;
        payload_len += item.len();
    }

    let mut out = Vec::with_capacity(header_len(payload_len) + payload_len);
    write_header(&mut out, EMPTY_LIST_CODE, payload_len);
    for item in items {
        out.put_slice(item.as_ref());
    }
    Ok(out)
}

/// Number of bytes the prefix and length field take for a payload of `len`.
pub fn header_len(len: usize) -> usize {
    if len <= SHORT_PAYLOAD_MAX {
        1
    } else {
        1 + length_of_length(len)
    }
}

/// Writes a string or list header. `short_offset` is `0x80` for strings and
/// `0xc0` for lists; the long-form offsets sit 55 above them.
fn write_header<B: BufMut>(out: &mut B, short_offset: u8, len: usize) {
    if len <= SHORT_PAYLOAD_MAX {
        out.put_u8(short_offset + len as u8);
    } else {
        let len_bytes = minimal_length_bytes(len);
        out.put_u8(short_offset + SHORT_PAYLOAD_MAX as u8 + len_bytes.len() as u8);
        out.put_slice(&len_bytes);
    }
}

fn write_bytes<B: BufMut>(out: &mut B, value: &[u8]) {
    match value {
        [byte] if *byte < EMPTY_STRING_CODE => out.put_u8(*byte),
        _ => {
            write_header(out, EMPTY_STRING_CODE, value.len());
            out.put_slice(value);
        }
    }
}

/// Assembles a list one element at a time.
///
/// `finish` produces exactly what [`encode_list`] would for the same
/// elements, without collecting them into a separate vector first.
#[derive(Debug, Default, Clone)]
pub struct ListBuilder {
    payload: BytesMut,
    items: usize,
}

impl ListBuilder {
    pub fn new() -> Self {
        ListBuilder { payload: BytesMut::new(), items: 0 }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ListBuilder { payload: BytesMut::with_capacity(capacity), items: 0 }
    }

    /// Appends a raw byte string, encoding it in place.
    pub fn append_bytes(&mut self, value: &[u8]) -> &mut Self {
        write_bytes(&mut self.payload, value);
        self.items += 1;
        self
    }

    /// Appends an already-encoded item after checking it is canonical.
    pub fn append_encoded(&mut self, encoded: &[u8]) -> Result<&mut Self> {
        validate_item(encoded).map_err(|e| e.into_element_error(self.items))?;
        Ok(self.append_raw(encoded))
    }

    /// Appends a nested list.
    pub fn append_list(&mut self, list: ListBuilder) -> &mut Self {
        write_header(&mut self.payload, EMPTY_LIST_CODE, list.payload.len());
        self.payload.put(list.payload);
        self.items += 1;
        self
    }

    // Caller guarantees `encoded` is a single canonical item.
    pub(crate) fn append_raw(&mut self, encoded: &[u8]) -> &mut Self {
        self.payload.put_slice(encoded);
        self.items += 1;
        self
    }

    /// Number of elements appended so far.
    pub fn len(&self) -> usize {
        self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items == 0
    }

    pub fn finish(self) -> Vec<u8> {
        let payload_len = self.payload.len();
        let mut out = Vec::with_capacity(header_len(payload_len) + payload_len);
        write_header(&mut out, EMPTY_LIST_CODE, payload_len);
        out.put_slice(&self.payload);
        out
    }
}
