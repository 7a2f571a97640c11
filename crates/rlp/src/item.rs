//! Whole-tree encoding and decoding layered over the one-layer codec.

use crate::decode::{decode_bytes, decode_list};
use crate::encode::{encode_bytes, ListBuilder};
use crate::error::{Result, RlpError};
use crate::length::{Header, PrefixClass};

/// Limits applied while decoding a full tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum number of nested list levels, counting the outermost list.
    pub max_depth: usize,
}

impl DecodeLimits {
    pub const DEFAULT_MAX_DEPTH: usize = 64;
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self { max_depth: Self::DEFAULT_MAX_DEPTH }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    Bytes(Vec<u8>),
    List(Vec<RlpItem>),
}

impl RlpItem {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RlpItem::Bytes(bytes) => Some(bytes),
            RlpItem::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[RlpItem]> {
        match self {
            RlpItem::Bytes(_) => None,
            RlpItem::List(items) => Some(items),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, RlpItem::List(_))
    }

    /// Encodes the tree bottom-up.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            RlpItem::Bytes(bytes) => encode_bytes(bytes),
            RlpItem::List(items) => {
                let mut builder = ListBuilder::new();
                for item in items {
                    builder.append_raw(&item.encode());
                }
                builder.finish()
            }
        }
    }
}

impl From<Vec<u8>> for RlpItem {
    fn from(bytes: Vec<u8>) -> Self {
        RlpItem::Bytes(bytes)
    }
}

impl From<&[u8]> for RlpItem {
    fn from(bytes: &[u8]) -> Self {
        RlpItem::Bytes(bytes.to_vec())
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<RlpItem>) -> Self {
        RlpItem::List(items)
    }
}

/// Decodes a full tree with the default limits.
pub fn decode_tree(wire: &[u8]) -> Result<RlpItem> {
    decode_tree_with(wire, &DecodeLimits::default())
}

/// Decodes a full tree, peeling one list layer at a time.
pub fn decode_tree_with(wire: &[u8], limits: &DecodeLimits) -> Result<RlpItem> {
    decode_node(wire, 0, 0, limits)
}

fn decode_node(wire: &[u8], base: usize, depth: usize, limits: &DecodeLimits) -> Result<RlpItem> {
    let is_list = wire.first().is_some_and(|&prefix| PrefixClass::of(prefix).is_list());
    if !is_list {
        return decode_bytes(wire).map(RlpItem::Bytes).map_err(|e| e.shifted(base));
    }

    if depth >= limits.max_depth {
        return Err(RlpError::DepthExceeded { depth: depth + 1, limit: limits.max_depth });
    }
    tracing::trace!(depth = depth + 1, offset = base, "descending into rlp list");

    let children = decode_list(wire).map_err(|e| e.shifted(base))?;
    // decode_list has already validated the outer header.
    let mut offset = base + Header::parse(wire, 0)?.header_len;
    let mut items = Vec::with_capacity(children.len());
    for child in &children {
        items.push(decode_node(child, offset, depth + 1, limits)?);
        offset += child.len();
    }
    Ok(RlpItem::List(items))
}
