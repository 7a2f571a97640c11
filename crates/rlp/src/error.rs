use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RlpError {
    #[error("Malformed input at byte {offset}: {reason}")]
    MalformedInput { offset: usize, reason: DecoderError },

    #[error("Invalid list element {index}: {reason}")]
    InvalidElement { index: usize, reason: DecoderError },

    #[error("Nesting depth {depth} exceeds limit {limit}")]
    DepthExceeded { depth: usize, limit: usize },
}

impl RlpError {
    pub(crate) fn malformed(offset: usize, reason: DecoderError) -> Self {
        RlpError::MalformedInput { offset, reason }
    }

    pub(crate) fn into_element_error(self, index: usize) -> Self {
        match self {
            RlpError::MalformedInput { reason, .. } => RlpError::InvalidElement { index, reason },
            other => other,
        }
    }

    /// Rebases a `MalformedInput` offset reported against a sub-slice that
    /// started at `base` in the caller's buffer.
    pub(crate) fn shifted(self, base: usize) -> Self {
        match self {
            RlpError::MalformedInput { offset, reason } => {
                RlpError::MalformedInput { offset: offset + base, reason }
            }
            other => other,
        }
    }

    /// Underlying reason for input and element failures.
    pub fn reason(&self) -> Option<&DecoderError> {
        match self {
            RlpError::MalformedInput { reason, .. } | RlpError::InvalidElement { reason, .. } => {
                Some(reason)
            }
            RlpError::DepthExceeded { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecoderError {
    #[error("Empty input")]
    Empty,

    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("Leading zeros in length field")]
    LeadingZeros,

    #[error("Long form used for a payload that fits the short form")]
    NonCanonicalLength,

    #[error("Single byte below 0x80 wrapped in a string prefix")]
    NonCanonicalSingleByte,

    #[error("Integer overflow")]
    IntegerOverflow,

    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Expected data, got list")]
    ExpectedData,

    #[error("Expected list, got data")]
    ExpectedList,
}

pub type Result<T> = std::result::Result<T, RlpError>;
