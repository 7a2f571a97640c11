// Core modules
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use config::{Config, LimitsConfig, LogConfig};
pub use logging::init_logging;

// Re-export the codec
pub use rlp_core as codec;
pub use rlp_core::{
    decode_bytes, decode_list, decode_list_payloads, decode_tree, decode_tree_with, encode_bytes,
    encode_list, validate_item, DecodeLimits, DecoderError, ListBuilder, RlpError, RlpItem,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
