//! Error types for building, encoding and decoding.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = core::result::Result<T, HuffmanError>;

/// Everything that can go wrong between a frequency map and decoded bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HuffmanError {
    /// A non-empty payload was given to an operation holding an empty code table.
    #[error("payload of {payload_len} bytes cannot be coded with an empty code table")]
    EmptyAlphabetMismatch { payload_len: usize },

    /// The input contains a byte with no codeword.
    #[error("symbol 0x{symbol:02x} at position {position} has no codeword")]
    UnknownSymbol { symbol: u8, position: usize },

    /// The code table cannot form a full binary code tree.
    #[error("malformed code table: {reason}")]
    MalformedCodeTable { reason: String },

    /// Padding is outside [0, 7] or does not fit the packed payload.
    #[error("padding {padding} is invalid for {packed_len} packed bytes")]
    PaddingRange { padding: u8, packed_len: usize },

    /// The content bits ran out in the middle of a codeword.
    #[error("stream truncated mid-codeword at bit {bit_offset} after {decoded} symbols")]
    TruncatedStream { bit_offset: usize, decoded: usize },

    /// The bit walk reached the placeholder leaf of a single-symbol tree.
    #[error("no symbol is assigned to the codeword ending at bit {bit_offset}")]
    InvalidCodeword { bit_offset: usize },

    /// Strict mode found a set bit among the padding bits.
    #[error("the {padding} padding bits of the final byte are not zero")]
    NonZeroPadding { padding: u8 },

    /// A textual codeword held something other than '0' or '1'.
    #[error("invalid character {found:?} in bit string")]
    InvalidBitString { found: char },

    /// A configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl HuffmanError {
    /// Create a malformed table error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        HuffmanError::MalformedCodeTable {
            reason: reason.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(reason: impl Into<String>) -> Self {
        HuffmanError::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// True when the failure points at the packed stream or padding rather
    /// than at the table or the caller's input.
    pub fn is_stream_corruption(&self) -> bool {
        matches!(
            self,
            HuffmanError::PaddingRange { .. }
                | HuffmanError::TruncatedStream { .. }
                | HuffmanError::InvalidCodeword { .. }
                | HuffmanError::NonZeroPadding { .. }
        )
    }

    /// Short stable name, used as a structured logging field.
    pub fn category(&self) -> &'static str {
        match self {
            HuffmanError::EmptyAlphabetMismatch { .. } => "empty_alphabet",
            HuffmanError::UnknownSymbol { .. } => "unknown_symbol",
            HuffmanError::MalformedCodeTable { .. } => "malformed_table",
            HuffmanError::PaddingRange { .. } => "padding_range",
            HuffmanError::TruncatedStream { .. } => "truncated_stream",
            HuffmanError::InvalidCodeword { .. } => "invalid_codeword",
            HuffmanError::NonZeroPadding { .. } => "non_zero_padding",
            HuffmanError::InvalidBitString { .. } => "invalid_bit_string",
            HuffmanError::InvalidConfig { .. } => "invalid_config",
        }
    }
}
