//! Error types for Huffman coding.

use thiserror::Error;

/// Error variants for compression and decompression.
#[derive(Debug, Error)]
pub enum Error {
    /// Frequency analysis received zero symbols, so no tree can be built.
    #[error("empty input: at least one symbol is required to build a tree")]
    EmptyInput,

    /// A symbol to encode has no entry in the codeword table.
    ///
    /// The table was built from a different input than the one being encoded.
    #[error("no codeword for symbol 0x{symbol:02x}")]
    MissingCodeword {
        /// The symbol that could not be encoded.
        symbol: u8,
    },

    /// The leading padding byte is outside `0..=7`.
    #[error("invalid padding count {0}: must be in range [0, 7]")]
    InvalidPadding(u8),

    /// Fewer bits are available than the padding requires.
    #[error("truncated stream: {available} bits available, {required} required")]
    TruncatedStream {
        /// Bits present in the stream.
        available: usize,
        /// Bits the stream claims to need.
        required: usize,
    },

    /// The tree walk reached a missing child, or the bits ran out mid-path.
    #[error("corrupt stream at bit {bit_offset}")]
    CorruptStream {
        /// Offset of the offending bit, counted from the start of the payload.
        bit_offset: usize,
    },

    /// A container header or codeword table is malformed.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// An I/O error occurred while writing a container.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for Huffman coding operations.
pub type Result<T> = std::result::Result<T, Error>;
