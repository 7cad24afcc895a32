//! Bit packing of encoded symbols.
//!
//! A packed stream is one padding byte followed by the encoded bits, most
//! significant bit first:
//!
//! ```text
//! +---------+------------------------------+
//! | padding | payload bits ... | 0-filler  |
//! | (0..=7) |                  | (padding) |
//! +---------+------------------------------+
//! ```

use tracing::debug;

use crate::bits::BitBuf;
use crate::code::CodewordTable;
use crate::error::{Error, Result};

/// Highest legal value of the padding byte.
pub const MAX_PADDING: u8 = 7;

/// A padding byte followed by byte-aligned encoded bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedStream {
    bytes: Vec<u8>,
}

impl PackedStream {
    /// Wrap raw bytes, e.g. read from disk. Validation happens on unpack.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// The declared padding count, if the stream has a header byte.
    pub fn padding(&self) -> Option<u8> {
        self.bytes.first().copied()
    }

    /// The packed data after the padding byte.
    pub fn payload(&self) -> &[u8] {
        self.bytes.get(1..).unwrap_or(&[])
    }

    /// Number of meaningful bits, if the header is valid.
    pub fn bit_len(&self) -> Option<usize> {
        let padding = self.padding().filter(|&p| p <= MAX_PADDING)? as usize;
        (self.payload().len() * 8).checked_sub(padding)
    }

    /// The whole stream, header included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the stream and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Total size in bytes, header included.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the stream has no bytes at all, not even a header.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Encode `input` with `table` and pack the bits.
///
/// # Errors
/// Returns `Error::MissingCodeword` if a symbol of `input` has no codeword.
pub fn pack(input: &[u8], table: &CodewordTable) -> Result<PackedStream> {
    let mut bits = BitBuf::with_capacity(input.len() * 2);
    for &symbol in input {
        let code = table.get(symbol).ok_or(Error::MissingCodeword { symbol })?;
        bits.extend_from(code);
    }

    let padding = ((8 - bits.len() % 8) % 8) as u8;
    debug!(symbols = input.len(), bits = bits.len(), padding, "packed");

    // The buffer's unused low bits are already zero, so they are the filler.
    let payload = bits.into_bytes();
    let mut bytes = Vec::with_capacity(payload.len() + 1);
    bytes.push(padding);
    bytes.extend_from_slice(&payload);
    Ok(PackedStream { bytes })
}

/// Strip the header and filler, returning the meaningful bits.
///
/// # Errors
/// - `Error::TruncatedStream` if there is no header byte, or the padding
///   exceeds the payload.
/// - `Error::InvalidPadding` if the padding byte is above 7.
pub fn unpack(stream: &PackedStream) -> Result<BitBuf> {
    let padding = stream.padding().ok_or(Error::TruncatedStream {
        available: 0,
        required: 8,
    })?;
    if padding > MAX_PADDING {
        return Err(Error::InvalidPadding(padding));
    }

    let available = stream.payload().len() * 8;
    let padding = padding as usize;
    if available < padding {
        return Err(Error::TruncatedStream {
            available,
            required: padding,
        });
    }

    let mut bits = BitBuf::from_bytes(stream.payload().to_vec());
    bits.truncate(available - padding);
    Ok(bits)
}
