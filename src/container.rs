//! Self-describing container format.
//!
//! A [`PackedStream`] cannot be decoded on its own: the decoder needs the tree.
//! The container stores the frequency table in front of the stream, and the
//! decoder rebuilds the exact tree from it (tree construction is
//! deterministic, see [`crate::tree`]).
//!
//! ```text
//! magic     4 bytes   b"HUF1"
//! k         u16 LE    number of distinct symbols, 0..=256
//! k times:  u8        symbol, strictly ascending
//!           u64 LE    count, non-zero
//! stream    ..        padding byte + packed bits, to end of input
//! ```
//!
//! Empty input is stored as `k = 0` followed by the stream `[0]`.

use std::io::Write;

use tracing::debug;

use crate::code::CodewordTable;
use crate::decoder;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::packer::{self, PackedStream};
use crate::tree::HuffmanTree;

/// Leading bytes of every container.
pub const MAGIC: [u8; 4] = *b"HUF1";

// Bytes per persisted (symbol, count) entry.
const ENTRY_LEN: usize = 1 + 8;

/// Header facts of a container, without decoding the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Distinct symbols in the original data.
    pub symbols: usize,
    /// Length of the original data in bytes.
    pub original_len: u64,
    /// Size of the header (magic and frequency table).
    pub header_len: usize,
    /// Size of the packed stream, padding byte included.
    pub stream_len: usize,
    /// Declared padding bits.
    pub padding: u8,
}

/// Compress `input` into a self-contained container.
pub fn encode(input: &[u8]) -> Result<Vec<u8>> {
    let freqs = FrequencyTable::from_bytes(input);
    let stream = if freqs.is_empty() {
        PackedStream::from_bytes(vec![0])
    } else {
        let tree = HuffmanTree::from_frequencies(&freqs)?;
        packer::pack(input, &CodewordTable::from_tree(&tree))?
    };

    let mut out = Vec::with_capacity(header_len(freqs.len()) + stream.len());
    write_header(&mut out, &freqs)?;
    out.write_all(stream.as_bytes())?;
    debug!(input = input.len(), output = out.len(), "container encoded");
    Ok(out)
}

/// Decompress a container produced by [`encode`].
///
/// # Errors
/// - `Error::InvalidHeader` if the header is malformed.
/// - Any stream error of [`decoder::decode_stream`].
/// - `Error::CorruptStream` if the stream decodes to a different number of
///   symbols than the header declares.
pub fn decode(bytes: &[u8]) -> Result<Vec<u8>> {
    let (freqs, rest) = read_header(bytes)?;
    let stream = PackedStream::from_bytes(rest.to_vec());

    if freqs.is_empty() {
        let bits = packer::unpack(&stream)?;
        if !bits.is_empty() {
            return Err(Error::CorruptStream { bit_offset: 0 });
        }
        return Ok(Vec::new());
    }

    let tree = HuffmanTree::from_frequencies(&freqs)?;
    let out = decoder::decode_stream(&stream, &tree)?;
    if out.len() as u64 != freqs.total() {
        return Err(Error::CorruptStream {
            bit_offset: stream.bit_len().unwrap_or(0),
        });
    }
    debug!(input = bytes.len(), output = out.len(), "container decoded");
    Ok(out)
}

/// Read the header of a container and describe it.
///
/// # Errors
/// - `Error::InvalidHeader` if the header is malformed.
/// - `Error::TruncatedStream` if the padding byte is missing.
/// - `Error::InvalidPadding` if the padding byte is above 7.
pub fn inspect(bytes: &[u8]) -> Result<Summary> {
    let (freqs, rest) = read_header(bytes)?;
    let padding = rest.first().copied().ok_or(Error::TruncatedStream {
        available: 0,
        required: 8,
    })?;
    if padding > packer::MAX_PADDING {
        return Err(Error::InvalidPadding(padding));
    }
    Ok(Summary {
        symbols: freqs.len(),
        original_len: freqs.total(),
        header_len: bytes.len() - rest.len(),
        stream_len: rest.len(),
        padding,
    })
}

fn header_len(symbols: usize) -> usize {
    MAGIC.len() + 2 + symbols * ENTRY_LEN
}

fn write_header<W: Write>(w: &mut W, freqs: &FrequencyTable) -> Result<()> {
    w.write_all(&MAGIC)?;
    w.write_all(&(freqs.len() as u16).to_le_bytes())?;
    for (symbol, count) in freqs.iter() {
        w.write_all(&[symbol])?;
        w.write_all(&count.to_le_bytes())?;
    }
    Ok(())
}

fn read_header(bytes: &[u8]) -> Result<(FrequencyTable, &[u8])> {
    let truncated = || Error::InvalidHeader("header truncated".into());

    let (magic, rest) = bytes.split_first_chunk::<4>().ok_or_else(truncated)?;
    if *magic != MAGIC {
        return Err(Error::InvalidHeader("bad magic".into()));
    }

    let (k, mut rest) = rest.split_first_chunk::<2>().ok_or_else(truncated)?;
    let k = u16::from_le_bytes(*k) as usize;
    if k > 256 {
        return Err(Error::InvalidHeader(format!("{k} symbols declared")));
    }

    let mut pairs = Vec::with_capacity(k);
    let mut prev: Option<u8> = None;
    let mut total = 0u64;
    for _ in 0..k {
        let (entry, tail) = rest
            .split_first_chunk::<ENTRY_LEN>()
            .ok_or_else(truncated)?;
        let (&[symbol], count) = entry.split_first_chunk::<1>().ok_or_else(truncated)?;
        let count = u64::from_le_bytes(count.try_into().map_err(|_| truncated())?);
        if prev.is_some_and(|p| p >= symbol) {
            return Err(Error::InvalidHeader("symbols not ascending".into()));
        }
        prev = Some(symbol);
        total = total
            .checked_add(count)
            .ok_or_else(|| Error::InvalidHeader("symbol counts overflow".into()))?;
        pairs.push((symbol, count));
        rest = tail;
    }

    Ok((FrequencyTable::from_counts(pairs)?, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let bytes = encode(data).unwrap();
        assert_eq!(decode(&bytes).unwrap(), data);
    }

    #[test]
    fn test_empty_roundtrip() {
        let bytes = encode(b"").unwrap();
        assert_eq!(bytes, [b'H', b'U', b'F', b'1', 0, 0, 0]);
        assert!(decode(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_layout() {
        let bytes = encode(b"aaaa").unwrap();
        let mut expected = b"HUF1".to_vec();
        expected.extend_from_slice(&[1, 0, b'a']);
        expected.extend_from_slice(&4u64.to_le_bytes());
        expected.extend_from_slice(&[4, 0]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_inspect() {
        let bytes = encode(b"aaaabbbcc").unwrap();
        let summary = inspect(&bytes).unwrap();
        assert_eq!(
            summary,
            Summary {
                symbols: 3,
                original_len: 9,
                header_len: 6 + 3 * 9,
                stream_len: 3,
                padding: 2,
            }
        );
    }

    #[test]
    fn test_bad_headers() {
        assert!(matches!(decode(b"HUF"), Err(Error::InvalidHeader(_))));
        assert!(matches!(decode(b"NOPE\0\0\0"), Err(Error::InvalidHeader(_))));

        let mut bytes = encode(b"ab").unwrap();
        // Declare one more symbol than is present.
        bytes[4] = 3;
        assert!(matches!(decode(&bytes), Err(Error::InvalidHeader(_))));

        // Swap the two entries so symbols are descending.
        let mut bytes = encode(b"ab").unwrap();
        bytes[6] = b'b';
        bytes[15] = b'a';
        assert!(matches!(decode(&bytes), Err(Error::InvalidHeader(_))));
    }

    #[test]
    fn test_bad_padding() {
        let mut bytes = encode(b"aaaabbbcc").unwrap();
        let at = header_len(3);
        bytes[at] = 9;
        assert!(matches!(inspect(&bytes), Err(Error::InvalidPadding(9))));
        assert!(matches!(decode(&bytes), Err(Error::InvalidPadding(9))));
    }

    #[test]
    fn test_overflowing_counts() {
        let mut bytes = MAGIC.to_vec();
        bytes.extend_from_slice(&2u16.to_le_bytes());
        for symbol in [b'a', b'b'] {
            bytes.push(symbol);
            bytes.extend_from_slice(&(u64::MAX / 2 + 1).to_le_bytes());
        }
        bytes.extend_from_slice(&[0, 0]);
        assert!(matches!(inspect(&bytes), Err(Error::InvalidHeader(_))));
        assert!(matches!(decode(&bytes), Err(Error::InvalidHeader(_))));
    }

    #[test]
    fn test_count_mismatch_is_corrupt() {
        let mut bytes = encode(b"aaaabbbcc").unwrap();
        // Bump the count of 'a' from 4 to 5; the stream still holds 9 symbols.
        bytes[7] = 5;
        assert!(matches!(decode(&bytes), Err(Error::CorruptStream { .. })));
    }

    #[test]
    fn test_truncated_stream() {
        let mut bytes = encode(b"aaaabbbcc").unwrap();
        bytes.pop();
        assert!(decode(&bytes).is_err());
    }
}
