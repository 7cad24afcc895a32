//! One-shot compression and decompression.

use tracing::debug;

use crate::code::CodewordTable;
use crate::decoder;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::packer::{self, PackedStream};
use crate::tree::HuffmanTree;

/// A packed stream together with the tree needed to decode it.
#[derive(Debug, Clone)]
pub struct Encoded {
    /// The encoded data.
    pub stream: PackedStream,
    /// The tree that produced `stream`.
    pub tree: HuffmanTree,
}

/// Compress `input`.
///
/// # Errors
/// Returns `Error::EmptyInput` if `input` is empty.
pub fn compress(input: &[u8]) -> Result<Encoded> {
    let freqs = FrequencyTable::from_bytes(input);
    let tree = HuffmanTree::from_frequencies(&freqs)?;
    let table = CodewordTable::from_tree(&tree);
    let stream = packer::pack(input, &table)?;
    debug!(
        input = input.len(),
        symbols = freqs.len(),
        output = stream.len(),
        "compressed"
    );
    Ok(Encoded { stream, tree })
}

/// Decompress `stream` with the tree it was encoded with.
pub fn decompress(stream: &PackedStream, tree: &HuffmanTree) -> Result<Vec<u8>> {
    decoder::decode_stream(stream, tree)
}

/// Decompress `stream` with a codeword table instead of a tree.
///
/// # Errors
/// Returns `Error::InvalidHeader` if `table` does not form a full prefix code,
/// and any error of [`decompress`].
pub fn decompress_with_table(stream: &PackedStream, table: &CodewordTable) -> Result<Vec<u8>> {
    let tree = HuffmanTree::from_codewords(table)?;
    decompress(stream, &tree)
}
