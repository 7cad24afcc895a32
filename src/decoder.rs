//! Tree-driven decoding.
//!
//! Decoding is a two-state machine driven one bit at a time:
//!
//! ```text
//!            bit -> leaf: emit symbol
//!        +--------------------------------+
//!        v                                |
//!   [ AtRoot ] --bit -> internal--> [ InInternalNode ] --bit -> internal--+
//!                                         ^                               |
//!                                         +-------------------------------+
//! ```
//!
//! Running out of bits in `AtRoot` is a clean end; running out in
//! `InInternalNode` means the stream stopped in the middle of a codeword.

use tracing::debug;

use crate::bits::BitBuf;
use crate::error::{Error, Result};
use crate::packer::{self, PackedStream};
use crate::tree::{HuffmanTree, Node};

enum State<'t> {
    AtRoot,
    InInternalNode(&'t Node),
}

/// Decode `bits` by walking `tree`.
///
/// For a tree whose root is a leaf, each `0` bit emits the symbol and a `1`
/// bit is an error.
///
/// # Errors
/// Returns `Error::CorruptStream` if a bit selects a child that does not exist
/// or the bits end mid-codeword. No partial output is returned.
pub fn decode(bits: &BitBuf, tree: &HuffmanTree) -> Result<Vec<u8>> {
    let root = tree.root();
    let mut out = Vec::new();
    let mut state = State::AtRoot;

    for (offset, bit) in bits.iter().enumerate() {
        let at = match state {
            State::AtRoot => root,
            State::InInternalNode(node) => node,
        };
        let next = match (at, bit) {
            // A root leaf only has the implicit 0 edge back to itself.
            (Node::Leaf { .. }, false) => at,
            (Node::Leaf { .. }, true) => return Err(Error::CorruptStream { bit_offset: offset }),
            (Node::Internal { left, right, .. }, bit) => {
                if bit {
                    &**right
                } else {
                    &**left
                }
            }
        };
        state = match next {
            Node::Leaf { symbol, .. } => {
                out.push(*symbol);
                State::AtRoot
            }
            Node::Internal { .. } => State::InInternalNode(next),
        };
    }

    if let State::InInternalNode(_) = state {
        return Err(Error::CorruptStream {
            bit_offset: bits.len(),
        });
    }

    debug!(bits = bits.len(), symbols = out.len(), "decoded");
    Ok(out)
}

/// Unpack `stream` and decode it with `tree`.
pub fn decode_stream(stream: &PackedStream, tree: &HuffmanTree) -> Result<Vec<u8>> {
    let bits = packer::unpack(stream)?;
    decode(&bits, tree)
}
