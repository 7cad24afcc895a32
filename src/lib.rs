//! # Huffman Prefix Coding
//!
//! *Lossless entropy coding with a frequency-driven binary tree.*
//!
//! ## Intuition First
//!
//! Morse code gives the most common letter, `E`, a single dot. Huffman coding
//! makes the same trade systematically: frequent symbols get short codewords,
//! rare symbols get long ones, and no codeword is the beginning of another, so
//! a decoder can split the bitstream without separators.
//!
//! ## The Problem
//!
//! Fixed-width codes spend 8 bits on every byte regardless of how often it
//! occurs. Given the symbol counts of a message, which prefix code minimizes
//! the total encoded length?
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon     Entropy as the fundamental limit
//! 1949  Fano        Top-down splitting (Shannon-Fano), not always optimal
//! 1952  Huffman     Bottom-up greedy merge, provably optimal prefix code
//! 1964  Schwartz    Canonical codes: lengths alone determine the code
//! 1993  Deflate     Huffman as the back end of gzip, zlib and PNG
//! ```
//!
//! ## Algorithm
//!
//! 1. Count symbol occurrences ([`FrequencyTable`]).
//! 2. Put one leaf per symbol in a min-priority queue; repeatedly merge the two
//!    lightest subtrees until one remains ([`HuffmanTree`]).
//! 3. Read each symbol's codeword off its root-to-leaf path, 0 for left and 1
//!    for right ([`CodewordTable`]).
//! 4. Concatenate codewords, pad to a byte boundary, and prefix the padding
//!    count ([`PackedStream`]).
//!
//! Decoding walks the tree from the root one bit at a time and emits a symbol
//! at every leaf.
//!
//! ## Complexity Analysis
//!
//! - **Counting / encoding / decoding**: $O(n)$ in the input length.
//! - **Tree construction**: $O(k \log k)$ for $k$ distinct symbols.
//! - **Space**: $O(k)$ for the tree and codeword table.
//!
//! ## Failure Modes
//!
//! 1. **Missing tree**: a packed stream does not carry its tree. Use
//!    [`container`] to store the frequency table alongside the stream.
//! 2. **Single symbol**: the greedy merge has nothing to pair with; the lone
//!    leaf becomes the root and gets the codeword `0`.
//! 3. **Corrupt input**: bad padding, truncated data and walks that end
//!    mid-codeword are reported as distinct [`Error`] variants.
//!
//! ## Example
//!
//! ```rust
//! let encoded = huffpack::compress(b"aaaabbbcc")?;
//! let decoded = huffpack::decompress(&encoded.stream, &encoded.tree)?;
//! assert_eq!(decoded, b"aaaabbbcc");
//!
//! let stored = huffpack::container::encode(b"aaaabbbcc")?;
//! assert_eq!(huffpack::container::decode(&stored)?, b"aaaabbbcc");
//! # Ok::<(), huffpack::Error>(())
//! ```
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."
//! - Shannon, C. E. (1948). "A Mathematical Theory of Communication."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bits;
pub mod code;
pub mod codec;
pub mod container;
pub mod decoder;
pub mod error;
pub mod frequency;
pub mod packer;
pub mod tree;

pub use bits::BitBuf;
pub use code::CodewordTable;
pub use codec::{compress, decompress, decompress_with_table, Encoded};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use packer::PackedStream;
pub use tree::{HuffmanTree, Node};
