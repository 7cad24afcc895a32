//! Huffman tree construction.
//!
//! The tree is built by the classic greedy merge: repeatedly take the two
//! lightest subtrees and join them under a new internal node.
//!
//! # Tie-breaking
//!
//! Equal weights are common, and the order in which equal-weight subtrees are
//! extracted decides the shape of the tree. Every heap entry therefore carries
//! a sequence number: leaves are numbered `0..k` in ascending symbol order and
//! internal nodes continue from `k` in creation order. Entries are extracted by
//! `(weight, sequence)`, which is a total order, so a given [`FrequencyTable`]
//! always yields the same tree. The decoder relies on this to rebuild the
//! encoder's tree from a persisted frequency table.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::code::CodewordTable;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

/// Huffman tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A symbol and its count.
    Leaf {
        /// The symbol this leaf decodes to.
        symbol: u8,
        /// Occurrence count of the symbol.
        weight: u64,
    },
    /// A merge of two subtrees. Bit 0 selects `left`, bit 1 selects `right`.
    Internal {
        /// Combined weight of both subtrees.
        weight: u64,
        /// Subtree reached by a 0 bit.
        left: Box<Node>,
        /// Subtree reached by a 1 bit.
        right: Box<Node>,
    },
}

impl Node {
    /// Combined frequency of this subtree.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    /// The symbol, if this is a leaf.
    pub fn symbol(&self) -> Option<u8> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// The child selected by `bit`, or `None` for a leaf.
    #[inline]
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { &**right } else { &**left }),
        }
    }
}

// A subtree waiting in the merge heap.
struct Pending {
    weight: u64,
    seq: usize,
    node: Node,
}

impl Pending {
    fn key(&self) -> (u64, usize) {
        (self.weight, self.seq)
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pending {}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key()) // Min-priority queue
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A Huffman prefix-code tree with exactly one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree for a frequency table.
    ///
    /// A table with a single symbol produces a tree whose root is that leaf.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if the table is empty.
    pub fn from_frequencies(table: &FrequencyTable) -> Result<Self> {
        let mut heap: BinaryHeap<Pending> = table
            .iter()
            .enumerate()
            .map(|(seq, (symbol, weight))| Pending {
                weight,
                seq,
                node: Node::Leaf { symbol, weight },
            })
            .collect();

        let mut next_seq = heap.len();
        loop {
            let Some(left) = heap.pop() else {
                return Err(Error::EmptyInput);
            };
            let Some(right) = heap.pop() else {
                return Ok(Self { root: left.node });
            };

            let weight = left.weight.saturating_add(right.weight);
            trace!(left = left.seq, right = right.seq, weight, "merge");
            heap.push(Pending {
                weight,
                seq: next_seq,
                node: Node::Internal {
                    weight,
                    left: Box::new(left.node),
                    right: Box::new(right.node),
                },
            });
            next_seq += 1;
        }
    }

    /// Count `data` and build its tree.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_frequencies(&FrequencyTable::from_bytes(data))
    }

    /// Rebuild a decoding tree from a codeword table.
    ///
    /// Weights are not recoverable from codewords and are set to zero. The
    /// codewords must describe a full binary tree: every internal node needs
    /// both children. A single symbol with codeword `0` becomes a root leaf.
    ///
    /// # Errors
    /// Returns `Error::InvalidHeader` if the table is empty, not prefix-free,
    /// or leaves a branch without a child.
    pub fn from_codewords(table: &CodewordTable) -> Result<Self> {
        #[derive(Clone, Copy)]
        enum Slot {
            Open,
            Leaf(u8),
            Branch([Option<usize>; 2]),
        }

        if table.is_empty() {
            return Err(Error::InvalidHeader("empty codeword table".into()));
        }
        if table.len() == 1 {
            if let Some((symbol, code)) = table.iter().next() {
                if code.len() == 1 && code.get(0) == Some(false) {
                    return Ok(Self {
                        root: Node::Leaf { symbol, weight: 0 },
                    });
                }
            }
        }

        let conflict = |symbol: u8| {
            Error::InvalidHeader(format!("codeword of 0x{symbol:02x} overlaps another"))
        };
        let incomplete = || Error::InvalidHeader("codewords leave a branch incomplete".into());

        // Children are always pushed after their parent.
        let mut slots = vec![Slot::Open];
        for (symbol, code) in table.iter() {
            if code.is_empty() {
                return Err(Error::InvalidHeader(format!(
                    "empty codeword for 0x{symbol:02x}"
                )));
            }
            let mut at = 0;
            for bit in code.iter() {
                if let Slot::Open = slots[at] {
                    slots[at] = Slot::Branch([None, None]);
                }
                let Slot::Branch(children) = slots[at] else {
                    return Err(conflict(symbol));
                };
                let side = bit as usize;
                at = match children[side] {
                    Some(next) => next,
                    None => {
                        let next = slots.len();
                        slots.push(Slot::Open);
                        if let Slot::Branch(children) = &mut slots[at] {
                            children[side] = Some(next);
                        }
                        next
                    }
                };
            }
            match slots[at] {
                Slot::Open => slots[at] = Slot::Leaf(symbol),
                _ => return Err(conflict(symbol)),
            }
        }

        let mut built: Vec<Option<Node>> = vec![None; slots.len()];
        for i in (0..slots.len()).rev() {
            let node = match slots[i] {
                Slot::Leaf(symbol) => Node::Leaf { symbol, weight: 0 },
                Slot::Branch([Some(l), Some(r)]) => Node::Internal {
                    weight: 0,
                    left: Box::new(built[l].take().ok_or_else(incomplete)?),
                    right: Box::new(built[r].take().ok_or_else(incomplete)?),
                },
                _ => return Err(incomplete()),
            };
            built[i] = Some(node);
        }

        let root = built[0].take().ok_or_else(incomplete)?;
        Ok(Self { root })
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Weight of the whole tree, i.e. the number of symbols it was built from.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Number of leaves, i.e. distinct symbols.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { .. } => count += 1,
                Node::Internal { left, right, .. } => {
                    stack.push(&**right);
                    stack.push(&**left);
                }
            }
        }
        count
    }

    /// Length of the longest root-to-leaf path. A root leaf has depth 0.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                Node::Leaf { .. } => max = max.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((&**right, depth + 1));
                    stack.push((&**left, depth + 1));
                }
            }
        }
        max
    }
}
