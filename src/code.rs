//! Codeword assignment.

use std::collections::BTreeMap;

use crate::bits::BitBuf;
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};

/// Mapping from symbol to its codeword, the root-to-leaf path (0 = left,
/// 1 = right).
///
/// Tables built with [`CodewordTable::from_tree`] are always prefix-free.
/// Tables collected from `(symbol, codeword)` pairs are taken as given; a
/// later pair for the same symbol replaces an earlier one. Use
/// [`HuffmanTree::from_codewords`] to validate them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodewordTable {
    codes: BTreeMap<u8, BitBuf>,
}

impl CodewordTable {
    /// Walk `tree` and record the path to every leaf.
    ///
    /// A tree whose root is a leaf assigns that symbol the codeword `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        let mut path = BitBuf::new();

        // (node, path length of its parent, bit taken to reach it)
        let mut stack: Vec<(&Node, usize, Option<bool>)> = vec![(tree.root(), 0, None)];
        while let Some((node, len, bit)) = stack.pop() {
            path.truncate(len);
            if let Some(bit) = bit {
                path.push(bit);
            }
            match node {
                Node::Leaf { symbol, .. } => {
                    let code = if path.is_empty() {
                        std::iter::once(false).collect::<BitBuf>()
                    } else {
                        path.clone()
                    };
                    codes.insert(*symbol, code);
                }
                Node::Internal { left, right, .. } => {
                    let len = path.len();
                    stack.push((&**right, len, Some(true)));
                    stack.push((&**left, len, Some(false)));
                }
            }
        }

        Self { codes }
    }

    /// Codeword for `symbol`.
    pub fn get(&self, symbol: u8) -> Option<&BitBuf> {
        self.codes.get(&symbol)
    }

    /// Number of symbols with a codeword.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True if the table has no codewords.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// `(symbol, codeword)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitBuf)> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c))
    }

    /// Codeword length per symbol.
    pub fn lengths(&self) -> BTreeMap<u8, usize> {
        self.codes.iter().map(|(&s, c)| (s, c.len())).collect()
    }

    /// Bits needed to encode the symbols counted in `freqs`.
    ///
    /// Symbols without a codeword contribute nothing. Saturates at
    /// `u64::MAX` for counts read from untrusted headers.
    pub fn encoded_bits(&self, freqs: &FrequencyTable) -> u64 {
        freqs.iter().fold(0u64, |acc, (s, count)| {
            let len = self.get(s).map_or(0, |c| c.len() as u64);
            acc.saturating_add(count.saturating_mul(len))
        })
    }

    /// True if no codeword is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&BitBuf> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}

impl FromIterator<(u8, BitBuf)> for CodewordTable {
    fn from_iter<I: IntoIterator<Item = (u8, BitBuf)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}
