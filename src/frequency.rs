//! Symbol frequency analysis.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Occurrence counts per symbol, ordered by symbol value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    /// Count every byte of `data` in a single pass.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut hist = [0u64; 256];
        for &b in data {
            hist[b as usize] += 1;
        }
        let counts = hist
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(s, &c)| (s as u8, c))
            .collect();
        Self { counts }
    }

    /// Rebuild a table from `(symbol, count)` pairs, as read from a header.
    ///
    /// # Errors
    /// Returns `Error::InvalidHeader` on a zero count or a repeated symbol.
    pub fn from_counts<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut counts = BTreeMap::new();
        for (symbol, count) in pairs {
            if count == 0 {
                return Err(Error::InvalidHeader(format!(
                    "zero count for symbol 0x{symbol:02x}"
                )));
            }
            if counts.insert(symbol, count).is_some() {
                return Err(Error::InvalidHeader(format!(
                    "duplicate symbol 0x{symbol:02x}"
                )));
            }
        }
        Ok(Self { counts })
    }

    /// Count for `symbol`, zero if it never occurred.
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if no symbol occurred.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of symbols counted. Saturates on tables read from
    /// untrusted headers.
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    /// `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }
}
