//! Growable bit buffer.
//!
//! Bits are stored most-significant-bit first within each byte, which is also
//! the wire order of a packed stream. A codeword, an encoded payload and an
//! unpacked payload are all `BitBuf`s.

use std::fmt;

/// A growable sequence of bits with bit-level push and pop.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitBuf {
    // Backing bytes, msb first. Bits past `len` are always zero.
    bytes: Vec<u8>,

    // Number of valid bits.
    len: usize,
}

impl BitBuf {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// Wrap whole bytes; every bit of `bytes` is valid.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let len = bytes.len() * 8;
        Self { bytes, len }
    }

    /// Number of bits in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the buffer holds no bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append one bit.
    pub fn push(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 0x80 >> offset;
        }
        self.len += 1;
    }

    /// Remove and return the last bit.
    pub fn pop(&mut self) -> Option<bool> {
        if self.len == 0 {
            return None;
        }
        let bit = self.get(self.len - 1);
        self.truncate(self.len - 1);
        bit
    }

    /// Shorten the buffer to `len` bits. No-op if already shorter.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        self.bytes.truncate(len.div_ceil(8));
        let offset = len % 8;
        if offset != 0 {
            // Keep the invariant that unused low bits are zero.
            let last = self.bytes.len() - 1;
            self.bytes[last] &= !(0xffu8 >> offset);
        }
        self.len = len;
    }

    /// Read the bit at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bytes[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    /// Append all bits of `other`.
    pub fn extend_from(&mut self, other: &BitBuf) {
        // Fast path: byte aligned, copy whole bytes.
        if self.len % 8 == 0 {
            self.bytes.extend_from_slice(&other.bytes);
            self.len += other.len;
            return;
        }
        for bit in other.iter() {
            self.push(bit);
        }
    }

    /// True if `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &BitBuf) -> bool {
        self.len <= other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }

    /// Iterate over the bits in order.
    pub fn iter(&self) -> Iter<'_> {
        Iter { buf: self, pos: 0 }
    }

    /// The backing bytes. The last byte is zero-filled past `len()`.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the buffer and return the backing bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl fmt::Debug for BitBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitBuf(\"{}\")", self)
    }
}

impl fmt::Display for BitBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromIterator<bool> for BitBuf {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut buf = BitBuf::new();
        for bit in iter {
            buf.push(bit);
        }
        buf
    }
}

/// Iterator over the bits of a [`BitBuf`].
pub struct Iter<'a> {
    buf: &'a BitBuf,
    pos: usize,
}

impl Iterator for Iter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let bit = self.buf.get(self.pos)?;
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buf.len - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a BitBuf {
    type Item = bool;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitBuf {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_push_is_msb_first() {
        let mut buf = BitBuf::new();
        buf.push(true);
        assert_eq!(buf.as_bytes(), &[0x80]);
        for _ in 0..6 {
            buf.push(false);
        }
        buf.push(true);
        assert_eq!(buf.as_bytes(), &[0x81]);
        buf.push(true);
        assert_eq!(buf.len(), 9);
        assert_eq!(buf.as_bytes(), &[0x81, 0x80]);
    }

    #[test]
    fn test_pop_and_truncate_clear_bits() {
        let mut buf = bits("1011");
        assert_eq!(buf.pop(), Some(true));
        assert_eq!(buf.pop(), Some(true));
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.as_bytes(), &[0x80]);

        // A cleared slot must read back as zero after a new push.
        buf.push(false);
        assert_eq!(buf.to_string(), "100");

        let mut empty = BitBuf::new();
        assert_eq!(empty.pop(), None);
    }

    #[test]
    fn test_truncate_across_bytes() {
        let mut buf = bits("111111111");
        buf.truncate(3);
        assert_eq!(buf.as_bytes(), &[0xe0]);
        buf.truncate(10);
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn test_extend_unaligned() {
        let mut a = bits("101");
        a.extend_from(&bits("0110"));
        assert_eq!(a.to_string(), "1010110");

        let mut b = BitBuf::from_bytes(vec![0xff]);
        b.extend_from(&bits("01"));
        assert_eq!(b.as_bytes(), &[0xff, 0x40]);
        assert_eq!(b.len(), 10);
    }

    #[test]
    fn test_prefix() {
        assert!(bits("10").is_prefix_of(&bits("101")));
        assert!(bits("10").is_prefix_of(&bits("10")));
        assert!(!bits("11").is_prefix_of(&bits("101")));
        assert!(!bits("101").is_prefix_of(&bits("10")));
    }
}
