use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::HuffmanError;

/// Growable sequence of bits packed MSB-first into bytes.
///
/// Used both for whole encoded streams and for individual codewords. Bits
/// past `bit_count` in the last byte are always zero, so two vectors with
/// the same logical bits compare equal.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitVec {
    bits: Vec<u8>,
    bit_count: usize,
}

impl BitVec {
    pub fn new() -> Self {
        BitVec {
            bits: Vec::new(),
            bit_count: 0,
        }
    }

    pub fn with_capacity(bit_capacity: usize) -> Self {
        BitVec {
            bits: Vec::with_capacity(bit_capacity.div_ceil(8)),
            bit_count: 0,
        }
    }

    /// Wrap whole bytes; every bit of `bytes` is content.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        BitVec {
            bits: bytes.to_vec(),
            bit_count: bytes.len() * 8,
        }
    }

    pub fn len(&self) -> usize {
        self.bit_count
    }

    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    /// Zero bits needed to round the vector up to a byte boundary.
    pub fn padding(&self) -> u8 {
        ((8 - self.bit_count % 8) % 8) as u8
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bits
    }

    pub fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8; // which byte is target?
        let bit_offset = self.bit_count % 8; // which bit position is target?

        // make a new byte if needed
        if byte_index >= self.bits.len() {
            self.bits.push(0);
        }

        if bit {
            // set bit with OR  and mask
            self.bits[byte_index] |= 1 << (7 - bit_offset);
        }

        self.bit_count += 1;
    }

    /// Append every bit of `other`.
    pub fn extend_from(&mut self, other: &BitVec) {
        let offset = self.bit_count % 8;
        if offset == 0 {
            // byte aligned, copy whole bytes
            self.bits.extend_from_slice(&other.bits);
            self.bit_count += other.bit_count;
            return;
        }
        for bit in other.iter() {
            self.push_bit(bit);
        }
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_count {
            return None;
        }
        Some(bit_at(&self.bits, index))
    }

    pub fn last(&self) -> Option<bool> {
        self.bit_count.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Remove and return the final bit.
    pub fn pop(&mut self) -> Option<bool> {
        let bit = self.last()?;
        self.truncate(self.bit_count - 1);
        Some(bit)
    }

    /// Shorten to `len` bits, clearing everything after.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.bit_count {
            return;
        }
        self.bits.truncate(len.div_ceil(8));
        let used = len % 8;
        if used != 0 {
            if let Some(tail) = self.bits.last_mut() {
                *tail &= 0xFF << (8 - used);
            }
        }
        self.bit_count = len;
    }

    /// True when `prefix` matches the first `prefix.len()` bits of `self`.
    pub fn starts_with(&self, prefix: &BitVec) -> bool {
        prefix.len() <= self.len() && prefix.iter().zip(self.iter()).all(|(a, b)| a == b)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_count).map(move |i| bit_at(&self.bits, i))
    }

    /// Lexicographic order over the bit sequence, where a prefix sorts
    /// before its extensions.
    pub fn cmp_lexicographic(&self, other: &BitVec) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

/// Iterate over all bits of `bytes`, most significant bit of each byte first.
pub fn msb_bits(bytes: &[u8]) -> impl Iterator<Item = bool> + '_ {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
}

#[inline]
fn bit_at(bytes: &[u8], index: usize) -> bool {
    (bytes[index / 8] >> (7 - index % 8)) & 1 == 1
}

/// Shorter codewords first, then by bit value.
impl Ord for BitVec {
    fn cmp(&self, other: &Self) -> Ordering {
        // trailing bits are zero, so byte order is bit order at equal length
        self.bit_count
            .cmp(&other.bit_count)
            .then_with(|| self.bits.cmp(&other.bits))
    }
}

impl PartialOrd for BitVec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(usize, Vec<u8>)> for BitVec {
    fn from((bit_count, mut bits): (usize, Vec<u8>)) -> Self {
        let mut full = BitVec::new();
        bits.resize(bit_count.div_ceil(8), 0);
        full.bit_count = bits.len() * 8;
        full.bits = bits;
        full.truncate(bit_count);
        full
    }
}

impl FromIterator<bool> for BitVec {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bits = BitVec::new();
        for bit in iter {
            bits.push_bit(bit);
        }
        bits
    }
}

impl FromStr for BitVec {
    type Err = HuffmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                found => Err(HuffmanError::InvalidBitString { found }),
            })
            .collect()
    }
}

impl fmt::Display for BitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
