//! Symbol to codeword mapping.

use std::collections::BTreeMap;

use crate::bit_vec::BitVec;
use crate::error::{HuffmanError, Result};

/// Flattened `symbol -> codeword` view of a code tree.
///
/// Tables produced by [`CodeTree::code_table`](crate::CodeTree::code_table)
/// are prefix-free; hand-built tables are checked when they are rebuilt
/// into a tree, not on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, BitVec>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from textual codewords such as `[(b'a', "0"), (b'b', "10")]`.
    pub fn from_strs(pairs: &[(u8, &str)]) -> Result<Self> {
        pairs
            .iter()
            .map(|&(symbol, code)| code.parse::<BitVec>().map(|bits| (symbol, bits)))
            .collect()
    }

    /// Assign `code` to `symbol`, returning the codeword it replaced.
    pub fn insert(&mut self, symbol: u8, code: BitVec) -> Option<BitVec> {
        self.codes.insert(symbol, code)
    }

    pub fn get(&self, symbol: u8) -> Option<&BitVec> {
        self.codes.get(&symbol)
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.codes.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitVec)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(BitVec::len).max().unwrap_or(0)
    }

    /// Number of bits `data` occupies once encoded, or the first symbol
    /// without a codeword.
    pub fn encoded_bit_len(&self, data: &[u8]) -> Result<usize> {
        data.iter().enumerate().try_fold(0usize, |acc, (position, &symbol)| {
            self.get(symbol)
                .map(|code| acc + code.len())
                .ok_or(HuffmanError::UnknownSymbol { symbol, position })
        })
    }

    /// True when no codeword is empty and none is a prefix of another.
    ///
    /// A lone entry is always accepted as long as its codeword is non-empty.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&BitVec> = self.codes.values().collect();
        if codes.iter().any(|code| code.is_empty()) {
            return false;
        }
        // in lexicographic order a prefix sits directly before one of its extensions
        codes.sort_by(|a, b| a.cmp_lexicographic(b));
        codes.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }
}

impl FromIterator<(u8, BitVec)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (u8, BitVec)>>(iter: I) -> Self {
        CodeTable {
            codes: iter.into_iter().collect(),
        }
    }
}
