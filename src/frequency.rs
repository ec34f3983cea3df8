//! Symbol frequency counting.

use std::collections::BTreeMap;

/// Occurrence count per byte value. Only symbols with a positive count are
/// stored; iteration is in ascending symbol order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMap {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every byte of `bytes` in a single pass.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut slots = [0u64; 256];
        for &byte in bytes {
            slots[byte as usize] += 1;
        }
        slots
            .iter()
            .enumerate()
            .filter(|(_, count)| **count != 0)
            .map(|(symbol, &count)| (symbol as u8, count))
            .collect()
    }

    /// Add `count` occurrences of `symbol`. A zero count is ignored.
    pub fn record(&mut self, symbol: u8, count: u64) {
        if count == 0 {
            return;
        }
        let slot = self.counts.entry(symbol).or_insert(0);
        *slot = slot.saturating_add(count);
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the length of the counted input.
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

/// Count symbol occurrences in `data`.
pub fn count_frequencies(data: &[u8]) -> FrequencyMap {
    FrequencyMap::from_bytes(data)
}

impl FromIterator<(u8, u64)> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut map = FrequencyMap::new();
        for (symbol, count) in iter {
            map.record(symbol, count);
        }
        map
    }
}
