//! Byte-occurrence counting for tree construction.

use std::io::Read;

use crate::error::Result;

/// Occurrence counts for every possible byte value.
///
/// Only bytes with a positive count become leaves in the tree; the
/// pseudo-EOF symbol is added by the tree builder itself and never
/// appears here.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    /// Create an empty table (all counts zero).
    pub fn new() -> Self {
        Self { counts: [0; 256] }
    }

    /// Count every byte in a slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.counts[byte as usize] += 1;
        }
        table
    }

    /// Count every byte read from a source until end of data.
    pub fn from_reader<R: Read>(mut source: R) -> Result<Self> {
        let mut table = Self::new();
        let mut buf = [0u8; 8192];
        loop {
            let n = source.read(&mut buf)?;
            if n == 0 {
                break;
            }
            for &byte in &buf[..n] {
                table.counts[byte as usize] += 1;
            }
        }
        Ok(table)
    }

    /// Occurrence count for one byte value.
    pub fn count(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Iterate over `(byte, count)` pairs with positive counts, in byte order.
    pub fn positive_counts(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(b, &c)| (b as u8, c))
    }

    /// Number of distinct byte values observed.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}
