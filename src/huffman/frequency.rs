//! Contains [FrequencyTable], the occurrence count of
//! every byte value within one pass's input.

use crate::common::MAX_SYMBOLS;

/// How often each byte value occurs in a buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [usize; MAX_SYMBOLS],
}

impl FrequencyTable {
    /// Tabulate the occurrences of every byte value in `data`.
    pub fn count(data: &[u8]) -> Self {
        let mut counts = [0; MAX_SYMBOLS];
        for byte in data {
            counts[*byte as usize] += 1;
        }
        FrequencyTable { counts }
    }

    pub fn get(&self, symbol: u8) -> usize {
        self.counts[symbol as usize]
    }

    /// All symbols that occur at least once, in ascending symbol order
    pub fn symbols(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, count)| (symbol as u8, *count))
    }

    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|count| **count > 0).count()
    }

    /// Sum of all counts, equal to the length of the counted buffer
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|count| *count == 0)
    }
}

impl core::fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.symbols()).finish()
    }
}
