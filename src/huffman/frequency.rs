use std::collections::BTreeMap;

use super::{Symbol, SymbolFrequency};
use crate::error::Error;
use crate::Result;

/// Occurrence counts of the symbols of an input sequence.
///
/// Every contained symbol has a count of at least one. Iteration yields the
/// symbols in ascending order, which is also the order in which the tree
/// builder inserts its leaves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable<S> {
    symbol_frequencies: BTreeMap<S, usize>,
}

impl<S: Symbol> FrequencyTable<S> {
    pub fn new() -> Self {
        Self {
            symbol_frequencies: BTreeMap::new(),
        }
    }

    /// Builds a table from explicit pairs. Counts of repeated symbols are
    /// added up, pairs with a count of zero are dropped.
    pub fn from_pairs<T: IntoIterator<Item = (S, usize)>>(pairs: T) -> Result<Self> {
        let mut table = Self::new();
        for (symbol, frequency) in pairs {
            if frequency == 0 {
                log::warn!("dropping symbol {:?} without occurrences", symbol);
                continue;
            }
            let count = table.symbol_frequencies.entry(symbol).or_default();
            *count = count.checked_add(frequency).ok_or_else(|| {
                Error::FrequencyOverflow(format!("adding up the counts of symbol {:?}", symbol))
            })?;
        }
        Ok(table)
    }

    fn increment_symbol(&mut self, symbol: S) {
        *self.symbol_frequencies.entry(symbol).or_default() += 1;
    }

    pub fn len(&self) -> usize {
        self.symbol_frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbol_frequencies.is_empty()
    }

    pub fn frequency(&self, symbol: &S) -> Option<usize> {
        self.symbol_frequencies.get(symbol).copied()
    }

    pub fn total(&self) -> Result<usize> {
        self.symbol_frequencies
            .values()
            .try_fold(0usize, |total, &frequency| total.checked_add(frequency))
            .ok_or_else(|| Error::FrequencyOverflow("summing up all counts".to_owned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = SymbolFrequency<S>> + '_ {
        self.symbol_frequencies
            .iter()
            .map(|(&symbol, &frequency)| SymbolFrequency { symbol, frequency })
    }
}

impl<S: Symbol> Default for FrequencyTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> FromIterator<S> for FrequencyTable<S> {
    fn from_iter<T: IntoIterator<Item = S>>(symbols: T) -> Self {
        let mut table = Self::new();
        for symbol in symbols {
            table.increment_symbol(symbol);
        }
        table
    }
}
