use std::fmt::Debug;

pub mod canonical;
pub mod code;
pub mod encoder;
pub mod frequency;
pub mod tree;

pub use canonical::canonicalize;
pub use code::{CanonicalCodeTable, CodeWord};
pub use frequency::FrequencyTable;
pub use tree::HuffmanTree;

use crate::logger::log_code_table;
use crate::Result;

/// Anything with a total order can serve as a symbol of the input alphabet.
pub trait Symbol: Copy + Ord + Debug {}

impl<T: Copy + Ord + Debug> Symbol for T {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymbolFrequency<S> {
    pub symbol: S,
    pub frequency: usize,
}

impl<S> From<(S, usize)> for SymbolFrequency<S> {
    fn from(value: (S, usize)) -> Self {
        Self {
            symbol: value.0,
            frequency: value.1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymbolCodeLength<S> {
    pub symbol: S,
    pub length: usize,
}

impl<S> From<(S, usize)> for SymbolCodeLength<S> {
    fn from(value: (S, usize)) -> Self {
        Self {
            symbol: value.0,
            length: value.1,
        }
    }
}

/// Counts the symbols, derives code lengths from the Huffman tree and assigns
/// canonical codes to them.
pub fn canonical_huffman_code<S, I>(symbols: I) -> Result<CanonicalCodeTable<S>>
where
    S: Symbol,
    I: IntoIterator<Item = S>,
{
    let frequencies: FrequencyTable<S> = symbols.into_iter().collect();
    let code_lengths = tree::build(&frequencies)?;
    let table = canonicalize(&code_lengths)?;
    log::info!("assigned canonical codes to {} symbols", table.len());
    log_code_table(&table);
    Ok(table)
}
