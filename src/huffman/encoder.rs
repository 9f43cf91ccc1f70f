use super::{CanonicalCodeTable, CodeWord, FrequencyTable, Symbol};
use crate::error::Error;
use crate::Result;

/// Looks up the code word of every symbol of `symbols`, keeping their order.
pub fn encode_sequence<S, I>(table: &CanonicalCodeTable<S>, symbols: I) -> Result<Vec<CodeWord>>
where
    S: Symbol,
    I: IntoIterator<Item = S>,
{
    symbols
        .into_iter()
        .map(|symbol| {
            table
                .get(&symbol)
                .copied()
                .ok_or_else(|| Error::SymbolNotPresentInCodeTable(format!("{:?}", symbol)))
        })
        .collect()
}

/// Renders the code words of `symbols` as bit-strings joined by `separator`.
pub fn concatenate<S, I>(table: &CanonicalCodeTable<S>, symbols: I, separator: &str) -> Result<String>
where
    S: Symbol,
    I: IntoIterator<Item = S>,
{
    let code_words: Vec<String> = encode_sequence(table, symbols)?
        .iter()
        .map(CodeWord::to_string)
        .collect();
    Ok(code_words.join(separator))
}

/// Number of bits needed to encode every occurrence counted in `frequencies`.
pub fn encoded_bit_length<S: Symbol>(
    table: &CanonicalCodeTable<S>,
    frequencies: &FrequencyTable<S>,
) -> Result<usize> {
    frequencies
        .iter()
        .try_fold(0usize, |total, symbol_frequency| {
            let code = table.get(&symbol_frequency.symbol).ok_or_else(|| {
                Error::SymbolNotPresentInCodeTable(format!("{:?}", symbol_frequency.symbol))
            })?;
            code.length()
                .checked_mul(symbol_frequency.frequency)
                .and_then(|bits| total.checked_add(bits))
                .ok_or_else(|| Error::FrequencyOverflow("counting encoded bits".to_owned()))
        })
}
