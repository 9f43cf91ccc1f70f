use std::collections::BTreeMap;

use super::code::{CodeBitPattern, MAX_CODE_LENGTH};
use super::{CanonicalCodeTable, CodeWord, Symbol, SymbolCodeLength};
use crate::error::Error;
use crate::Result;

/// Assigns canonical code words to the given code lengths.
///
/// Entries are ordered by length and then by symbol. The first entry gets the
/// all-zero code, every following entry gets the previous code plus one,
/// shifted left by the growth in length.
pub fn canonicalize<S: Symbol>(
    code_lengths: &[SymbolCodeLength<S>],
) -> Result<CanonicalCodeTable<S>> {
    validate_input_code_lengths(code_lengths)?;
    let sorted_code_lengths = sort_canonically(code_lengths);

    let mut code_words: BTreeMap<S, CodeWord> = BTreeMap::new();
    let mut previous_code_word: Option<CodeWord> = None;
    for current in sorted_code_lengths {
        ensure_symbol_was_not_inserted_before(&code_words, current.symbol)?;
        let code_word = match previous_code_word {
            None => create_initial_code_word(&current),
            Some(previous) => create_following_code_word(&previous, &current)?,
        };
        log::debug!("assigned code {} to symbol {:?}", code_word, current.symbol);
        code_words.insert(current.symbol, code_word);
        previous_code_word = Some(code_word);
    }
    Ok(CanonicalCodeTable::new(code_words))
}

fn sort_canonically<S: Symbol>(code_lengths: &[SymbolCodeLength<S>]) -> Vec<SymbolCodeLength<S>> {
    let mut sorted_code_lengths = code_lengths.to_vec();
    sorted_code_lengths.sort_by_key(|entry| (entry.length, entry.symbol));
    sorted_code_lengths
}

fn create_initial_code_word<S: Symbol>(code_length: &SymbolCodeLength<S>) -> CodeWord {
    CodeWord::from((0, code_length.length))
}

fn create_following_code_word<S: Symbol>(
    previous: &CodeWord,
    current: &SymbolCodeLength<S>,
) -> Result<CodeWord> {
    let bit_pattern = calculate_bit_pattern(previous, current.length).ok_or_else(|| {
        log::warn!(
            "code space exhausted at symbol {:?} with length {}",
            current.symbol,
            current.length
        );
        invalid_length(current, "code space exhausted, lengths violate Kraft's inequality")
    })?;
    Ok(CodeWord::from((bit_pattern, current.length)))
}

// `length` is never shorter than the previous code, the entries are sorted
fn calculate_bit_pattern(previous: &CodeWord, length: usize) -> Option<CodeBitPattern> {
    let incremented = previous.value().checked_add(1)?;
    if !fits_in_length(incremented, previous.length()) {
        return None;
    }
    Some(incremented << (length - previous.length()))
}

fn fits_in_length(bit_pattern: CodeBitPattern, length: usize) -> bool {
    bit_pattern.checked_shr(length as u32).unwrap_or(0) == 0
}

fn ensure_symbol_was_not_inserted_before<S: Symbol>(
    code_words: &BTreeMap<S, CodeWord>,
    symbol: S,
) -> Result<()> {
    if code_words.contains_key(&symbol) {
        return Err(Error::DuplicateSymbol(format!("{:?}", symbol)));
    }
    Ok(())
}

fn validate_input_code_lengths<S: Symbol>(code_lengths: &[SymbolCodeLength<S>]) -> Result<()> {
    if code_lengths.is_empty() {
        return Err(Error::EmptyInput);
    }
    for code_length in code_lengths {
        if code_length.length == 0 {
            return Err(invalid_length(
                code_length,
                "code words need at least one bit",
            ));
        }
        if code_length.length > MAX_CODE_LENGTH {
            return Err(invalid_length(
                code_length,
                "code words can't be longer than 64 bits",
            ));
        }
    }
    Ok(())
}

fn invalid_length<S: Symbol>(code_length: &SymbolCodeLength<S>, reason: &'static str) -> Error {
    Error::InvalidLengthSequence {
        symbol: format!("{:?}", code_length.symbol),
        length: code_length.length,
        reason,
    }
}
