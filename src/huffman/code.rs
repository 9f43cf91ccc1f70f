use std::collections::BTreeMap;
use std::fmt;

use super::{Symbol, SymbolCodeLength};

pub type CodeBitPattern = u64;

pub const MAX_CODE_LENGTH: usize = CodeBitPattern::BITS as usize;

/// A single code word. The pattern is right-aligned: only the lowest
/// `length` bits are used, most significant bit first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CodeWord {
    bit_pattern: CodeBitPattern,
    length: usize,
}

impl From<(CodeBitPattern, usize)> for CodeWord {
    fn from(value: (CodeBitPattern, usize)) -> Self {
        Self {
            bit_pattern: value.0,
            length: value.1,
        }
    }
}

impl CodeWord {
    pub fn value(&self) -> CodeBitPattern {
        self.bit_pattern
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.length)
            .rev()
            .map(|position| (self.bit_pattern >> position) & 1 == 1)
    }

    pub fn is_prefix_of(&self, other: &CodeWord) -> bool {
        if self.length > other.length {
            return false;
        }
        let leading_bits = other
            .bit_pattern
            .checked_shr((other.length - self.length) as u32)
            .unwrap_or(0);
        leading_bits == self.bit_pattern
    }
}

impl fmt::Display for CodeWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Final mapping from symbol to canonical code word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalCodeTable<S> {
    code_words: BTreeMap<S, CodeWord>,
}

impl<S: Symbol> CanonicalCodeTable<S> {
    pub(crate) fn new(code_words: BTreeMap<S, CodeWord>) -> Self {
        Self { code_words }
    }

    pub fn get(&self, symbol: &S) -> Option<&CodeWord> {
        self.code_words.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.code_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code_words.is_empty()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (S, &CodeWord)> + '_ {
        self.code_words.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Entries in the order the codes were assigned: by length, then by symbol.
    pub fn iter_canonical(&self) -> impl Iterator<Item = (S, &CodeWord)> + '_ {
        let mut entries: Vec<(S, &CodeWord)> = self.iter().collect();
        entries.sort_by_key(|&(symbol, code)| (code.length, symbol));
        entries.into_iter()
    }

    pub fn code_lengths(&self) -> Vec<SymbolCodeLength<S>> {
        self.iter()
            .map(|(symbol, code)| SymbolCodeLength {
                symbol,
                length: code.length,
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::CodeWord;

    #[test]
    fn test_display_is_zero_padded_to_length() {
        assert_eq!(CodeWord::from((0b101, 5)).to_string(), "00101");
        assert_eq!(CodeWord::from((0, 1)).to_string(), "0");
        assert_eq!(CodeWord::from((u64::MAX, 64)).to_string(), "1".repeat(64));
    }

    #[test]
    fn test_bits_are_most_significant_first() {
        let bits: Vec<bool> = CodeWord::from((0b110, 3)).bits().collect();
        assert_eq!(bits, vec![true, true, false]);
    }

    #[test]
    fn test_is_prefix_of() {
        let short = CodeWord::from((0b10, 2));
        let long = CodeWord::from((0b1011, 4));
        let other = CodeWord::from((0b1100, 4));
        assert!(short.is_prefix_of(&long));
        assert!(!short.is_prefix_of(&other));
        assert!(!long.is_prefix_of(&short), "Longer code can't be a prefix");
        assert!(long.is_prefix_of(&long), "Every code is a prefix of itself");
    }
}
