use std::fmt;

use crate::huffman::encoder::{concatenate, encoded_bit_length};
use crate::huffman::{canonicalize, CanonicalCodeTable, FrequencyTable, HuffmanTree};
use crate::logger::log_code_table;
use crate::{Arguments, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportOptions {
    pub separator: String,
    pub show_tree: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            separator: " ".to_owned(),
            show_tree: false,
        }
    }
}

impl From<&Arguments> for ReportOptions {
    fn from(arguments: &Arguments) -> Self {
        Self {
            separator: arguments.separator.clone(),
            show_tree: arguments.show_tree,
        }
    }
}

/// Canonical code table of one word together with its encoded form.
#[derive(Debug)]
pub struct WordReport {
    word: String,
    code_table: CanonicalCodeTable<char>,
    concatenated_codes: String,
    encoded_bit_length: usize,
    tree: Option<String>,
}

impl WordReport {
    pub fn new(word: &str, options: &ReportOptions) -> Result<Self> {
        let frequencies: FrequencyTable<char> = word.chars().collect();
        let tree = HuffmanTree::new(&frequencies)?;
        let rendered_tree = options.show_tree.then(|| tree.to_string());
        let code_lengths = tree.code_lengths();
        drop(tree);

        let code_table = canonicalize(&code_lengths)?;
        log_code_table(&code_table);
        let concatenated_codes = concatenate(&code_table, word.chars(), &options.separator)?;
        let encoded_bit_length = encoded_bit_length(&code_table, &frequencies)?;
        let symbol_count = frequencies.total()?;
        log::info!(
            "encoded {} symbols of '{}' into {} bits",
            symbol_count,
            word,
            encoded_bit_length
        );
        Ok(Self {
            word: word.to_owned(),
            code_table,
            concatenated_codes,
            encoded_bit_length,
            tree: rendered_tree,
        })
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn code_table(&self) -> &CanonicalCodeTable<char> {
        &self.code_table
    }

    pub fn concatenated_codes(&self) -> &str {
        &self.concatenated_codes
    }

    pub fn encoded_bit_length(&self) -> usize {
        self.encoded_bit_length
    }
}

impl fmt::Display for WordReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Canonical Huffman codes for {:?}:", self.word)?;
        if let Some(tree) = &self.tree {
            writeln!(f)?;
            write!(f, "{}", tree)?;
            writeln!(f)?;
        }
        writeln!(f, "Symbol | Code")?;
        writeln!(f, "-------+------")?;
        for (symbol, code) in self.code_table.iter_canonical() {
            writeln!(f, "{:^6} | {}", format!("{:?}", symbol), code)?;
        }
        writeln!(f)?;
        writeln!(f, "Concatenated codes:")?;
        writeln!(f, "{}", self.concatenated_codes)?;
        write!(f, "Encoded length: {} bits", self.encoded_bit_length)
    }
}
