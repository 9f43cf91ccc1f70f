use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    EmptyAlphabet,
    EmptyInput,
    InvalidLengthSequence {
        symbol: String,
        length: usize,
        reason: &'static str,
    },
    DuplicateSymbol(String),
    FrequencyOverflow(String),
    SymbolNotPresentInCodeTable(String),
    UnableToReadInput(std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAlphabet => write!(f, "No symbols to encode"),
            Self::EmptyInput => write!(f, "No code lengths to canonicalize"),
            Self::InvalidLengthSequence {
                symbol,
                length,
                reason,
            } => {
                write!(
                    f,
                    "Invalid code length {} for symbol {}: {}",
                    length, symbol, reason
                )
            }
            Self::DuplicateSymbol(symbol) => {
                write!(
                    f,
                    "Symbol {} is encountered for the second time in the code lengths",
                    symbol
                )
            }
            Self::FrequencyOverflow(context) => {
                write!(f, "Frequency overflow while {}", context)
            }
            Self::SymbolNotPresentInCodeTable(symbol) => {
                write!(f, "Symbol {} not present in code table", symbol)
            }
            Self::UnableToReadInput(error) => {
                write!(f, "Unable to read words from input: {}", error)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnableToReadInput(error) => Some(error),
            _ => None,
        }
    }
}
