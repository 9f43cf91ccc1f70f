use std::io::{self, BufRead};
use std::sync::mpsc;

use threadpool::ThreadPool;

pub use cli::CLIParser;
use error::Error;
pub use report::{ReportOptions, WordReport};

mod cli;
pub mod error;
pub mod huffman;
mod logger;
mod report;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    words: Vec<String>,
    number_of_threads: usize,
    separator: String,
    show_tree: bool,
}

/// Splits every line of `reader` into whitespace separated words.
pub fn read_words<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(Error::UnableToReadInput)?;
        words.extend(line.split_whitespace().map(str::to_owned));
    }
    Ok(words)
}

fn collect_words(arguments: &Arguments) -> Result<Vec<String>> {
    let words = if arguments.words.is_empty() {
        read_words(io::stdin().lock())?
    } else {
        arguments.words.clone()
    };
    if words.is_empty() {
        return Err(Error::EmptyAlphabet);
    }
    Ok(words)
}

/// Encodes every word on its own, returning one report per word in input order.
pub fn encode_words(arguments: &Arguments) -> Result<Vec<Result<WordReport>>> {
    let words = collect_words(arguments)?;
    let options = ReportOptions::from(arguments);
    Ok(encode_words_in_parallel(
        words,
        &options,
        arguments.number_of_threads,
    ))
}

fn encode_words_in_parallel(
    words: Vec<String>,
    options: &ReportOptions,
    number_of_threads: usize,
) -> Vec<Result<WordReport>> {
    let threadpool = ThreadPool::new(number_of_threads.max(1));
    let (sender, receiver) = mpsc::channel();
    let word_count = words.len();
    log::info!(
        "encoding {} words on {} threads",
        word_count,
        threadpool.max_count()
    );
    for (index, word) in words.into_iter().enumerate() {
        let sender = sender.clone();
        let options = options.clone();
        threadpool.execute(move || {
            let report = WordReport::new(&word, &options);
            // the receiver lives until every job has reported back
            let _ = sender.send((index, report));
        });
    }
    drop(sender);

    let mut reports: Vec<(usize, Result<WordReport>)> =
        receiver.iter().take(word_count).collect();
    reports.sort_by_key(|(index, _)| *index);
    reports.into_iter().map(|(_, report)| report).collect()
}

#[cfg(test)]
mod test {
    use super::{encode_words_in_parallel, read_words, ReportOptions};

    #[test]
    fn test_read_words_splits_on_whitespace() {
        let input = "hello  world\n\n\tabbccc \n".as_bytes();
        let words = read_words(input).unwrap();
        assert_eq!(words, vec!["hello", "world", "abbccc"]);
    }

    #[test]
    fn test_parallel_reports_keep_input_order() {
        let words: Vec<String> = ["aaab", "", "abbccc", "aaaa", "mississippi"]
            .iter()
            .map(|&word| word.to_owned())
            .collect();
        let reports = encode_words_in_parallel(words.clone(), &ReportOptions::default(), 3);
        assert_eq!(reports.len(), words.len());
        for (word, report) in words.iter().zip(&reports) {
            match report {
                Ok(report) => assert_eq!(report.word(), word.as_str()),
                Err(_) => assert!(word.is_empty(), "Only the empty word may fail"),
            }
        }
    }
}
