use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgAction, ArgMatches, Command,
};
use std::ffi::OsString;
use std::{io, thread};

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_words_argument(command);
        let command = Self::register_threads_argument(command);
        let command = Self::register_separator_argument(command);
        Self::register_show_tree_argument(command)
    }

    fn register_words_argument(command: Command) -> Command {
        command.arg(Self::create_words_argument())
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(Self::create_threads_argument())
    }

    fn register_separator_argument(command: Command) -> Command {
        command.arg(Self::create_separator_argument())
    }

    fn register_show_tree_argument(command: Command) -> Command {
        command.arg(Self::create_show_tree_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_words_argument() -> Arg {
        Arg::new("words")
            .help("Words to encode, read from standard input when omitted")
            .value_parser(value_parser!(String))
            .num_args(0..)
            .action(ArgAction::Append)
    }

    fn create_threads_argument() -> Arg {
        arg!(-t --threads <THREADS> "Number of Threads")
            .default_value(get_number_of_threads().unwrap_or(1).to_string())
            .required(false)
            .value_parser(value_parser!(usize))
    }

    fn create_separator_argument() -> Arg {
        arg!(-s --separator <SEPARATOR> "Separator between the concatenated codes")
            .default_value(" ")
            .required(false)
    }

    fn create_show_tree_argument() -> Arg {
        arg!(show_tree: --show_tree "Print the Huffman tree of every word")
            .action(ArgAction::SetTrue)
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            words: Self::extract_words_argument(matches),
            number_of_threads: Self::extract_threads_argument(matches),
            separator: Self::extract_separator_argument(matches),
            show_tree: Self::extract_show_tree_argument(matches),
        }
    }

    fn extract_words_argument(matches: &ArgMatches) -> Vec<String> {
        matches
            .get_many::<String>("words")
            .map(|words| words.cloned().collect())
            .unwrap_or_default()
    }

    fn extract_threads_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("threads")
            .expect("Required argument threads not provided")
            .to_owned()
    }

    fn extract_separator_argument(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("separator")
            .expect("Separator must be provided, but was unset.")
            .clone()
    }

    fn extract_show_tree_argument(matches: &ArgMatches) -> bool {
        matches.get_flag("show_tree")
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn get_number_of_threads() -> io::Result<usize> {
    Ok(thread::available_parallelism()?.get())
}

#[cfg(test)]
mod tests {
    use clap::{error::ErrorKind, Command};

    use super::CLIParser;

    const PROGRAM_NAME_ARGUMENT: &str = "test_program_name";

    #[test]
    fn parse_words_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_words_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "hello", "world"]);
        let words = CLIParser::extract_words_argument(&matches);
        assert_eq!(words, vec!["hello", "world"]);
    }

    #[test]
    fn parse_missing_words_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_words_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT]);
        let words = CLIParser::extract_words_argument(&matches);
        assert!(words.is_empty());
    }

    #[test]
    fn parse_number_of_threads_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_threads_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--threads", "5"]);
        let actual = CLIParser::extract_threads_argument(&matches);
        let expected = 5;
        assert_eq!(actual, expected);
    }

    #[test]
    fn parse_number_of_threads_illegal_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_threads_argument(command);
        let result = command.try_get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-t", "many"]);
        if let Err(error) = result {
            assert_eq!(error.kind(), ErrorKind::ValueValidation);
        } else {
            panic!("Illegal value for threads not detected");
        }
    }

    #[test]
    fn parse_separator_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_separator_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-s", "|"]);
        let separator = CLIParser::extract_separator_argument(&matches);
        assert_eq!(separator, "|");
    }

    #[test]
    fn parse_show_tree_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_show_tree_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--show_tree"]);
        assert!(CLIParser::extract_show_tree_argument(&matches));
    }

    #[test]
    fn parse_words_only() {
        let mut cli_parser = CLIParser::default();
        let arguments = cli_parser.parse(vec![PROGRAM_NAME_ARGUMENT, "abbccc", "-t", "8"]);
        assert_eq!(arguments.words, vec!["abbccc"], "words do not match");
        assert_eq!(arguments.number_of_threads, 8, "number_of_threads does not match");
        assert_eq!(arguments.separator, " ", "separator does not match");
        assert!(!arguments.show_tree, "show_tree does not match");
    }
}
