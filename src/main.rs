use std::env::args_os;
use std::process::ExitCode;

use canonical_huffman::{encode_words, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    let reports = match encode_words(&arguments) {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("Encoding failed because of: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut exit_code = ExitCode::SUCCESS;
    for report in reports {
        match report {
            Ok(report) => println!("{}\n", report),
            Err(e) => {
                eprintln!("Encoding failed because of: {}", e);
                exit_code = ExitCode::FAILURE;
            }
        }
    }
    exit_code
}
