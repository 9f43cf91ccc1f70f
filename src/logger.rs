use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::huffman::{CanonicalCodeTable, Symbol};

const CONFIG_FILE: &str = "log4rs.yaml";
const FALLBACK_PATTERN: &str = "{d(%H:%M:%S%.3f)} {h({l})} {t} - {m}{n}";

#[ctor::ctor]
fn init() {
    if log4rs::init_file(CONFIG_FILE, Default::default()).is_err() {
        init_fallback();
    }
}

// stderr only, so stdout stays reserved for the code tables
fn init_fallback() {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(FALLBACK_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn));
    if let Ok(config) = config {
        let _ = log4rs::init_config(config);
    }
}

pub fn log_code_table<S: Symbol>(table: &CanonicalCodeTable<S>) {
    fn get_code_list<S: Symbol>(table: &CanonicalCodeTable<S>) -> Vec<String> {
        table
            .iter_canonical()
            .map(|(symbol, code)| format!("{:?}={}", symbol, code))
            .collect()
    }
    log::debug!(
        "canonical code table with {} symbols {:?}",
        table.len(),
        get_code_list(table)
    );
}
