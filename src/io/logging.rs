use std::path::Path;

use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode, WriteLogger};

/// Initialize terminal logging, plus a DEBUG-level file log when `file` is given.
/// `verbosity` 0 shows warnings, 1 info, 2+ debug.
pub fn init(verbosity: u8, file: Option<&Path>) -> anyhow::Result<()> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let config = ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    let mut loggers: Vec<Box<dyn SharedLogger>> =
        vec![TermLogger::new(level, config.clone(), TerminalMode::Stderr, ColorChoice::Auto)];
    if let Some(path) = file {
        loggers.push(WriteLogger::new(LevelFilter::Debug, config, std::fs::File::create(path)?));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}
