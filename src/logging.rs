use std::error::Error;
use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode, WriteLogger};

/// `RUST_LOG` refines `level` on the terminal-only path. With a log file the
/// terminal and the file both get `level`.
pub fn init(level: LevelFilter, file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    match file {
        None => {
            env_logger::Builder::new()
                .target(env_logger::Target::Stderr)
                .filter_level(level)
                .parse_env("RUST_LOG")
                .init();
        }
        Some(path) => {
            CombinedLogger::init(vec![
                TermLogger::new(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto),
                WriteLogger::new(level, Config::default(), File::create(path)?),
            ])?;
        }
    }
    Ok(())
}
