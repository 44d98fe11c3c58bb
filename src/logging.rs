//! Logger setup
use anyhow::{Context, Result};
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::path::Path;

/// `-v` => Info, `-vv` => Debug, `-vvv` => Trace, warnings otherwise
pub fn level_from_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the global logger
///
/// Logs go to stderr, to stdout if `output` is `-`, or are appended to the file `output`.
pub fn setup(verbose: u8, output: Option<&Path>) -> Result<()> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);

    let dispatch = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                colors.color(record.level()),
                message
            ))
        })
        .level(level_from_verbosity(verbose))
        .level_for("hyper", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn);

    let dispatch = match output {
        None => dispatch.chain(std::io::stderr()),
        Some(path) if path == Path::new("-") => dispatch.chain(std::io::stdout()),
        Some(path) => dispatch.chain(
            fern::log_file(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?,
        ),
    };

    dispatch.apply().context("Failed to setup logging utility")
}
