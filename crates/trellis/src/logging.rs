//! Log subscriber setup.

use std::{io, str::FromStr};

use tracing::Level;
use tracing_subscriber::fmt;

use crate::{
    config::LogConfig,
    error::{Error, Result},
};

/// Parse a level name such as `debug` or `WARN`.
pub fn parse_level(name: &str) -> Result<Level> {
    Level::from_str(name.trim()).map_err(|_| Error::Config(format!("unknown log level: {name}")))
}

/// Install a global subscriber writing compact lines to stderr.
///
/// Returns `false` if a global subscriber was already installed, in which
/// case the existing one stays in place.
pub fn init(config: &LogConfig) -> Result<bool> {
    let level = parse_level(&config.level)?;
    let format = fmt::format()
        .with_level(true)
        .with_line_number(true)
        .with_ansi(false)
        .without_time()
        .compact();
    Ok(tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .event_format(format)
        .try_init()
        .is_ok())
}
