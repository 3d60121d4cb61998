// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

/// Get the level of logging for the given verbosity.
pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }

    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install a global subscriber writing log messages to stderr.
pub fn setup_logging(verbosity: u8, quiet: bool) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(level_filter(verbosity, quiet))
        .with(stderr_layer)
        .init();
}
