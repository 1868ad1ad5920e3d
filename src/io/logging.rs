//! Logger installation for the command-line host

use log::LevelFilter;

/// Map command-line verbosity flags to a log level
///
/// `--quiet` wins over any number of `-v` flags.
pub const fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global `env_logger` backend
///
/// `RUST_LOG` overrides the level derived from the flags. Returns `false` if a
/// logger was already installed, which happens when several hosts share a
/// process.
pub fn init_logging(verbosity: u8, quiet: bool) -> bool {
    env_logger::Builder::new()
        .filter_level(level_for(verbosity, quiet))
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .try_init()
        .is_ok()
}
