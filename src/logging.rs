//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--silent` / `--quiet` / `--verbose` CLI flags
//! 2. `YAR_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`
//!
//! Logs go to stderr so script output on stdout stays untouched.

use anyhow::{anyhow, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt;

/// Environment variable consulted when no verbosity flag is given
pub const LOG_ENV: &str = "YAR_LOG";

/// Verbosity requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    Normal = 2,
    Verbose = 3,
    Trace = 4,
}

/// Initialise the global logging subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(verbosity: Verbosity) -> Result<()> {
    let level = match verbosity {
        Verbosity::Normal => std::env::var(LOG_ENV)
            .ok()
            .and_then(|s| parse_level_str(&s))
            .unwrap_or(LevelFilter::INFO),
        other => level_from_verbosity(other),
    };

    fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

fn level_from_verbosity(verbosity: Verbosity) -> LevelFilter {
    match verbosity {
        Verbosity::Silent => LevelFilter::OFF,
        Verbosity::Quiet => LevelFilter::ERROR,
        Verbosity::Normal => LevelFilter::INFO,
        Verbosity::Verbose => LevelFilter::DEBUG,
        Verbosity::Trace => LevelFilter::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<LevelFilter> {
    match s.trim().to_lowercase().as_str() {
        "off" => Some(LevelFilter::OFF),
        "error" => Some(LevelFilter::ERROR),
        "warn" | "warning" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert!(Verbosity::Trace > Verbosity::Verbose);
        assert!(Verbosity::Verbose > Verbosity::Normal);
        assert!(Verbosity::Normal > Verbosity::Quiet);
        assert!(Verbosity::Quiet > Verbosity::Silent);
    }

    #[test]
    fn test_level_from_verbosity() {
        assert_eq!(level_from_verbosity(Verbosity::Silent), LevelFilter::OFF);
        assert_eq!(level_from_verbosity(Verbosity::Verbose), LevelFilter::DEBUG);
    }

    #[test]
    fn test_parse_level_str() {
        assert_eq!(parse_level_str(" Debug "), Some(LevelFilter::DEBUG));
        assert_eq!(parse_level_str("warning"), Some(LevelFilter::WARN));
        assert_eq!(parse_level_str("loud"), None);
    }
}
