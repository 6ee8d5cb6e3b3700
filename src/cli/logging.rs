//! Logging setup and CLI output helpers

use tracing_subscriber::EnvFilter;

/// Log level for CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Suppress all output
    Quiet,
    /// Normal output level
    Normal,
    /// Verbose output with additional details
    Verbose,
}

impl LogLevel {
    /// Resolve the global `--quiet` / `--verbose` flags; quiet wins
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            LogLevel::Quiet
        } else if verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        }
    }

    /// Default `tracing` filter directive for this level
    pub fn filter_directive(self) -> &'static str {
        match self {
            LogLevel::Quiet => "error",
            LogLevel::Normal => "info",
            LogLevel::Verbose => "debug",
        }
    }
}

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` takes precedence over the level derived from the CLI flags.
/// Installing twice is a no-op.
pub fn init_tracing(level: LogLevel) {
    let directive =
        std::env::var("RUST_LOG").unwrap_or_else(|_| level.filter_directive().to_owned());
    let filter = EnvFilter::builder().parse_lossy(directive);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log a message if the current level permits it
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{msg}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        assert_eq!(LogLevel::from_flags(false, false), LogLevel::Normal);
        assert_eq!(LogLevel::from_flags(true, false), LogLevel::Verbose);
        assert_eq!(LogLevel::from_flags(false, true), LogLevel::Quiet);
        assert_eq!(LogLevel::from_flags(true, true), LogLevel::Quiet);
    }

    #[test]
    fn test_filter_directive() {
        assert_eq!(LogLevel::Quiet.filter_directive(), "error");
        assert_eq!(LogLevel::Normal.filter_directive(), "info");
        assert_eq!(LogLevel::Verbose.filter_directive(), "debug");
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing(LogLevel::Quiet);
        init_tracing(LogLevel::Verbose);
    }
}
