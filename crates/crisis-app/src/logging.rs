//! Tracing subscriber setup.
//!
//! Diagnostics go to stderr; stdout belongs to the console.

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the verbosity flags.
pub const LOG_LEVEL_ENV: &str = "CRISIS_LOG_LEVEL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Human,
    /// Newline-delimited JSON.
    Json,
}

/// Map `-v` count to a filter directive: 0 warn, 1 info, 2 debug, 3+ trace.
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(format: LogFormat, verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));
    let show_target = verbosity >= 2;

    match format {
        LogFormat::Human => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(show_target)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogFormat::Json => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_target(show_target)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(verbosity_to_directive(0), "warn");
        assert_eq!(verbosity_to_directive(1), "info");
        assert_eq!(verbosity_to_directive(2), "debug");
        assert_eq!(verbosity_to_directive(3), "trace");
        assert_eq!(verbosity_to_directive(u8::MAX), "trace");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(LogFormat::Human, 0);
        init_logging(LogFormat::Json, 3);
    }
}
