//! Tracing subscriber setup for the `riskmap` binary.
//!
//! `RISKMAP_LOG` takes precedence over `-v` flags. Records from the `log`
//! macros are forwarded into the same subscriber. Output goes to stderr so
//! JSON on stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_ENV_VAR: &str = "RISKMAP_LOG";

/// Default filter directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "riskmap=warn",
        1 => "riskmap=info",
        2 => "riskmap=debug",
        _ => "riskmap=trace",
    }
}

/// Install the global subscriber. Calling it more than once is harmless.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(default_directive(0), "riskmap=warn");
        assert_eq!(default_directive(2), "riskmap=debug");
        assert_eq!(default_directive(9), "riskmap=trace");
    }

    #[test]
    fn repeated_init_does_not_panic() {
        init_tracing(0);
        init_tracing(3);
    }
}
