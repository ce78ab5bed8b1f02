// lexguard/src/logger.rs
//! Logging setup for the CLI.
//!
//! Logs go to stderr so they never mix with command output on stdout.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Installs the global logger.
///
/// With `level` set, it overrides `RUST_LOG`; otherwise `RUST_LOG` applies and
/// defaults to `warn`. Calling this twice is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder.target(Target::Stderr);
    if let Some(level) = level {
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}

/// Level implied by the `--quiet` and `--debug` flags. Quiet wins.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_overrides_debug() {
        assert_eq!(level_from_flags(true, true), Some(LevelFilter::Off));
        assert_eq!(level_from_flags(false, true), Some(LevelFilter::Debug));
        assert_eq!(level_from_flags(false, false), None);
    }
}
