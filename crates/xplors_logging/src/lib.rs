#![deny(missing_docs)]
//! Shared logging utilities for the Xplors workspace.
//!
//! This crate provides the `xplors_*` logging macros used across the codebase,
//! the `XPLORS_LOG` level lookup, and a minimal test initializer for the
//! global logger.

use log::LevelFilter;

/// Environment variable naming the log level (`error` .. `trace`, or `off`).
pub const LOG_LEVEL_ENV: &str = "XPLORS_LOG";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! xplors_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! xplors_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! xplors_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! xplors_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! xplors_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Parses a level name the way `XPLORS_LOG` is written. Unknown names yield `None`.
pub fn parse_level(raw: &str) -> Option<LevelFilter> {
    raw.trim().parse::<LevelFilter>().ok()
}

/// Reads the level from `XPLORS_LOG`, falling back to `default`.
pub fn level_from_env(default: LevelFilter) -> LevelFilter {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .as_deref()
        .and_then(parse_level)
        .unwrap_or(default)
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let fallback = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level_from_env(fallback),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
