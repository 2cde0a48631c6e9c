#![deny(missing_docs)]
//! Shared logging utilities for the DetiBot workspace.
//!
//! Every crate logs through the `detibot_*` macros so the facade can be swapped
//! in one place. The binary installs the real logger; tests call
//! [`initialize_for_tests`].

pub use log::LevelFilter;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! detibot_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: "detibot", $($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! detibot_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: "detibot", $($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! detibot_info {
    ($($arg:tt)*) => {{
        log::info!(target: "detibot", $($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! detibot_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: "detibot", $($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! detibot_error {
    ($($arg:tt)*) => {{
        log::error!(target: "detibot", $($arg)*);
    }};
}

/// Parses a level name such as `"debug"` or `"WARN"`.
///
/// Returns `None` for unknown names so callers can keep their default.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse::<LevelFilter>().ok()
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Debug builds get debug output so state transitions show up in failing tests.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
