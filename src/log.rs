//! Leveled logging macros for header construction events.
//!
//! Messages carry a local timestamp, the severity level, and the source
//! (`tcphdr`). [Level::Debug] messages are only emitted in debug builds.

use std::{fmt, time};

/// Source of the log message.
const SOURCE: &str = "tcphdr";

/// Logs a message at the [Level::Error] level.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {{
        $crate::log::log($crate::log::Level::Error, format_args!($($arg)+));
    }};
}

/// Logs a message at the [Level::Warn] level.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {{
        $crate::log::log($crate::log::Level::Warn, format_args!($($arg)+));
    }};
}

/// Logs a message at the [Level::Info] level.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {{
        $crate::log::log($crate::log::Level::Info, format_args!($($arg)+));
    }};
}

/// Logs a message at the [Level::Debug] level (debug builds only).
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {{
        #[cfg(debug_assertions)]
        $crate::log::log($crate::log::Level::Debug, format_args!($($arg)+));
    }};
}

/// Severity levels for log messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Designates very serious errors.
    Error,
    /// Designates hazardous situations.
    Warn,
    /// Designates useful information.
    Info,
    /// Designates lower priority information.
    Debug,
}

impl Level {
    /// ANSI escape sequence used to color the level label.
    fn color(self) -> &'static str {
        match self {
            Level::Error => "\x1b[1;31m",
            Level::Warn => "\x1b[1;33m",
            Level::Info => "\x1b[1;32m",
            Level::Debug => "\x1b[1;34m",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Padded so messages line up across levels.
        let label = match *self {
            Level::Error => "ERROR",
            Level::Warn => "WARN ",
            Level::Info => "INFO ",
            Level::Debug => "DEBUG",
        };

        f.write_str(label)
    }
}

/// Logs a message with the specified severity level.
///
/// - [Level::Info] and [Level::Debug] messages are printed to `stdout`.
/// - [Level::Warn] and [Level::Error] messages are printed to `stderr`.
pub fn log(level: Level, msg: impl fmt::Display) {
    let line = format!(
        "[\x1b[1;37m{}\x1b[0m] {}{level}\x1b[0m [\x1b[1;37m{SOURCE}\x1b[0m] {msg}",
        timestamp(),
        level.color(),
    );

    match level {
        Level::Error | Level::Warn => eprintln!("{line}"),
        Level::Info | Level::Debug => println!("{line}"),
    }
}

/// Returns the current local time formatted as `YYYY-MM-DD HH:MM:SS`, or
/// `UNKNOWN` if the local time could not be determined.
fn timestamp() -> String {
    let now = time::SystemTime::now()
        .duration_since(time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as libc::time_t;

    // SAFETY: `tm` is a plain C struct for which all-zero bytes are valid.
    let mut tm: libc::tm = unsafe { std::mem::zeroed() };

    // SAFETY: Both pointers are valid for the duration of the call, and the
    // reentrant variant does not touch shared static storage.
    if unsafe { libc::localtime_r(&now, &mut tm) }.is_null() {
        return "UNKNOWN".to_string();
    }

    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        tm.tm_year + 1900,
        tm.tm_mon + 1,
        tm.tm_mday,
        tm.tm_hour,
        tm.tm_min,
        tm.tm_sec
    )
}
