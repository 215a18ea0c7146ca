//! # litlint-stdio
//!
//! Terminal output utilities for litlint tools.
//! Consistent formatting across the CLI and supporting tooling.
//!
//! ## Format
//!
//! ```text
//! [action] message
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use litlint_stdio::{log, error, success, fail};
//!
//! log("check", "linting 4 files...");
//! success("no problems found");
//! error("check", "2 problems found");
//! ```
//!
//! ## Log Levels
//!
//! Control output with `LOG_LEVEL` environment variable:
//! - `error` - Errors only
//! - `info` - Default (startup + important messages)
//! - `debug` - Verbose output

use std::env;
use std::sync::OnceLock;

/// Log level for litlint tools
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum LogLevel {
    Error = 0,
    Info = 1,
    Debug = 2,
}

impl LogLevel {
    fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => LogLevel::Error,
            "debug" => LogLevel::Debug,
            _ => LogLevel::Info,
        }
    }
}

static LOG_LEVEL: OnceLock<LogLevel> = OnceLock::new();

fn emit_line(line: &str) {
    eprintln!("{}", line);
}

/// Get the current log level (cached from LOG_LEVEL env var)
pub fn log_level() -> LogLevel {
    *LOG_LEVEL.get_or_init(|| {
        env::var("LOG_LEVEL")
            .map(|s| LogLevel::from_str(&s))
            .unwrap_or(LogLevel::Info)
    })
}

/// Check if debug logging is enabled
pub fn is_debug() -> bool {
    log_level() >= LogLevel::Debug
}

/// Check if info logging is enabled
pub fn is_info() -> bool {
    log_level() >= LogLevel::Info
}

/// Log an action with a message
/// Format: `[action] message`
///
/// # Example
/// ```
/// litlint_stdio::log("check", "linting src/...");
/// // Output: [check] linting src/...
/// ```
pub fn log(action: &str, message: &str) {
    if log_level() >= LogLevel::Info {
        emit_line(&format!("[{}] {}", action, message));
    }
}

/// Log an error
/// Format: `[action] message`
pub fn error(action: &str, message: &str) {
    emit_line(&format!("[{}] {}", action, message));
}

/// Log a warning
/// Format: `[warn] [name] message`
pub fn warn(name: &str, message: &str) {
    emit_line(&format!("[warn] [{}] {}", name, message));
}

/// Print a section header
///
/// # Example
/// ```
/// litlint_stdio::header("registered rules");
/// // Output:
/// //
/// // registered rules
/// // ----------------------------------------
/// ```
pub fn header(title: &str) {
    emit_line("");
    emit_line(title);
    emit_line(&"-".repeat(40));
}

/// Print a blank line
pub fn blank() {
    emit_line("");
}

/// Success message
/// Format: `[ok] message`
pub fn success(message: &str) {
    emit_line(&format!("[ok] {}", message));
}

/// Failure message
/// Format: `[fail] message`
pub fn fail(message: &str) {
    emit_line(&format!("[fail] {}", message));
}

/// Info line with label
/// Format: `  label     value`
pub fn info(label: &str, value: &str) {
    emit_line(&format!("  {:<10} {}", label, value));
}

/// Debug log (only shown when LOG_LEVEL=debug)
pub fn debug(action: &str, message: &str) {
    if log_level() >= LogLevel::Debug {
        emit_line(&format!("[{}] {}", action, message));
    }
}

/// Print a raw line (no formatting).
pub fn raw(message: &str) {
    emit_line(message);
}
