//! Shared plumbing for the rollbook console binaries.

pub mod menu;
pub mod prompt;
pub mod view;

/// Directory for rolling log files, relative to the working directory.
const LOG_DIR_NAME: &str = "logs";

/// Starts file logging; a logging failure only warns, it never blocks the menu.
pub fn init_logging_or_warn() {
    let log_dir = match std::env::current_dir() {
        Ok(dir) => dir.join(LOG_DIR_NAME),
        Err(_) => std::env::temp_dir().join("rollbook-logs"),
    };
    if let Err(err) = rollbook_core::init_logging(rollbook_core::default_log_level(), &log_dir) {
        eprintln!("Logging disabled: {err}");
    }
}
