//! Log Module

use crate::global_cfg;
use colored::Colorize;
use std::sync::{Once, RwLock};

static INIT: Once = Once::new();
static LOG_LEVEL: RwLock<LogLevel> = RwLock::new(LogLevel::Info);

/// This enum is used to represent the different log levels
#[derive(PartialEq, PartialOrd, Debug)]
pub enum LogLevel {
    Debug,
    Info,
    Log,
    Warn,
    Error,
}

/// Initializes the log level, which is called only once when the program starts
fn init_log_level() {
    let level = std::env::var("LWBUILD_LOG_LEVEL")
        .ok()
        .or_else(|| global_cfg::get().defaults.log_level.clone())
        .unwrap_or_else(|| "Info".to_string());
    let log_level = match level.as_str() {
        "Debug" => LogLevel::Debug,
        "Info" => LogLevel::Info,
        "Log" => LogLevel::Log,
        "Warn" => LogLevel::Warn,
        "Error" => LogLevel::Error,
        _ => LogLevel::Info,
    };

    // Use write lock to update the log level
    let mut write_lock = LOG_LEVEL.write().unwrap();
    *write_lock = log_level;
}

/// This function is used to log messages to the console
/// # Arguments
/// * `level` - The log level of the message
/// * `message` - The message to log
/// # Example
/// ```
/// # use lwbuild::utils::log::{log, LogLevel};
/// log(LogLevel::Info, "Generating project files");
/// log(LogLevel::Error, &format!("Could not open config file: {}", "config_build.toml"));
/// ```
///
/// # Level setting
/// The log level can be set by setting the environment variable `LWBUILD_LOG_LEVEL`
/// to one of the following values:
/// * `Debug`
/// * `Info`
/// * `Log`
/// * `Warn`
/// * `Error`
/// If the environment variable is not set, the `log_level` entry of the
/// global config is used, and failing that the default level is `Info`
pub fn log(level: LogLevel, message: &str) {
    INIT.call_once(|| {
        init_log_level();
    });
    let level_str = match level {
        LogLevel::Debug => "[DEBUG]".purple(),
        LogLevel::Info => "[INFO]".blue(),
        LogLevel::Log => "[LOG]".green(),
        LogLevel::Warn => "[WARN]".yellow(),
        LogLevel::Error => "[ERROR]".red(),
    };
    // Use read lock to check log level
    if level >= *LOG_LEVEL.read().unwrap() {
        println!("{} {}", level_str, message);
    }
}
