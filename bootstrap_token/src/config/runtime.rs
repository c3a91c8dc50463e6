// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliPreferences {
    /// Whether to print token secrets instead of masking them
    pub reveal_secret: bool,

    /// Whether to emit JSON results instead of plain text
    pub json_output: bool,

    /// Minimum log level for console output
    pub log_level: LogLevel,
}

impl CliPreferences {
    /// Read preferences through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            reveal_secret: lookup(env_vars::REVEAL_SECRET)
                .and_then(|v| parse_bool(&v))
                .unwrap_or(false),
            json_output: lookup(env_vars::JSON_OUTPUT)
                .and_then(|v| parse_bool(&v))
                .unwrap_or(false),
            log_level: lookup(env_vars::LOG_LEVEL)
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
        }
    }

    /// Read preferences from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }
}

impl Default for CliPreferences {
    fn default() -> Self {
        Self::from_env()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    /// Raise verbosity by `steps` levels, saturating at `Trace`
    pub fn raised(self, steps: u8) -> Self {
        let level = (self as u8).saturating_add(steps).min(LogLevel::Trace as u8);
        match level {
            0 => LogLevel::Error,
            1 => LogLevel::Warning,
            2 => LogLevel::Info,
            3 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.trim().to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        "trace" | "4" => Some(LogLevel::Trace),
        _ => None,
    }
}

/// Parse a boolean flag, accepting the usual shell spellings
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    pub const REVEAL_SECRET: &str = "BOOTSTRAP_TOKEN_REVEAL_SECRET";
    pub const JSON_OUTPUT: &str = "BOOTSTRAP_TOKEN_JSON_OUTPUT";
    pub const LOG_LEVEL: &str = "BOOTSTRAP_TOKEN_LOG_LEVEL";
}
