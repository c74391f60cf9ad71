//! Logging Standards and Conventions
//!
//! All modules follow these standards for consistent log output.
//!
//! # Log Levels
//!
//! | Level | Usage | Examples |
//! |-------|-------|----------|
//! | ERROR | Unrecoverable errors | wallet credit overflow, store corruption |
//! | WARN  | Recoverable issues | gateway initiation rejected, replayed callback |
//! | INFO  | Significant state changes | card issued, payment recorded, winners selected |
//! | DEBUG | Detailed operation flow | eligibility set sizes, derived statuses |
//! | TRACE | Fine-grained debugging | full request payloads |
//!
//! # Structured Logging Fields
//!
//! Always use structured fields for key information:
//! - `card_id`, `scheme_id`, `user_id`: entity identifiers
//! - `period_index`: billing period
//! - `amount`: monetary amount in minor units
//! - `operation`: operation name
//! - `error`: error message

use serde::{Deserialize, Serialize};

/// Log level enumeration matching tracing levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Parse from string, accepting common aliases
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            "trace" => Some(Self::Trace),
            _ => None,
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(LogLevel::parse("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("INFO"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("verbose"), None);
    }

    #[test]
    fn test_display_roundtrip() {
        assert_eq!(LogLevel::parse(&LogLevel::Debug.to_string()), Some(LogLevel::Debug));
    }
}
