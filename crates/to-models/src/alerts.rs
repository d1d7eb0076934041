//! The alerts envelope carried by every API response.
//!
//! Mutating endpoints answer with alerts alone; listing endpoints answer
//! with alerts plus a `response` payload. Clients decide success or failure
//! of an operation by the alert levels, not just the HTTP status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a single alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlertLevel::Success => "success",
            AlertLevel::Info => "info",
            AlertLevel::Warning => "warning",
            AlertLevel::Error => "error",
        };
        f.write_str(s)
    }
}

/// A single alert message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub text: String,
    pub level: AlertLevel,
}

impl Alert {
    pub fn new(level: AlertLevel, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(AlertLevel::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(AlertLevel::Error, text)
    }
}

/// A bare alerts document, the whole body of mutating responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alerts {
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

impl Alerts {
    /// Alerts at the `error` level.
    pub fn errors(&self) -> impl Iterator<Item = &Alert> {
        self.alerts
            .iter()
            .filter(|a| a.level == AlertLevel::Error)
    }

    /// Joined text of all error-level alerts, empty if there are none.
    pub fn error_string(&self) -> String {
        self.errors()
            .map(|a| a.text.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Whether any alert carries the given level.
    pub fn has_level(&self, level: AlertLevel) -> bool {
        self.alerts.iter().any(|a| a.level == level)
    }
}

impl From<Vec<Alert>> for Alerts {
    fn from(alerts: Vec<Alert>) -> Self {
        Self { alerts }
    }
}
