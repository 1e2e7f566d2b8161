//! Transient notification banners
//!
//! The banner itself is rendered by the browser bundle; this module owns what a notification
//! is and how it is styled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// How long a banner stays on the page
pub const NOTIFICATION_LIFETIME: Duration = Duration::from_millis(5000);

/// Inline style of the floating banner
pub const BANNER_STYLE: &str = "position: fixed; top: 20px; right: 20px; z-index: 9999; min-width: 300px;";

/// Bootstrap alert flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    #[serde(alias = "error")]
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Severity::Info),
            "success" => Ok(Severity::Success),
            "danger" | "error" => Ok(Severity::Danger),
            other => Err(format!("Unknown severity: {}", other)),
        }
    }
}

/// A message shown to the user for a few seconds
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            created_at: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Danger)
    }

    /// Class list of the banner element
    pub fn css_class(&self) -> String {
        format!("alert alert-{} alert-dismissible fade show", self.severity)
    }

    /// When the banner is taken off the page
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + chrono::Duration::milliseconds(NOTIFICATION_LIFETIME.as_millis() as i64)
    }
}

/// Anything that can put a notification in front of the user
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parsing() {
        assert_eq!("info".parse::<Severity>().unwrap(), Severity::Info);
        assert_eq!("error".parse::<Severity>().unwrap(), Severity::Danger);
        assert_eq!("danger".parse::<Severity>().unwrap(), Severity::Danger);
        assert!("warning".parse::<Severity>().is_err());

        let parsed: Severity = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(parsed, Severity::Danger);
    }

    #[test]
    fn test_css_class() {
        let n = Notification::success("Saved");
        assert_eq!(n.css_class(), "alert alert-success alert-dismissible fade show");
        assert_eq!(
            Notification::new("x", "error".parse().unwrap()).css_class(),
            "alert alert-danger alert-dismissible fade show"
        );
    }

    #[test]
    fn test_expiry_is_five_seconds_after_creation() {
        let n = Notification::info("hello");
        assert_eq!((n.expires_at() - n.created_at).num_milliseconds(), 5000);
    }
}
