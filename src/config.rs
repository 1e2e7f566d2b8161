//! Configuration System
//!
//! Handles loading configuration from TOML files and environment variables (CLI), or from a
//! JSON block embedded in the page (browser bundle). Every field has a default, so an empty
//! document is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::locale::Locale;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub endpoints: EndpointConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the blog's JSON endpoints live
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EndpointConfig {
    /// Origin prefix; empty means same origin (the browser case)
    #[serde(default)]
    pub base_url: String,

    #[serde(default = "default_unread_summary")]
    pub unread_summary: String,

    #[serde(default = "default_weather_refresh")]
    pub weather_refresh: String,

    #[serde(default = "default_csrf_cookie")]
    pub csrf_cookie: String,

    #[serde(default = "default_csrf_header")]
    pub csrf_header: String,

    /// Request timeout for the native client
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_unread_summary() -> String {
    "/api/private-chat/summary/".to_string()
}

fn default_weather_refresh() -> String {
    "/api/weather/refresh/".to_string()
}

fn default_csrf_cookie() -> String {
    "csrftoken".to_string()
}

fn default_csrf_header() -> String {
    "X-CSRFToken".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            unread_summary: default_unread_summary(),
            weather_refresh: default_weather_refresh(),
            csrf_cookie: default_csrf_cookie(),
            csrf_header: default_csrf_header(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl EndpointConfig {
    /// Join the base URL and an endpoint path
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') || base.is_empty() {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Delays and periods, in milliseconds
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TimingConfig {
    #[serde(default = "default_notification_ms")]
    pub notification_ms: u64,

    #[serde(default = "default_alert_dismiss_ms")]
    pub alert_dismiss_ms: u64,

    #[serde(default = "default_unread_poll_ms")]
    pub unread_poll_ms: u64,

    #[serde(default = "default_weather_reload_ms")]
    pub weather_reload_ms: u64,

    #[serde(default = "default_weather_restore_ms")]
    pub weather_restore_ms: u64,
}

fn default_notification_ms() -> u64 {
    5000
}

fn default_alert_dismiss_ms() -> u64 {
    5000
}

fn default_unread_poll_ms() -> u64 {
    60_000
}

fn default_weather_reload_ms() -> u64 {
    1000
}

fn default_weather_restore_ms() -> u64 {
    2000
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            notification_ms: default_notification_ms(),
            alert_dismiss_ms: default_alert_dismiss_ms(),
            unread_poll_ms: default_unread_poll_ms(),
            weather_reload_ms: default_weather_reload_ms(),
            weather_restore_ms: default_weather_restore_ms(),
        }
    }
}

impl TimingConfig {
    pub fn notification(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }

    pub fn alert_dismiss(&self) -> Duration {
        Duration::from_millis(self.alert_dismiss_ms)
    }

    pub fn unread_poll(&self) -> Duration {
        Duration::from_millis(self.unread_poll_ms)
    }

    pub fn weather_reload(&self) -> Duration {
        Duration::from_millis(self.weather_reload_ms)
    }

    pub fn weather_restore(&self) -> Duration {
        Duration::from_millis(self.weather_restore_ms)
    }

    /// Periods must be non-zero; delays may be zero
    pub fn validate(&self) -> Result<(), String> {
        if self.unread_poll_ms == 0 {
            return Err("timing.unread_poll_ms must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Presentation settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiConfig {
    #[serde(default)]
    pub locale: Locale,

    /// Scroll offset past which the scroll-to-top button shows
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold_px: f64,
}

fn default_scroll_threshold() -> f64 {
    300.0
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            scroll_threshold_px: default_scroll_threshold(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty` or `json` (native only)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        config.checked(path)
    }

    /// Parse the JSON configuration block a page embeds
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let page = Path::new("<page>");
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            path: page.to_path_buf(),
            error: e.to_string(),
        })?;
        config.checked(page)
    }

    fn checked(self, path: &Path) -> Result<Self, ConfigError> {
        self.timing.validate().map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })?;
        Ok(self)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("blogkit").join("config.toml")),
            Some(PathBuf::from("/etc/blogkit/config.toml")),
            Some(PathBuf::from("./blogkit.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("No config file found, using defaults with env overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("BLOGKIT_BASE_URL") {
            self.endpoints.base_url = url;
        }

        if let Ok(locale) = std::env::var("BLOGKIT_LOCALE") {
            match locale.parse() {
                Ok(l) => self.ui.locale = l,
                Err(e) => tracing::warn!("Ignoring BLOGKIT_LOCALE: {}", e),
            }
        }

        if let Ok(ms) = std::env::var("BLOGKIT_UNREAD_POLL_MS") {
            match ms.parse::<u64>() {
                Ok(ms) if ms > 0 => self.timing.unread_poll_ms = ms,
                _ => tracing::warn!(
                    "Ignoring BLOGKIT_UNREAD_POLL_MS: {:?} is not a positive integer",
                    ms
                ),
            }
        }

        if let Ok(level) = std::env::var("BLOGKIT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("BLOGKIT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Blogkit Configuration
#
# Environment variables override these settings:
# - BLOGKIT_BASE_URL
# - BLOGKIT_LOCALE
# - BLOGKIT_UNREAD_POLL_MS
# - BLOGKIT_LOG_LEVEL
# - BLOGKIT_LOG_FORMAT

[endpoints]
# Blog origin (required by the CLI, leave empty in the browser)
base_url = "http://localhost:8000"

# Endpoint paths
unread_summary = "/api/private-chat/summary/"
weather_refresh = "/api/weather/refresh/"

# CSRF cookie and the header it is echoed in
csrf_cookie = "csrftoken"
csrf_header = "X-CSRFToken"

# Request timeout in seconds (CLI only)
request_timeout_secs = 10

[timing]
# How long notification banners stay up (ms)
notification_ms = 5000

# Delay before server-rendered alerts close themselves (ms)
alert_dismiss_ms = 5000

# Unread message polling period (ms)
unread_poll_ms = 60000

# Delay between a successful weather refresh and the page reload (ms)
weather_reload_ms = 1000

# Delay before a weather refresh button is re-enabled (ms)
weather_restore_ms = 2000

[ui]
# Label language: en or zh-CN
locale = "en"

# Scroll offset that reveals the scroll-to-top button (px)
scroll_threshold_px = 300

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.endpoints.unread_summary, "/api/private-chat/summary/");
        assert_eq!(config.endpoints.csrf_header, "X-CSRFToken");
        assert_eq!(config.timing.unread_poll(), Duration::from_secs(60));
        assert_eq!(config.timing.weather_restore(), Duration::from_secs(2));
        assert_eq!(config.ui.scroll_threshold_px, 300.0);
        assert_eq!(config.ui.locale, Locale::En);
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.endpoints.base_url, "http://localhost:8000");
        assert_eq!(config.timing, TimingConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[ui]\nlocale = \"zh-CN\"\n\n[timing]\nunread_poll_ms = 30000"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.ui.locale, Locale::ZhCn);
        assert_eq!(config.timing.unread_poll_ms, 30_000);
        assert_eq!(config.timing.notification_ms, 5000);
        assert_eq!(config.endpoints, EndpointConfig::default());
    }

    #[test]
    fn test_load_errors() {
        let missing = Config::load(Path::new("/nonexistent/blogkit.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timing\nbroken").unwrap();
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_page_json_config() {
        let config = Config::from_json(r#"{"ui": {"locale": "zh-CN"}, "timing": {"notification_ms": 3000}}"#).unwrap();
        assert_eq!(config.ui.locale, Locale::ZhCn);
        assert_eq!(config.timing.notification(), Duration::from_secs(3));

        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
        assert!(Config::from_json("not json").is_err());
    }

    #[test]
    fn test_zero_poll_period_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timing]\nunread_poll_ms = 0").unwrap();
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse { .. })));

        let page = Config::from_json(r#"{"timing": {"unread_poll_ms": 0}}"#);
        assert!(matches!(page, Err(ConfigError::Parse { .. })));

        // Zero delays are fine
        let config = Config::from_json(r#"{"timing": {"weather_reload_ms": 0}}"#).unwrap();
        assert_eq!(config.timing.weather_reload(), Duration::ZERO);
    }

    #[test]
    fn test_env_zero_poll_period_ignored() {
        std::env::set_var("BLOGKIT_UNREAD_POLL_MS", "0");
        let config = Config::from_env();
        std::env::remove_var("BLOGKIT_UNREAD_POLL_MS");

        assert_eq!(config.timing.unread_poll(), Duration::from_secs(60));
        assert!(config.timing.validate().is_ok());
    }

    #[test]
    fn test_url_join() {
        let mut endpoints = EndpointConfig::default();
        assert_eq!(endpoints.url("/api/weather/refresh/"), "/api/weather/refresh/");

        endpoints.base_url = "https://blog.example.com/".to_string();
        assert_eq!(
            endpoints.url("/api/weather/refresh/"),
            "https://blog.example.com/api/weather/refresh/"
        );
        assert_eq!(endpoints.url("api/x/"), "https://blog.example.com/api/x/");
    }
}
