//! # Blogkit
//!
//! Front-end behavior of a server-rendered blog, written once and shared by the `blogkit-web`
//! WebAssembly bundle and the native `blogkit` CLI.
//!
//! ## Modules
//!
//! - [`cookie`]: CSRF cookie lookup
//! - [`datefmt`]: "5 minutes ago" style labels
//! - [`debounce`]: trailing-edge debounce over a [`schedule::Scheduler`]
//! - [`schedule`]: timer abstraction, per-page timer ownership, virtual clock for tests
//! - [`notification`]: transient banner model
//! - [`counter`]: post editor character counter
//! - [`lazy`]: deferred image source promotion
//! - [`polling`]: unread-count poller and weather refresh flow
//! - [`api`]: endpoint client seam, DTOs and the native `reqwest` client
//! - [`config`]: TOML / page JSON configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use blogkit::datefmt::relative_label;
//! use blogkit::Locale;
//! use chrono::{Duration, Utc};
//!
//! let now = Utc::now();
//! let posted = (now - Duration::minutes(5)).fixed_offset();
//! assert_eq!(relative_label(posted, now, Locale::En), "5 minutes ago");
//! ```

pub mod api;
pub mod config;
pub mod cookie;
pub mod counter;
pub mod datefmt;
pub mod debounce;
pub mod error;
pub mod lazy;
pub mod locale;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod notification;
pub mod polling;
pub mod schedule;

pub use api::{BlogApi, RefreshResponse, UnreadSummary};
pub use config::{Config, ConfigError, EndpointConfig, LoggingConfig, TimingConfig, UiConfig};
pub use cookie::read_cookie;
pub use counter::{CharCount, CounterLevel};
pub use datefmt::{format_date, parse_date, relative_label, RelativeTime};
pub use debounce::Debouncer;
pub use error::{ApiError, ApiResult};
pub use locale::{Locale, Messages};
pub use notification::{Notification, Notifier, Severity};
pub use polling::{BadgeState, RefreshControl, RefreshOutcome, UnreadBadge, UnreadPoller, WeatherRefresher};
pub use schedule::{Scheduler, Timers};
