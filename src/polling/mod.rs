//! Polling clients
//!
//! - [`unread`]: periodic unread private-message count
//! - [`weather`]: click-driven weather refresh with delayed reload and button restore
//!
//! Both are written against [`crate::api::BlogApi`] and [`crate::schedule::Scheduler`], so the
//! browser bundle and the tests drive the same code.

pub mod sequence;
pub mod unread;
pub mod weather;

pub use sequence::{SequenceGuard, Ticket};
pub use unread::{BadgeState, PollState, TickOutcome, UnreadBadge, UnreadPoller};
pub use weather::{RefreshControl, RefreshOutcome, WeatherRefresher};
