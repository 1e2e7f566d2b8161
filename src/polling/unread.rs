//! Unread private-message badge poller
//!
//! Ticks once as soon as it starts and then on a fixed period. Ticks are allowed to overlap;
//! the [`SequenceGuard`] keeps a late response from overwriting a newer one.

use std::rc::Rc;
use std::time::Duration;

use super::sequence::SequenceGuard;
use crate::api::{BlogApi, UnreadSummary};
use crate::error::ApiError;
use crate::schedule::{Scheduler, Timers};

/// What the unread indicator should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeState {
    Hidden,
    Visible(u64),
}

impl From<&UnreadSummary> for BadgeState {
    fn from(summary: &UnreadSummary) -> Self {
        match summary.total_unread {
            0 => BadgeState::Hidden,
            n => BadgeState::Visible(n),
        }
    }
}

/// The page element showing the unread count
pub trait UnreadBadge {
    fn render(&self, state: BadgeState);
}

/// Whether a request is outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Fetching,
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Rendered(BadgeState),
    /// A newer response had already been rendered
    Stale,
    /// Logged; the badge keeps whatever it showed before
    Failed(ApiError),
}

pub struct UnreadPoller<A, B> {
    api: Rc<A>,
    badge: B,
    guard: SequenceGuard,
}

impl<A, B> UnreadPoller<A, B>
where
    A: BlogApi + 'static,
    B: UnreadBadge + 'static,
{
    pub fn new(api: Rc<A>, badge: B) -> Self {
        Self {
            api,
            badge,
            guard: SequenceGuard::new(),
        }
    }

    pub fn state(&self) -> PollState {
        if self.guard.in_flight() > 0 {
            PollState::Fetching
        } else {
            PollState::Idle
        }
    }

    /// Fetch the summary once and render it if it is still the newest
    pub async fn tick(&self) -> TickOutcome {
        let ticket = self.guard.dispatch();
        tracing::debug!(ticket = ticket.number(), "Polling unread summary");

        match self.api.unread_summary().await {
            Ok(summary) => {
                if self.guard.settle(ticket, true) {
                    let state = BadgeState::from(&summary);
                    self.badge.render(state);
                    TickOutcome::Rendered(state)
                } else {
                    tracing::debug!(ticket = ticket.number(), "Dropping stale unread summary");
                    TickOutcome::Stale
                }
            }
            Err(e) => {
                self.guard.settle(ticket, false);
                tracing::error!(error = %e, "Failed to fetch private chat summary");
                TickOutcome::Failed(e)
            }
        }
    }

    /// Tick now, then every `period`, for as long as `timers` lives
    pub fn start<S: Scheduler>(self: Rc<Self>, timers: &Timers<S>, period: Duration) {
        let first = Rc::clone(&self);
        timers.spawn(async move {
            first.tick().await;
        });

        let scheduler = timers.scheduler().clone();
        timers.every(period, move || {
            let poller = Rc::clone(&self);
            scheduler.spawn_local(Box::pin(async move {
                poller.tick().await;
            }));
        });
    }
}
