//! Ordering of overlapping requests

use std::cell::Cell;

/// Issued when a request is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn number(self) -> u64 {
        self.0
    }
}

/// Lets a response through only if no later-dispatched response was applied before it.
///
/// Requests are never suppressed; a slow response that arrives after a newer one simply
/// does not overwrite it.
#[derive(Debug, Default)]
pub struct SequenceGuard {
    dispatched: Cell<u64>,
    applied: Cell<u64>,
    in_flight: Cell<u32>,
}

impl SequenceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&self) -> Ticket {
        let next = self.dispatched.get() + 1;
        self.dispatched.set(next);
        self.in_flight.set(self.in_flight.get() + 1);
        Ticket(next)
    }

    /// Record the outcome of `ticket`'s request. Returns whether a successful response may be
    /// applied; failures only settle the in-flight count.
    pub fn settle(&self, ticket: Ticket, succeeded: bool) -> bool {
        self.in_flight.set(self.in_flight.get().saturating_sub(1));
        if !succeeded || ticket.0 <= self.applied.get() {
            return false;
        }
        self.applied.set(ticket.0);
        true
    }

    pub fn in_flight(&self) -> u32 {
        self.in_flight.get()
    }

    pub fn last_applied(&self) -> Option<Ticket> {
        match self.applied.get() {
            0 => None,
            n => Some(Ticket(n)),
        }
    }
}
