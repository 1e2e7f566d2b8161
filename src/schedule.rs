//! Timer scheduling
//!
//! Every delayed or repeated action on a page goes through a [`Scheduler`]. The browser bundle
//! backs it with `gloo-timers`; tests use the virtual clock in [`manual`]. Handles cancel their
//! timer when dropped, so whoever holds the handles decides how long timers live.
//! [`Timers`] is that holder for a page: it keeps every handle until [`Timers::teardown`].

use futures_util::future::LocalBoxFuture;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// A unit of async work driven on the current thread
pub type LocalTask = LocalBoxFuture<'static, ()>;

/// Source of timers and a local executor
pub trait Scheduler: Clone + 'static {
    /// Cancels the timer when dropped
    type Handle: 'static;

    /// Run `task` once after `delay`
    fn timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;

    /// Run `task` every `period`, first run one period from now
    fn interval(&self, period: Duration, task: Box<dyn FnMut()>) -> Self::Handle;

    /// Drive `task` to completion on the current thread
    fn spawn_local(&self, task: LocalTask);
}

/// Owner of all timers created for one page
///
/// One-shot handles release themselves once they fire; interval handles stay until
/// [`Timers::teardown`].
pub struct Timers<S: Scheduler> {
    scheduler: S,
    live: Rc<RefCell<HashMap<u64, S::Handle>>>,
    next_id: Cell<u64>,
    closed: Cell<bool>,
}

impl<S: Scheduler> Timers<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            live: Rc::new(RefCell::new(HashMap::new())),
            next_id: Cell::new(0),
            closed: Cell::new(false),
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    /// Schedule a one-shot task; ignored after teardown
    pub fn after(&self, delay: Duration, task: impl FnOnce() + 'static) {
        if self.closed.get() {
            return;
        }
        let id = self.next_id();
        let live: Weak<RefCell<HashMap<u64, S::Handle>>> = Rc::downgrade(&self.live);
        let handle = self.scheduler.timeout(
            delay,
            Box::new(move || {
                task();
                if let Some(live) = live.upgrade() {
                    let fired = live.borrow_mut().remove(&id);
                    drop(fired);
                }
            }),
        );
        self.live.borrow_mut().insert(id, handle);
    }

    /// Schedule a repeating task; ignored after teardown
    pub fn every(&self, period: Duration, task: impl FnMut() + 'static) {
        if self.closed.get() {
            return;
        }
        let id = self.next_id();
        let handle = self.scheduler.interval(period, Box::new(task));
        self.live.borrow_mut().insert(id, handle);
    }

    /// Spawn async work; ignored after teardown
    pub fn spawn(&self, task: impl Future<Output = ()> + 'static) {
        if self.closed.get() {
            return;
        }
        self.scheduler.spawn_local(Box::pin(task));
    }

    /// Number of timers still pending (intervals until teardown)
    pub fn len(&self) -> usize {
        self.live.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    /// Cancel everything and refuse new timers. Returns the number of timers cancelled.
    pub fn teardown(&self) -> usize {
        self.closed.set(true);
        let handles = std::mem::take(&mut *self.live.borrow_mut());
        let count = handles.len();
        drop(handles);
        count
    }
}

pub mod manual {
    //! Deterministic virtual-clock scheduler

    use super::{LocalTask, Scheduler};
    use futures_util::task::noop_waker_ref;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::task::{Context, Poll};
    use std::time::Duration;

    enum Job {
        Once(Box<dyn FnOnce()>),
        Repeat(Box<dyn FnMut()>),
    }

    struct Entry {
        seq: u64,
        due: u64,
        period: u64,
        job: Job,
        cancelled: Rc<Cell<bool>>,
    }

    #[derive(Default)]
    struct Clock {
        now: u64,
        next_seq: u64,
        entries: Vec<Entry>,
        tasks: Vec<LocalTask>,
    }

    /// Scheduler whose time only moves when [`ManualScheduler::advance`] is called.
    ///
    /// Spawned futures are polled with a no-op waker: once on spawn and again on every
    /// [`ManualScheduler::run_until_stalled`] (which `advance` also calls).
    #[derive(Clone, Default)]
    pub struct ManualScheduler {
        clock: Rc<RefCell<Clock>>,
    }

    /// Cancels its timer on drop
    pub struct ManualHandle {
        cancelled: Rc<Cell<bool>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            self.cancelled.set(true);
        }
    }

    impl ManualScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        /// Virtual time since creation
        pub fn now(&self) -> Duration {
            Duration::from_millis(self.clock.borrow().now)
        }

        /// Timers that are neither fired (one-shot) nor cancelled
        pub fn pending_timers(&self) -> usize {
            self.clock
                .borrow()
                .entries
                .iter()
                .filter(|e| !e.cancelled.get())
                .count()
        }

        /// Spawned futures that have not completed
        pub fn pending_tasks(&self) -> usize {
            self.clock.borrow().tasks.len()
        }

        /// Move the clock forward, firing due timers in deadline order
        pub fn advance(&self, by: Duration) {
            let target = self.clock.borrow().now + by.as_millis() as u64;

            loop {
                self.run_until_stalled();

                let entry = {
                    let mut clock = self.clock.borrow_mut();
                    clock.entries.retain(|e| !e.cancelled.get());
                    let next = clock
                        .entries
                        .iter()
                        .enumerate()
                        .filter(|(_, e)| e.due <= target)
                        .min_by_key(|(_, e)| (e.due, e.seq))
                        .map(|(i, _)| i);
                    match next {
                        Some(i) => {
                            let entry = clock.entries.remove(i);
                            clock.now = entry.due;
                            entry
                        }
                        None => {
                            clock.now = target;
                            break;
                        }
                    }
                };

                match entry.job {
                    Job::Once(task) => {
                        entry.cancelled.set(true);
                        task();
                    }
                    Job::Repeat(mut task) => {
                        task();
                        if !entry.cancelled.get() {
                            let mut clock = self.clock.borrow_mut();
                            clock.entries.push(Entry {
                                due: entry.due + entry.period,
                                job: Job::Repeat(task),
                                ..entry
                            });
                        }
                    }
                }
            }

            self.run_until_stalled();
        }

        /// Poll every spawned future until none of them makes progress
        pub fn run_until_stalled(&self) {
            loop {
                let tasks = std::mem::take(&mut self.clock.borrow_mut().tasks);
                if tasks.is_empty() {
                    return;
                }

                let before = tasks.len();
                let mut still_pending = Vec::new();
                for mut task in tasks {
                    if poll_once(&mut task).is_pending() {
                        still_pending.push(task);
                    }
                }
                let remaining = still_pending.len();

                let mut clock = self.clock.borrow_mut();
                let spawned_meanwhile = !clock.tasks.is_empty();
                still_pending.append(&mut clock.tasks);
                clock.tasks = still_pending;

                if remaining == before && !spawned_meanwhile {
                    return;
                }
            }
        }

        fn push(&self, delay: Duration, period: u64, job: Job) -> ManualHandle {
            let cancelled = Rc::new(Cell::new(false));
            let mut clock = self.clock.borrow_mut();
            let seq = clock.next_seq;
            clock.next_seq += 1;
            let due = clock.now + delay.as_millis() as u64;
            clock.entries.push(Entry {
                seq,
                due,
                period,
                job,
                cancelled: Rc::clone(&cancelled),
            });
            ManualHandle { cancelled }
        }
    }

    fn poll_once(task: &mut LocalTask) -> Poll<()> {
        let mut cx = Context::from_waker(noop_waker_ref());
        task.as_mut().poll(&mut cx)
    }

    impl Scheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> ManualHandle {
            self.push(delay, 0, Job::Once(task))
        }

        fn interval(&self, period: Duration, task: Box<dyn FnMut()>) -> ManualHandle {
            // A zero period would never let the clock move past it
            let period_ms = (period.as_millis() as u64).max(1);
            self.push(Duration::from_millis(period_ms), period_ms, Job::Repeat(task))
        }

        fn spawn_local(&self, mut task: LocalTask) {
            if poll_once(&mut task).is_pending() {
                self.clock.borrow_mut().tasks.push(task);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::manual::ManualScheduler;
    use super::*;
    use std::rc::Rc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_timeout_fires_once_at_deadline() {
        let timers = Timers::new(ManualScheduler::new());
        let fired = Rc::new(Cell::new(0));

        let f = Rc::clone(&fired);
        timers.after(ms(5000), move || f.set(f.get() + 1));

        timers.scheduler().advance(ms(4999));
        assert_eq!(fired.get(), 0);
        timers.scheduler().advance(ms(1));
        assert_eq!(fired.get(), 1);
        timers.scheduler().advance(ms(10_000));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_interval_repeats() {
        let timers = Timers::new(ManualScheduler::new());
        let ticks = Rc::new(Cell::new(0));

        let t = Rc::clone(&ticks);
        timers.every(ms(60_000), move || t.set(t.get() + 1));

        timers.scheduler().advance(ms(180_000));
        assert_eq!(ticks.get(), 3);
    }

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let timers = Timers::new(ManualScheduler::new());
        let order = Rc::new(RefCell::new(Vec::new()));

        for (delay, label) in [(2000, "restore"), (1000, "reload"), (5000, "dismiss")] {
            let o = Rc::clone(&order);
            timers.after(ms(delay), move || o.borrow_mut().push(label));
        }

        timers.scheduler().advance(ms(6000));
        assert_eq!(*order.borrow(), vec!["reload", "restore", "dismiss"]);
    }

    #[test]
    fn test_teardown_cancels_everything() {
        let timers = Timers::new(ManualScheduler::new());
        let fired = Rc::new(Cell::new(0));

        let f = Rc::clone(&fired);
        timers.after(ms(100), move || f.set(f.get() + 1));
        let f = Rc::clone(&fired);
        timers.every(ms(100), move || f.set(f.get() + 1));

        assert_eq!(timers.teardown(), 2);
        assert!(timers.is_closed());
        assert_eq!(timers.scheduler().pending_timers(), 0);

        // Requests after teardown are dropped
        let f = Rc::clone(&fired);
        timers.after(ms(100), move || f.set(f.get() + 1));
        assert!(timers.is_empty());

        timers.scheduler().advance(ms(1000));
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_fired_timeouts_release_handles() {
        let timers = Timers::new(ManualScheduler::new());
        for _ in 0..1000 {
            timers.after(ms(1), || {});
        }
        timers.every(ms(10_000), || {});
        assert_eq!(timers.len(), 1001);

        timers.scheduler().advance(ms(2));
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.scheduler().pending_timers(), 1);

        assert_eq!(timers.teardown(), 1);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_timer_scheduled_from_timer_runs() {
        let timers = Rc::new(Timers::new(ManualScheduler::new()));
        let fired = Rc::new(Cell::new(false));

        let inner_timers = Rc::clone(&timers);
        let f = Rc::clone(&fired);
        timers.after(ms(1000), move || {
            inner_timers.after(ms(1000), move || f.set(true));
        });

        timers.scheduler().advance(ms(1500));
        assert!(!fired.get());
        timers.scheduler().advance(ms(500));
        assert!(fired.get());
    }

    #[test]
    fn test_spawned_ready_future_completes_immediately() {
        let timers = Timers::new(ManualScheduler::new());
        let done = Rc::new(Cell::new(false));

        let d = Rc::clone(&done);
        timers.spawn(async move { d.set(true) });

        assert!(done.get());
        assert_eq!(timers.scheduler().pending_tasks(), 0);
    }
}
