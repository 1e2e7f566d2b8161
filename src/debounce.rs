//! Trailing-edge debounce

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::schedule::Scheduler;

/// Collapses a burst of calls into one call `wait` after the last of them.
///
/// The pending call is cancelled by dropping its timer handle, so dropping the debouncer
/// also drops whatever call was still waiting.
pub struct Debouncer<S: Scheduler, A: 'static> {
    scheduler: S,
    wait: Duration,
    func: Rc<dyn Fn(A)>,
    pending: RefCell<Option<S::Handle>>,
}

impl<S: Scheduler, A: 'static> Debouncer<S, A> {
    pub fn new(scheduler: S, wait: Duration, func: impl Fn(A) + 'static) -> Self {
        Self {
            scheduler,
            wait,
            func: Rc::new(func),
            pending: RefCell::new(None),
        }
    }

    /// Restart the quiet period with `args` as the arguments of the eventual call
    pub fn call(&self, args: A) {
        let func = Rc::clone(&self.func);
        let handle = self
            .scheduler
            .timeout(self.wait, Box::new(move || func(args)));
        // Replacing drops (and so cancels) the previous timer
        let previous = self.pending.replace(Some(handle));
        drop(previous);
    }

    /// Drop the pending call, if any
    pub fn cancel(&self) {
        let previous = self.pending.take();
        drop(previous);
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }
}
