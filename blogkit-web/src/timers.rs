//! Browser scheduler backed by `gloo-timers` and `wasm-bindgen-futures`

use blogkit::schedule::{LocalTask, Scheduler};
use gloo_timers::callback::{Interval, Timeout};
use std::time::Duration;

/// `setTimeout` / `setInterval` scheduler
#[derive(Clone, Copy, Default)]
pub struct GlooScheduler;

/// Cancels the underlying browser timer when dropped
pub enum GlooTimer {
    Timeout(Timeout),
    Interval(Interval),
}

fn millis(d: Duration) -> u32 {
    d.as_millis().min(u32::MAX as u128) as u32
}

impl Scheduler for GlooScheduler {
    type Handle = GlooTimer;

    fn timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> GlooTimer {
        GlooTimer::Timeout(Timeout::new(millis(delay), task))
    }

    fn interval(&self, period: Duration, task: Box<dyn FnMut()>) -> GlooTimer {
        GlooTimer::Interval(Interval::new(millis(period), task))
    }

    fn spawn_local(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
