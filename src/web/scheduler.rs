use std::collections::HashMap;

use gloo::timers::callback::{Interval, Timeout};

use crate::game::{Scheduler, Timer, TimerHandle};

/// gloo-backed timers. Dropping a `Timeout`/`Interval` clears it, so
/// cancelling is just removing the entry.
#[derive(Default)]
pub struct BrowserScheduler {
    next_id: u64,
    timeouts: HashMap<TimerHandle, Timeout>,
    intervals: HashMap<TimerHandle, Interval>,
}

impl BrowserScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_handle(&mut self) -> TimerHandle {
        self.next_id += 1;
        TimerHandle::new(self.next_id)
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule_once(&mut self, delay_ms: u32, timer: Timer) -> TimerHandle {
        let handle = self.next_handle();
        let timeout = Timeout::new(delay_ms, move || super::deliver(handle, timer));
        self.timeouts.insert(handle, timeout);
        handle
    }

    fn schedule_repeating(&mut self, period_ms: u32, timer: Timer) -> TimerHandle {
        let handle = self.next_handle();
        let interval = Interval::new(period_ms, move || super::deliver(handle, timer));
        self.intervals.insert(handle, interval);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timeouts.remove(&handle);
        self.intervals.remove(&handle);
    }
}

impl std::fmt::Debug for BrowserScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserScheduler")
            .field("next_id", &self.next_id)
            .field("timeouts", &self.timeouts.len())
            .field("intervals", &self.intervals.len())
            .finish()
    }
}
