//! Timer capability used by the game loop.
//!
//! The controller never touches a real clock. It asks a [`Scheduler`] to arm
//! timers and is told about expirations through
//! [`GameController::on_timer`](super::GameController::on_timer). The browser
//! implementation wraps gloo timers; [`ManualScheduler`] is a deterministic
//! clock for tests and headless simulation.

/// Opaque id of an armed timer, unique per scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// What an armed timer drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timer {
    /// Repeating one-second tick.
    Countdown,
    /// Single-shot hide of the currently shown mole.
    Reveal,
}

pub trait Scheduler {
    /// Arm a single-shot timer firing after `delay_ms`.
    fn schedule_once(&mut self, delay_ms: u32, timer: Timer) -> TimerHandle;
    /// Arm a timer firing every `period_ms` until cancelled.
    fn schedule_repeating(&mut self, period_ms: u32, timer: Timer) -> TimerHandle;
    /// Disarm a timer. Unknown, fired, or already cancelled handles are a no-op.
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Clone, Debug)]
struct Pending {
    handle: TimerHandle,
    timer: Timer,
    due_ms: u64,
    period_ms: Option<u32>,
}

/// Virtual clock. Timers fire only when [`ManualScheduler::pop_due`] is called.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    next_id: u64,
    pending: Vec<Pending>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_live(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    pub fn live_count(&self) -> usize {
        self.pending.len()
    }

    pub fn live_of(&self, timer: Timer) -> usize {
        self.pending.iter().filter(|p| p.timer == timer).count()
    }

    /// Milliseconds until `handle` fires, if it is still armed.
    pub fn remaining_ms(&self, handle: TimerHandle) -> Option<u64> {
        self.pending
            .iter()
            .find(|p| p.handle == handle)
            .map(|p| p.due_ms.saturating_sub(self.now_ms))
    }

    /// Pops the earliest timer due at or before `until_ms` and moves the clock
    /// to its due time. Ties fire in arming order. Repeating timers are re-armed
    /// one period later; single-shot timers are removed.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerHandle, Timer)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= until_ms)
            .min_by_key(|(_, p)| (p.due_ms, p.handle))
            .map(|(i, _)| i)?;

        let due_ms = self.pending[idx].due_ms;
        self.now_ms = self.now_ms.max(due_ms);
        let fired = match self.pending[idx].period_ms {
            Some(period) => {
                let p = &mut self.pending[idx];
                p.due_ms += u64::from(period.max(1));
                (p.handle, p.timer)
            }
            None => {
                let p = self.pending.swap_remove(idx);
                (p.handle, p.timer)
            }
        };
        Some(fired)
    }

    /// Moves the clock forward without firing anything.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn arm(&mut self, delay_ms: u32, period_ms: Option<u32>, timer: Timer) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.push(Pending {
            handle,
            timer,
            due_ms: self.now_ms + u64::from(delay_ms),
            period_ms,
        });
        handle
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&mut self, delay_ms: u32, timer: Timer) -> TimerHandle {
        self.arm(delay_ms, None, timer)
    }

    fn schedule_repeating(&mut self, period_ms: u32, timer: Timer) -> TimerHandle {
        self.arm(period_ms.max(1), Some(period_ms), timer)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|p| p.handle != handle);
    }
}
