use crate::config::GameConfig;

use super::difficulty::{self, Difficulty};
use super::holes::{HoleId, HoleSelector};
use super::scheduler::{ManualScheduler, Scheduler, Timer, TimerHandle};
use super::view::View;

/// Mutable state of one round.
#[derive(Clone, Debug)]
pub struct Session {
    remaining_secs: u32,
    score: u32,
    difficulty: Difficulty,
    holes: HoleSelector,
}

impl Session {
    fn new(config: &GameConfig) -> Self {
        Self {
            remaining_secs: 0,
            score: 0,
            difficulty: config.difficulty,
            holes: HoleSelector::new(config.seed),
        }
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn last_target(&self) -> Option<HoleId> {
        self.holes.last()
    }
}

/// Reveal cycle state. `Hidden` only lasts between a hide and the
/// continue-or-stop decision that immediately follows it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Revealing { hole: HoleId, handle: TimerHandle },
    Hidden { hole: HoleId },
    Stopped,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Revealing { .. } => "revealing",
            Phase::Hidden { .. } => "hidden",
            Phase::Stopped => "stopped",
        }
    }

    pub fn active_hole(self) -> Option<HoleId> {
        match self {
            Phase::Revealing { hole, .. } => Some(hole),
            _ => None,
        }
    }
}

/// Outcome of the continue-or-stop check run after each hide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleStep {
    Revealed { hole: HoleId, handle: TimerHandle },
    Stopped,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SessionSnapshot {
    pub points: u32,
    pub time: u32,
    pub difficulty: &'static str,
    pub phase: &'static str,
    pub active_hole: Option<usize>,
}

pub const GAME_STARTED: &str = "game started";
pub const GAME_STOPPED: &str = "game stopped";

/// Drives one play session: reveal cycle, countdown, score and lifecycle.
///
/// Timers go through `S` and all output through `V`, so the same controller
/// runs in the browser and against [`ManualScheduler`] in tests.
#[derive(Debug)]
pub struct GameController<S: Scheduler, V: View> {
    config: GameConfig,
    session: Session,
    scheduler: S,
    view: V,
    phase: Phase,
    countdown: Option<TimerHandle>,
}

impl<S: Scheduler, V: View> GameController<S, V> {
    pub fn new(config: GameConfig, scheduler: S, view: V) -> Self {
        Self {
            session: Session::new(&config),
            config,
            scheduler,
            view,
            phase: Phase::Idle,
            countdown: None,
        }
    }

    // --- Accessors ------------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn points(&self) -> u32 {
        self.session.score
    }

    pub fn time(&self) -> u32 {
        self.session.remaining_secs
    }

    pub fn difficulty(&self) -> Difficulty {
        self.session.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        log::debug!("difficulty set to {difficulty}");
        self.session.difficulty = difficulty;
    }

    pub fn countdown_handle(&self) -> Option<TimerHandle> {
        self.countdown
    }

    pub fn reveal_handle(&self) -> Option<TimerHandle> {
        match self.phase {
            Phase::Revealing { handle, .. } => Some(handle),
            _ => None,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Pins the previously targeted hole.
    pub fn set_last_target(&mut self, hole: Option<HoleId>) {
        self.session.holes.set_last(hole);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            points: self.points(),
            time: self.time(),
            difficulty: self.difficulty().as_str(),
            phase: self.phase.as_str(),
            active_hole: self.phase.active_hole().map(HoleId::index),
        }
    }

    // --- Selection ------------------------------------------------------------

    pub fn random_integer(&mut self, min: u32, max: u32) -> u32 {
        difficulty::random_integer(self.session.holes.rng(), min, max)
    }

    /// Visibility delay for the current difficulty.
    pub fn set_delay(&mut self) -> u32 {
        self.delay_for(self.session.difficulty)
    }

    /// Delay for an arbitrary difficulty, drawn from the session RNG. Leaves
    /// the session's own difficulty untouched.
    pub fn delay_for(&mut self, difficulty: Difficulty) -> u32 {
        difficulty.delay_ms(self.session.holes.rng())
    }

    pub fn choose_hole(&mut self) -> HoleId {
        self.session.holes.choose()
    }

    // --- Reveal cycle ---------------------------------------------------------

    pub fn toggle_visibility(&mut self, hole: HoleId) -> bool {
        self.view.toggle(hole)
    }

    /// Starts a reveal with a fresh hole and delay.
    pub fn show_up(&mut self) -> TimerHandle {
        let delay_ms = self.set_delay();
        let hole = self.choose_hole();
        self.show_and_hide(hole, delay_ms)
    }

    /// Shows `hole` and arms the timer that hides it again after `delay_ms`.
    /// A reveal still pending is cancelled first so only one chain runs.
    pub fn show_and_hide(&mut self, hole: HoleId, delay_ms: u32) -> TimerHandle {
        self.cancel_reveal();
        if !self.view.is_visible(hole) {
            self.view.toggle(hole);
        }
        let handle = self.scheduler.schedule_once(delay_ms, Timer::Reveal);
        log::debug!("{hole} up for {delay_ms}ms ({handle:?})");
        self.phase = Phase::Revealing { hole, handle };
        handle
    }

    /// Continue-or-stop decision made after every hide.
    pub fn game_over(&mut self) -> CycleStep {
        if self.session.remaining_secs > 0 {
            let handle = self.show_up();
            match self.phase {
                Phase::Revealing { hole, .. } => CycleStep::Revealed { hole, handle },
                _ => CycleStep::Stopped,
            }
        } else {
            self.stop_game();
            CycleStep::Stopped
        }
    }

    /// Delivery point for every timer the scheduler fires.
    pub fn on_timer(&mut self, handle: TimerHandle) {
        if self.countdown == Some(handle) {
            self.update_timer();
            return;
        }
        match self.phase {
            Phase::Revealing { hole, handle: live } if live == handle => {
                // Single-shot: release whatever the scheduler still holds for it.
                self.scheduler.cancel(handle);
                if self.view.is_visible(hole) {
                    self.view.toggle(hole);
                }
                log::debug!("{hole} hidden");
                self.phase = Phase::Hidden { hole };
                self.game_over();
            }
            _ => log::warn!("ignoring stale timer {handle:?} in phase {}", self.phase.as_str()),
        }
    }

    fn cancel_reveal(&mut self) {
        if let Phase::Revealing { hole, handle } = self.phase {
            self.scheduler.cancel(handle);
            if self.view.is_visible(hole) {
                self.view.toggle(hole);
            }
            self.phase = Phase::Hidden { hole };
        }
    }

    // --- Score ----------------------------------------------------------------

    pub fn update_score(&mut self) -> u32 {
        self.session.score = self.session.score.saturating_add(1);
        self.view.show_score(self.session.score);
        self.session.score
    }

    pub fn clear_score(&mut self) -> u32 {
        self.session.score = 0;
        self.view.show_score(0);
        0
    }

    /// Click on any mole. Counts whether or not the mole is currently up.
    pub fn whack(&mut self) -> u32 {
        let points = self.update_score();
        log::trace!("whack, points = {points}");
        points
    }

    pub fn set_event_listeners(&mut self) {
        self.view.bind_whack_handlers();
    }

    // --- Countdown ------------------------------------------------------------

    pub fn set_duration(&mut self, secs: u32) -> u32 {
        self.session.remaining_secs = secs;
        self.view.show_time(secs);
        secs
    }

    /// One countdown tick. Inert once the clock reads zero.
    pub fn update_timer(&mut self) -> u32 {
        if self.session.remaining_secs > 0 {
            self.session.remaining_secs -= 1;
            self.view.show_time(self.session.remaining_secs);
        }
        log::trace!("tick, {}s left", self.session.remaining_secs);
        self.session.remaining_secs
    }

    pub fn start_timer(&mut self) -> TimerHandle {
        if let Some(old) = self.countdown.take() {
            self.scheduler.cancel(old);
        }
        let handle = self
            .scheduler
            .schedule_repeating(self.config.tick_ms, Timer::Countdown);
        self.countdown = Some(handle);
        handle
    }

    // --- Lifecycle ------------------------------------------------------------

    /// Cancels the countdown and any pending reveal, hiding the mole if one is
    /// up. Safe to call repeatedly.
    pub fn stop_game(&mut self) -> &'static str {
        let had_countdown = self.countdown.is_some();
        if let Some(handle) = self.countdown.take() {
            self.scheduler.cancel(handle);
        }
        self.cancel_reveal();
        if self.phase != Phase::Idle || had_countdown {
            if self.phase != Phase::Stopped {
                log::info!("game stopped with {} points", self.session.score);
            }
            self.phase = Phase::Stopped;
        }
        GAME_STOPPED
    }

    pub fn start_game(&mut self) -> &'static str {
        self.stop_game();
        self.clear_score();
        self.set_duration(self.config.duration_secs);
        self.session.holes.reset();
        self.set_event_listeners();
        self.start_timer();
        self.show_up();
        log::info!(
            "game started: {}s on {}",
            self.session.remaining_secs,
            self.session.difficulty
        );
        GAME_STARTED
    }
}

impl<V: View> GameController<ManualScheduler, V> {
    /// Moves the virtual clock forward by `ms`, delivering every timer that
    /// falls due on the way.
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now_ms() + ms;
        while let Some((handle, _)) = self.scheduler.pop_due(until) {
            self.on_timer(handle);
        }
        self.scheduler.set_now(until);
    }

    /// Runs until no timers remain or `limit_ms` of virtual time has passed.
    pub fn run_until_idle(&mut self, limit_ms: u64) {
        let until = self.scheduler.now_ms() + limit_ms;
        while self.scheduler.live_count() > 0 {
            match self.scheduler.pop_due(until) {
                Some((handle, _)) => self.on_timer(handle),
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::view::MemoryView;

    fn controller(difficulty: Difficulty) -> GameController<ManualScheduler, MemoryView> {
        let config = GameConfig::default()
            .with_difficulty(difficulty)
            .with_seed(17);
        GameController::new(config, ManualScheduler::new(), MemoryView::new())
    }

    #[test]
    fn starts_idle() {
        let game = controller(Difficulty::Easy);
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.points(), 0);
        assert_eq!(game.time(), 0);
        assert!(game.view().visible_holes().is_empty());
    }

    #[test]
    fn show_and_hide_reveals_then_hides_the_same_hole() {
        let mut game = controller(Difficulty::Easy);
        game.set_duration(0);
        let hole = HoleId::new(2).unwrap();
        let handle = game.show_and_hide(hole, 500);
        assert_eq!(game.phase(), Phase::Revealing { hole, handle });
        assert_eq!(game.view().visible_holes(), vec![hole]);

        game.advance(499);
        assert!(game.view().is_visible(hole));
        game.advance(1);
        assert!(!game.view().is_visible(hole));
        // No time left, so the cycle ended.
        assert_eq!(game.phase(), Phase::Stopped);
    }

    #[test]
    fn hide_with_time_left_reveals_a_different_hole() {
        let mut game = controller(Difficulty::Normal);
        game.set_duration(5);
        let first = HoleId::new(0).unwrap();
        game.show_and_hide(first, 1000);
        game.advance(1000);
        let next = game.phase().active_hole().expect("next reveal");
        assert_ne!(next, first);
        assert_eq!(game.view().visible_holes(), vec![next]);
        assert_eq!(game.scheduler().remaining_ms(game.reveal_handle().unwrap()), Some(1000));
    }

    #[test]
    fn second_reveal_replaces_the_pending_one() {
        let mut game = controller(Difficulty::Easy);
        game.set_duration(3);
        let a = HoleId::new(1).unwrap();
        let b = HoleId::new(7).unwrap();
        let first = game.show_and_hide(a, 800);
        game.show_and_hide(b, 800);
        assert!(!game.scheduler().is_live(first));
        assert_eq!(game.view().visible_holes(), vec![b]);
        assert_eq!(game.scheduler().live_of(Timer::Reveal), 1);
    }

    #[test]
    fn stale_timer_is_ignored() {
        let mut game = controller(Difficulty::Easy);
        game.set_duration(3);
        let hole = HoleId::new(3).unwrap();
        game.show_and_hide(hole, 800);
        game.on_timer(TimerHandle::new(9_999));
        assert!(game.view().is_visible(hole));
        assert_eq!(game.phase().active_hole(), Some(hole));
    }

    #[test]
    fn game_over_without_time_stops() {
        let mut game = controller(Difficulty::Hard);
        game.start_game();
        game.set_duration(0);
        assert_eq!(game.game_over(), CycleStep::Stopped);
        assert_eq!(game.countdown_handle(), None);
        assert_eq!(game.scheduler().live_count(), 0);
    }

    #[test]
    fn game_over_with_time_reveals() {
        let mut game = controller(Difficulty::Hard);
        game.set_duration(4);
        match game.game_over() {
            CycleStep::Revealed { hole, handle } => {
                assert!(game.view().is_visible(hole));
                assert!(game.scheduler().is_live(handle));
            }
            CycleStep::Stopped => panic!("expected a reveal"),
        }
    }

    #[test]
    fn stop_hides_active_mole_and_clears_timers() {
        let mut game = controller(Difficulty::Easy);
        game.start_game();
        assert_eq!(game.view().visible_holes().len(), 1);
        assert_eq!(game.stop_game(), GAME_STOPPED);
        assert!(game.view().visible_holes().is_empty());
        assert_eq!(game.scheduler().live_count(), 0);
        assert_eq!(game.phase(), Phase::Stopped);
    }

    #[test]
    fn stop_on_fresh_controller_stays_idle() {
        let mut game = controller(Difficulty::Easy);
        game.stop_game();
        assert_eq!(game.phase(), Phase::Idle);
    }

    #[test]
    fn start_timer_replaces_previous_countdown() {
        let mut game = controller(Difficulty::Easy);
        let first = game.start_timer();
        let second = game.start_timer();
        assert_ne!(first, second);
        assert!(!game.scheduler().is_live(first));
        assert_eq!(game.scheduler().live_of(Timer::Countdown), 1);
    }

    #[test]
    fn delay_for_keeps_session_difficulty() {
        let mut game = controller(Difficulty::Hard);
        assert_eq!(game.delay_for(Difficulty::Easy), 1500);
        assert_eq!(game.delay_for(Difficulty::Normal), 1000);
        assert_eq!(game.difficulty(), Difficulty::Hard);
        for _ in 0..50 {
            assert!((600..=1200).contains(&game.set_delay()));
        }
    }

    #[test]
    fn restart_stops_before_clearing_the_score() {
        let mut game = controller(Difficulty::Easy);
        game.start_game();
        game.whack();
        game.whack();
        game.start_game();
        assert_eq!(game.points(), 0);
        assert_eq!(game.view().score_text.as_deref(), Some("0"));
        assert_eq!(game.phase().as_str(), "revealing");
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut game = controller(Difficulty::Normal);
        game.start_game();
        game.whack();
        let snap = game.snapshot();
        assert_eq!(snap.points, 1);
        assert_eq!(snap.time, 10);
        assert_eq!(snap.difficulty, "normal");
        assert_eq!(snap.phase, "revealing");
        assert!(snap.active_hole.is_some());
    }
}
