// Integration tests (native) for the `whack-a-mole` crate.
// These drive a full session against the virtual clock and the in-memory view,
// so they run under plain `cargo test` on the host.

use whack_a_mole::game::{CycleStep, Phase, Timer};
use whack_a_mole::{Difficulty, GameConfig, GameController, HoleId, ManualScheduler, MemoryView};

type TestGame = GameController<ManualScheduler, MemoryView>;

fn game(difficulty: Difficulty, seed: u64) -> TestGame {
    let config = GameConfig::default()
        .with_difficulty(difficulty)
        .with_seed(seed);
    GameController::new(config, ManualScheduler::new(), MemoryView::new())
}

#[test]
fn fixed_difficulties_give_documented_delays() {
    let mut g = game(Difficulty::Easy, 1);
    for _ in 0..10 {
        assert_eq!(g.set_delay(), 1500);
    }
    g.set_difficulty(Difficulty::Normal);
    for _ in 0..10 {
        assert_eq!(g.set_delay(), 1000);
    }
}

#[test]
fn hard_delay_is_always_in_range() {
    let mut g = game(Difficulty::Hard, 2);
    for _ in 0..1_000 {
        let d = g.set_delay();
        assert!((600..=1200).contains(&d), "delay {d} out of range");
    }
}

#[test]
fn pinned_last_target_is_never_chosen() {
    let mut g = game(Difficulty::Hard, 3);
    let four = HoleId::new(4).unwrap();
    for _ in 0..100 {
        g.set_last_target(Some(four));
        assert_ne!(g.choose_hole(), four);
    }
}

#[test]
fn register_hit_counts_and_reset_zeroes() {
    let mut g = game(Difficulty::Easy, 4);
    g.clear_score();
    for expected in 1..=3 {
        assert_eq!(g.update_score(), expected);
    }
    assert_eq!(g.points(), 3);
    assert_eq!(g.view().score_text.as_deref(), Some("3"));
    assert_eq!(g.clear_score(), 0);
    assert_eq!(g.points(), 0);
    assert_eq!(g.view().score_text.as_deref(), Some("0"));
}

#[test]
fn ten_ticks_reach_zero_and_eleventh_is_inert() {
    let mut g = game(Difficulty::Easy, 5);
    g.set_duration(10);
    for expected in (0..10).rev() {
        assert_eq!(g.update_timer(), expected);
    }
    assert_eq!(g.time(), 0);
    assert_eq!(g.update_timer(), 0);
    assert_eq!(g.view().time_text.as_deref(), Some("0"));
}

#[test]
fn countdown_drops_one_per_second_of_play() {
    let mut g = game(Difficulty::Easy, 6);
    g.start_game();
    assert_eq!(g.time(), 10);
    for expected in (0..10).rev() {
        g.advance(1_000);
        assert_eq!(g.time(), expected);
        assert_eq!(g.view().time_text, Some(expected.to_string()));
    }
    g.advance(5_000);
    assert_eq!(g.time(), 0);
}

#[test]
fn full_round_ends_with_no_timers_and_no_mole() {
    for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
        let mut g = game(difficulty, 7);
        assert_eq!(g.start_game(), "game started");
        g.run_until_idle(60_000);
        assert_eq!(g.phase(), Phase::Stopped, "{difficulty}");
        assert_eq!(g.time(), 0);
        assert_eq!(g.scheduler().live_count(), 0);
        assert!(g.view().visible_holes().is_empty());
        // The cycle stops at the first hide after the clock hits zero.
        assert!(g.scheduler().now_ms() >= 10_000);
        assert!(g.scheduler().now_ms() <= 10_000 + 1_500);
    }
}

#[test]
fn exactly_one_mole_is_up_during_play() {
    let mut g = game(Difficulty::Hard, 8);
    g.start_game();
    let mut last_handle = g.reveal_handle();
    let mut last_hole = g.phase().active_hole();
    while g.time() > 0 {
        // Shorter than the minimum delay, so at most one hide per step.
        g.advance(50);
        let shown = g.view().visible_holes();
        if g.phase() == Phase::Stopped {
            assert!(shown.is_empty());
            break;
        }
        assert_eq!(shown.len(), 1);
        let current = g.phase().active_hole();
        assert_eq!(current, Some(shown[0]));
        if g.reveal_handle() != last_handle {
            assert_ne!(current, last_hole, "same hole revealed twice in a row");
            last_handle = g.reveal_handle();
            last_hole = current;
        }
    }
}

#[test]
fn consecutive_reveals_never_repeat_a_hole() {
    let mut g = game(Difficulty::Normal, 9);
    g.set_duration(u32::MAX);
    let mut prev = g.phase().active_hole();
    g.show_up();
    for _ in 0..200 {
        let current = g.phase().active_hole();
        assert!(current.is_some());
        assert_ne!(current, prev);
        prev = current;
        // Normal holds each mole exactly one second.
        g.advance(1_000);
    }
}

#[test]
fn whack_counts_even_when_no_mole_is_up() {
    let mut g = game(Difficulty::Easy, 10);
    g.start_game();
    g.whack();
    g.stop_game();
    assert!(g.view().visible_holes().is_empty());
    assert_eq!(g.whack(), 2);
}

#[test]
fn stop_twice_is_harmless() {
    let mut g = game(Difficulty::Hard, 11);
    g.start_game();
    assert_eq!(g.stop_game(), "game stopped");
    assert_eq!(g.stop_game(), "game stopped");
    assert_eq!(g.countdown_handle(), None);
    assert_eq!(g.scheduler().live_of(Timer::Countdown), 0);
    assert_eq!(g.scheduler().live_of(Timer::Reveal), 0);
}

#[test]
fn restart_mid_round_keeps_a_single_reveal_chain() {
    let mut g = game(Difficulty::Hard, 12);
    g.start_game();
    g.advance(2_300);
    g.whack();
    g.start_game();
    assert_eq!(g.points(), 0);
    assert_eq!(g.time(), 10);
    assert_eq!(g.scheduler().live_of(Timer::Reveal), 1);
    assert_eq!(g.scheduler().live_of(Timer::Countdown), 1);
    assert_eq!(g.view().visible_holes().len(), 1);
    assert_eq!(g.view().bind_calls, 2);

    g.advance(4_000);
    assert_eq!(g.scheduler().live_of(Timer::Reveal), 1);
    assert_eq!(g.view().visible_holes().len(), 1);
}

#[test]
fn stop_then_game_over_reports_stopped_when_time_is_up() {
    let mut g = game(Difficulty::Easy, 13);
    g.start_game();
    g.advance(10_000);
    assert_eq!(g.time(), 0);
    assert_eq!(g.game_over(), CycleStep::Stopped);
    assert_eq!(g.phase(), Phase::Stopped);
}

#[test]
fn seeded_sessions_replay_identically() {
    let mut a = game(Difficulty::Hard, 99);
    let mut b = game(Difficulty::Hard, 99);
    a.start_game();
    b.start_game();
    for _ in 0..40 {
        assert_eq!(a.phase().active_hole(), b.phase().active_hole());
        a.advance(250);
        b.advance(250);
    }
}
