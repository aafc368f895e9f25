//! Whack-a-mole game core.
//!
//! Everything here is platform independent: timers come in through
//! [`Scheduler`] and output goes out through [`View`]. The browser bindings in
//! `crate::web` plug in gloo timers and the DOM.

mod controller;
pub mod difficulty;
pub mod holes;
pub mod scheduler;
pub mod view;

pub use controller::{
    CycleStep, GAME_STARTED, GAME_STOPPED, GameController, Phase, Session, SessionSnapshot,
};
pub use difficulty::{Difficulty, random_integer};
pub use holes::{HOLE_COUNT, HoleId, HoleSelector};
pub use scheduler::{ManualScheduler, Scheduler, Timer, TimerHandle};
pub use view::{MemoryView, View};
