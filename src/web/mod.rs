//! Browser bindings: the DOM presentation layer, gloo timers and the single
//! live session shared by every callback.
//!
//! Page contract: nine `.hole` elements each holding a `.mole`, a `#score` and
//! a `#timer` readout, and a `#start` button. A hole is shown by adding the
//! `show` class.

use std::cell::RefCell;

use gloo::events::EventListener;
use gloo::utils::{document, window};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::game::{GameController, HOLE_COUNT, HoleId, Timer, TimerHandle, View};

mod cursor;
mod scheduler;

pub use cursor::install_hammer_cursor;
pub use scheduler::BrowserScheduler;

const SHOW_CLASS: &str = "show";

pub type BrowserGame = GameController<BrowserScheduler, DomView>;

thread_local! {
    static GAME: RefCell<Option<BrowserGame>> = const { RefCell::new(None) };
}

/// Runs `f` against the live session.
pub fn with_game<T>(f: impl FnOnce(&mut BrowserGame) -> T) -> Result<T> {
    GAME.with(|cell| {
        let mut slot = cell.try_borrow_mut().map_err(|_| GameError::SessionBusy)?;
        slot.as_mut().map(f).ok_or(GameError::NoSession)
    })
}

fn deliver(handle: TimerHandle, timer: Timer) {
    if let Err(err) = with_game(|game| game.on_timer(handle)) {
        log::warn!("dropped {timer:?} timer {handle:?}: {err}");
    }
}

pub fn location_hash() -> String {
    window().location().hash().unwrap_or_default()
}

/// Binds the page and installs a fresh session, replacing any previous one.
pub fn mount(config: GameConfig) -> Result<()> {
    let doc = document();
    let view = DomView::from_document(&doc)?;
    let game = GameController::new(config, BrowserScheduler::new(), view);
    log::debug!("mounted with {config:?}");

    let old = GAME.with(|cell| {
        cell.try_borrow_mut()
            .map(|mut slot| slot.replace(game))
            .map_err(|_| GameError::SessionBusy)
    })?;
    if let Some(mut old) = old {
        old.stop_game();
    }
    Ok(())
}

/// DOM-backed presentation layer.
pub struct DomView {
    holes: Vec<Element>,
    moles: Vec<Element>,
    score: Element,
    timer: Element,
    listeners: Vec<EventListener>,
    _start: EventListener,
}

impl DomView {
    pub fn from_document(doc: &Document) -> Result<Self> {
        let start = doc
            .query_selector("#start")?
            .ok_or(GameError::MissingElement("#start"))?;
        let start = EventListener::new(&start, "click", |_| {
            if let Err(err) = with_game(|game| game.start_game()) {
                log::error!("could not start game: {err}");
            }
        });
        Ok(Self {
            holes: query_grid(doc, ".hole", "hole")?,
            moles: query_grid(doc, ".mole", "mole")?,
            score: doc
                .query_selector("#score")?
                .ok_or(GameError::MissingElement("#score"))?,
            timer: doc
                .query_selector("#timer")?
                .ok_or(GameError::MissingElement("#timer"))?,
            listeners: Vec::new(),
            _start: start,
        })
    }

    pub fn hole_element(&self, hole: HoleId) -> &Element {
        &self.holes[hole.index()]
    }
}

impl View for DomView {
    fn toggle(&mut self, hole: HoleId) -> bool {
        match self.hole_element(hole).class_list().toggle(SHOW_CLASS) {
            Ok(shown) => shown,
            Err(err) => {
                log::error!("could not toggle {hole}: {err:?}");
                self.is_visible(hole)
            }
        }
    }

    fn is_visible(&self, hole: HoleId) -> bool {
        self.hole_element(hole).class_list().contains(SHOW_CLASS)
    }

    fn show_score(&mut self, score: u32) {
        self.score.set_text_content(Some(&score.to_string()));
    }

    fn show_time(&mut self, remaining_secs: u32) {
        self.timer.set_text_content(Some(&remaining_secs.to_string()));
    }

    fn bind_whack_handlers(&mut self) {
        // Dropping the old listeners detaches them.
        self.listeners = self
            .moles
            .iter()
            .map(|mole| {
                EventListener::new(mole, "click", |_| {
                    if let Err(err) = with_game(|game| game.whack()) {
                        log::warn!("whack lost: {err}");
                    }
                })
            })
            .collect();
    }
}

impl std::fmt::Debug for DomView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomView")
            .field("holes", &self.holes.len())
            .field("moles", &self.moles.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn query_grid(doc: &Document, selector: &str, what: &'static str) -> Result<Vec<Element>> {
    let list = doc.query_selector_all(selector)?;
    let elements: Vec<Element> = (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect();
    if elements.len() != HOLE_COUNT {
        return Err(GameError::HoleCountMismatch {
            what,
            expected: HOLE_COUNT,
            found: elements.len(),
        });
    }
    Ok(elements)
}
