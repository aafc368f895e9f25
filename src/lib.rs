//! Whack-a-mole core crate.
//!
//! Nine holes, one mole at a time. Each mole stays up for a delay picked from
//! the difficulty, then hides, and the next one pops up somewhere else until
//! the ten second countdown runs out. The game logic lives in [`game`] and is
//! platform independent; [`web`] binds it to the page.
//!
//! The `#[wasm_bindgen]` functions below mirror the page's original script
//! API (`startGame`, `whack`, `setDelay`, ...) so the existing browser test
//! harness can keep driving the game.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod game;
pub mod web;

pub use config::{Args, GameConfig};
pub use error::{GameError, Result};
pub use game::{Difficulty, GameController, HoleId, ManualScheduler, MemoryView};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let hash = web::location_hash();
    let args = Args::from_hash(&hash);

    #[cfg(feature = "console_log")]
    {
        let level = args
            .as_ref()
            .map(|args| args.verbose.log_level())
            .unwrap_or(Some(config::DEFAULT_LOG_LEVEL));
        if let Some(level) = level {
            // Only fails if a logger is already installed.
            console_log::init_with_level(level).ok();
        }
    }

    let config = match args {
        Ok(args) => args.config(),
        Err(err) => {
            log::warn!("ignoring location hash {hash:?}: {err}");
            GameConfig::default()
        }
    };

    // Pages without the game grid (e.g. test runners) just skip mounting.
    if let Err(err) = web::mount(config) {
        log::warn!("game not mounted: {err}");
        return;
    }
    if let Err(err) = web::install_hammer_cursor(&gloo::utils::document()) {
        log::warn!("no hammer cursor: {err}");
    }
    log::info!("whack-a-mole ready ({})", config.difficulty);
}

// -----------------------------------------------------------------------------
// Exposed test surface
// -----------------------------------------------------------------------------

fn handle_to_js(handle: game::TimerHandle) -> f64 {
    handle.id() as f64
}

fn hole_from_js(index: usize) -> Result<HoleId> {
    HoleId::new(index)
}

/// Uniform integer in `[min, max]`. Uses the session RNG when a game is
/// mounted so seeded runs stay reproducible.
#[wasm_bindgen(js_name = randomInteger)]
pub fn random_integer(min: u32, max: u32) -> u32 {
    web::with_game(|g| g.random_integer(min, max))
        .unwrap_or_else(|_| game::random_integer(&mut rand::thread_rng(), min, max))
}

#[wasm_bindgen(js_name = setDelay)]
pub fn set_delay(difficulty: &str) -> std::result::Result<u32, JsValue> {
    let difficulty: Difficulty = difficulty.parse()?;
    let delay = web::with_game(|g| g.delay_for(difficulty))
        .unwrap_or_else(|_| difficulty.delay_ms(&mut rand::thread_rng()));
    Ok(delay)
}

#[wasm_bindgen(js_name = chooseHole)]
pub fn choose_hole() -> std::result::Result<usize, JsValue> {
    Ok(web::with_game(|g| g.choose_hole().index())?)
}

#[wasm_bindgen(js_name = startGame)]
pub fn start_game() -> std::result::Result<String, JsValue> {
    Ok(web::with_game(|g| g.start_game())?.to_string())
}

#[wasm_bindgen(js_name = stopGame)]
pub fn stop_game() -> std::result::Result<String, JsValue> {
    Ok(web::with_game(|g| g.stop_game())?.to_string())
}

/// Timer id of the next reveal, or `"game stopped"` once time is up.
#[wasm_bindgen(js_name = gameOver)]
pub fn game_over() -> std::result::Result<JsValue, JsValue> {
    let step = web::with_game(|g| g.game_over())?;
    Ok(match step {
        game::CycleStep::Revealed { handle, .. } => JsValue::from_f64(handle_to_js(handle)),
        game::CycleStep::Stopped => JsValue::from_str(game::GAME_STOPPED),
    })
}

#[wasm_bindgen(js_name = showUp)]
pub fn show_up() -> std::result::Result<f64, JsValue> {
    Ok(handle_to_js(web::with_game(|g| g.show_up())?))
}

#[wasm_bindgen(js_name = showAndHide)]
pub fn show_and_hide(hole: usize, delay_ms: u32) -> std::result::Result<f64, JsValue> {
    let hole = hole_from_js(hole)?;
    Ok(handle_to_js(web::with_game(|g| g.show_and_hide(hole, delay_ms))?))
}

#[wasm_bindgen(js_name = toggleVisibility)]
pub fn toggle_visibility(hole: usize) -> std::result::Result<bool, JsValue> {
    let hole = hole_from_js(hole)?;
    Ok(web::with_game(|g| g.toggle_visibility(hole))?)
}

#[wasm_bindgen(js_name = updateScore)]
pub fn update_score() -> std::result::Result<u32, JsValue> {
    Ok(web::with_game(|g| g.update_score())?)
}

#[wasm_bindgen(js_name = clearScore)]
pub fn clear_score() -> std::result::Result<u32, JsValue> {
    Ok(web::with_game(|g| g.clear_score())?)
}

#[wasm_bindgen]
pub fn whack() -> std::result::Result<u32, JsValue> {
    Ok(web::with_game(|g| g.whack())?)
}

#[wasm_bindgen(js_name = setDuration)]
pub fn set_duration(secs: u32) -> std::result::Result<u32, JsValue> {
    Ok(web::with_game(|g| g.set_duration(secs))?)
}

#[wasm_bindgen(js_name = startTimer)]
pub fn start_timer() -> std::result::Result<f64, JsValue> {
    Ok(handle_to_js(web::with_game(|g| g.start_timer())?))
}

#[wasm_bindgen(js_name = updateTimer)]
pub fn update_timer() -> std::result::Result<u32, JsValue> {
    Ok(web::with_game(|g| g.update_timer())?)
}

#[wasm_bindgen(js_name = setEventListeners)]
pub fn set_event_listeners() -> std::result::Result<(), JsValue> {
    Ok(web::with_game(|g| g.set_event_listeners())?)
}

/// Current score, 0 before the game is mounted.
#[wasm_bindgen]
pub fn points() -> u32 {
    web::with_game(|g| g.points()).unwrap_or(0)
}

/// Seconds left in the round, 0 before the game is mounted.
#[wasm_bindgen]
pub fn time() -> u32 {
    web::with_game(|g| g.time()).unwrap_or(0)
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen(js_name = sessionSnapshot)]
pub fn session_snapshot() -> std::result::Result<String, JsValue> {
    let snapshot = web::with_game(|g| g.snapshot())?;
    serde_json::to_string(&snapshot).map_err(|err| JsValue::from_str(&err.to_string()))
}
