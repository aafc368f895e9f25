use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Unknown difficulty '{0}', expected easy, normal or hard")]
    UnknownDifficulty(String),
    #[error("Hole index {0} is outside the 9-hole grid")]
    HoleOutOfRange(usize),
    #[error("Page is missing required element {0}")]
    MissingElement(&'static str),
    #[error("Page has {found} {what} elements but the grid needs {expected}")]
    HoleCountMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("No game session has been created yet")]
    NoSession,
    #[error("Game session is busy handling another event")]
    SessionBusy,
    #[error("Browser call failed: {0}")]
    Js(String),
}

pub type Result<T> = core::result::Result<T, GameError>;

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
