use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::GameError;

pub const EASY_DELAY_MS: u32 = 1500;
pub const NORMAL_DELAY_MS: u32 = 1000;
/// Inclusive bounds of the randomized `Hard` delay.
pub const HARD_DELAY_MIN_MS: u32 = 600;
pub const HARD_DELAY_MAX_MS: u32 = 1200;

/// How long a mole stays out of its hole.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    Easy,
    Normal,
    #[default]
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    /// Visibility delay in milliseconds. Only `Hard` consumes randomness.
    pub fn delay_ms<R: Rng + ?Sized>(self, rng: &mut R) -> u32 {
        match self {
            Difficulty::Easy => EASY_DELAY_MS,
            Difficulty::Normal => NORMAL_DELAY_MS,
            Difficulty::Hard => random_integer(rng, HARD_DELAY_MIN_MS, HARD_DELAY_MAX_MS),
        }
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(GameError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform integer in `[min, max]`. Bounds given in the wrong order are swapped.
pub fn random_integer<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rng.gen_range(lo..=hi)
}
