//! Game settings. The page has no settings UI; the defaults below match the
//! shipped game and can be overridden from the URL hash, e.g.
//! `index.html#--difficulty=easy&--duration=20&-vv`.

use clap::Parser;

use crate::game::Difficulty;

pub const DEFAULT_DURATION_SECS: u32 = 10;
pub const TICK_MS: u32 = 1000;
/// Console level when the hash sets no `-v`/`-q` flags, or fails to parse.
pub const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub duration_secs: u32,
    /// Countdown period.
    pub tick_ms: u32,
    /// Fixed RNG seed; `None` seeds from the platform entropy source.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            duration_secs: DEFAULT_DURATION_SECS,
            tick_ms: TICK_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_duration(mut self, secs: u32) -> Self {
        self.duration_secs = secs;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// What log level to use
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    /// How long moles stay up
    #[arg(short, long, value_enum)]
    pub difficulty: Option<Difficulty>,

    /// Round length in seconds
    #[arg(long)]
    pub duration: Option<u32>,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl Args {
    /// Parses a location hash such as `#--difficulty=easy&-v`.
    pub fn from_hash(hash: &str) -> Result<Self, clap::Error> {
        let argv = std::iter::once("whack-a-mole")
            .chain(hash.split(['#', '&']).filter(|part| !part.is_empty()));
        Args::try_parse_from(argv)
    }

    pub fn config(&self) -> GameConfig {
        let base = GameConfig::default();
        GameConfig {
            difficulty: self.difficulty.unwrap_or(base.difficulty),
            duration_secs: self.duration.unwrap_or(base.duration_secs),
            tick_ms: base.tick_ms,
            seed: self.seed,
        }
    }
}
