use std::fmt;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::error::{GameError, Result};

/// Fixed 3x3 grid.
pub const HOLE_COUNT: usize = 9;

/// Position of a hole in the grid, row-major 0..=8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HoleId(u8);

impl HoleId {
    pub fn new(index: usize) -> Result<Self> {
        if index < HOLE_COUNT {
            Ok(HoleId(index as u8))
        } else {
            Err(GameError::HoleOutOfRange(index))
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = HoleId> {
        (0..HOLE_COUNT as u8).map(HoleId)
    }
}

impl fmt::Display for HoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hole#{}", self.0)
    }
}

/// Picks the next hole, never the same one twice in a row.
#[derive(Clone, Debug)]
pub struct HoleSelector {
    rng: SmallRng,
    last: Option<HoleId>,
}

impl HoleSelector {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self { rng, last: None }
    }

    pub fn last(&self) -> Option<HoleId> {
        self.last
    }

    pub fn set_last(&mut self, hole: Option<HoleId>) {
        self.last = hole;
    }

    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Shared generator, also used for delay and `random_integer` draws.
    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    /// Uniform over all holes on the first pick, otherwise uniform over the
    /// eight holes other than the previous one. Always a single draw.
    pub fn choose(&mut self) -> HoleId {
        let index = match self.last {
            None => self.rng.gen_range(0..HOLE_COUNT),
            Some(last) => {
                let i = self.rng.gen_range(0..HOLE_COUNT - 1);
                if i >= last.index() { i + 1 } else { i }
            }
        };
        let hole = HoleId(index as u8);
        self.last = Some(hole);
        hole
    }
}
