use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;
pub use coherent::*;

mod coherent;

/// Places interior walls on a fresh grid.
///
/// Implementations must be deterministic: the same seed and grid size always
/// produce the same layout. The outer ring is stamped by [`generate_walls`]
/// afterwards, so strategies never need to handle it.
pub trait WallGenerator {
    fn generate(&self, seed: u64, grid: Grid) -> Grid;

    /// The built-in strategy this generator behaves exactly like, if any.
    ///
    /// Boards only keep their config when this matches the config's strategy,
    /// since otherwise the config cannot reproduce their walls.
    fn as_strategy(&self) -> Option<Strategy> {
        None
    }
}

/// Built-in generation strategies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Walls wherever sampled coherent noise exceeds a threshold.
    CoherentNoise,
    /// No interior walls at all.
    Open,
}

impl Default for Strategy {
    fn default() -> Self {
        Self::CoherentNoise
    }
}

impl Strategy {
    pub const fn name(self) -> &'static str {
        match self {
            Self::CoherentNoise => "coherent-noise",
            Self::Open => "open",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ArenaError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "coherent-noise" | "perlin" => Ok(Self::CoherentNoise),
            "open" => Ok(Self::Open),
            _ => Err(ArenaError::UnknownStrategy),
        }
    }
}

impl WallGenerator for Strategy {
    fn generate(&self, seed: u64, grid: Grid) -> Grid {
        match self {
            Self::CoherentNoise => CoherentNoiseGenerator::default().generate(seed, grid),
            Self::Open => grid,
        }
    }

    fn as_strategy(&self) -> Option<Strategy> {
        Some(*self)
    }
}

/// Builds a `size` grid with the strategy's walls and a solid outer ring.
pub fn generate_walls(size: Coord2, seed: u64, generator: &impl WallGenerator) -> Result<Grid> {
    let mut grid = generator.generate(seed, Grid::new(size)?);
    grid.stamp_boundary();
    Ok(grid)
}
