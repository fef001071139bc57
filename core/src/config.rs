use serde::{Deserialize, Serialize};

use crate::*;

/// Size of the standard match arena.
pub const CANONICAL_SIZE: Coord2 = (30, 30);

/// Distance of both default start positions from their corner of the arena.
const START_INSET: Coord = 2;

/// Everything needed to reproduce a generated board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaConfig {
    pub size: Coord2,
    pub seed: u64,
    pub strategy: Strategy,
    pub seeker_start: Coord2,
    pub hider_start: Coord2,
    pub max_depth: u32,
    pub resolution: u32,
}

impl ArenaConfig {
    /// Config with start positions inset from opposite corners.
    pub fn new(size: Coord2, seed: u64, strategy: Strategy) -> Self {
        let (seeker_start, hider_start) = default_starts(size);
        Self {
            size,
            seed,
            strategy,
            seeker_start,
            hider_start,
            max_depth: DEFAULT_MAX_DEPTH,
            resolution: DEFAULT_RESOLUTION,
        }
    }

    pub const fn with_starts(self, seeker_start: Coord2, hider_start: Coord2) -> Self {
        Self {
            seeker_start,
            hider_start,
            ..self
        }
    }

    pub const fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    pub const fn with_max_depth(self, max_depth: u32) -> Self {
        Self { max_depth, ..self }
    }

    pub const fn with_resolution(self, resolution: u32) -> Self {
        Self { resolution, ..self }
    }

    pub const fn start(&self, agent: AgentId) -> Coord2 {
        match agent {
            AgentId::Seeker => self.seeker_start,
            AgentId::Hider => self.hider_start,
        }
    }

    /// Rejects configurations no board can be built from.
    ///
    /// Start positions are not checked here: a bad start still yields a
    /// board, just an invalid one.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.size;
        if width < MIN_SIDE || height < MIN_SIDE {
            return Err(ConfigIssue::TooSmall.into());
        }
        if self.max_depth == 0 {
            return Err(ConfigIssue::ZeroDepth.into());
        }
        check_resolution(self.resolution)
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(CANONICAL_SIZE, 0, Strategy::default())
    }
}

/// Start positions near opposite corners, `(2, 2)` and `(27, 27)` on the
/// canonical arena, pulled into the interior on tiny grids.
pub fn default_starts((width, height): Coord2) -> (Coord2, Coord2) {
    let inner = |value: Coord, side: Coord| value.clamp(1, side.saturating_sub(2).max(1));
    let seeker = (inner(START_INSET, width), inner(START_INSET, height));
    let hider = (
        inner(width.saturating_sub(START_INSET + 1), width),
        inner(height.saturating_sub(START_INSET + 1), height),
    );
    (seeker, hider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_defaults() {
        let config = ArenaConfig::default();

        assert_eq!(config.size, (30, 30));
        assert_eq!(config.seeker_start, (2, 2));
        assert_eq!(config.hider_start, (27, 27));
        assert_eq!(config.max_depth, 100);
        assert_eq!(config.resolution, 1);
        assert_eq!(config.strategy, Strategy::CoherentNoise);
        assert_eq!(config.start(AgentId::Hider), (27, 27));
    }

    #[test]
    fn default_starts_stay_inside_small_arenas() {
        assert_eq!(default_starts((3, 3)), ((1, 1), (1, 1)));
        assert_eq!(default_starts((5, 4)), ((2, 2), (2, 1)));
        assert_eq!(default_starts((10, 20)), ((2, 2), (7, 17)));
    }

    #[test]
    fn validation_catches_each_issue() {
        let config = ArenaConfig::default();

        assert_eq!(config.validate(), Ok(()));
        assert_eq!(
            ArenaConfig::new((2, 30), 0, Strategy::Open).validate(),
            Err(ArenaError::InvalidConfiguration(ConfigIssue::TooSmall))
        );
        assert_eq!(
            config.with_max_depth(0).validate(),
            Err(ArenaError::InvalidConfiguration(ConfigIssue::ZeroDepth))
        );
        assert_eq!(
            config.with_resolution(0).validate(),
            Err(ArenaError::InvalidConfiguration(ConfigIssue::ZeroResolution))
        );
        assert_eq!(
            config.with_resolution(MAX_RESOLUTION + 1).validate(),
            Err(ArenaError::InvalidConfiguration(ConfigIssue::ResolutionTooLarge))
        );
        assert_eq!(config.with_resolution(MAX_RESOLUTION).validate(), Ok(()));
    }

    #[test]
    fn serializes_as_json() {
        let config = ArenaConfig::new((12, 9), 77, Strategy::Open).with_starts((1, 1), (10, 7));

        let json = serde_json::to_string(&config).unwrap();
        let parsed: ArenaConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, config);
    }
}
