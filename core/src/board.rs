use alloc::vec::Vec;
use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Construction stages a board passes through, in order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BoardPhase {
    Uninitialized,
    Generating,
    Validating,
    VisibilityComputed,
    Ready,
}

impl BoardPhase {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    fn next(self) -> Self {
        use BoardPhase::*;

        let next = match self {
            Uninitialized => Generating,
            Generating => Validating,
            Validating => VisibilityComputed,
            VisibilityComputed | Ready => Ready,
        };
        log::debug!("board {:?} -> {:?}", self, next);
        next
    }
}

/// A generated arena with both agents placed and their vision stamped.
///
/// Construction never fails on a bad layout: boards whose agents cannot reach
/// each other, or whose starts are walls or off the grid, are still built but
/// report `is_valid() == false`. Only configuration problems are errors.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    grid: Grid,
    seeker_start: Coord2,
    hider_start: Coord2,
    max_depth: u32,
    resolution: u32,
    config: Option<ArenaConfig>,
    valid: bool,
    phase: BoardPhase,
}

impl Board {
    pub fn new(config: &ArenaConfig) -> Result<Self> {
        Self::with_generator(config, &config.strategy)
    }

    /// Like [`Board::new`], with `generator` placing walls instead of the
    /// config's strategy.
    ///
    /// The config is only kept on the board when `generator` is that same
    /// built-in strategy. Otherwise snapshots fall back to the stored cells.
    pub fn with_generator(config: &ArenaConfig, generator: &impl WallGenerator) -> Result<Self> {
        config.validate()?;
        let phase = BoardPhase::Uninitialized.next();
        let grid = generate_walls(config.size, config.seed, generator)?;
        let reproducible = generator.as_strategy() == Some(config.strategy);
        if !reproducible {
            log::debug!("walls not produced by {}, config not kept", config.strategy);
        }
        Ok(Self::assemble(
            grid,
            phase,
            config.seeker_start,
            config.hider_start,
            config.max_depth,
            config.resolution,
            reproducible.then_some(*config),
        ))
    }

    pub fn construct(
        size: Coord2,
        seed: u64,
        strategy: Strategy,
        seeker_start: Coord2,
        hider_start: Coord2,
    ) -> Result<Self> {
        Self::new(&ArenaConfig::new(size, seed, strategy).with_starts(seeker_start, hider_start))
    }

    /// Builds a board over an existing layout.
    ///
    /// Only walls are taken from `cells`; agents and vision overlays in it are
    /// treated as open ground. The outer ring is forced to walls.
    pub fn from_cells(
        cells: Array2<CellState>,
        seeker_start: Coord2,
        hider_start: Coord2,
    ) -> Result<Self> {
        Self::from_cells_with(
            cells,
            seeker_start,
            hider_start,
            DEFAULT_MAX_DEPTH,
            DEFAULT_RESOLUTION,
        )
    }

    /// [`Board::from_cells`] with an explicit search depth and resolution.
    pub fn from_cells_with(
        cells: Array2<CellState>,
        seeker_start: Coord2,
        hider_start: Coord2,
        max_depth: u32,
        resolution: u32,
    ) -> Result<Self> {
        if max_depth == 0 {
            return Err(ConfigIssue::ZeroDepth.into());
        }
        check_resolution(resolution)?;

        let phase = BoardPhase::Uninitialized.next();
        let mut grid = Grid::from_cells(cells.mapv(|cell| {
            if cell.is_wall() {
                CellState::Wall
            } else {
                CellState::Empty
            }
        }))?;
        grid.stamp_boundary();
        Ok(Self::assemble(
            grid,
            phase,
            seeker_start,
            hider_start,
            max_depth,
            resolution,
            None,
        ))
    }

    /// Runs validation and vision over a walled grid. `max_depth` and
    /// `resolution` must already be checked.
    fn assemble(
        grid: Grid,
        phase: BoardPhase,
        seeker_start: Coord2,
        hider_start: Coord2,
        max_depth: u32,
        resolution: u32,
        config: Option<ArenaConfig>,
    ) -> Self {
        let mut board = Self {
            grid,
            seeker_start,
            hider_start,
            max_depth,
            resolution,
            config,
            valid: false,
            phase,
        };

        board.phase = board.phase.next();
        board.place_and_prune();

        board.stamp_all_vision();
        board.phase = board.phase.next();

        board.phase = board.phase.next();
        if board.valid {
            log::info!("board is valid");
        } else {
            log::info!("board is not valid");
        }
        board
    }

    fn place_and_prune(&mut self) {
        let open_start = |agent: AgentId| {
            let start = self.start(agent);
            let open = self.grid.get(start).is_ok_and(|cell| !cell.is_wall());
            if !open {
                log::warn!("{:?} start {:?} is not an open cell", agent, start);
            }
            open
        };
        let mut valid = open_start(AgentId::Seeker) & open_start(AgentId::Hider);

        for agent in AgentId::ALL {
            let start = self.start(agent);
            if !self.grid.is_interior(start) {
                continue;
            }
            if agent == AgentId::Hider && start == self.seeker_start {
                continue;
            }
            self.grid[start] = CellState::agent(agent);
        }

        if self.grid.is_interior(self.seeker_start) {
            let reachable = flood_fill(&self.grid, self.seeker_start, self.max_depth);
            if !reachable.contains(self.hider_start) {
                log::warn!(
                    "hider at {:?} is not reachable from {:?} within {} steps",
                    self.hider_start,
                    self.seeker_start,
                    self.max_depth
                );
                valid = false;
            }
            let pruned = prune_unreachable(&mut self.grid, &reachable);
            log::debug!(
                "{} cells reachable, {} pruned",
                reachable.len(),
                pruned
            );
        } else {
            valid = false;
        }

        self.valid = valid;
    }

    fn stamp_all_vision(&mut self) {
        let sights = {
            let engine = VisibilityEngine::with_checked_resolution(&self.grid, self.resolution);
            AgentId::ALL
                .into_iter()
                .filter(|&agent| self.grid.is_interior(self.start(agent)))
                .map(|agent| (agent, engine.visible_from(self.start(agent))))
                .collect::<Vec<_>>()
        };

        for (agent, visible) in &sights {
            let painted = stamp_vision(&mut self.grid, *agent, visible);
            log::debug!(
                "{:?} sees {} cells, {} painted",
                agent,
                visible.len(),
                painted
            );
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn phase(&self) -> BoardPhase {
        self.phase
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The config this board was generated from, `None` for imported layouts.
    pub fn config(&self) -> Option<&ArenaConfig> {
        self.config.as_ref()
    }

    pub fn start(&self, agent: AgentId) -> Coord2 {
        match agent {
            AgentId::Seeker => self.seeker_start,
            AgentId::Hider => self.hider_start,
        }
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn cell_state(&self, coords: Coord2) -> Result<CellState> {
        self.grid.get(coords)
    }

    /// Cells `agent` can see, recomputed from the current grid.
    ///
    /// Overlays only ever cover empty cells, so a cell seen by both agents
    /// carries the seeker's overlay and the grid alone cannot answer this.
    /// Agents that were never placed see nothing.
    pub fn visible_cells(&self, agent: AgentId) -> VisibleSet {
        let start = self.start(agent);
        if !self.grid.is_interior(start) {
            return VisibleSet::new();
        }
        VisibilityEngine::with_checked_resolution(&self.grid, self.resolution).visible_from(start)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.size();
        for y in 0..height {
            for x in 0..width {
                write!(f, "{}", self.grid[(x, y)].symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
