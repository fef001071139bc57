use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Storage form of a board: dense cell codes plus what reproduces it.
///
/// Boards generated by a built-in strategy carry their [`ArenaConfig`] and
/// are rebuilt from it. Everything else carries no config and is rebuilt from
/// its walls with the stored depth and resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: Coord2,
    pub seeker_start: Coord2,
    pub hider_start: Coord2,
    pub valid: bool,
    pub max_depth: u32,
    pub resolution: u32,
    pub config: Option<ArenaConfig>,
    pub cells: Array2<u8>,
}

impl BoardSnapshot {
    pub fn from_board(board: &Board) -> Self {
        Self {
            size: board.size(),
            seeker_start: board.start(AgentId::Seeker),
            hider_start: board.start(AgentId::Hider),
            valid: board.is_valid(),
            max_depth: board.max_depth(),
            resolution: board.resolution(),
            config: board.config().copied(),
            cells: board.grid().cells().mapv(CellState::code),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let expected = (self.size.0 as usize, self.size.1 as usize);
        if self.cells.dim() != expected {
            return Err(ArenaError::InvalidBoardShape);
        }

        if let Some(config) = &self.config {
            if config.size != self.size {
                return Err(ArenaError::InvalidBoardShape);
            }
        }

        if self.max_depth == 0 {
            return Err(ConfigIssue::ZeroDepth.into());
        }
        check_resolution(self.resolution)?;

        if let Some(&code) = self.cells.iter().find(|&&code| CellState::from_code(code).is_err()) {
            return Err(ArenaError::InvalidCellCode(code));
        }

        Ok(())
    }

    pub fn decode_cells(&self) -> Result<Array2<CellState>> {
        self.validate()?;
        Ok(self
            .cells
            .mapv(|code| CellState::from_code(code).unwrap_or(CellState::Wall)))
    }
}

impl Board {
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Result<Self> {
        snapshot.validate()?;
        match &snapshot.config {
            Some(config) => Self::new(config),
            None => Self::from_cells_with(
                snapshot.decode_cells()?,
                snapshot.seeker_start,
                snapshot.hider_start,
                snapshot.max_depth,
                snapshot.resolution,
            ),
        }
    }
}
