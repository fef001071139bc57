use serde::{Deserialize, Serialize};

use crate::{ArenaError, Result};

/// One of the two occupants of the arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgentId {
    /// Agent 1.
    Seeker,
    /// Agent 2.
    Hider,
}

impl AgentId {
    pub const ALL: [AgentId; 2] = [AgentId::Seeker, AgentId::Hider];

    pub const fn other(self) -> Self {
        match self {
            Self::Seeker => Self::Hider,
            Self::Hider => Self::Seeker,
        }
    }
}

/// State of a single arena cell.
///
/// Vision states are presentation overlays stamped after generation, only
/// ever over `Empty` cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    Empty,
    Wall,
    Agent1,
    Agent2,
    Agent1Vision,
    Agent2Vision,
}

impl CellState {
    pub const fn agent(agent: AgentId) -> Self {
        match agent {
            AgentId::Seeker => Self::Agent1,
            AgentId::Hider => Self::Agent2,
        }
    }

    pub const fn vision(agent: AgentId) -> Self {
        match agent {
            AgentId::Seeker => Self::Agent1Vision,
            AgentId::Hider => Self::Agent2Vision,
        }
    }

    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn occupant(self) -> Option<AgentId> {
        match self {
            Self::Agent1 => Some(AgentId::Seeker),
            Self::Agent2 => Some(AgentId::Hider),
            _ => None,
        }
    }

    /// Dense code used when a grid is stored as plain bytes.
    pub const fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Agent1 => 1,
            Self::Agent2 => 2,
            Self::Wall => 3,
            Self::Agent1Vision => 4,
            Self::Agent2Vision => 5,
        }
    }

    pub const fn from_code(code: u8) -> Result<Self> {
        Ok(match code {
            0 => Self::Empty,
            1 => Self::Agent1,
            2 => Self::Agent2,
            3 => Self::Wall,
            4 => Self::Agent1Vision,
            5 => Self::Agent2Vision,
            _ => return Err(ArenaError::InvalidCellCode(code)),
        })
    }

    /// RGB color a presentation layer should paint this cell with.
    pub const fn color(self) -> (u8, u8, u8) {
        match self {
            Self::Empty => (255, 255, 255),
            Self::Agent1 => (255, 0, 0),
            Self::Agent2 => (0, 0, 255),
            Self::Wall => (0, 0, 0),
            Self::Agent1Vision => (255, 105, 180),
            Self::Agent2Vision => (0, 255, 255),
        }
    }

    /// Single character used by the text dump.
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Wall => '#',
            Self::Agent1 => 'S',
            Self::Agent2 => 'H',
            Self::Agent1Vision => 's',
            Self::Agent2Vision => 'h',
        }
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Empty
    }
}
