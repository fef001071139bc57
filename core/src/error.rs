use thiserror::Error;

use crate::Coord;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArenaError {
    #[error("Coordinates ({x}, {y}) are outside the grid")]
    OutOfBounds { x: Coord, y: Coord },
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(ConfigIssue),
    #[error("Cell data does not match declared size")]
    InvalidBoardShape,
    #[error("Unknown cell state code {0}")]
    InvalidCellCode(u8),
    #[error("Unknown generation strategy")]
    UnknownStrategy,
}

/// Reason a configuration was rejected before any grid work started.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("width and height must both be at least 3")]
    TooSmall,
    #[error("sampling resolution must be at least 1")]
    ZeroResolution,
    #[error("sampling resolution must be at most {}", crate::MAX_RESOLUTION)]
    ResolutionTooLarge,
    #[error("reachability depth must be at least 1")]
    ZeroDepth,
}

impl From<ConfigIssue> for ArenaError {
    fn from(issue: ConfigIssue) -> Self {
        Self::InvalidConfiguration(issue)
    }
}

pub type Result<T> = core::result::Result<T, ArenaError>;
