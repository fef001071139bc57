//! Arena generation and line of sight for a two-agent hide and seek game.
//!
//! A [`Board`] is built in one synchronous pass: a [`WallGenerator`] lays out
//! walls from a seed, a flood fill from the seeker decides whether the hider is
//! reachable and walls off everything it did not reach, and finally each
//! agent's field of view is stamped into the grid as an overlay.

#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use reachability::*;
pub use snapshot::*;
pub use types::*;
pub use visibility::*;

mod board;
mod cell;
mod config;
mod error;
mod generator;
mod grid;
mod reachability;
mod snapshot;
mod types;
mod visibility;
