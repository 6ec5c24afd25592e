#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use direction::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use persist::*;
pub use skill::*;
pub use solver::*;
pub use types::*;

mod analysis;
mod board;
mod cell;
mod direction;
mod engine;
mod error;
mod generator;
mod grid;
mod persist;
mod skill;
mod solver;
mod types;

/// Shape of the fixed cell matrix every board is laid out in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub grid: Coord2,
}

impl BoardConfig {
    pub const LANDSCAPE: Self = Self { grid: (17, 10) };
    pub const PORTRAIT: Self = Self { grid: (10, 17) };

    pub fn new((width, height): Coord2) -> Self {
        Self {
            grid: (width.max(1), height.max(1)),
        }
    }

    pub const fn is_landscape(&self) -> bool {
        self.grid.0 > self.grid.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.grid.0, self.grid.1)
    }

    /// The same matrix viewed in the other orientation.
    pub const fn transposed(&self) -> Self {
        Self {
            grid: transposed(self.grid),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::LANDSCAPE
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RotateOutcome {
    /// Unwired or locked cell: nothing changed.
    Rejected,
    Rotated,
    /// At least one cell joined the network.
    Connected,
    Solved,
}

impl RotateOutcome {
    pub const fn has_update(self) -> bool {
        use RotateOutcome::*;
        match self {
            Rejected => false,
            Rotated => true,
            Connected => true,
            Solved => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LockOutcome {
    Rejected,
    Locked,
    Unlocked,
}

impl LockOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}
