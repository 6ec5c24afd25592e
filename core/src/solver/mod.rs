use core::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::persist::validate_in;
use crate::*;
pub use autosolve::*;

mod autosolve;

/// Solved layout kept aside after generation, before the board is scrambled.
///
/// Plain masks only: the snapshot is never rotated, just compared against
/// the live board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolvedSnapshot {
    geometry: BoardGeometry,
    masks: Array2<Mask>,
    root: Coord2,
    focus: Coord2,
}

impl SolvedSnapshot {
    /// Records the canonical layout of `board`. Fails if no network was generated.
    pub fn capture(board: &Board) -> Result<Self> {
        let root = board.root().ok_or(GameError::NoGame)?;
        let geometry = *board.geometry();
        let mut masks = Array2::from_elem(geometry.grid().to_nd_index(), Mask::Blocked);
        for coords in geometry.iter_grid() {
            masks[coords.to_nd_index()] = board[coords].mask();
        }

        Ok(Self {
            geometry,
            masks,
            root,
            focus: board.focus(),
        })
    }

    pub const fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub const fn root(&self) -> Coord2 {
        self.root
    }

    pub const fn focus(&self) -> Coord2 {
        self.focus
    }

    pub fn mask_at(&self, coords: Coord2) -> Option<Mask> {
        self.masks.get(coords.to_nd_index()).copied()
    }

    /// The same solution laid out for `grid`, turned a quarter if `grid` is
    /// this snapshot's grid transposed.
    pub fn oriented_for(&self, grid: Coord2) -> Result<Self> {
        let saved = self.geometry.grid();
        if self.masks.dim() != (saved.0.into(), saved.1.into()) {
            return Err(GameError::InvalidBoardShape);
        }

        let geometry = BoardGeometry::new(
            saved,
            self.geometry.start(),
            self.geometry.size(),
            self.geometry.wraps(),
        )?;
        let root = validate_in(self.root, saved)?;
        let focus = validate_in(self.focus, saved)?;

        let transform = GridTransform::between(saved, grid)?;
        if transform == GridTransform::Identity {
            return Ok(self.clone());
        }
        log::debug!("Turning solved layout from {saved:?} to {grid:?} via {transform:?}");

        let mut masks = Array2::from_elem(grid.to_nd_index(), Mask::Blocked);
        for coords in geometry.iter_grid() {
            let mask = self.masks[coords.to_nd_index()];
            masks[transform.map(coords, grid).to_nd_index()] = transform.map_mask(mask);
        }

        Ok(Self {
            geometry: transform.map_geometry(&geometry, grid)?,
            masks,
            root: transform.map(root, grid),
            focus: transform.map(focus, grid),
        })
    }

    /// Neighbors the solved network links `coords` to.
    pub(crate) fn linked_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        let mask = self.masks[coords.to_nd_index()];
        self.geometry
            .neighbors(coords)
            .filter(move |&(dir, _)| mask.has(dir))
            .map(|(_, next)| next)
    }
}

/// One quarter turn of one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub coords: Coord2,
    pub turn: QuarterTurn,
}

impl Move {
    pub const fn new(coords: Coord2, turn: QuarterTurn) -> Self {
        Self { coords, turn }
    }

    /// `+90` or `-90`.
    pub const fn degrees(&self) -> i16 {
        self.turn.degrees()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.coords;
        write!(f, "({x}, {y}) {}", self.turn)
    }
}
