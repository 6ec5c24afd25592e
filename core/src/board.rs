use core::ops::Index;

use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// The full cell matrix, the active board inside it, and the root and focus cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    geometry: BoardGeometry,
    cells: Array2<Cell>,
    root: Option<Coord2>,
    focus: Coord2,
}

impl Board {
    pub fn new(geometry: BoardGeometry) -> Self {
        let mut board = Self {
            geometry,
            cells: Array2::default(geometry.grid().to_nd_index()),
            root: None,
            focus: geometry.start(),
        };
        board.reset(geometry);
        board
    }

    /// Builds a board from explicit connector layouts, mostly for fixed puzzles.
    ///
    /// Cells not listed stay free. Links are taken as given: nothing checks
    /// that neighbors agree.
    pub fn from_layout(
        geometry: BoardGeometry,
        root: Coord2,
        layout: impl IntoIterator<Item = (Coord2, Links)>,
    ) -> Result<Self> {
        let mut board = Self::new(geometry);
        for (coords, links) in layout {
            let coords = board.validate_board_coords(coords)?;
            let mask = if links.is_empty() {
                Mask::Free
            } else {
                Mask::Wired(links)
            };
            board.cell_mut(coords).set_mask(mask);
        }
        let root = board.validate_board_coords(root)?;
        board.set_root(root);
        Ok(board)
    }

    /// Re-targets the board at `geometry` and wipes every cell.
    ///
    /// Cells inside the board become free; the ones outside are blocked so
    /// they can never join a network.
    pub fn reset(&mut self, geometry: BoardGeometry) {
        if geometry.grid() != self.geometry.grid() {
            self.cells = Array2::default(geometry.grid().to_nd_index());
        }
        self.geometry = geometry;
        self.root = None;
        self.focus = geometry.start();

        for coords in geometry.iter_grid() {
            let mask = if geometry.in_board(coords) {
                Mask::Free
            } else {
                Mask::Blocked
            };
            self.cell_mut(coords).reset(mask);
        }
    }

    pub const fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub const fn grid(&self) -> Coord2 {
        self.geometry.grid()
    }

    pub const fn root(&self) -> Option<Coord2> {
        self.root
    }

    pub const fn focus(&self) -> Coord2 {
        self.focus
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.geometry.in_grid(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn validate_board_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.geometry.in_board(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn set_focus(&mut self, coords: Coord2) -> Result<()> {
        self.focus = self.validate_coords(coords)?;
        Ok(())
    }

    /// Turns one cell, without any gameplay checks.
    pub fn turn_cell(&mut self, coords: Coord2, turn: QuarterTurn) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self.cell_mut(coords).turn(turn);
        Ok(())
    }

    /// Counts the board cells that belong to the network.
    pub fn used_cells(&self) -> CellCount {
        let used = self
            .geometry
            .iter_board()
            .filter(|&coords| !self[coords].mask().is_free())
            .count();
        CellCount::try_from(used).unwrap_or(CellCount::MAX)
    }

    /// Rotates every wired board cell by a random amount in `-180..=90` and hides
    /// the busy ones.
    pub fn scramble<R: Rng + ?Sized>(&mut self, rng: &mut R, blind_threshold: u8) {
        for coords in self.geometry.iter_board() {
            let cell = self.cell_mut(coords);
            if !cell.is_interactive() {
                continue;
            }
            let degrees = (rng.random_range(0..4_i16) - 2) * 90;
            if let Some(rotation) = Rotation::from_degrees(degrees) {
                cell.set_rotation(rotation);
            }
            if cell.degree() >= blind_threshold {
                cell.set_blind(true);
            }
        }
    }

    pub fn unblind_all(&mut self) {
        for coords in self.geometry.iter_board() {
            self.cell_mut(coords).set_blind(false);
        }
    }

    pub fn iter_board_cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.geometry
            .iter_board()
            .map(move |coords| (coords, &self[coords]))
    }

    pub(crate) fn set_root(&mut self, coords: Coord2) {
        if let Some(old) = self.root.take() {
            self.cell_mut(old).set_root(false);
        }
        let cell = self.cell_mut(coords);
        cell.set_root(true);
        cell.set_connected(true);
        self.root = Some(coords);
        self.focus = coords;
    }

    pub(crate) fn clear_root(&mut self) {
        if let Some(old) = self.root.take() {
            self.cell_mut(old).set_root(false);
        }
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub(crate) fn from_parts(
        geometry: BoardGeometry,
        cells: Array2<Cell>,
        root: Option<Coord2>,
        focus: Coord2,
    ) -> Result<Self> {
        if cells.dim() != (geometry.grid().0.into(), geometry.grid().1.into()) {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self {
            geometry,
            cells,
            root,
            focus,
        })
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
