use alloc::vec::Vec;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// How saved coordinates map onto the current grid.
///
/// A grid saved in one orientation can be restored after the device turned
/// a quarter: the whole layout turns with it, so the game stays playable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GridTransform {
    Identity,
    /// `(x, y) -> (y, H - x - 1)`, turning every cell counter-clockwise.
    RotateLeft,
    /// `(x, y) -> (W - y - 1, x)`, turning every cell clockwise.
    RotateRight,
}

impl GridTransform {
    /// Picks the transform from a `saved` grid to the `current` one.
    ///
    /// A transposed grid is turned left onto a landscape grid and right onto
    /// a portrait one.
    pub fn between(saved: Coord2, current: Coord2) -> Result<Self> {
        if saved == current {
            Ok(Self::Identity)
        } else if saved == transposed(current) {
            if current.0 > current.1 {
                Ok(Self::RotateLeft)
            } else {
                Ok(Self::RotateRight)
            }
        } else {
            Err(GameError::IncompatibleGrid { saved, current })
        }
    }

    /// Maps saved coordinates into a `current` grid.
    pub const fn map(self, (x, y): Coord2, (width, height): Coord2) -> Coord2 {
        match self {
            Self::Identity => (x, y),
            Self::RotateLeft => (y, height - x - 1),
            Self::RotateRight => (width - y - 1, x),
        }
    }

    /// The quarter turn every cell's layout goes through.
    pub const fn turn(self) -> Option<QuarterTurn> {
        match self {
            Self::Identity => None,
            Self::RotateLeft => Some(QuarterTurn::CounterClockwise),
            Self::RotateRight => Some(QuarterTurn::Clockwise),
        }
    }

    pub fn map_mask(self, mask: Mask) -> Mask {
        match self.turn() {
            Some(turn) => mask.rotated(Rotation::ZERO.turned(turn)),
            None => mask,
        }
    }

    /// Moves the board rectangle along with its cells.
    pub fn map_geometry(self, saved: &BoardGeometry, current: Coord2) -> Result<BoardGeometry> {
        let (start_x, start_y) = saved.start();
        let (width, height) = saved.size();
        if width == 0 || height == 0 {
            return BoardGeometry::new(current, (0, 0), (0, 0), saved.wraps());
        }

        // the mapped rectangle starts at the image of one of its corners
        let corner = match self {
            Self::Identity => (start_x, start_y),
            Self::RotateLeft => (start_x + width - 1, start_y),
            Self::RotateRight => (start_x, start_y + height - 1),
        };
        let start = self.map(corner, current);
        let size = match self {
            Self::Identity => (width, height),
            Self::RotateLeft | Self::RotateRight => (height, width),
        };
        BoardGeometry::new(current, start, size, saved.wraps())
    }
}

/// Persisted state of one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCell {
    pub x: Coord,
    pub y: Coord,
    pub mask: Mask,
    pub rotation: Rotation,
    pub locked: bool,
    pub blind: bool,
    pub root: bool,
}

/// Persisted state of a whole board, one record per grid cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedBoard {
    pub geometry: BoardGeometry,
    pub root: Option<Coord2>,
    pub focus: Coord2,
    pub cells: Vec<SavedCell>,
}

impl SavedBoard {
    pub const fn grid(&self) -> Coord2 {
        self.geometry.grid()
    }
}

impl Board {
    pub fn export(&self) -> SavedBoard {
        let cells = self
            .geometry()
            .iter_grid()
            .map(|(x, y)| {
                let cell = &self[(x, y)];
                SavedCell {
                    x,
                    y,
                    mask: cell.mask(),
                    rotation: cell.rotation(),
                    locked: cell.is_locked(),
                    blind: cell.is_blind(),
                    root: cell.is_root(),
                }
            })
            .collect();

        SavedBoard {
            geometry: *self.geometry(),
            root: self.root(),
            focus: self.focus(),
            cells,
        }
    }

    /// Replaces this board with a saved one, turning it if the saved grid is
    /// this grid transposed.
    ///
    /// The board is left untouched on error. Connected flags are not
    /// persisted; run [`Board::update_connections`] afterwards.
    pub fn import(&mut self, saved: &SavedBoard) -> Result<()> {
        let current = self.grid();
        let transform = GridTransform::between(saved.grid(), current)?;
        log::debug!("Restoring {:?} board onto {current:?} via {transform:?}", saved.grid());

        let saved_geometry = BoardGeometry::new(
            saved.grid(),
            saved.geometry.start(),
            saved.geometry.size(),
            saved.geometry.wraps(),
        )?;
        let geometry = transform.map_geometry(&saved_geometry, current)?;

        let mut records: Array2<Option<&SavedCell>> =
            Array2::from_elem(saved.grid().to_nd_index(), None);
        for record in &saved.cells {
            let slot = records
                .get_mut((record.x, record.y).to_nd_index())
                .ok_or(GameError::InvalidCoords)?;
            *slot = Some(record);
        }

        let mut cells = Array2::from_elem(current.to_nd_index(), Cell::default());
        let mut root = None;
        for (x, y) in saved_geometry.iter_grid() {
            let record = records[(x, y).to_nd_index()].ok_or(GameError::MissingCell { x, y })?;
            let coords = transform.map((x, y), current);

            let cell = &mut cells[coords.to_nd_index()];
            cell.set_mask(transform.map_mask(record.mask));
            cell.set_rotation(record.rotation);
            cell.set_locked(record.locked);
            cell.set_blind(record.blind);
            cell.set_root(record.root);
            if record.root {
                if root.is_some() {
                    return Err(GameError::InvalidBoardShape);
                }
                root = Some(coords);
            }
        }

        let saved_root = saved
            .root
            .map(|coords| validate_in(coords, saved.grid()))
            .transpose()?
            .map(|coords| transform.map(coords, current));
        // the root field and the per-cell flag must agree
        if root != saved_root {
            return Err(GameError::InvalidBoardShape);
        }
        let focus = transform.map(validate_in(saved.focus, saved.grid())?, current);

        *self = Board::from_parts(geometry, cells, root, focus)?;
        Ok(())
    }
}

pub(crate) fn validate_in(coords: Coord2, grid: Coord2) -> Result<Coord2> {
    if coords.0 < grid.0 && coords.1 < grid.1 {
        Ok(coords)
    } else {
        Err(GameError::InvalidCoords)
    }
}
