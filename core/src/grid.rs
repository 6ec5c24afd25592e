use serde::{Deserialize, Serialize};

use crate::*;

/// Placement of the active board inside the fixed cell matrix.
///
/// Neighbors are never stored: they are resolved on demand from the board
/// bounds and the wrap flag, so the geometry is the single source of truth.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardGeometry {
    grid: Coord2,
    start: Coord2,
    size: Coord2,
    wraps: bool,
}

impl BoardGeometry {
    pub fn new(grid: Coord2, start: Coord2, size: Coord2, wraps: bool) -> Result<Self> {
        let fits = |start: Coord, size: Coord, grid: Coord| {
            start.checked_add(size).is_some_and(|end| end <= grid)
        };
        if !fits(start.0, size.0, grid.0) || !fits(start.1, size.1, grid.1) {
            return Err(GameError::BoardOutsideGrid);
        }
        Ok(Self {
            grid,
            start,
            size,
            wraps,
        })
    }

    /// Centers a `size` board inside `grid`.
    pub fn centered(grid: Coord2, size: Coord2, wraps: bool) -> Result<Self> {
        let start = (
            grid.0.saturating_sub(size.0) / 2,
            grid.1.saturating_sub(size.1) / 2,
        );
        Self::new(grid, start, size, wraps)
    }

    /// Board covering the whole grid.
    pub fn full(grid: Coord2, wraps: bool) -> Self {
        Self {
            grid,
            start: (0, 0),
            size: grid,
            wraps,
        }
    }

    pub const fn grid(&self) -> Coord2 {
        self.grid
    }

    pub const fn start(&self) -> Coord2 {
        self.start
    }

    /// Exclusive end corner of the board.
    pub const fn end(&self) -> Coord2 {
        (self.start.0 + self.size.0, self.start.1 + self.size.1)
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn wraps(&self) -> bool {
        self.wraps
    }

    pub const fn board_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn in_grid(&self, (x, y): Coord2) -> bool {
        x < self.grid.0 && y < self.grid.1
    }

    pub const fn in_board(&self, (x, y): Coord2) -> bool {
        let (end_x, end_y) = self.end();
        x >= self.start.0 && x < end_x && y >= self.start.1 && y < end_y
    }

    pub fn iter_grid(&self) -> impl Iterator<Item = Coord2> + use<> {
        iter_rect((0, 0), self.grid)
    }

    pub fn iter_board(&self) -> impl Iterator<Item = Coord2> + use<> {
        iter_rect(self.start, self.size)
    }

    /// The cell next to `coords` in `dir`, if there is a link slot there.
    ///
    /// Wrapping boards wrap at the board edge, not the grid edge. A cell is
    /// never its own neighbor, even on a one-cell-wide wrapping board.
    pub fn neighbor(&self, coords: Coord2, dir: Direction) -> Option<Coord2> {
        if !self.in_board(coords) {
            return None;
        }

        let (x, y) = coords;
        let (start_x, start_y) = self.start;
        let (end_x, end_y) = self.end();
        let next = match dir {
            Direction::Up => (x, self.decr(y, start_y, end_y)?),
            Direction::Down => (x, self.incr(y, start_y, end_y)?),
            Direction::Left => (self.decr(x, start_x, end_x)?, y),
            Direction::Right => (self.incr(x, start_x, end_x)?, y),
        };

        (next != coords).then_some(next)
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(*self, coords)
    }

    fn incr(&self, v: Coord, min: Coord, max: Coord) -> Option<Coord> {
        if v + 1 < max {
            Some(v + 1)
        } else if self.wraps {
            Some(min)
        } else {
            None
        }
    }

    fn decr(&self, v: Coord, min: Coord, max: Coord) -> Option<Coord> {
        if v > min {
            Some(v - 1)
        } else if self.wraps {
            Some(max - 1)
        } else {
            None
        }
    }
}

/// Existing neighbors of a cell, in [`Direction::CARDINALS`] order.
#[derive(Debug)]
pub struct NeighborIter {
    geometry: BoardGeometry,
    center: Coord2,
    index: u8,
}

impl NeighborIter {
    fn new(geometry: BoardGeometry, center: Coord2) -> Self {
        Self {
            geometry,
            center,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = (Direction, Coord2);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let dir = *Direction::CARDINALS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next) = self.geometry.neighbor(self.center, dir) {
                return Some((dir, next));
            }
        }
    }
}
