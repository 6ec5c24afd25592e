use thiserror::Error;

use crate::Coord2;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board needs at least two cells to hold a network")]
    DegenerateBoard,
    #[error("Board does not fit inside the grid")]
    BoardOutsideGrid,
    #[error("Saved grid {saved:?} is incompatible with current grid {current:?}")]
    IncompatibleGrid { saved: Coord2, current: Coord2 },
    #[error("Saved state has no record for cell ({x}, {y})")]
    MissingCell { x: u8, y: u8 },
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Rotation of {0} degrees is not a multiple of 90")]
    InvalidRotation(i16),
    #[error("No game has been generated yet")]
    NoGame,
}

pub type Result<T> = core::result::Result<T, GameError>;
