use core::fmt;

use serde::{Deserialize, Serialize};

use crate::GameError;

/// One of the four cardinal directions a cell can expose a connector on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed iteration order for every traversal. Only affects tie-breaking.
    pub const CARDINALS: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub const fn reverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub const fn clockwise(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    pub const fn link(self) -> Links {
        match self {
            Self::Up => Links::UP,
            Self::Down => Links::DOWN,
            Self::Left => Links::LEFT,
            Self::Right => Links::RIGHT,
        }
    }

    /// Unit step `(dx, dy)` with `y` growing downwards.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

bitflags::bitflags! {
    /// Set of directions with an open connector.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Links: u8 {
        const UP = 0b0001;
        const DOWN = 0b0010;
        const LEFT = 0b0100;
        const RIGHT = 0b1000;
    }
}

impl Links {
    pub const fn has(self, dir: Direction) -> bool {
        self.contains(dir.link())
    }

    pub const fn degree(self) -> u8 {
        self.bits().count_ones() as u8
    }

    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::CARDINALS
            .into_iter()
            .filter(move |&dir| self.has(dir))
    }

    /// Turns every connector clockwise `quarter_turns` times.
    pub fn rotated(self, quarter_turns: u8) -> Self {
        let mut links = self;
        for _ in 0..quarter_turns % 4 {
            links = links
                .directions()
                .fold(Links::empty(), |acc, dir| acc | dir.clockwise().link());
        }
        links
    }
}

impl From<Direction> for Links {
    fn from(dir: Direction) -> Self {
        dir.link()
    }
}

/// Connector layout of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mask {
    /// Never part of any network: synthetic cell outside the active board.
    Blocked,
    /// Inside the board but not used by the generated network.
    Free,
    /// Part of the network, with at least one connector.
    Wired(Links),
}

impl Mask {
    pub const fn links(self) -> Links {
        match self {
            Self::Wired(links) => links,
            Self::Blocked | Self::Free => Links::empty(),
        }
    }

    pub const fn degree(self) -> u8 {
        self.links().degree()
    }

    pub const fn is_free(self) -> bool {
        matches!(self, Self::Free)
    }

    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::Blocked)
    }

    /// True for cells that take part in the network.
    pub const fn is_wired(self) -> bool {
        matches!(self, Self::Wired(_))
    }

    pub const fn has(self, dir: Direction) -> bool {
        self.links().has(dir)
    }

    /// Adds a connector, turning a free cell into a wired one.
    pub fn with(self, dir: Direction) -> Self {
        Self::Wired(self.links() | dir.link())
    }

    pub fn rotated(self, rotation: Rotation) -> Self {
        match self {
            Self::Wired(links) => Self::Wired(links.rotated(rotation.quarter_turns())),
            other => other,
        }
    }
}

impl Default for Mask {
    fn default() -> Self {
        Self::Free
    }
}

/// A single 90° turn, the only step a cell ever rotates by.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuarterTurn {
    Clockwise,
    CounterClockwise,
}

impl QuarterTurn {
    pub const fn degrees(self) -> i16 {
        match self {
            Self::Clockwise => 90,
            Self::CounterClockwise => -90,
        }
    }

    pub const fn inverse(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

impl fmt::Display for QuarterTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.degrees())
    }
}

/// How far a cell has been turned from its generated orientation, kept in `0..360`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub struct Rotation(i16);

impl Rotation {
    pub const ZERO: Self = Self(0);

    /// Accepts any multiple of 90 degrees.
    pub const fn from_degrees(degrees: i16) -> Option<Self> {
        if degrees % 90 == 0 {
            Some(Self(degrees.rem_euclid(360)))
        } else {
            None
        }
    }

    pub const fn degrees(self) -> i16 {
        self.0
    }

    /// Clockwise quarter turns, `0..4`.
    pub const fn quarter_turns(self) -> u8 {
        (self.0 / 90) as u8
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn turned(self, turn: QuarterTurn) -> Self {
        Self((self.0 + turn.degrees()).rem_euclid(360))
    }
}

impl TryFrom<i16> for Rotation {
    type Error = GameError;

    fn try_from(degrees: i16) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees).ok_or(GameError::InvalidRotation(degrees))
    }
}

impl From<Rotation> for i16 {
    fn from(rotation: Rotation) -> Self {
        rotation.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_is_an_involution() {
        for dir in Direction::CARDINALS {
            assert_ne!(dir, dir.reverse());
            assert_eq!(dir, dir.reverse().reverse());
        }
    }

    #[test]
    fn links_rotate_clockwise() {
        assert_eq!(Links::UP.rotated(1), Links::RIGHT);
        assert_eq!((Links::UP | Links::LEFT).rotated(1), Links::UP | Links::RIGHT);
        assert_eq!((Links::UP | Links::DOWN).rotated(2), Links::UP | Links::DOWN);
        assert_eq!(Links::RIGHT.rotated(3), Links::UP);
    }

    #[test]
    fn four_quarter_turns_restore_mask() {
        let mask = Mask::Wired(Links::UP | Links::RIGHT | Links::DOWN);
        let mut rotation = Rotation::ZERO;
        for _ in 0..4 {
            rotation = rotation.turned(QuarterTurn::Clockwise);
        }

        assert!(rotation.is_zero());
        assert_eq!(mask.rotated(rotation), mask);
    }

    #[test]
    fn opposite_turns_cancel() {
        let rotation = Rotation::ZERO
            .turned(QuarterTurn::Clockwise)
            .turned(QuarterTurn::CounterClockwise);

        assert_eq!(rotation, Rotation::ZERO);
    }

    #[test]
    fn counter_clockwise_from_zero_wraps() {
        let rotation = Rotation::ZERO.turned(QuarterTurn::CounterClockwise);

        assert_eq!(rotation.degrees(), 270);
        assert_eq!(Mask::Wired(Links::UP).rotated(rotation), Mask::Wired(Links::LEFT));
    }

    #[test]
    fn rotation_rejects_odd_angles() {
        assert_eq!(Rotation::from_degrees(-90), Some(Rotation(270)));
        assert_eq!(Rotation::from_degrees(45), None);
        assert_eq!(Rotation::try_from(10_i16), Err(GameError::InvalidRotation(10)));
    }

    #[test]
    fn unwired_masks_have_no_degree() {
        assert_eq!(Mask::Free.degree(), 0);
        assert_eq!(Mask::Blocked.degree(), 0);
        assert_eq!(Mask::Free.with(Direction::Left), Mask::Wired(Links::LEFT));
    }
}
