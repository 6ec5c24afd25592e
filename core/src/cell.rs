use serde::{Deserialize, Serialize};

use crate::*;

/// One grid position. Its coordinates are its index in the board arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    mask: Mask,
    rotation: Rotation,
    root: bool,
    locked: bool,
    blind: bool,
    connected: bool,
}

impl Cell {
    pub const fn new(mask: Mask) -> Self {
        Self {
            mask,
            rotation: Rotation::ZERO,
            root: false,
            locked: false,
            blind: false,
            connected: false,
        }
    }

    /// Generated (unrotated) connector layout.
    pub const fn mask(&self) -> Mask {
        self.mask
    }

    /// Connector layout as the player currently sees it.
    pub fn effective_mask(&self) -> Mask {
        self.mask.rotated(self.rotation)
    }

    /// What the effective mask would become after applying `turns`.
    pub fn rotated_mask(&self, turns: &[QuarterTurn]) -> Mask {
        let rotation = turns
            .iter()
            .fold(self.rotation, |rotation, &turn| rotation.turned(turn));
        self.mask.rotated(rotation)
    }

    pub const fn degree(&self) -> u8 {
        self.mask.degree()
    }

    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Whether the cell currently shows a different layout than it was generated with.
    pub fn is_rotated(&self) -> bool {
        self.effective_mask() != self.mask
    }

    pub const fn is_root(&self) -> bool {
        self.root
    }

    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    pub const fn is_blind(&self) -> bool {
        self.blind
    }

    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// Cells without connectors cannot be turned or locked.
    pub const fn is_interactive(&self) -> bool {
        self.mask.is_wired()
    }

    pub(crate) fn reset(&mut self, mask: Mask) {
        *self = Self::new(mask);
    }

    pub(crate) fn set_mask(&mut self, mask: Mask) {
        self.mask = mask;
    }

    pub(crate) fn add_link(&mut self, dir: Direction) {
        self.mask = self.mask.with(dir);
    }

    pub(crate) fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    pub(crate) fn turn(&mut self, turn: QuarterTurn) {
        self.rotation = self.rotation.turned(turn);
    }

    pub(crate) fn set_root(&mut self, root: bool) {
        self.root = root;
    }

    pub(crate) fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub(crate) fn set_blind(&mut self, blind: bool) {
        self.blind = blind;
    }

    pub(crate) fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(Mask::Blocked)
    }
}
