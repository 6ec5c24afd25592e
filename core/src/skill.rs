use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::*;

/// Largest number of links the generator tries to grow from one cell per visit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BranchFactor {
    Two,
    Three,
}

impl BranchFactor {
    pub const fn get(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

/// Rules the generator and the engine follow for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillConfig {
    pub branch_factor: BranchFactor,
    pub wraps: bool,
    /// Cells with at least this many connectors are hidden after scrambling.
    pub blind_threshold: u8,
}

impl SkillConfig {
    pub const fn new(branch_factor: BranchFactor, wraps: bool, blind_threshold: u8) -> Self {
        Self {
            branch_factor,
            wraps,
            blind_threshold,
        }
    }
}

/// Built-in difficulty levels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    Novice,
    Normal,
    Expert,
    Master,
    Insane,
}

impl Skill {
    pub const ALL: [Self; 5] = [
        Self::Novice,
        Self::Normal,
        Self::Expert,
        Self::Master,
        Self::Insane,
    ];

    /// Blind threshold that no cell can reach.
    const NEVER_BLIND: u8 = 9;

    pub const fn config(self) -> SkillConfig {
        use BranchFactor::*;
        match self {
            Self::Novice | Self::Normal | Self::Expert => {
                SkillConfig::new(Two, false, Self::NEVER_BLIND)
            }
            Self::Master => SkillConfig::new(Three, true, Self::NEVER_BLIND),
            Self::Insane => SkillConfig::new(Three, true, 3),
        }
    }

    /// Board size as `(major, minor)`: the long side follows the grid's long side.
    pub const fn board_extent(self) -> Coord2 {
        match self {
            Self::Novice => (10, 8),
            Self::Normal => (11, 8),
            Self::Expert => (15, 8),
            Self::Master | Self::Insane => (17, 10),
        }
    }

    /// Board size for this skill on a grid of the given shape.
    pub const fn board_size(self, grid: Coord2) -> Coord2 {
        let (major, minor) = self.board_extent();
        if grid.0 > grid.1 {
            (major, minor)
        } else {
            (minor, major)
        }
    }

    /// Board placement for this skill, centered in `grid`.
    pub fn geometry(self, grid: Coord2) -> Result<BoardGeometry> {
        BoardGeometry::centered(grid, self.board_size(grid), self.config().wraps)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Novice => "novice",
            Self::Normal => "normal",
            Self::Expert => "expert",
            Self::Master => "master",
            Self::Insane => "insane",
        }
    }
}

impl Default for Skill {
    fn default() -> Self {
        Self::Novice
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Skill {
    type Err = UnknownSkill;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|skill| skill.name().eq_ignore_ascii_case(s))
            .ok_or(UnknownSkill)
    }
}

#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("Unknown skill level")]
pub struct UnknownSkill;
