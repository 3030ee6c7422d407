//! XP thresholds and level derivation
//!
//! Levels are never stored on their own authority: they are always derived
//! from total XP through this table.

/// Level definition
#[derive(Debug, Clone)]
pub struct Level {
    pub level: u32,
    pub xp_required: u64,
}

/// All level definitions (must be sorted by level, thresholds strictly
/// increasing, first threshold 0)
pub static LEVELS: &[Level] = &[
    Level {
        level: 1,
        xp_required: 0,
    },
    Level {
        level: 2,
        xp_required: 100,
    },
    Level {
        level: 3,
        xp_required: 250,
    },
    Level {
        level: 4,
        xp_required: 500,
    },
    Level {
        level: 5,
        xp_required: 1000,
    },
    Level {
        level: 6,
        xp_required: 1750,
    },
    Level {
        level: 7,
        xp_required: 2750,
    },
    Level {
        level: 8,
        xp_required: 4000,
    },
    Level {
        level: 9,
        xp_required: 5500,
    },
    Level {
        level: 10,
        xp_required: 7500,
    },
];

impl Level {
    /// Level for a given XP total: the highest level whose threshold is
    /// reached. XP past the final threshold stays at the maximum level.
    pub fn for_xp(xp: u64) -> u32 {
        LEVELS
            .iter()
            .rev()
            .find(|l| xp >= l.xp_required)
            .map(|l| l.level)
            .unwrap_or(1)
    }

    /// XP needed for the next level (None at max level)
    pub fn xp_for_next(current_level: u32) -> Option<u64> {
        LEVELS
            .iter()
            .find(|l| l.level == current_level + 1)
            .map(|l| l.xp_required)
    }

    /// Get max level
    pub fn max_level() -> u32 {
        LEVELS.last().map(|l| l.level).unwrap_or(1)
    }
}
