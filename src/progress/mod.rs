//! Gamification progression: badges, XP, levels, streaks, and goal counters
//!
//! This module contains the deterministic state machine that turns a
//! (state, meal event) pair into a new state plus a delta for the caller.

mod badges;
mod engine;
mod goals;
mod levels;
mod state;
mod streaks;
mod tallies;

pub use badges::{Badge, BadgeId, BadgeRequirement, BADGES};
pub use engine::ProgressUpdateEngine;
pub use goals::update_goal_counter;
pub use levels::{Level, LEVELS};
pub use state::{EarnedBadge, ProgressDelta, ProgressState};
pub use streaks::compute_streak;
pub use tallies::categories_in_meal;
