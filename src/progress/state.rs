//! Persisted progress state and the per-event delta
//!
//! `ProgressState` is the per-user document the caller stores; it is only
//! ever produced by [`crate::ProgressUpdateEngine`], never mutated in
//! place. `ProgressDelta` is the ephemeral summary surfaced to the user.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::badges::BadgeId;
use super::levels::Level;

/// A badge the user has earned, at most once per badge id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarnedBadge {
    pub badge_id: BadgeId,
    pub earned_at: DateTime<Utc>,
}

/// Accumulated gamification progress for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    pub user_id: String,

    /// Earned badges in the order they were unlocked.
    pub badges: Vec<EarnedBadge>,

    /// Total XP, monotonically non-decreasing.
    pub xp: u64,

    /// Always equals `Level::for_xp(xp)`.
    pub level: u32,

    /// Consecutive calendar days with at least one logged meal, ending on
    /// `last_meal_date`.
    pub streak_days: u32,

    /// Date of the most recent meal processed (never regresses on backfill).
    pub last_meal_date: Option<NaiveDate>,

    /// Goal name -> consecutive-day counter, reset on a missed day.
    #[serde(default)]
    pub goal_counters: BTreeMap<String, u32>,

    /// Category name -> cumulative meal count, never reset.
    #[serde(default)]
    pub meal_tallies: BTreeMap<String, u32>,

    /// Optimistic-concurrency token, bumped by the store on every save.
    #[serde(default)]
    pub revision: u64,

    pub updated_at: DateTime<Utc>,
}

impl ProgressState {
    /// Fresh state for a user with no history.
    pub fn new(user_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            badges: Vec::new(),
            xp: 0,
            level: 1,
            streak_days: 0,
            last_meal_date: None,
            goal_counters: BTreeMap::new(),
            meal_tallies: BTreeMap::new(),
            revision: 0,
            updated_at: now,
        }
    }

    pub fn has_badge(&self, id: BadgeId) -> bool {
        self.badges.iter().any(|b| b.badge_id == id)
    }

    pub fn goal_counter(&self, goal: &str) -> u32 {
        self.goal_counters.get(goal).copied().unwrap_or(0)
    }

    pub fn meal_tally(&self, category: &str) -> u32 {
        self.meal_tallies.get(category).copied().unwrap_or(0)
    }

    /// XP still needed to reach the next level (None at max level).
    pub fn xp_to_next_level(&self) -> Option<u64> {
        Level::xp_for_next(self.level).map(|required| required.saturating_sub(self.xp))
    }
}

/// What one meal event changed, surfaced to the user by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressDelta {
    /// Badges unlocked by this event, in catalog order.
    pub new_badges: Vec<EarnedBadge>,

    /// Base XP plus the rewards of all newly unlocked badges.
    pub xp_gained: u64,

    pub level_up: bool,

    /// The level reached, present only when `level_up` is true.
    pub new_level: Option<u32>,

    /// The streak after this event.
    pub streak_days: u32,
}
