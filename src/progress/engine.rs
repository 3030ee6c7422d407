//! Progress update engine - the core state transition
//!
//! `apply` is a pure function from (state, meal event, goals) to
//! (new state, delta). It performs no I/O, reads no clocks, and holds no
//! mutable state, so replaying the same inputs always yields the same
//! outputs. Persistence and per-user serialization are the caller's
//! responsibility (see [`crate::store`]).

use std::collections::BTreeMap;

use tracing::warn;

use crate::config::{EngineConfig, GoalSet};
use crate::error::EngineError;
use crate::event::MealEvent;

use super::badges::{BadgeRequirement, BADGES};
use super::goals::update_goal_counter;
use super::levels::Level;
use super::state::{EarnedBadge, ProgressDelta, ProgressState};
use super::streaks::compute_streak;
use super::tallies::categories_in_meal;

/// Deterministic progression engine.
#[derive(Debug, Clone, Default)]
pub struct ProgressUpdateEngine {
    config: EngineConfig,
}

impl ProgressUpdateEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Apply one meal event to a user's progress.
    ///
    /// `state` is `None` for a fresh user. `goals` carries the user's
    /// nutrition thresholds, sourced from their profile. Returns the new
    /// state (to persist) and the delta (to surface).
    ///
    /// Fails only on structurally invalid input; malformed or partial
    /// nutrition data still produces a valid delta.
    pub fn apply(
        &self,
        state: Option<&ProgressState>,
        event: &MealEvent,
        goals: &GoalSet,
    ) -> Result<(ProgressState, ProgressDelta), EngineError> {
        if event.user_id.is_empty() {
            return Err(EngineError::MissingUserId);
        }
        if let Some(existing) = state {
            if existing.user_id != event.user_id {
                return Err(EngineError::UserIdMismatch {
                    event: event.user_id.clone(),
                    state: existing.user_id.clone(),
                });
            }
        }

        let logged_at = event.logged_at()?;
        let event_date = logged_at.date_naive();
        // All derived timestamps come from the event, not the wall clock,
        // so replays produce identical states.
        let event_time_utc = logged_at.to_utc();

        let mut next = match state {
            Some(existing) => existing.clone(),
            None => ProgressState::new(&event.user_id, event_time_utc),
        };

        let new_streak = compute_streak(next.last_meal_date, next.streak_days, event_date);

        // Goal counters are rebuilt from the configured goal set: a goal
        // missing from the set drops its counter instead of going stale.
        let mut new_counters: BTreeMap<String, u32> = BTreeMap::new();
        for (name, _) in goals.iter() {
            let met = goals
                .is_met(name, |n| event.nutrient(n))
                .unwrap_or(false);
            new_counters.insert(
                name.to_string(),
                update_goal_counter(next.goal_counter(name), met),
            );
        }

        let mut new_tallies = next.meal_tallies.clone();
        for category in categories_in_meal(&self.config.categories, &event.identified_foods) {
            *new_tallies.entry(category.to_string()).or_insert(0) += 1;
        }

        // Badge evaluation runs against post-update values, in the
        // catalog's declared order.
        let mut new_badges = Vec::new();
        let mut badge_xp = 0u64;
        for badge in BADGES {
            if next.has_badge(badge.id) {
                continue;
            }
            let unlocked = match badge.requirement {
                BadgeRequirement::AnyMeal => true,
                BadgeRequirement::StreakDays(days) => new_streak >= days,
                BadgeRequirement::GoalStreak { goal, days } => {
                    if !goals.contains(goal) {
                        // Defect in badge/goal wiring; skip the badge
                        // rather than abort the whole update.
                        warn!(
                            badge = badge.id.as_str(),
                            goal, "badge references a goal the goal set does not configure"
                        );
                        continue;
                    }
                    new_counters.get(goal).copied().unwrap_or(0) >= days
                }
                BadgeRequirement::MealTally { category, count } => {
                    if !self.config.categories.contains_key(category) {
                        warn!(
                            badge = badge.id.as_str(),
                            category, "badge references an unconfigured food category"
                        );
                        continue;
                    }
                    new_tallies.get(category).copied().unwrap_or(0) >= count
                }
            };
            if unlocked {
                badge_xp += badge.xp_reward;
                new_badges.push(EarnedBadge {
                    badge_id: badge.id,
                    earned_at: event_time_utc,
                });
            }
        }

        let xp_gained = self.config.base_meal_xp + badge_xp;
        let new_xp = next.xp + xp_gained;
        let new_level = Level::for_xp(new_xp);
        let level_up = new_level > next.level;

        next.badges.extend(new_badges.iter().cloned());
        next.xp = new_xp;
        next.level = new_level;
        next.streak_days = new_streak;
        // A backfilled event must not regress the streak anchor.
        next.last_meal_date = Some(match next.last_meal_date {
            Some(previous) => previous.max(event_date),
            None => event_date,
        });
        next.goal_counters = new_counters;
        next.meal_tallies = new_tallies;
        next.updated_at = event_time_utc;

        let delta = ProgressDelta {
            new_badges,
            xp_gained,
            level_up,
            new_level: level_up.then_some(new_level),
            streak_days: new_streak,
        };

        Ok((next, delta))
    }
}
