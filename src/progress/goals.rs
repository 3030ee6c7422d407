//! Rolling nutrition-goal counters
//!
//! Each goal keeps a consecutive-day counter: meet the goal and it grows,
//! miss it (or log a meal with the nutrient absent) and it resets to zero.
//! Goal rules themselves live in [`crate::config::GoalSet`].

/// Advance a single goal counter for one meal event.
pub fn update_goal_counter(previous: u32, met: bool) -> u32 {
    if met {
        previous + 1
    } else {
        0
    }
}
