//! Daily logging streak computation
//!
//! A streak counts consecutive calendar days with at least one logged
//! meal. Comparisons are on calendar dates, never timestamps.

use chrono::NaiveDate;

/// Compute the streak after a meal on `event_date`, given the date of the
/// previously processed meal (if any) and the streak it ended with.
///
/// Rules:
/// - no previous meal: the streak starts at 1
/// - same day: unchanged (re-logging does not inflate the streak)
/// - exactly the next day: extended by 1
/// - a gap of two or more days: reset to 1
/// - event older than the previous date (backfill): unchanged
pub fn compute_streak(
    previous_date: Option<NaiveDate>,
    previous_streak: u32,
    event_date: NaiveDate,
) -> u32 {
    let Some(previous) = previous_date else {
        return 1;
    };

    match (event_date - previous).num_days() {
        0 => previous_streak,
        1 => previous_streak + 1,
        days if days > 1 => 1,
        // Backfilled event: older days never break an established streak.
        _ => previous_streak,
    }
}
