//! TrackTreat - meal-logging gamification engine
//!
//! TrackTreat awards progress for consistent meal logging: daily streaks,
//! one-time badges, XP, and levels. The heart of the crate is
//! [`ProgressUpdateEngine`], a pure transition function that takes a user's
//! accumulated [`ProgressState`] plus one [`MealEvent`] and returns the new
//! state together with a [`ProgressDelta`] describing what just happened.
//!
//! ## Design
//!
//! The engine performs no I/O and holds no mutable state, so it is safe to
//! call from any number of concurrent tasks. Persistence is the caller's
//! job; the [`store`] module provides the [`store::ProgressStore`] seam plus
//! a revision-checked in-memory implementation and a
//! [`store::ProgressManager`] that serializes read-modify-write cycles per
//! user via compare-and-swap.

pub mod config;
pub mod error;
pub mod event;
pub mod progress;
pub mod store;

pub use config::{EngineConfig, GoalRule, GoalSet};
pub use error::EngineError;
pub use event::{IdentifiedFood, MealEvent};
pub use progress::{
    Badge, BadgeId, EarnedBadge, Level, ProgressDelta, ProgressState, ProgressUpdateEngine,
    BADGES, LEVELS,
};
