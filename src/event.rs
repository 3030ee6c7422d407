//! Meal event input model
//!
//! A [`MealEvent`] is what the API layer hands to the engine after food
//! identification and nutrition lookup have run. It is ephemeral input;
//! nothing in it is persisted directly.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One food item recognized in the meal photo, with classifier confidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifiedFood {
    pub name: String,
    pub confidence: f64,
}

/// A single logged meal, as delivered by the API layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealEvent {
    /// Owner of the meal. Must be non-empty.
    pub user_id: String,

    /// ISO-8601 timestamp of when the meal was eaten. Kept as the raw wire
    /// string so a malformed value surfaces as [`EngineError::BadTimestamp`]
    /// instead of failing deserialization of the whole request.
    pub logged_at: String,

    /// Nutrient name -> amount (grams, kcal, ml depending on the nutrient).
    /// Missing nutrients are treated as zero.
    #[serde(default)]
    pub nutrition: HashMap<String, f64>,

    /// Ranked classifier output, highest confidence first.
    #[serde(default)]
    pub identified_foods: Vec<IdentifiedFood>,
}

impl MealEvent {
    /// Parse `logged_at`, honoring an embedded UTC offset if present.
    pub fn logged_at(&self) -> Result<DateTime<FixedOffset>, EngineError> {
        DateTime::parse_from_rfc3339(&self.logged_at)
            .map_err(|_| EngineError::BadTimestamp(self.logged_at.clone()))
    }

    /// Calendar date of the meal, in the timezone the event was logged in.
    ///
    /// The embedded offset decides the date: a meal logged at 23:30 local
    /// time counts for the user's day, not the server's.
    pub fn event_date(&self) -> Result<NaiveDate, EngineError> {
        Ok(self.logged_at()?.date_naive())
    }

    /// Amount of a nutrient, zero if absent.
    pub fn nutrient(&self, name: &str) -> f64 {
        self.nutrition.get(name).copied().unwrap_or(0.0)
    }
}
