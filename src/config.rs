//! Engine configuration and per-user goal thresholds
//!
//! [`EngineConfig`] is service-level configuration (XP constants, food
//! category keywords) loadable from a TOML file. [`GoalSet`] is per-user:
//! the caller builds it from the user's profile and passes it alongside
//! each meal event.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Rule deciding whether a nutrition goal was met by one meal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum GoalRule {
    /// Nutrient amount must be at least this much (protein, water).
    Minimum(f64),
    /// Nutrient amount must stay at or below this much (calories).
    Maximum(f64),
    /// Calorie shares of protein/carbs/fat must each fall inside the
    /// given `(low, high)` band. Protein and carbs count 4 kcal/g,
    /// fat 9 kcal/g.
    MacroBalance {
        protein: (f64, f64),
        carbs: (f64, f64),
        fat: (f64, f64),
    },
}

/// Macro balance check: each macro's calorie share must sit inside its band.
fn macro_balance_met(
    bands: (&(f64, f64), &(f64, f64), &(f64, f64)),
    nutrient: impl Fn(&str) -> f64,
) -> bool {
    let protein_kcal = nutrient("protein") * 4.0;
    let carbs_kcal = nutrient("carbs") * 4.0;
    let fat_kcal = nutrient("fat") * 9.0;
    let total = protein_kcal + carbs_kcal + fat_kcal;
    if total <= 0.0 {
        return false;
    }
    let in_band = |kcal: f64, band: &(f64, f64)| {
        let share = kcal / total;
        share >= band.0 && share <= band.1
    };
    in_band(protein_kcal, bands.0) && in_band(carbs_kcal, bands.1) && in_band(fat_kcal, bands.2)
}

/// Per-user nutrition goals, keyed by goal name.
///
/// For `Minimum`/`Maximum` rules the goal name doubles as the nutrient
/// name looked up in the meal's nutrition payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalSet {
    #[serde(flatten)]
    goals: BTreeMap<String, GoalRule>,
}

impl GoalSet {
    pub fn new() -> Self {
        Self {
            goals: BTreeMap::new(),
        }
    }

    pub fn with_goal(mut self, name: &str, rule: GoalRule) -> Self {
        self.goals.insert(name.to_string(), rule);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.goals.contains_key(name)
    }

    /// Iterate goals in stable (sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GoalRule)> {
        self.goals.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether the named goal is met by a meal with the given nutrient lookup.
    ///
    /// Returns `None` for goals this set does not configure. Total
    /// evaluation otherwise: no input combination panics or errors.
    pub fn is_met(&self, name: &str, nutrient: impl Fn(&str) -> f64) -> Option<bool> {
        let rule = self.goals.get(name)?;
        let met = match rule {
            GoalRule::Minimum(threshold) => nutrient(name) >= *threshold,
            GoalRule::Maximum(threshold) => {
                let amount = nutrient(name);
                amount > 0.0 && amount <= *threshold
            }
            GoalRule::MacroBalance {
                protein,
                carbs,
                fat,
            } => macro_balance_met((protein, carbs, fat), nutrient),
        };
        Some(met)
    }
}

impl Default for GoalSet {
    /// Defaults: 120 g protein minimum,
    /// 2200 kcal calorie ceiling, 2000 ml water minimum, and macro
    /// balance bands around a 25/50/25 split.
    fn default() -> Self {
        Self::new()
            .with_goal("protein", GoalRule::Minimum(120.0))
            .with_goal("calories", GoalRule::Maximum(2200.0))
            .with_goal("water", GoalRule::Minimum(2000.0))
            .with_goal(
                "balance",
                GoalRule::MacroBalance {
                    protein: (0.15, 0.35),
                    carbs: (0.35, 0.60),
                    fat: (0.15, 0.40),
                },
            )
    }
}

/// Default food category keywords, matched case-insensitively against
/// identified food names.
static DEFAULT_CATEGORIES: Lazy<BTreeMap<String, Vec<String>>> = Lazy::new(|| {
    let mut categories = BTreeMap::new();
    categories.insert(
        "vegetables".to_string(),
        [
            "vegetable", "greens", "broccoli", "spinach", "salad", "kale", "carrot", "cabbage",
            "zucchini", "pepper", "cauliflower",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    );
    categories
});

/// Service-level engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Flat XP for every logged meal, the only XP source outside badges.
    #[serde(default = "default_base_meal_xp")]
    pub base_meal_xp: u64,

    /// Category name -> keywords. A meal counts once per category when any
    /// identified food name contains any keyword (case-insensitive).
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<String>>,
}

fn default_base_meal_xp() -> u64 {
    10
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_meal_xp: default_base_meal_xp(),
            categories: DEFAULT_CATEGORIES.clone(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read engine config: {}", path.display()))?;

        let config: EngineConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse engine config: {}", path.display()))?;

        Ok(config)
    }
}
