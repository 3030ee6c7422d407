//! Badge definitions and metadata
//!
//! All badges are defined here with their unlock requirements and XP
//! rewards. `BADGES` is an explicit ordered slice: unlock evaluation
//! iterates it in declared order so the sequence of newly earned badges
//! is deterministic.

/// Unique identifier for each badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BadgeId {
    #[serde(rename = "first_meal")]
    FirstMeal,
    #[serde(rename = "streak_3")]
    Streak3,
    #[serde(rename = "streak_7")]
    Streak7,
    #[serde(rename = "streak_30")]
    Streak30,
    #[serde(rename = "protein_goal_5")]
    ProteinGoal5,
    #[serde(rename = "calorie_goal_5")]
    CalorieGoal5,
    #[serde(rename = "nutritional_balance")]
    NutritionalBalance,
    #[serde(rename = "veggie_lover")]
    VeggieLover,
    #[serde(rename = "hydration_hero")]
    HydrationHero,
}

impl BadgeId {
    /// Get the string ID for stored documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstMeal => "first_meal",
            Self::Streak3 => "streak_3",
            Self::Streak7 => "streak_7",
            Self::Streak30 => "streak_30",
            Self::ProteinGoal5 => "protein_goal_5",
            Self::CalorieGoal5 => "calorie_goal_5",
            Self::NutritionalBalance => "nutritional_balance",
            Self::VeggieLover => "veggie_lover",
            Self::HydrationHero => "hydration_hero",
        }
    }

    /// Parse from a stored string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "first_meal" => Some(Self::FirstMeal),
            "streak_3" => Some(Self::Streak3),
            "streak_7" => Some(Self::Streak7),
            "streak_30" => Some(Self::Streak30),
            "protein_goal_5" => Some(Self::ProteinGoal5),
            "calorie_goal_5" => Some(Self::CalorieGoal5),
            "nutritional_balance" => Some(Self::NutritionalBalance),
            "veggie_lover" => Some(Self::VeggieLover),
            "hydration_hero" => Some(Self::HydrationHero),
            _ => None,
        }
    }
}

/// How a badge unlocks, evaluated against post-update derived values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BadgeRequirement {
    /// Any logged meal (awarded on the first one not already held)
    AnyMeal,
    /// Daily logging streak of at least this many days
    StreakDays(u32),
    /// A goal counter of at least this many consecutive days
    GoalStreak { goal: &'static str, days: u32 },
    /// A cumulative category tally of at least this many meals
    MealTally {
        category: &'static str,
        count: u32,
    },
}

/// Badge definition with all metadata
#[derive(Debug, Clone)]
pub struct Badge {
    pub id: BadgeId,
    pub name: &'static str,
    pub description: &'static str,
    pub xp_reward: u64,
    pub requirement: BadgeRequirement,
}

/// All badge definitions, in unlock-evaluation order
pub static BADGES: &[Badge] = &[
    Badge {
        id: BadgeId::FirstMeal,
        name: "First Meal",
        description: "Logged your first meal",
        xp_reward: 10,
        requirement: BadgeRequirement::AnyMeal,
    },
    Badge {
        id: BadgeId::Streak3,
        name: "3-Day Streak",
        description: "Logged meals for 3 consecutive days",
        xp_reward: 30,
        requirement: BadgeRequirement::StreakDays(3),
    },
    Badge {
        id: BadgeId::Streak7,
        name: "7-Day Streak",
        description: "Logged meals for 7 consecutive days",
        xp_reward: 70,
        requirement: BadgeRequirement::StreakDays(7),
    },
    Badge {
        id: BadgeId::Streak30,
        name: "30-Day Streak",
        description: "Logged meals for 30 consecutive days",
        xp_reward: 300,
        requirement: BadgeRequirement::StreakDays(30),
    },
    Badge {
        id: BadgeId::ProteinGoal5,
        name: "Protein Champion",
        description: "Hit protein goals 5 days in a row",
        xp_reward: 50,
        requirement: BadgeRequirement::GoalStreak {
            goal: "protein",
            days: 5,
        },
    },
    Badge {
        id: BadgeId::CalorieGoal5,
        name: "Calorie Master",
        description: "Stayed within calorie goals 5 days in a row",
        xp_reward: 50,
        requirement: BadgeRequirement::GoalStreak {
            goal: "calories",
            days: 5,
        },
    },
    Badge {
        id: BadgeId::NutritionalBalance,
        name: "Nutritional Balance",
        description: "Achieved balanced macros for 3 consecutive days",
        xp_reward: 40,
        requirement: BadgeRequirement::GoalStreak {
            goal: "balance",
            days: 3,
        },
    },
    Badge {
        id: BadgeId::VeggieLover,
        name: "Veggie Lover",
        description: "Included vegetables in 10 meals",
        xp_reward: 35,
        requirement: BadgeRequirement::MealTally {
            category: "vegetables",
            count: 10,
        },
    },
    Badge {
        id: BadgeId::HydrationHero,
        name: "Hydration Hero",
        description: "Met water intake goal for 7 days",
        xp_reward: 45,
        requirement: BadgeRequirement::GoalStreak {
            goal: "water",
            days: 7,
        },
    },
];

impl Badge {
    /// Get badge definition by ID
    pub fn get(id: BadgeId) -> &'static Badge {
        BADGES
            .iter()
            .find(|b| b.id == id)
            .expect("All badges should be defined")
    }

    /// Total possible XP from all badges
    pub fn total_xp() -> u64 {
        BADGES.iter().map(|b| b.xp_reward).sum()
    }
}
