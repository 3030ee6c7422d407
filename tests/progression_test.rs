//! End-to-end progression tests
//!
//! Drives the engine through realistic multi-day logging sequences and
//! checks the state machine's externally visible guarantees: badge
//! idempotence, XP/level monotonicity, streak evolution, and counter
//! behavior across resets and gaps.

use std::collections::HashMap;

use tracktreat::store::{MemoryProgressStore, ProgressManager, ProgressStore};
use tracktreat::{
    BadgeId, GoalRule, GoalSet, IdentifiedFood, Level, MealEvent, ProgressState,
    ProgressUpdateEngine,
};

fn meal(day: u32, hour: u32) -> MealEvent {
    MealEvent {
        user_id: "alice".to_string(),
        logged_at: format!("2024-03-{day:02}T{hour:02}:00:00+01:00"),
        nutrition: HashMap::new(),
        identified_foods: Vec::new(),
    }
}

fn with_nutrition(mut event: MealEvent, pairs: &[(&str, f64)]) -> MealEvent {
    for (name, amount) in pairs {
        event.nutrition.insert(name.to_string(), *amount);
    }
    event
}

fn with_food(mut event: MealEvent, name: &str) -> MealEvent {
    event.identified_foods.push(IdentifiedFood {
        name: name.to_string(),
        confidence: 0.85,
    });
    event
}

fn apply_all(events: &[MealEvent]) -> ProgressState {
    let engine = ProgressUpdateEngine::default();
    let goals = GoalSet::default();
    let mut state: Option<ProgressState> = None;
    for event in events {
        let (next, _) = engine.apply(state.as_ref(), event, &goals).unwrap();
        state = Some(next);
    }
    state.expect("at least one event")
}

#[test]
fn thirty_day_streak_earns_every_streak_badge() {
    let events: Vec<MealEvent> = (1..=30).map(|day| meal(day, 12)).collect();
    let state = apply_all(&events);

    assert_eq!(state.streak_days, 30);
    for id in [
        BadgeId::FirstMeal,
        BadgeId::Streak3,
        BadgeId::Streak7,
        BadgeId::Streak30,
    ] {
        assert!(state.has_badge(id), "missing {id:?}");
    }
    // 30 meals * 10 base + 10 + 30 + 70 + 300 badge XP
    assert_eq!(state.xp, 710);
    assert_eq!(state.level, Level::for_xp(710));
    assert_eq!(state.level, 4);
}

#[test]
fn replaying_a_day_changes_nothing_but_base_xp() {
    let engine = ProgressUpdateEngine::default();
    let goals = GoalSet::default();
    let event = with_nutrition(meal(14, 9), &[("protein", 140.0)]);

    let (first, delta) = engine.apply(None, &event, &goals).unwrap();
    assert_eq!(delta.new_badges.len(), 1);

    let (second, replay) = engine.apply(Some(&first), &event, &goals).unwrap();
    assert!(replay.new_badges.is_empty());
    assert_eq!(replay.streak_days, first.streak_days);
    assert_eq!(second.badges, first.badges);
    assert_eq!(second.last_meal_date, first.last_meal_date);
    assert_eq!(second.xp, first.xp + 10);
}

#[test]
fn veggie_lover_after_ten_vegetable_meals() {
    // Ten same-day meals: tallies accumulate per meal, not per day
    let events: Vec<MealEvent> = (0..10)
        .map(|i| with_food(meal(14, 8 + i), "spinach salad"))
        .collect();
    let state = apply_all(&events);

    assert_eq!(state.meal_tallies["vegetables"], 10);
    assert!(state.has_badge(BadgeId::VeggieLover));
    assert_eq!(state.streak_days, 1);
}

#[test]
fn hydration_hero_after_seven_consecutive_days() {
    let events: Vec<MealEvent> = (1..=7)
        .map(|day| with_nutrition(meal(day, 12), &[("water", 2500.0)]))
        .collect();
    let state = apply_all(&events);

    assert_eq!(state.goal_counters["water"], 7);
    assert!(state.has_badge(BadgeId::HydrationHero));
}

#[test]
fn protein_and_calorie_counters_track_independently() {
    let engine = ProgressUpdateEngine::default();
    let goals = GoalSet::default();

    let day1 = with_nutrition(meal(1, 12), &[("protein", 130.0), ("calories", 1800.0)]);
    let day2 = with_nutrition(meal(2, 12), &[("protein", 90.0), ("calories", 1900.0)]);

    let (s1, _) = engine.apply(None, &day1, &goals).unwrap();
    assert_eq!(s1.goal_counters["protein"], 1);
    assert_eq!(s1.goal_counters["calories"], 1);

    let (s2, _) = engine.apply(Some(&s1), &day2, &goals).unwrap();
    assert_eq!(s2.goal_counters["protein"], 0);
    assert_eq!(s2.goal_counters["calories"], 2);
}

#[test]
fn custom_goal_thresholds_from_profile() {
    // Thresholds come from the caller's profile, not the engine
    let goals = GoalSet::new().with_goal("protein", GoalRule::Minimum(60.0));
    let engine = ProgressUpdateEngine::default();

    let event = with_nutrition(meal(14, 12), &[("protein", 75.0)]);
    let (state, _) = engine.apply(None, &event, &goals).unwrap();

    assert_eq!(state.goal_counters["protein"], 1);
    // Goals absent from this profile carry no counters
    assert!(!state.goal_counters.contains_key("calories"));
}

#[test]
fn wire_shape_event_parses_and_applies() {
    let event: MealEvent = serde_json::from_str(
        r#"{
            "user_id": "alice",
            "logged_at": "2024-03-14T12:30:00+01:00",
            "nutrition": {"protein": 22.0, "carbs": 45.0, "fat": 9.0, "calories": 380.0},
            "identified_foods": [
                {"name": "oatmeal", "confidence": 0.92},
                {"name": "greek yogurt", "confidence": 0.81}
            ]
        }"#,
    )
    .unwrap();

    let (state, delta) = ProgressUpdateEngine::default()
        .apply(None, &event, &GoalSet::default())
        .unwrap();

    assert_eq!(delta.xp_gained, 20);
    assert_eq!(state.goal_counters["calories"], 1);
    assert_eq!(state.goal_counters["balance"], 1);

    // The state document round-trips for the KV store
    let json = serde_json::to_string(&state).unwrap();
    let back: ProgressState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
}

#[test]
fn manager_persists_across_meals() {
    let store = MemoryProgressStore::new();
    let manager = ProgressManager::new(store.clone(), ProgressUpdateEngine::default());
    let goals = GoalSet::default();

    for day in 1..=3 {
        manager.log_meal(&meal(day, 12), &goals).unwrap();
    }

    let state = store.load("alice").unwrap().unwrap();
    assert_eq!(state.streak_days, 3);
    assert!(state.has_badge(BadgeId::Streak3));
    assert_eq!(state.revision, 3);
}
