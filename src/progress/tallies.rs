//! Cumulative meal category tallies
//!
//! Unlike goal counters, tallies never reset: they count how many meals
//! ever contained a food from a category (e.g. vegetables), matched by
//! case-insensitive keyword against the classifier's food names.

use std::collections::BTreeMap;

use crate::event::IdentifiedFood;

/// Categories present in a meal, in stable (sorted) category order.
///
/// A category counts at most once per meal regardless of how many of its
/// foods were identified.
pub fn categories_in_meal<'a>(
    categories: &'a BTreeMap<String, Vec<String>>,
    foods: &[IdentifiedFood],
) -> Vec<&'a str> {
    let names: Vec<String> = foods.iter().map(|f| f.name.to_lowercase()).collect();

    categories
        .iter()
        .filter(|(_, keywords)| {
            names.iter().any(|name| {
                keywords
                    .iter()
                    .any(|keyword| name.contains(&keyword.to_lowercase()))
            })
        })
        .map(|(category, _)| category.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    fn food(name: &str) -> IdentifiedFood {
        IdentifiedFood {
            name: name.to_string(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let config = EngineConfig::default();
        let found = categories_in_meal(&config.categories, &[food("Steamed BROCCOLI")]);
        assert_eq!(found, vec!["vegetables"]);
    }

    #[test]
    fn test_substring_match() {
        let config = EngineConfig::default();
        // "chicken salad" contains the "salad" keyword
        let found = categories_in_meal(&config.categories, &[food("chicken salad")]);
        assert_eq!(found, vec!["vegetables"]);
    }

    #[test]
    fn test_category_counts_once_per_meal() {
        let config = EngineConfig::default();
        let found =
            categories_in_meal(&config.categories, &[food("spinach"), food("kale")]);
        assert_eq!(found, vec!["vegetables"]);
    }

    #[test]
    fn test_no_match() {
        let config = EngineConfig::default();
        let found = categories_in_meal(&config.categories, &[food("cheeseburger")]);
        assert!(found.is_empty());
    }
}
