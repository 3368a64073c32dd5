use crate::core::filters::{
    concern_overlap, contains_allergen, is_budget_compatible, is_new_to_routine,
    is_preferred_brand, matches_age_bracket, matches_skin_type,
};
use crate::models::{Product, ScoringWeights, UserProfile};

/// Rating that leaves the score unchanged
const NEUTRAL_RATING: f64 = 3.0;
/// Rating points per 100% of score adjustment
const RATING_SPAN: f64 = 5.0;

/// Score a product with the default weights
pub fn score(product: &Product, profile: &UserProfile) -> f64 {
    calculate_product_score(product, profile, &ScoringWeights::default())
}

/// Calculate the compatibility score of a product for a user
///
/// Scoring formula:
/// score = (
///     skin_type        +2 if the product targets the user's skin type
///     age_bracket      +1 if it targets the concern of the user's age bracket
///     concerns         +1 per user concern it targets
///     routine_novelty  +0.5 if its category is not already in the routine
///     budget           +1 if the user's budget accepts its price tier
///     brand            +1 for a preferred brand
/// ) * (1 + (rating - 3) / 5)
///
/// A product containing any of the user's allergens scores exactly 0.
pub fn calculate_product_score(
    product: &Product,
    profile: &UserProfile,
    weights: &ScoringWeights,
) -> f64 {
    evaluate_product(product, profile, weights).unwrap_or(0.0)
}

/// Same as [`calculate_product_score`], with `None` meaning vetoed
pub(crate) fn evaluate_product(
    product: &Product,
    profile: &UserProfile,
    weights: &ScoringWeights,
) -> Option<f64> {
    let mut score = 0.0;

    if matches_skin_type(product, profile) {
        score += weights.skin_type;
    }

    if matches_age_bracket(product, profile) {
        score += weights.age_bracket;
    }

    score += concern_overlap(product, profile) as f64 * weights.concern;

    if is_new_to_routine(product, profile) {
        score += weights.routine_novelty;
    }

    // Veto runs before the budget and brand points and before the multiplier
    if contains_allergen(product, profile) {
        return None;
    }

    if is_budget_compatible(product, profile) {
        score += weights.budget;
    }

    if is_preferred_brand(product, profile) {
        score += weights.brand;
    }

    Some(score * rating_multiplier(product.average_rating))
}

/// 1.0 at a rating of 3, 1.4 at 5, 0.6 at 1
#[inline]
pub fn rating_multiplier(average_rating: f64) -> f64 {
    1.0 + (average_rating - NEUTRAL_RATING) / RATING_SPAN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Allergens, PriceTier};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn create_test_product(ingredients: &str, rating: f64) -> Product {
        Product {
            brand: "CeraVe".to_string(),
            category: "serum".to_string(),
            skin_type_compatibility: "combination".to_string(),
            target_concerns: vec!["acne".to_string()],
            ingredients: ingredients.to_string(),
            price_category: PriceTier::MidRange,
            average_rating: rating,
            extra: Default::default(),
            source: None,
        }
    }

    fn create_test_profile() -> UserProfile {
        UserProfile {
            gender: "female".to_string(),
            age: 30,
            skin_type: "combination".to_string(),
            skin_concerns: ["acne".to_string(), "dryness".to_string()].into(),
            current_routine: ["cleanser".to_string(), "moisturizer".to_string()].into(),
            allergies: Allergens::parse("nuts, fragrance"),
            budget: PriceTier::MidRange,
            preferred_brands: ["CeraVe".to_string()].into(),
        }
    }

    #[test]
    fn test_worked_example() {
        // 2 + 0 + 1 + 0.5 + 1 + 1 = 5.5, times 1.2
        let product = create_test_product("water, glycerin", 4.0);
        assert_close(score(&product, &create_test_profile()), 6.6);
    }

    #[test]
    fn test_allergen_veto_overrides_everything() {
        let product = create_test_product("water, fragrance", 5.0);
        assert_eq!(score(&product, &create_test_profile()), 0.0);
        assert_eq!(
            evaluate_product(&product, &create_test_profile(), &ScoringWeights::default()),
            None
        );
    }

    #[test]
    fn test_rating_multiplier() {
        assert_close(rating_multiplier(3.0), 1.0);
        assert_close(rating_multiplier(5.0), 1.4);
        assert_close(rating_multiplier(1.0), 0.6);
        assert_close(3.0 * rating_multiplier(5.0), 4.2);
        assert_close(3.0 * rating_multiplier(1.0), 1.8);
    }

    #[test]
    fn test_nothing_matches_scores_zero() {
        let product = Product {
            brand: "Unknown".to_string(),
            category: "cleanser".to_string(),
            skin_type_compatibility: "oily".to_string(),
            target_concerns: vec![],
            ingredients: "water".to_string(),
            price_category: PriceTier::Luxury,
            average_rating: 5.0,
            extra: Default::default(),
            source: None,
        };

        assert_eq!(score(&product, &create_test_profile()), 0.0);
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoringWeights {
            skin_type: 10.0,
            ..ScoringWeights::default()
        };
        let product = create_test_product("water", 3.0);

        // 10 + 1 + 0.5 + 1 + 1
        assert_close(
            calculate_product_score(&product, &create_test_profile(), &weights),
            13.5,
        );
    }
}
