// Unit tests for the skincare scorer

use skincare_recommender::core::{
    filters::{contains_allergen, is_budget_compatible},
    scoring::{calculate_product_score, rating_multiplier, score},
};
use skincare_recommender::models::{Allergens, PriceTier, Product, ScoringWeights, UserProfile};

fn create_test_product() -> Product {
    Product {
        brand: "CeraVe".to_string(),
        category: "serum".to_string(),
        skin_type_compatibility: "combination".to_string(),
        target_concerns: vec!["acne".to_string()],
        ingredients: "water, glycerin".to_string(),
        price_category: PriceTier::MidRange,
        average_rating: 4.0,
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

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_end_to_end_example_scores_6_6() {
    assert_close(score(&create_test_product(), &create_test_profile()), 6.6);
}

#[test]
fn test_fragrance_veto() {
    let mut product = create_test_product();
    product.ingredients = "water, fragrance".to_string();

    assert_eq!(score(&product, &create_test_profile()), 0.0);
}

#[test]
fn test_veto_ignores_rating_and_matches() {
    let profile = create_test_profile();

    for rating in [1.0, 3.0, 4.5, 5.0] {
        let mut product = create_test_product();
        product.average_rating = rating;
        product.ingredients = "Aqua, Hazelnuts Oil".to_string();

        assert!(contains_allergen(&product, &profile));
        assert_eq!(score(&product, &profile), 0.0, "rating {}", rating);
    }
}

#[test]
fn test_score_independent_of_answer_order() {
    let product = create_test_product();

    let mut forward = create_test_profile();
    forward.skin_concerns = ["acne".to_string(), "dryness".to_string()].into();
    forward.preferred_brands = ["CeraVe".to_string(), "The Ordinary".to_string()].into();

    let mut reversed = create_test_profile();
    reversed.skin_concerns = ["dryness".to_string(), "acne".to_string()].into();
    reversed.preferred_brands = ["The Ordinary".to_string(), "CeraVe".to_string()].into();

    assert_eq!(score(&product, &forward), score(&product, &reversed));
}

#[test]
fn test_rating_adjustment_examples() {
    assert_close(3.0 * rating_multiplier(5.0), 4.2);
    assert_close(3.0 * rating_multiplier(1.0), 1.8);
}

#[test]
fn test_budget_shopper_gets_no_bonus_for_mid_range() {
    let product = create_test_product();
    let mut profile = create_test_profile();
    profile.budget = PriceTier::Budget;

    assert!(!is_budget_compatible(&product, &profile));
    // 5.5 without the budget point is 4.5, times 1.2
    assert_close(score(&product, &profile), 5.4);
}

#[test]
fn test_empty_answers_contribute_nothing() {
    let product = create_test_product();
    let profile = UserProfile {
        gender: String::new(),
        age: 30,
        skin_type: "oily".to_string(),
        skin_concerns: Default::default(),
        current_routine: Default::default(),
        allergies: Allergens::parse(""),
        budget: PriceTier::Luxury,
        preferred_brands: Default::default(),
    };

    // Only the routine novelty bonus applies
    assert_close(score(&product, &profile), 0.5 * 1.2);
}

#[test]
fn test_weights_scale_components() {
    let weights = ScoringWeights {
        routine_novelty: 0.0,
        ..ScoringWeights::default()
    };

    assert_close(
        calculate_product_score(&create_test_product(), &create_test_profile(), &weights),
        5.0 * 1.2,
    );
}
