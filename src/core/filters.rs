use crate::models::{AgeBracket, Product, UserProfile};

/// Hard exclusion: any of the user's allergens appears in the ingredients
///
/// A product that trips this check scores zero no matter what else matches.
#[inline]
pub fn contains_allergen(product: &Product, profile: &UserProfile) -> bool {
    profile.allergies.found_in(&product.ingredients)
}

/// Skin type equality, exact
#[inline]
pub fn matches_skin_type(product: &Product, profile: &UserProfile) -> bool {
    profile.skin_type == product.skin_type_compatibility
}

/// Product targets the concern associated with the user's age bracket
#[inline]
pub fn matches_age_bracket(product: &Product, profile: &UserProfile) -> bool {
    product.targets(AgeBracket::for_age(profile.age).target_concern())
}

/// Number of the user's concerns the product targets
#[inline]
pub fn concern_overlap(product: &Product, profile: &UserProfile) -> usize {
    profile
        .skin_concerns
        .iter()
        .filter(|concern| product.targets(concern))
        .count()
}

/// Product fills a category missing from the user's routine
#[inline]
pub fn is_new_to_routine(product: &Product, profile: &UserProfile) -> bool {
    !profile.uses_category(&product.category)
}

#[inline]
pub fn is_budget_compatible(product: &Product, profile: &UserProfile) -> bool {
    profile.budget.accepts(product.price_category)
}

#[inline]
pub fn is_preferred_brand(product: &Product, profile: &UserProfile) -> bool {
    profile.preferred_brands.contains(&product.brand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Allergens, PriceTier};

    fn create_test_product(category: &str, concerns: &[&str]) -> Product {
        Product {
            brand: "CeraVe".to_string(),
            category: category.to_string(),
            skin_type_compatibility: "dry".to_string(),
            target_concerns: concerns.iter().map(|c| c.to_string()).collect(),
            ingredients: "Water, Glycerin, Ceramides".to_string(),
            price_category: PriceTier::Budget,
            average_rating: 4.0,
            extra: Default::default(),
            source: None,
        }
    }

    fn create_test_profile(age: u32) -> UserProfile {
        UserProfile {
            gender: "female".to_string(),
            age,
            skin_type: "dry".to_string(),
            skin_concerns: ["dryness".to_string(), "hydration".to_string()].into(),
            current_routine: ["Cleanser".to_string()].into(),
            allergies: Allergens::parse("parabens"),
            budget: PriceTier::Budget,
            preferred_brands: Default::default(),
        }
    }

    #[test]
    fn test_age_bracket_targets() {
        let acne = create_test_product("serum", &["acne"]);
        let hydration = create_test_product("serum", &["hydration"]);
        let anti_aging = create_test_product("serum", &["anti-aging"]);

        assert!(matches_age_bracket(&acne, &create_test_profile(18)));
        assert!(!matches_age_bracket(&hydration, &create_test_profile(18)));
        assert!(matches_age_bracket(&hydration, &create_test_profile(25)));
        assert!(matches_age_bracket(&anti_aging, &create_test_profile(40)));
        assert!(!matches_age_bracket(&acne, &create_test_profile(40)));
    }

    #[test]
    fn test_concern_overlap_counts_each_match() {
        let product = create_test_product("moisturizer", &["dryness", "hydration", "acne"]);
        let profile = create_test_profile(30);

        assert_eq!(concern_overlap(&product, &profile), 2);
    }

    #[test]
    fn test_routine_check_ignores_case() {
        let profile = create_test_profile(30);

        assert!(!is_new_to_routine(&create_test_product("cleanser", &[]), &profile));
        assert!(!is_new_to_routine(&create_test_product("CLEANSER", &[]), &profile));
        assert!(is_new_to_routine(&create_test_product("toner", &[]), &profile));
    }

    #[test]
    fn test_allergen_detection() {
        let mut product = create_test_product("serum", &[]);
        let profile = create_test_profile(30);
        assert!(!contains_allergen(&product, &profile));

        product.ingredients = "Water, Methylparabens".to_string();
        assert!(contains_allergen(&product, &profile));
    }
}
