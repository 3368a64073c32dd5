// Core algorithm exports
pub mod filters;
pub mod recommender;
pub mod scoring;

pub use filters::{
    concern_overlap, contains_allergen, is_budget_compatible, is_new_to_routine,
    is_preferred_brand, matches_age_bracket, matches_skin_type,
};
pub use recommender::{rank, RecommendationResult, Recommender, ScoredProduct, DEFAULT_RECOMMENDATIONS};
pub use scoring::{calculate_product_score, rating_multiplier, score};
