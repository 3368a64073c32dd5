use crate::core::scoring::evaluate_product;
use crate::models::{Product, ScoringWeights, UserProfile};

/// Number of recommendations returned when the caller does not ask for more
pub const DEFAULT_RECOMMENDATIONS: usize = 5;

/// A product paired with its computed score
#[derive(Debug, Clone, Copy)]
pub struct ScoredProduct<'a> {
    pub product: &'a Product,
    pub score: f64,
    pub vetoed: bool,
}

/// Result of the recommendation process
#[derive(Debug)]
pub struct RecommendationResult {
    pub recommendations: Vec<Product>,
    pub total_products: usize,
    pub vetoed_products: usize,
}

/// Scores the whole catalog for a profile and keeps the best products
///
/// # Pipeline Stages
/// 1. Score every product (allergen veto included)
/// 2. Stable sort by score, descending; ties keep catalog order
/// 3. Truncate to the requested limit
#[derive(Debug, Clone)]
pub struct Recommender {
    weights: ScoringWeights,
}

impl Recommender {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score every product, best first
    ///
    /// Nothing is filtered out: vetoed products stay in the list with a
    /// score of zero.
    pub fn score_catalog<'a>(
        &self,
        profile: &UserProfile,
        products: &'a [Product],
    ) -> Vec<ScoredProduct<'a>> {
        let mut scored: Vec<ScoredProduct<'a>> = products
            .iter()
            .map(|product| match evaluate_product(product, profile, &self.weights) {
                Some(score) => ScoredProduct {
                    product,
                    score,
                    vetoed: false,
                },
                None => ScoredProduct {
                    product,
                    score: 0.0,
                    vetoed: true,
                },
            })
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        scored
    }

    /// Recommend up to `limit` products for a profile
    ///
    /// # Arguments
    /// * `profile` - The user's questionnaire answers
    /// * `products` - The full catalog
    /// * `limit` - Maximum number of products to return
    ///
    /// # Returns
    /// RecommendationResult holding verbatim copies of the chosen products
    pub fn recommend(
        &self,
        profile: &UserProfile,
        products: &[Product],
        limit: usize,
    ) -> RecommendationResult {
        let scored = self.score_catalog(profile, products);
        let vetoed_products = scored.iter().filter(|s| s.vetoed).count();

        for entry in scored.iter().take(limit) {
            tracing::trace!(
                brand = %entry.product.brand,
                category = %entry.product.category,
                score = entry.score,
                "Recommendation candidate"
            );
        }

        let recommendations = scored
            .into_iter()
            .take(limit)
            .map(|s| s.product.clone())
            .collect();

        RecommendationResult {
            recommendations,
            total_products: products.len(),
            vetoed_products,
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Top `n` products for a profile using the default weights
pub fn rank(products: &[Product], profile: &UserProfile, n: usize) -> Vec<Product> {
    Recommender::with_default_weights()
        .recommend(profile, products, n)
        .recommendations
}
