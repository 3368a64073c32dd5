//! Skincare Recommender - questionnaire-driven product recommendations
//!
//! This library scores every product of a skincare catalog against a user's
//! questionnaire answers and returns the best matches. Scoring is pure; the
//! catalog is loaded through the `CatalogProvider` trait.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{rank, score, Recommender, RecommendationResult, DEFAULT_RECOMMENDATIONS};
pub use error::ApiError;
pub use models::{Allergens, PriceTier, Product, RecommendationRequest, ScoringWeights, UserProfile};
pub use services::{CatalogError, CatalogProvider, JsonFileCatalog, StaticCatalog};
