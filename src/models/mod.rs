// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AgeBracket, Allergens, PriceTier, Product, ScoringWeights, UserProfile};
pub use requests::{parse_age, ProfileError, RecommendationRequest};
pub use responses::{ErrorResponse, HealthResponse};
