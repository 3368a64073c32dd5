use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::Recommender;
use crate::error::ApiError;
use crate::models::{HealthResponse, RecommendationRequest, UserProfile};
use crate::services::CatalogProvider;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
    pub recommender: Recommender,
    pub default_limit: usize,
    pub max_limit: usize,
}

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommend));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let catalog_products = match state.catalog.load().await {
        Ok(products) => Some(products.len()),
        Err(e) => {
            tracing::warn!("Catalog unavailable during health check: {}", e);
            None
        }
    };

    let status = if catalog_products.is_some() { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        catalog_products,
    })
}

/// Recommendations endpoint
///
/// POST /api/recommendations
///
/// Request body:
/// ```json
/// {
///   "gender": "female",
///   "age": "30",
///   "skinType": "combination",
///   "skinConcerns": ["acne", "dryness"],
///   "currentRoutine": ["cleanser", "moisturizer"],
///   "allergies": "nuts, fragrance",
///   "budget": "mid-range",
///   "preferredBrands": ["CeraVe"],
///   "limit": 5
/// }
/// ```
///
/// Responds with a JSON array of catalog products, best match first.
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendationRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendation request: {:?}", errors);
        return Err(ApiError::Validation(errors.to_string()));
    }

    let limit = req
        .limit
        .map(|l| usize::try_from(l).unwrap_or(usize::MAX))
        .unwrap_or(state.default_limit)
        .min(state.max_limit);

    // Reject incomplete profiles before the catalog is touched
    let profile = UserProfile::try_from(req).map_err(|e| {
        tracing::info!("Rejected questionnaire: {}", e);
        e
    })?;

    let catalog = state.catalog.load().await.map_err(|e| {
        tracing::error!("Failed to load catalog: {}", e);
        e
    })?;

    let result = state.recommender.recommend(&profile, &catalog, limit);

    tracing::info!(
        "Returning {} recommendations (from {} products, {} excluded by allergens)",
        result.recommendations.len(),
        result.total_products,
        result.vetoed_products
    );

    Ok(HttpResponse::Ok().json(result.recommendations))
}
