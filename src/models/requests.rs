use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use thiserror::Error;
use validator::Validate;

use crate::models::domain::{Allergens, PriceTier, UserProfile};

/// Errors raised while turning questionnaire answers into a profile
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid age: {0}")]
    InvalidAge(String),

    #[error("Invalid budget: {0}")]
    InvalidBudget(String),
}

/// Request to get product recommendations
///
/// Every questionnaire field is optional at the serde level so that an
/// absent one is reported by name instead of as a generic JSON error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub gender: Option<String>,
    /// Number or numeric string
    pub age: Option<Value>,
    #[validate(length(min = 1))]
    pub skin_type: Option<String>,
    pub skin_concerns: Option<Vec<String>>,
    pub current_routine: Option<Vec<String>>,
    pub allergies: Option<String>,
    pub budget: Option<String>,
    pub preferred_brands: Option<Vec<String>>,
    /// Values above the configured maximum are capped, not rejected
    #[validate(range(min = 1))]
    pub limit: Option<u64>,
}

impl TryFrom<RecommendationRequest> for UserProfile {
    type Error = ProfileError;

    fn try_from(req: RecommendationRequest) -> Result<Self, Self::Error> {
        let gender = req.gender.ok_or(ProfileError::MissingField("gender"))?;
        let age = parse_age(req.age.as_ref().ok_or(ProfileError::MissingField("age"))?)?;
        let skin_type = req.skin_type.ok_or(ProfileError::MissingField("skinType"))?;
        let skin_concerns = req
            .skin_concerns
            .ok_or(ProfileError::MissingField("skinConcerns"))?;
        let current_routine = req
            .current_routine
            .ok_or(ProfileError::MissingField("currentRoutine"))?;
        let allergies = req.allergies.ok_or(ProfileError::MissingField("allergies"))?;
        let budget = req.budget.ok_or(ProfileError::MissingField("budget"))?;
        let preferred_brands = req
            .preferred_brands
            .ok_or(ProfileError::MissingField("preferredBrands"))?;

        let budget = budget
            .trim()
            .parse::<PriceTier>()
            .map_err(ProfileError::InvalidBudget)?;

        Ok(UserProfile {
            gender,
            age,
            skin_type,
            skin_concerns: to_set(skin_concerns),
            current_routine: to_set(current_routine),
            allergies: Allergens::parse(&allergies),
            budget,
            preferred_brands: to_set(preferred_brands),
        })
    }
}

/// Accepts a non-negative JSON integer or a string holding one
pub fn parse_age(value: &Value) -> Result<u32, ProfileError> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| ProfileError::InvalidAge(format!("{} is not a non-negative integer", value)))
}

fn to_set(values: Vec<String>) -> BTreeSet<String> {
    values.into_iter().collect()
}
