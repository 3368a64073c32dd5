use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub catalog: CatalogSettings,
    pub recommendations: RecommendationSettings,
    pub scoring: ScoringSettings,
    pub cors: CorsSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub path: String,
    /// Zero or unset reads the file on every request
    pub cache_ttl_secs: Option<u64>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: "data/skincare_products.json".to_string(),
            cache_ttl_secs: Some(300),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecommendationSettings {
    pub default_limit: Option<usize>,
    pub max_limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_skin_type_weight")]
    pub skin_type: f64,
    #[serde(default = "default_age_bracket_weight")]
    pub age_bracket: f64,
    #[serde(default = "default_concern_weight")]
    pub concern: f64,
    #[serde(default = "default_routine_novelty_weight")]
    pub routine_novelty: f64,
    #[serde(default = "default_budget_weight")]
    pub budget: f64,
    #[serde(default = "default_brand_weight")]
    pub brand: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            skin_type: default_skin_type_weight(),
            age_bracket: default_age_bracket_weight(),
            concern: default_concern_weight(),
            routine_novelty: default_routine_novelty_weight(),
            budget: default_budget_weight(),
            brand: default_brand_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            skin_type: config.skin_type,
            age_bracket: config.age_bracket,
            concern: config.concern,
            routine_novelty: config.routine_novelty,
            budget: config.budget,
            brand: config.brand,
        }
    }
}

fn default_skin_type_weight() -> f64 { 2.0 }
fn default_age_bracket_weight() -> f64 { 1.0 }
fn default_concern_weight() -> f64 { 1.0 }
fn default_routine_novelty_weight() -> f64 { 0.5 }
fn default_budget_weight() -> f64 { 1.0 }
fn default_brand_weight() -> f64 { 1.0 }

/// Cross-origin policy; an empty list allows any origin
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

fn environment() -> Environment {
    // e.g., SKINCARE__SERVER__PORT -> server.port
    Environment::with_prefix("SKINCARE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("cors.allowed_origins")
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SKINCARE__)
    /// 5. CATALOG_PATH, if set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?;

        finish(settings, std::env::var("CATALOG_PATH").ok())
    }

    /// Load configuration from a custom path, with the same overrides as `load`
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        finish(settings, std::env::var("CATALOG_PATH").ok())
    }

    /// Reject settings that would make every request return nothing
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recommendations.default_limit == Some(0) {
            return Err(ConfigError::Message(
                "recommendations.default_limit must be at least 1".to_string(),
            ));
        }
        if self.recommendations.max_limit == Some(0) {
            return Err(ConfigError::Message(
                "recommendations.max_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn default_limit(&self) -> usize {
        self.recommendations
            .default_limit
            .unwrap_or(crate::core::DEFAULT_RECOMMENDATIONS)
    }

    pub fn max_limit(&self) -> usize {
        self.recommendations.max_limit.unwrap_or(50)
    }
}

/// Apply unprefixed overrides, then deserialize and validate
fn finish(settings: Config, catalog_path: Option<String>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Some(path) = catalog_path {
        builder = builder.set_override("catalog.path", path)?;
    }

    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;

    Ok(settings)
}
