use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{RecommendationSettings, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub cache: CacheSettings,
    pub recommendation: RecommendationConfig,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5000 }

/// An empty `url` selects the in-memory store
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default)]
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: default_token_ttl_hours(),
            bcrypt_cost: default_bcrypt_cost(),
            cookie_name: default_cookie_name(),
        }
    }
}

fn default_token_ttl_hours() -> i64 { 24 }
fn default_bcrypt_cost() -> u32 { 10 }
fn default_cookie_name() -> String { "token".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_catalog_ttl_secs")]
    pub catalog_ttl_secs: u64,
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            catalog_ttl_secs: default_catalog_ttl_secs(),
            max_entries: default_cache_max_entries(),
        }
    }
}

fn default_catalog_ttl_secs() -> u64 { 30 }
fn default_cache_max_entries() -> u64 { 16 }

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_relevance_floor")]
    pub relevance_floor: u8,
    #[serde(default = "default_freshness_horizon_days")]
    pub freshness_horizon_days: f64,
    #[serde(default)]
    pub weights: WeightsConfig,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            relevance_floor: default_relevance_floor(),
            freshness_horizon_days: default_freshness_horizon_days(),
            weights: WeightsConfig::default(),
        }
    }
}

fn default_max_results() -> usize { 5 }
fn default_relevance_floor() -> u8 { 5 }
fn default_freshness_horizon_days() -> f64 { 30.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_skill_match_weight")]
    pub skill_match: f64,
    #[serde(default = "default_bio_relevance_weight")]
    pub bio_relevance: f64,
    #[serde(default = "default_skill_diversity_weight")]
    pub skill_diversity: f64,
    #[serde(default = "default_complexity_match_weight")]
    pub complexity_match: f64,
    #[serde(default = "default_freshness_weight")]
    pub freshness: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            skill_match: default_skill_match_weight(),
            bio_relevance: default_bio_relevance_weight(),
            skill_diversity: default_skill_diversity_weight(),
            complexity_match: default_complexity_match_weight(),
            freshness: default_freshness_weight(),
        }
    }
}

fn default_skill_match_weight() -> f64 { 40.0 }
fn default_bio_relevance_weight() -> f64 { 25.0 }
fn default_skill_diversity_weight() -> f64 { 15.0 }
fn default_complexity_match_weight() -> f64 { 10.0 }
fn default_freshness_weight() -> f64 { 10.0 }

impl RecommendationConfig {
    /// Convert to engine settings, rejecting values the scorer cannot use
    pub fn to_settings(&self) -> Result<RecommendationSettings, ConfigError> {
        if self.freshness_horizon_days <= 0.0 {
            return Err(ConfigError::Message(
                "recommendation.freshness_horizon_days must be positive".to_string(),
            ));
        }
        let w = &self.weights;
        if [w.skill_match, w.bio_relevance, w.skill_diversity, w.complexity_match, w.freshness]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(ConfigError::Message(
                "recommendation.weights must be non-negative".to_string(),
            ));
        }

        Ok(RecommendationSettings {
            weights: ScoringWeights {
                skill_match: w.skill_match,
                bio_relevance: w.bio_relevance,
                skill_diversity: w.skill_diversity,
                complexity_match: w.complexity_match,
                freshness: w.freshness,
            },
            max_results: self.max_results,
            relevance_floor: self.relevance_floor,
            freshness_horizon_days: self.freshness_horizon_days,
        })
    }
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

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CAMPUS__)
    /// 5. DATABASE_URL and JWT_SECRET
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CAMPUS__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CAMPUS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_well_known_env(settings)?;

        settings.try_deserialize::<Settings>()?.validated()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CAMPUS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_well_known_env(settings)?;

        settings.try_deserialize::<Settings>()?.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ConfigError::Message(
                "auth.jwt_secret (or JWT_SECRET) must be set".to_string(),
            ));
        }
        self.recommendation.to_settings()?;
        Ok(self)
    }
}

/// Apply the conventional unprefixed variables on top of the layered config
fn apply_well_known_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", url)?;
    }
    if let Ok(secret) = env::var("JWT_SECRET") {
        builder = builder.set_override("auth.jwt_secret", secret)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.skill_match, 40.0);
        assert_eq!(weights.bio_relevance, 25.0);
        assert_eq!(weights.skill_diversity, 15.0);
        assert_eq!(weights.complexity_match, 10.0);
        assert_eq!(weights.freshness, 10.0);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_recommendation_defaults_match_engine() {
        let settings = RecommendationConfig::default().to_settings().unwrap();
        assert_eq!(settings, RecommendationSettings::default());
    }

    #[test]
    fn test_rejects_zero_horizon() {
        let config = RecommendationConfig {
            freshness_horizon_days: 0.0,
            ..RecommendationConfig::default()
        };
        assert!(config.to_settings().is_err());
    }

    #[test]
    fn test_missing_secret_rejected() {
        assert!(Settings::default().validated().is_err());
    }

    #[test]
    fn test_load_from_applies_jwt_secret_env() {
        let path = std::env::temp_dir().join(format!("campus-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[auth]\njwt_secret = \"\"\n\n[server]\nport = 8080\n").unwrap();

        std::env::remove_var("JWT_SECRET");
        assert!(Settings::load_from(&path).is_err());

        std::env::set_var("JWT_SECRET", "from-env");
        let settings = Settings::load_from(&path);
        std::env::remove_var("JWT_SECRET");
        std::fs::remove_file(&path).ok();

        let settings = settings.unwrap();
        assert_eq!(settings.auth.jwt_secret, "from-env");
        assert_eq!(settings.server.port, 8080);
    }
}
