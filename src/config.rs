use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{ListingWeights, MatchingConfig, ScreeningConfig};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub duplicates: DuplicateSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_candidate_limit")]
    pub candidate_limit: usize,
    #[serde(default = "default_result_limit")]
    pub default_result_limit: usize,
    #[serde(default = "default_max_result_limit")]
    pub max_result_limit: usize,
    #[serde(default = "default_inclusion_threshold")]
    pub inclusion_threshold: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            candidate_limit: default_candidate_limit(),
            default_result_limit: default_result_limit(),
            max_result_limit: default_max_result_limit(),
            inclusion_threshold: default_inclusion_threshold(),
        }
    }
}

impl MatchingSettings {
    pub fn to_config(&self) -> MatchingConfig {
        MatchingConfig {
            candidate_limit: self.candidate_limit,
            inclusion_threshold: self.inclusion_threshold,
        }
    }

    /// Resolve a requested result limit against the configured default and cap
    pub fn result_limit(&self, requested: Option<u16>) -> usize {
        requested
            .map(usize::from)
            .unwrap_or(self.default_result_limit)
            .min(self.max_result_limit)
    }
}

fn default_candidate_limit() -> usize { 100 }
fn default_result_limit() -> usize { 20 }
fn default_max_result_limit() -> usize { 100 }
fn default_inclusion_threshold() -> f64 { 30.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct DuplicateSettings {
    #[serde(default = "default_duplicate_threshold")]
    pub threshold: f64,
    #[serde(default = "default_high_similarity_threshold")]
    pub high_similarity_threshold: f64,
    #[serde(default = "default_similarity_limit")]
    pub similarity_limit: usize,
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,
    #[serde(default)]
    pub weights: WeightsConfig,
}

impl Default for DuplicateSettings {
    fn default() -> Self {
        Self {
            threshold: default_duplicate_threshold(),
            high_similarity_threshold: default_high_similarity_threshold(),
            similarity_limit: default_similarity_limit(),
            fuzzy_threshold: default_fuzzy_threshold(),
            weights: WeightsConfig::default(),
        }
    }
}

impl DuplicateSettings {
    pub fn to_config(&self) -> ScreeningConfig {
        ScreeningConfig {
            threshold: self.threshold,
            high_similarity_threshold: self.high_similarity_threshold,
            similarity_limit: self.similarity_limit,
            fuzzy_threshold: self.fuzzy_threshold,
            weights: ListingWeights {
                name: self.weights.name,
                breed: self.weights.breed,
                age: self.weights.age,
                size: self.weights.size,
                color: self.weights.color,
                gender: self.weights.gender,
            },
        }
    }
}

fn default_duplicate_threshold() -> f64 { 85.0 }
fn default_high_similarity_threshold() -> f64 { 90.0 }
fn default_similarity_limit() -> usize { 3 }
fn default_fuzzy_threshold() -> f64 { 0.8 }

/// Listing similarity weights
#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_name_weight")]
    pub name: f64,
    #[serde(default = "default_breed_weight")]
    pub breed: f64,
    #[serde(default = "default_age_weight")]
    pub age: f64,
    #[serde(default = "default_size_weight")]
    pub size: f64,
    #[serde(default = "default_color_weight")]
    pub color: f64,
    #[serde(default = "default_gender_weight")]
    pub gender: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            name: default_name_weight(),
            breed: default_breed_weight(),
            age: default_age_weight(),
            size: default_size_weight(),
            color: default_color_weight(),
            gender: default_gender_weight(),
        }
    }
}

fn default_name_weight() -> f64 { 30.0 }
fn default_breed_weight() -> f64 { 25.0 }
fn default_age_weight() -> f64 { 20.0 }
fn default_size_weight() -> f64 { 10.0 }
fn default_color_weight() -> f64 { 10.0 }
fn default_gender_weight() -> f64 { 5.0 }

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
    /// 4. Environment variables (prefixed with PAWTNER__)
    /// 5. `DATABASE_URL` and `LOG_FORMAT`, if set
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PAWTNER__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("PAWTNER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        with_env_overrides(
            builder,
            std::env::var("DATABASE_URL").ok(),
            std::env::var("LOG_FORMAT").ok(),
        )?
        .build()?
        .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PAWTNER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the unprefixed environment variables shared with other services
fn with_env_overrides(
    mut builder: ConfigBuilder<DefaultState>,
    database_url: Option<String>,
    log_format: Option<String>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(database_url) = database_url {
        builder = builder.set_override("database.url", database_url)?;
    }
    if let Some(log_format) = log_format {
        builder = builder.set_override("logging.format", log_format)?;
    }
    Ok(builder)
}
