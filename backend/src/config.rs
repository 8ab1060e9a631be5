//! Configuration management for the GeoYIELD services
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with GEOYIELD_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::dashboard::PricingAssumptions;
use shared::dataset::DEFAULT_DATASET_PATH;
use shared::generator::DEFAULT_RECORD_COUNT;
use shared::report::DEFAULT_BOTTOM_N;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    pub server: ServerConfig,

    /// Location of the static farm dataset
    pub dataset: DatasetConfig,

    /// Settings for the `geoyield-gen` binary
    pub generator: GeneratorConfig,

    /// Unit prices behind the economic estimates
    pub dashboard: PricingAssumptions,

    pub reports: ReportsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetConfig {
    /// JSON file read by the server and written by the generator
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneratorConfig {
    pub record_count: usize,

    /// Fixed seed for reproducible output; fresh entropy when absent
    pub seed: Option<u64>,

    pub enforce_unique_ids: bool,

    /// Indent the written JSON
    pub pretty: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportsConfig {
    pub default_page_size: u32,
    pub bottom_n: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("GEOYIELD_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("dataset.path", DEFAULT_DATASET_PATH)?
            .set_default("generator.record_count", DEFAULT_RECORD_COUNT as u64)?
            .set_default("generator.enforce_unique_ids", true)?
            .set_default("generator.pretty", true)?
            .set_default("dashboard.price_per_ton_inr", 20_000)?
            .set_default("dashboard.cost_per_hectare_inr", 5_000)?
            .set_default("dashboard.insurance_per_hectare_inr", 10_000)?
            .set_default("reports.default_page_size", 10)?
            .set_default("reports.bottom_n", DEFAULT_BOTTOM_N as u64)?
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            .add_source(
                Environment::with_prefix("GEOYIELD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            dataset: DatasetConfig {
                path: DEFAULT_DATASET_PATH.to_string(),
            },
            generator: GeneratorConfig {
                record_count: DEFAULT_RECORD_COUNT,
                seed: None,
                enforce_unique_ids: true,
                pretty: true,
            },
            dashboard: PricingAssumptions::default(),
            reports: ReportsConfig {
                default_page_size: 10,
                bottom_n: DEFAULT_BOTTOM_N,
            },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
