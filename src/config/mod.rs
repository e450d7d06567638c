use crate::core::{AppError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub affordability: AffordabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

/// Tier thresholds for the dashboard's "Available to Spend" figure
#[derive(Debug, Clone)]
pub struct AffordabilityConfig {
    /// Boundary between the caution and healthy tiers (RM)
    pub caution_threshold: Decimal,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            affordability: AffordabilityConfig {
                caution_threshold: env::var("AFFORDABILITY_CAUTION_THRESHOLD")
                    .map(|v| Decimal::from_str(&v))
                    .unwrap_or(Ok(Decimal::new(500, 0)))
                    .map_err(|_| {
                        AppError::Configuration(
                            "Invalid AFFORDABILITY_CAUTION_THRESHOLD".to_string(),
                        )
                    })?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.affordability.caution_threshold < Decimal::ZERO {
            return Err(AppError::Configuration(
                "Affordability caution threshold cannot be negative".to_string(),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(AppError::Configuration(
                "Database max connections must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
