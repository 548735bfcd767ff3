//! Application configuration module
//!
//! Loads typed configuration from environment variables with the `config`
//! and `dotenvy` crates. Variables use the `TICKET_GATE` prefix and `__`
//! between nesting levels.
//!
//! # Example
//!
//! ```no_run
//! use ticket_gate::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! config.logging.init().expect("Failed to set up logging");
//!
//! println!("Talking to {}", config.chain.rpc_url);
//! ```

mod chain;
mod error;
mod logging;
mod role_hints;

pub use chain::{ChainConfig, Environment};
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use role_hints::{parse_digest, RoleDigest, RoleHintConfig};

use serde::Deserialize;

/// Root configuration
///
/// Load with [`AppConfig::load()`], then check with [`AppConfig::validate()`].
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Node endpoint and ticket contract
    pub chain: ChainConfig,

    /// Optional role hash hints
    #[serde(default)]
    pub roles: RoleHintConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `.env` if present, then `TICKET_GATE__*` variables:
    ///
    /// - `TICKET_GATE__CHAIN__RPC_URL=...` -> `chain.rpc_url`
    /// - `TICKET_GATE__ROLES__VENUE_HASH=...` -> `roles.venue_hash`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or cannot be
    /// parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TICKET_GATE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.chain.validate()?;
        self.roles.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.chain.is_production()
    }
}
