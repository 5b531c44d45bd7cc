use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration from environment: {0}")]
    EnvError(#[from] envy::Error),

    #[error("Unknown network '{0}'. Must be one of: polkadot, kusama, westend")]
    UnknownNetwork(String),

    #[error("Configuration validation failed: {0}")]
    ValidateError(String),
}
