mod error;
mod log;
mod network;
mod staking;
mod substrate;

pub use error::ConfigError;
pub use log::LogConfig;
pub use network::Network;
pub use staking::{StakingConfig, TransactionConfig};
pub use substrate::SubstrateConfig;

use serde::Deserialize;
use std::path::Path;

/// Flat view of the `AIRGAP_*` environment, as `envy` sees it.
#[derive(Debug, Deserialize)]
struct EnvConfig {
    #[serde(default = "default_substrate_url")]
    substrate_url: String,
    #[serde(default)]
    substrate_network: Network,

    #[serde(default = "log::default_level")]
    log_level: String,
    #[serde(default)]
    log_json: bool,
    #[serde(default)]
    log_strip_ansi: bool,
    #[serde(default)]
    log_write: bool,
    #[serde(default = "log::default_write_path")]
    log_write_path: String,
    #[serde(default = "log::default_write_max_file_size")]
    log_write_max_file_size: u64,
    #[serde(default = "log::default_write_max_files")]
    log_write_max_files: usize,

    #[serde(default = "staking::default_era_period")]
    tx_era_period: u64,
    #[serde(default = "staking::default_reward_era_limit")]
    staking_reward_era_limit: u32,
}

fn default_substrate_url() -> String {
    SubstrateConfig::default().url
}

#[derive(Debug, Clone, Default)]
pub struct WalletConfig {
    pub substrate: SubstrateConfig,
    pub log: LogConfig,
    pub transaction: TransactionConfig,
    pub staking: StakingConfig,
}

impl WalletConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let env = envy::prefixed("AIRGAP_").from_env::<EnvConfig>()?;
        let config = Self::from(env);
        config.validate()?;
        Ok(config)
    }

    /// Load a `.env` style file into the process environment, then read it.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenv::from_path(path.as_ref()).map_err(|e| {
            ConfigError::ValidateError(format!(
                "Failed to load env file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_env()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.substrate.validate()?;
        self.log.validate()?;
        self.staking.validate()?;
        Ok(())
    }
}

impl From<EnvConfig> for WalletConfig {
    fn from(env: EnvConfig) -> Self {
        Self {
            substrate: SubstrateConfig {
                url: env.substrate_url,
                network: env.substrate_network,
            },
            log: LogConfig {
                level: env.log_level,
                json: env.log_json,
                strip_ansi: env.log_strip_ansi,
                write: env.log_write,
                write_path: env.log_write_path,
                write_max_file_size: env.log_write_max_file_size,
                write_max_files: env.log_write_max_files,
            },
            transaction: TransactionConfig {
                era_period: env.tx_era_period,
            },
            staking: StakingConfig {
                reward_era_limit: env.staking_reward_era_limit,
            },
        }
    }
}
