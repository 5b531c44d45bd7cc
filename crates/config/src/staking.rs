use crate::ConfigError;

#[derive(Debug, Clone)]
pub struct StakingConfig {
    /// Number of past eras scanned when collecting nominator rewards
    ///
    /// Env: AIRGAP_STAKING_REWARD_ERA_LIMIT
    /// Default: 14
    pub reward_era_limit: u32,
}

pub(crate) fn default_reward_era_limit() -> u32 {
    14
}

impl StakingConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.reward_era_limit == 0 {
            return Err(ConfigError::ValidateError(
                "Reward era limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            reward_era_limit: default_reward_era_limit(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransactionConfig {
    /// Mortality period (in blocks) of constructed transactions, 0 for immortal
    ///
    /// Env: AIRGAP_TX_ERA_PERIOD
    /// Default: 50
    pub era_period: u64,
}

pub(crate) fn default_era_period() -> u64 {
    50
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            era_period: default_era_period(),
        }
    }
}
