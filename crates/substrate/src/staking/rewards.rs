// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Points-proportional era reward distribution.
//!
//! 1. validator_era_payout = validator_points / total_era_points * total_era_payout
//! 2. commission_payout = validator_era_payout * commission / 1_000_000_000
//! 3. stakers_payout = validator_era_payout - commission_payout
//! 4. nominator_payout = stakers_payout * nominator_stake / total_exposure

use crate::consts::PERBILL;
use crate::scale::AccountId;
use crate::state::{EraRewardPoints, Exposure, ValidatorPrefs};

/// Validator's share of the era payout.
pub fn validator_reward(validator_points: u32, total_points: u32, total_reward: u128) -> u128 {
    if total_points == 0 {
        return 0;
    }
    total_reward.saturating_mul(validator_points as u128) / total_points as u128
}

/// Nominator's share of a validator's era payout after commission.
///
/// `commission` is in parts per billion.
pub fn nominator_reward(
    validator_reward: u128,
    commission: u32,
    nominator_stake: u128,
    total_exposure: u128,
) -> u128 {
    if total_exposure == 0 {
        return 0;
    }
    let commission = (commission as u128).min(PERBILL);
    let commission_payout = validator_reward.saturating_mul(commission) / PERBILL;
    let stakers_payout = validator_reward.saturating_sub(commission_payout);
    stakers_payout.saturating_mul(nominator_stake) / total_exposure
}

/// Per-validator chain data for one era.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorEraData {
    pub validator: AccountId,
    pub exposure: Option<Exposure>,
    pub prefs: Option<ValidatorPrefs>,
}

/// Everything needed to compute rewards for one past era.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EraSnapshot {
    pub era: u32,
    pub total_reward: Option<u128>,
    pub points: Option<EraRewardPoints>,
    pub validators: Vec<ValidatorEraData>,
}

/// A nominator's reward through one validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorShare {
    pub validator: AccountId,
    pub stake: u128,
    pub reward: u128,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EraReward {
    pub era: u32,
    pub amount: u128,
    pub shares: Vec<ValidatorShare>,
}

impl EraSnapshot {
    /// Reward of `validator` in this era, if reward and points are known.
    pub fn validator_reward(&self, validator: &AccountId) -> Option<u128> {
        let total_reward = self.total_reward?;
        let points = self.points.as_ref()?;
        let validator_points = points.points_of(validator)?;
        Some(validator_reward(validator_points, points.total, total_reward))
    }

    /// Reward of `nominator` summed over the validators it backed in this era.
    ///
    /// Validators with missing exposure or commission, and eras with a
    /// missing reward or points, contribute nothing.
    pub fn nominator_reward(&self, nominator: &AccountId) -> Option<EraReward> {
        let mut shares = Vec::new();

        for data in &self.validators {
            let Some(validator_reward) = self.validator_reward(&data.validator) else {
                continue;
            };
            let (Some(exposure), Some(prefs)) = (&data.exposure, &data.prefs) else {
                continue;
            };
            let Some(stake) = exposure.stake_of(nominator) else {
                continue;
            };
            let commission = prefs.commission.to_u32().unwrap_or(PERBILL as u32);

            shares.push(ValidatorShare {
                validator: data.validator,
                stake,
                reward: nominator_reward(validator_reward, commission, stake, exposure.total.0),
            });
        }

        if shares.is_empty() {
            tracing::debug!(era = self.era, "No reward data for era, skipping");
            return None;
        }

        Some(EraReward {
            era: self.era,
            amount: shares.iter().map(|share| share.reward).sum(),
            shares,
        })
    }
}
