// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Staking reward engine and the available-actions state machine.
//!
//! Reward arithmetic lives in [`rewards`] and is pure; this module gathers the
//! era-indexed chain data it needs through the node client.

mod actions;
mod rewards;

pub use actions::{StakingActionContext, StakingActionType, StakingState, available_actions};
pub use rewards::{
    EraReward, EraSnapshot, ValidatorEraData, ValidatorShare, nominator_reward, validator_reward,
};

use crate::node::{NodeClient, NodeError, RpcTransport};
use crate::scale::AccountId;
use crate::state::{ActiveEraInfo, StakingLedger};
use futures::future::try_join_all;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StakingError {
    #[error(transparent)]
    Node(#[from] NodeError),

    #[error("No active era found")]
    NoActiveEra,

    #[error("Expected era duration is unavailable: {0}")]
    EraDurationUnavailable(#[source] NodeError),
}

/// Reward of one past era, with its collection status and estimated time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NominatorReward {
    pub era: u32,
    pub amount: u128,
    pub shares: Vec<ValidatorShare>,
    /// Estimated start of the era in milliseconds since the epoch.
    pub timestamp: Option<u64>,
    /// Whether every validator paying this reward has already claimed the era.
    pub collected: bool,
}

/// One unlocking chunk with the time it is expected to become withdrawable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockingDetails {
    pub value: u128,
    pub era: u32,
    pub expected_unlock: Option<u64>,
}

/// Estimated start of `era`, extrapolated from the active era's start.
pub fn era_timestamp(active_era: &ActiveEraInfo, era: u32, era_duration: u64) -> Option<u64> {
    let start = active_era.start?;
    if era >= active_era.index {
        let ahead = (era - active_era.index) as u64;
        start.checked_add(ahead.checked_mul(era_duration)?)
    } else {
        let behind = (active_era.index - era) as u64;
        start.checked_sub(behind.checked_mul(era_duration)?)
    }
}

pub fn unlocking_schedule(
    ledger: &StakingLedger,
    active_era: &ActiveEraInfo,
    era_duration: u64,
) -> Vec<UnlockingDetails> {
    ledger
        .unlocking
        .iter()
        .map(|chunk| {
            let era = chunk.era.to_u32().unwrap_or(u32::MAX);
            UnlockingDetails {
                value: chunk.value.0,
                era,
                expected_unlock: era_timestamp(active_era, era, era_duration),
            }
        })
        .collect()
}

/// Eras `[current - 1, current - limit]`, newest first.
pub fn past_eras(current_era: u32, limit: u32) -> Vec<u32> {
    (1..=limit)
        .filter_map(|back| current_era.checked_sub(back))
        .collect()
}

async fn fetch_era_snapshot<T: RpcTransport>(
    node: &NodeClient<T>,
    era: u32,
    validators: &[AccountId],
) -> Result<EraSnapshot, NodeError> {
    let (total_reward, points) =
        futures::try_join!(node.get_validator_reward(era), node.get_reward_points(era))?;

    let validators = try_join_all(validators.iter().map(|validator| async move {
        let (exposure, prefs) = futures::try_join!(
            node.get_validator_exposure(era, validator),
            node.get_validator_prefs(era, validator)
        )?;
        Ok::<_, NodeError>(ValidatorEraData {
            validator: *validator,
            exposure,
            prefs,
        })
    }))
    .await?;

    Ok(EraSnapshot {
        era,
        total_reward,
        points,
        validators,
    })
}

/// Eras already claimed by `validator`, read from its controller's ledger.
async fn fetch_claimed_eras<T: RpcTransport>(
    node: &NodeClient<T>,
    validator: &AccountId,
) -> Result<HashSet<u32>, NodeError> {
    let Some(controller) = node.get_bonded(validator).await? else {
        return Ok(HashSet::new());
    };
    let ledger = node.get_staking_ledger(&controller).await?;
    Ok(ledger
        .map(|ledger| ledger.claimed_rewards.into_iter().collect())
        .unwrap_or_default())
}

/// Rewards of `nominator` through `targets` over the last `limit` eras.
///
/// Eras with incomplete data are left out; the whole call fails when the
/// expected era duration or the active era cannot be read.
pub async fn nominator_rewards<T: RpcTransport>(
    node: &NodeClient<T>,
    nominator: &AccountId,
    targets: &[AccountId],
    limit: u32,
) -> Result<Vec<NominatorReward>, StakingError> {
    let era_duration = node
        .get_expected_era_duration()
        .await
        .map_err(StakingError::EraDurationUnavailable)?;
    let active_era = node.get_active_era().await?.ok_or(StakingError::NoActiveEra)?;

    let eras = past_eras(active_era.index, limit);
    let snapshots =
        try_join_all(eras.iter().map(|era| fetch_era_snapshot(node, *era, targets))).await?;
    let claimed =
        try_join_all(targets.iter().map(|target| fetch_claimed_eras(node, target))).await?;

    let rewards: Vec<NominatorReward> = snapshots
        .iter()
        .filter_map(|snapshot| snapshot.nominator_reward(nominator))
        .map(|reward| {
            let collected = reward.shares.iter().all(|share| {
                targets
                    .iter()
                    .position(|target| *target == share.validator)
                    .is_some_and(|i| claimed[i].contains(&reward.era))
            });
            NominatorReward {
                era: reward.era,
                amount: reward.amount,
                timestamp: era_timestamp(&active_era, reward.era, era_duration),
                shares: reward.shares,
                collected,
            }
        })
        .collect();

    tracing::debug!(
        eras = eras.len(),
        rewarded_eras = rewards.len(),
        "Computed nominator rewards"
    );

    Ok(rewards)
}

/// Whether `nominator` backs any of `targets` in `era`.
pub async fn is_exposed<T: RpcTransport>(
    node: &NodeClient<T>,
    nominator: &AccountId,
    targets: &[AccountId],
    era: u32,
) -> Result<bool, NodeError> {
    let exposures = try_join_all(
        targets
            .iter()
            .map(|target| node.get_validator_exposure(era, target)),
    )
    .await?;
    Ok(exposures
        .iter()
        .flatten()
        .any(|exposure| exposure.stake_of(nominator).is_some()))
}
