// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Chain state as stored by the System, Balances and Staking modules, plus the
//! JSON shapes returned by `state_getRuntimeVersion` and `chain_getBlock`.

use crate::impl_scale_struct;
use crate::scale::{AccountId, CompactInt, ScaleEnum};
use serde::Deserialize;

// ================================================================================================
// System / Balances
// ================================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountInfo {
    pub nonce: u32,
    pub refcount: u32,
    pub data: AccountData,
}

impl_scale_struct!(AccountInfo {
    nonce: u32,
    refcount: u32,
    data: AccountData,
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountData {
    pub free: u128,
    pub reserved: u128,
    pub misc_frozen: u128,
    pub fee_frozen: u128,
}

impl_scale_struct!(AccountData {
    free: u128,
    reserved: u128,
    misc_frozen: u128,
    fee_frozen: u128,
});

impl AccountData {
    /// Free balance not held by any lock.
    pub fn spendable(&self) -> u128 {
        self.free.saturating_sub(self.misc_frozen.max(self.fee_frozen))
    }
}

// ================================================================================================
// Staking
// ================================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardDestination {
    Staked,
    Stash,
    Controller,
}

impl ScaleEnum for RewardDestination {
    const NAME: &'static str = "RewardDestination";

    fn from_discriminant(value: u8) -> Option<Self> {
        match value {
            0 => Some(RewardDestination::Staked),
            1 => Some(RewardDestination::Stash),
            2 => Some(RewardDestination::Controller),
            _ => None,
        }
    }

    fn discriminant(&self) -> u8 {
        *self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockChunk {
    pub value: CompactInt,
    pub era: CompactInt,
}

impl_scale_struct!(UnlockChunk {
    value: CompactInt,
    era: CompactInt,
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakingLedger {
    pub stash: AccountId,
    pub total: CompactInt,
    pub active: CompactInt,
    pub unlocking: Vec<UnlockChunk>,
    pub claimed_rewards: Vec<u32>,
}

impl_scale_struct!(StakingLedger {
    stash: AccountId,
    total: CompactInt,
    active: CompactInt,
    unlocking: Vec<UnlockChunk>,
    claimed_rewards: Vec<u32>,
});

impl StakingLedger {
    /// Sum of unlocking chunks that can be withdrawn at `current_era`.
    pub fn unlocked(&self, current_era: u32) -> u128 {
        self.unlocking
            .iter()
            .filter(|chunk| chunk.era.0 <= current_era as u128)
            .map(|chunk| chunk.value.0)
            .sum()
    }

    /// Sum of unlocking chunks still waiting for their era.
    pub fn locked(&self, current_era: u32) -> u128 {
        self.unlocking
            .iter()
            .filter(|chunk| chunk.era.0 > current_era as u128)
            .map(|chunk| chunk.value.0)
            .sum()
    }

    pub fn has_claimed(&self, era: u32) -> bool {
        self.claimed_rewards.contains(&era)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nominations {
    pub targets: Vec<AccountId>,
    pub submitted_in: u32,
    pub suppressed: bool,
}

impl_scale_struct!(Nominations {
    targets: Vec<AccountId>,
    submitted_in: u32,
    suppressed: bool,
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndividualExposure {
    pub who: AccountId,
    pub value: CompactInt,
}

impl_scale_struct!(IndividualExposure {
    who: AccountId,
    value: CompactInt,
});

/// Stake backing a validator in one era. `total` may exceed `own` plus the
/// listed nominators when the exposure is clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exposure {
    pub total: CompactInt,
    pub own: CompactInt,
    pub others: Vec<IndividualExposure>,
}

impl_scale_struct!(Exposure {
    total: CompactInt,
    own: CompactInt,
    others: Vec<IndividualExposure>,
});

impl Exposure {
    pub fn stake_of(&self, who: &AccountId) -> Option<u128> {
        self.others
            .iter()
            .find(|exposure| &exposure.who == who)
            .map(|exposure| exposure.value.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EraRewardPoints {
    pub total: u32,
    pub individual: Vec<(AccountId, u32)>,
}

impl_scale_struct!(EraRewardPoints {
    total: u32,
    individual: Vec<(AccountId, u32)>,
});

impl EraRewardPoints {
    pub fn points_of(&self, validator: &AccountId) -> Option<u32> {
        self.individual
            .iter()
            .find(|(account, _)| account == validator)
            .map(|(_, points)| *points)
    }
}

/// Validator commission in parts per billion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorPrefs {
    pub commission: CompactInt,
}

impl_scale_struct!(ValidatorPrefs { commission: CompactInt });

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEraInfo {
    pub index: u32,
    /// Milliseconds since the epoch, unset until the first block of the era.
    pub start: Option<u64>,
}

impl_scale_struct!(ActiveEraInfo {
    index: u32,
    start: Option<u64>,
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlashingSpans {
    pub span_index: u32,
    pub last_start: u32,
    pub last_nonzero_slash: u32,
    pub prior: Vec<u32>,
}

impl_scale_struct!(SlashingSpans {
    span_index: u32,
    last_start: u32,
    last_nonzero_slash: u32,
    prior: Vec<u32>,
});

impl SlashingSpans {
    /// Argument for `withdraw_unbonded`.
    pub fn span_count(&self) -> u32 {
        self.prior.len() as u32 + 1
    }
}

// ================================================================================================
// JSON responses
// ================================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeVersion {
    pub spec_name: String,
    pub impl_name: String,
    pub authoring_version: u32,
    pub spec_version: u32,
    pub impl_version: u32,
    #[serde(default)]
    pub transaction_version: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignedBlock {
    pub block: Block,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Block {
    pub header: Header,
    #[serde(default)]
    pub extrinsics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub parent_hash: String,
    /// Hex-encoded block number.
    pub number: String,
    pub state_root: String,
    pub extrinsics_root: String,
}

impl Header {
    pub fn block_number(&self) -> Option<u64> {
        let digits = self.number.strip_prefix("0x").unwrap_or(&self.number);
        u64::from_str_radix(digits, 16).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::{ScaleDecode, from_hex};
    use parity_scale_codec::{Compact, Encode};
    use serde_json::json;

    #[test]
    fn test_account_info_layout() {
        let mut bytes = Vec::new();
        5u32.encode_to(&mut bytes);
        1u32.encode_to(&mut bytes);
        1_000u128.encode_to(&mut bytes);
        20u128.encode_to(&mut bytes);
        300u128.encode_to(&mut bytes);
        100u128.encode_to(&mut bytes);

        let info = AccountInfo::decode_all(&bytes).unwrap();
        assert_eq!(info.nonce, 5);
        assert_eq!(info.data.free, 1_000);
        assert_eq!(info.data.spendable(), 700);
        assert_eq!(crate::scale::ScaleEncode::encode(&info), bytes);
    }

    #[test]
    fn test_staking_ledger_unlocking() {
        let mut bytes = vec![0x11; 32];
        Compact(1_000u128).encode_to(&mut bytes);
        Compact(600u128).encode_to(&mut bytes);
        vec![(Compact(150u128), Compact(10u32)), (Compact(250u128), Compact(12u32))]
            .encode_to(&mut bytes);
        vec![7u32, 8u32].encode_to(&mut bytes);

        let ledger = StakingLedger::decode_all(&bytes).unwrap();
        assert_eq!(ledger.stash, AccountId([0x11; 32]));
        assert_eq!(ledger.active, CompactInt(600));
        assert_eq!(ledger.unlocked(9), 0);
        assert_eq!(ledger.unlocked(10), 150);
        assert_eq!(ledger.locked(10), 250);
        assert_eq!(ledger.unlocked(12), 400);
        assert!(ledger.has_claimed(8));
        assert!(!ledger.has_claimed(9));
    }

    #[test]
    fn test_nominations_and_exposure() {
        let mut bytes = Vec::new();
        vec![[0x01u8; 32], [0x02u8; 32]].encode_to(&mut bytes);
        42u32.encode_to(&mut bytes);
        false.encode_to(&mut bytes);
        let nominations = Nominations::decode_all(&bytes).unwrap();
        assert_eq!(nominations.targets.len(), 2);
        assert_eq!(nominations.submitted_in, 42);

        let mut bytes = Vec::new();
        Compact(500u128).encode_to(&mut bytes);
        Compact(300u128).encode_to(&mut bytes);
        vec![([0x03u8; 32], Compact(100u128))].encode_to(&mut bytes);
        let exposure = Exposure::decode_all(&bytes).unwrap();
        assert_eq!(exposure.stake_of(&AccountId([0x03; 32])), Some(100));
        assert_eq!(exposure.stake_of(&AccountId([0x04; 32])), None);
    }

    #[test]
    fn test_reward_points_and_prefs() {
        let mut bytes = Vec::new();
        100u32.encode_to(&mut bytes);
        vec![([0x05u8; 32], 40u32), ([0x06u8; 32], 60u32)].encode_to(&mut bytes);
        let points = EraRewardPoints::decode_all(&bytes).unwrap();
        assert_eq!(points.points_of(&AccountId([0x06; 32])), Some(60));

        let prefs = ValidatorPrefs::decode_all(&Compact(100_000_000u32).encode()).unwrap();
        assert_eq!(prefs.commission, CompactInt(100_000_000));
    }

    #[test]
    fn test_active_era_and_slashing_spans() {
        let era = ActiveEraInfo::decode_all(&from_hex("0x2a0000000100e40b5402000000").unwrap())
            .unwrap();
        assert_eq!(era.index, 42);
        assert_eq!(era.start, Some(10_000_000_000));

        let mut bytes = Vec::new();
        3u32.encode_to(&mut bytes);
        100u32.encode_to(&mut bytes);
        90u32.encode_to(&mut bytes);
        vec![10u32, 20u32].encode_to(&mut bytes);
        let spans = SlashingSpans::decode_all(&bytes).unwrap();
        assert_eq!(spans.span_count(), 3);
    }

    #[test]
    fn test_runtime_version_and_header_json() {
        let version: RuntimeVersion = serde_json::from_value(json!({
            "specName": "polkadot",
            "implName": "parity-polkadot",
            "authoringVersion": 0,
            "specVersion": 25,
            "implVersion": 0,
            "apis": [],
            "transactionVersion": 5
        }))
        .unwrap();
        assert_eq!(version.spec_version, 25);
        assert_eq!(version.transaction_version, 5);

        let block: SignedBlock = serde_json::from_value(json!({
            "block": {
                "header": {
                    "parentHash": "0x00",
                    "number": "0x1a2b",
                    "stateRoot": "0x00",
                    "extrinsicsRoot": "0x00",
                    "digest": {"logs": []}
                },
                "extrinsics": []
            },
            "justification": null
        }))
        .unwrap();
        assert_eq!(block.block.header.block_number(), Some(0x1a2b));
    }
}
