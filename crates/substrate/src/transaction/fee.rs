// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fee bookkeeping: the `payment_queryInfo` response, the per-type cache used
//! for batch estimates and placeholder arguments for types not yet seen.

use super::method::{MethodArgs, TransactionType};
use crate::consts::BATCH_FEE_MARGIN;
use crate::scale::{AccountId, CompactInt};
use crate::state::RewardDestination;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

/// Result of `payment_queryInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeInfo {
    #[serde(default)]
    pub class: String,
    #[serde(deserialize_with = "deserialize_balance")]
    pub partial_fee: u128,
}

/// Balances arrive either as JSON numbers or as decimal/hex strings.
fn deserialize_balance<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_u64()
            .map(u128::from)
            .ok_or_else(|| D::Error::custom(format!("invalid balance: {}", number))),
        Value::String(text) => {
            let parsed = match text.strip_prefix("0x") {
                Some(hex) => u128::from_str_radix(hex, 16),
                None => text.parse::<u128>(),
            };
            parsed.map_err(|e| D::Error::custom(format!("invalid balance {}: {}", text, e)))
        }
        other => Err(D::Error::custom(format!("invalid balance: {}", other))),
    }
}

/// Last observed fee per transaction type.
#[derive(Debug, Default)]
pub struct FeeCache {
    fees: RwLock<HashMap<TransactionType, u128>>,
}

impl FeeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tx_type: TransactionType) -> Option<u128> {
        self.fees.read().ok()?.get(&tx_type).copied()
    }

    pub fn record(&self, tx_type: TransactionType, fee: u128) {
        if let Ok(mut fees) = self.fees.write() {
            fees.insert(tx_type, fee);
        }
    }

    /// Sum of per-member fees with the batch safety margin applied.
    pub fn with_batch_margin(total: u128) -> u128 {
        let (numerator, denominator) = BATCH_FEE_MARGIN;
        total.saturating_mul(numerator) / denominator
    }
}

/// Representative arguments used to fee-query a transaction type that has
/// no cached fee yet.
pub fn placeholder_args(tx_type: TransactionType) -> MethodArgs {
    let account = AccountId([0; 32]);
    let value = CompactInt(1);
    match tx_type {
        TransactionType::Transfer => MethodArgs::Transfer {
            dest: account,
            value,
        },
        TransactionType::Bond => MethodArgs::Bond {
            controller: account,
            value,
            payee: RewardDestination::Staked,
        },
        TransactionType::Unbond => MethodArgs::Unbond { value },
        TransactionType::Rebond => MethodArgs::Rebond { value },
        TransactionType::BondExtra => MethodArgs::BondExtra { value },
        TransactionType::WithdrawUnbonded => MethodArgs::WithdrawUnbonded {
            num_slashing_spans: 0,
        },
        TransactionType::Nominate => MethodArgs::Nominate {
            targets: vec![account],
        },
        TransactionType::CancelNomination => MethodArgs::CancelNomination,
        TransactionType::CollectPayout => MethodArgs::CollectPayout {
            validator_stash: account,
            era: 0,
        },
        TransactionType::SetPayee => MethodArgs::SetPayee {
            payee: RewardDestination::Staked,
        },
        TransactionType::SetController => MethodArgs::SetController {
            controller: account,
        },
        TransactionType::SubmitBatch => MethodArgs::SubmitBatch { calls: Vec::new() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fee_info_accepts_string_and_number() {
        let info: FeeInfo = serde_json::from_value(json!({
            "weight": 195000000,
            "class": "normal",
            "partialFee": "165600000"
        }))
        .unwrap();
        assert_eq!(info.partial_fee, 165_600_000);

        let info: FeeInfo = serde_json::from_value(json!({"partialFee": 42})).unwrap();
        assert_eq!(info.partial_fee, 42);

        let info: FeeInfo = serde_json::from_value(json!({"partialFee": "0x10"})).unwrap();
        assert_eq!(info.partial_fee, 16);

        assert!(serde_json::from_value::<FeeInfo>(json!({"partialFee": "abc"})).is_err());
    }

    #[test]
    fn test_cache_and_margin() {
        let cache = FeeCache::new();
        assert_eq!(cache.get(TransactionType::Unbond), None);
        cache.record(TransactionType::Unbond, 100);
        assert_eq!(cache.get(TransactionType::Unbond), Some(100));
        assert_eq!(FeeCache::with_batch_margin(250), 300);
    }

    #[test]
    fn test_placeholders_match_their_type() {
        for tx_type in TransactionType::ALL {
            assert_eq!(placeholder_args(tx_type).tx_type(), tx_type);
        }
    }
}
