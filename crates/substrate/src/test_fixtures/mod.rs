// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Test fixtures: a scripted RPC transport and a V11 metadata builder.
//!
//! Metadata fixtures are encoded with `parity-scale-codec` so that the
//! hand-written decoder is checked against the ecosystem codec.

use crate::metadata::{METADATA_MAGIC, METADATA_VERSION};
use crate::node::{RpcError, RpcTransport};
use crate::scale::{AccountId, to_hex};
use crate::storage_key::{StorageHasher, StorageKeyDeriver};
use parity_scale_codec::Encode;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Genesis hash returned by [`MockTransport::polkadot_like`].
pub const TEST_GENESIS_HASH: [u8; 32] = [0xaa; 32];

/// Hash of block [`TEST_BLOCK_NUMBER`] returned by [`MockTransport::polkadot_like`].
pub const TEST_BLOCK_HASH: [u8; 32] = [0xbb; 32];

/// Head hash for `chain_getBlockHash` without a number. Differs from
/// [`TEST_BLOCK_HASH`] as if a block landed after the height was read.
pub const TEST_HEAD_HASH: [u8; 32] = [0xbc; 32];

pub const TEST_BLOCK_NUMBER: u64 = 1_000_003;

pub const TEST_SPEC_VERSION: u32 = 25;

pub const TEST_TRANSACTION_VERSION: u32 = 5;

/// Fee reported by the mocked `payment_queryInfo`.
pub const TEST_PARTIAL_FEE: u128 = 1_000_000;

pub const TEST_EXISTENTIAL_DEPOSIT: u128 = 10_000_000_000;

pub fn account(byte: u8) -> AccountId {
    AccountId([byte; 32])
}

/// Hex storage key as the node client derives it.
pub fn storage_key(module: &str, entry: &str, args: &[(StorageHasher, Vec<u8>)]) -> String {
    let hashers: Vec<StorageHasher> = args.iter().map(|(hasher, _)| *hasher).collect();
    let encoded: Vec<Vec<u8>> = args.iter().map(|(_, arg)| arg.clone()).collect();
    StorageKeyDeriver::default()
        .derive_raw(module, entry, &hashers, &encoded)
        .map(|key| key.to_hex())
        .unwrap_or_default()
}

// ================================================================================================
// Metadata builder
// ================================================================================================

#[derive(Encode)]
struct ModuleFixture {
    name: String,
    storage: Option<StorageFixture>,
    calls: Option<Vec<CallFixture>>,
    events: Option<Vec<EventFixture>>,
    constants: Vec<ConstantFixture>,
    errors: Vec<ErrorFixture>,
}

#[derive(Encode)]
struct StorageFixture {
    prefix: String,
    entries: Vec<StorageEntryFixture>,
}

#[derive(Encode)]
struct StorageEntryFixture {
    name: String,
    modifier: u8,
    ty: StorageEntryTypeFixture,
    default: Vec<u8>,
    docs: Vec<String>,
}

#[derive(Encode)]
enum StorageEntryTypeFixture {
    Plain(String),
    Map {
        hasher: u8,
        key: String,
        value: String,
        unused: bool,
    },
    DoubleMap {
        hasher: u8,
        key1: String,
        key2: String,
        value: String,
        key2_hasher: u8,
    },
}

#[derive(Encode)]
struct CallFixture {
    name: String,
    args: Vec<(String, String)>,
    docs: Vec<String>,
}

#[derive(Encode)]
struct EventFixture {
    name: String,
    args: Vec<String>,
    docs: Vec<String>,
}

#[derive(Encode)]
struct ConstantFixture {
    name: String,
    ty: String,
    value: Vec<u8>,
    docs: Vec<String>,
}

#[derive(Encode)]
struct ErrorFixture {
    name: String,
    docs: Vec<String>,
}

/// Builds V11 metadata blobs module by module. Storage, call, event and
/// constant methods apply to the module added last.
#[derive(Default)]
pub struct MetadataBuilder {
    modules: Vec<ModuleFixture>,
}

impl MetadataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn module(mut self, name: &str) -> Self {
        self.modules.push(ModuleFixture {
            name: name.to_string(),
            storage: None,
            calls: None,
            events: None,
            constants: Vec::new(),
            errors: Vec::new(),
        });
        self
    }

    fn current(&mut self) -> &mut ModuleFixture {
        self.modules
            .last_mut()
            .expect("add a module before its items")
    }

    fn storage_entry(mut self, name: &str, ty: StorageEntryTypeFixture) -> Self {
        let module = self.current();
        let prefix = module.name.clone();
        module
            .storage
            .get_or_insert_with(|| StorageFixture {
                prefix,
                entries: Vec::new(),
            })
            .entries
            .push(StorageEntryFixture {
                name: name.to_string(),
                modifier: 0,
                ty,
                default: vec![0],
                docs: vec![format!("The {} entry.", name)],
            });
        self
    }

    pub fn plain_storage(self, name: &str, value: &str) -> Self {
        self.storage_entry(name, StorageEntryTypeFixture::Plain(value.to_string()))
    }

    pub fn map_storage(self, name: &str, hasher: StorageHasher, key: &str, value: &str) -> Self {
        self.storage_entry(
            name,
            StorageEntryTypeFixture::Map {
                hasher: hasher as u8,
                key: key.to_string(),
                value: value.to_string(),
                unused: false,
            },
        )
    }

    pub fn double_map_storage(
        self,
        name: &str,
        hasher: StorageHasher,
        key2_hasher: StorageHasher,
    ) -> Self {
        self.storage_entry(
            name,
            StorageEntryTypeFixture::DoubleMap {
                hasher: hasher as u8,
                key1: "EraIndex".to_string(),
                key2: "AccountId".to_string(),
                value: "Exposure".to_string(),
                key2_hasher: key2_hasher as u8,
            },
        )
    }

    /// Declare an empty call list, which still takes a dispatch slot.
    pub fn empty_calls(mut self) -> Self {
        self.current().calls.get_or_insert_with(Vec::new);
        self
    }

    pub fn call(mut self, name: &str, args: &[(&str, &str)]) -> Self {
        self.current()
            .calls
            .get_or_insert_with(Vec::new)
            .push(CallFixture {
                name: name.to_string(),
                args: args
                    .iter()
                    .map(|(name, ty)| (name.to_string(), ty.to_string()))
                    .collect(),
                docs: Vec::new(),
            });
        self
    }

    pub fn event(mut self, name: &str, args: &[&str]) -> Self {
        self.current()
            .events
            .get_or_insert_with(Vec::new)
            .push(EventFixture {
                name: name.to_string(),
                args: args.iter().map(|arg| arg.to_string()).collect(),
                docs: Vec::new(),
            });
        self
    }

    pub fn constant(mut self, name: &str, ty: &str, value: Vec<u8>) -> Self {
        self.current().constants.push(ConstantFixture {
            name: name.to_string(),
            ty: ty.to_string(),
            value,
            docs: Vec::new(),
        });
        self.current().errors.push(ErrorFixture {
            name: format!("Invalid{}", name),
            docs: Vec::new(),
        });
        self
    }

    /// Call layout of a Polkadot runtime: Balances at index 5, Staking at 7.
    pub fn polkadot_like() -> Self {
        let mut builder = MetadataBuilder::new()
            .module("System")
            .map_storage("Account", StorageHasher::Blake2_128Concat, "AccountId", "AccountInfo")
            .plain_storage("Number", "BlockNumber")
            .call("remark", &[("_remark", "Vec<u8>")])
            .module("Scheduler")
            .empty_calls()
            .module("Babe")
            .constant("EpochDuration", "u64", 2_400u64.encode())
            .constant("ExpectedBlockTime", "Moment", 6_000u64.encode())
            .empty_calls()
            .module("Timestamp")
            .plain_storage("Now", "Moment")
            .call("set", &[("now", "Compact<Moment>")])
            .module("Indices")
            .call("claim", &[("index", "AccountIndex")])
            .module("Balances")
            .call("transfer", &[("dest", "LookupSource"), ("value", "Compact<Balance>")])
            .call("set_balance", &[])
            .call("force_transfer", &[])
            .call("transfer_keep_alive", &[])
            .constant("ExistentialDeposit", "Balance", TEST_EXISTENTIAL_DEPOSIT.encode())
            .event("Transfer", &["AccountId", "AccountId", "Balance"])
            .module("Authorship")
            .call("set_uncles", &[])
            .module("Staking")
            .plain_storage("CurrentEra", "EraIndex")
            .plain_storage("ActiveEra", "ActiveEraInfo")
            .map_storage("Bonded", StorageHasher::Twox64Concat, "AccountId", "AccountId")
            .map_storage("Ledger", StorageHasher::Blake2_128Concat, "AccountId", "StakingLedger")
            .map_storage("Payee", StorageHasher::Twox64Concat, "AccountId", "RewardDestination")
            .map_storage("Nominators", StorageHasher::Twox64Concat, "AccountId", "Nominations")
            .map_storage("Invulnerables", StorageHasher::Twox64Concat, "u32", "Vec<AccountId>")
            .double_map_storage(
                "ErasStakersClipped",
                StorageHasher::Twox64Concat,
                StorageHasher::Twox64Concat,
            )
            .double_map_storage(
                "ErasValidatorPrefs",
                StorageHasher::Twox64Concat,
                StorageHasher::Twox64Concat,
            )
            .map_storage("ErasValidatorReward", StorageHasher::Twox64Concat, "EraIndex", "Balance")
            .map_storage(
                "ErasRewardPoints",
                StorageHasher::Twox64Concat,
                "EraIndex",
                "EraRewardPoints",
            )
            .map_storage("SlashingSpans", StorageHasher::Twox64Concat, "AccountId", "SlashingSpans")
            .constant("SessionsPerEra", "SessionIndex", 6u32.encode())
            .constant("BondingDuration", "EraIndex", 28u32.encode());

        for call in [
            "bond",
            "bond_extra",
            "unbond",
            "withdraw_unbonded",
            "validate",
            "nominate",
            "chill",
            "set_payee",
            "set_controller",
            "set_validator_count",
            "increase_validator_count",
            "scale_validator_count",
            "force_no_eras",
            "force_new_era",
            "set_invulnerables",
            "force_unstake",
            "force_new_era_always",
            "cancel_deferred_slash",
            "payout_stakers",
            "rebond",
        ] {
            builder = builder.call(call, &[]);
        }

        builder
            .module("Offences")
            .module("Session")
            .plain_storage("Validators", "Vec<ValidatorId>")
            .call("set_keys", &[])
            .call("purge_keys", &[])
            .module("Utility")
            .call("batch", &[("calls", "Vec<Call>")])
    }

    pub fn build(self) -> Vec<u8> {
        let mut bytes = Vec::new();
        METADATA_MAGIC.encode_to(&mut bytes);
        METADATA_VERSION.encode_to(&mut bytes);
        self.modules.encode_to(&mut bytes);
        // extrinsic metadata: version, signed extensions
        4u8.encode_to(&mut bytes);
        vec!["CheckSpecVersion".to_string(), "CheckNonce".to_string()].encode_to(&mut bytes);
        bytes
    }
}

// ================================================================================================
// Mock transport
// ================================================================================================

/// Scripted [`RpcTransport`]. Responses are matched on `(method, params)`
/// first, then on the method alone. Unscripted `state_getStorage` reads
/// answer `null`; any other unscripted method is a JSON-RPC error.
#[derive(Default)]
pub struct MockTransport {
    exact: Mutex<HashMap<(String, String), Value>>,
    by_method: Mutex<HashMap<String, Value>>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata, chain info and fee responses of a Polkadot-like node.
    pub fn polkadot_like() -> Self {
        Self::new()
            .with_method(
                "state_getMetadata",
                json!(to_hex(&MetadataBuilder::polkadot_like().build())),
            )
            .with_method(
                "state_getRuntimeVersion",
                json!({
                    "specName": "polkadot",
                    "implName": "parity-polkadot",
                    "authoringVersion": 0,
                    "specVersion": TEST_SPEC_VERSION,
                    "implVersion": 0,
                    "transactionVersion": TEST_TRANSACTION_VERSION
                }),
            )
            .with_response("chain_getBlockHash", vec![json!(0)], json!(to_hex(&TEST_GENESIS_HASH)))
            .with_response(
                "chain_getBlockHash",
                vec![json!(TEST_BLOCK_NUMBER)],
                json!(to_hex(&TEST_BLOCK_HASH)),
            )
            .with_response("chain_getBlockHash", vec![], json!(to_hex(&TEST_HEAD_HASH)))
            .with_method(
                "chain_getBlock",
                json!({
                    "block": {
                        "header": {
                            "parentHash": to_hex(&[0u8; 32]),
                            "number": format!("{:#x}", TEST_BLOCK_NUMBER),
                            "stateRoot": to_hex(&[0u8; 32]),
                            "extrinsicsRoot": to_hex(&[0u8; 32]),
                            "digest": {"logs": []}
                        },
                        "extrinsics": []
                    },
                    "justification": null
                }),
            )
            .with_method(
                "payment_queryInfo",
                json!({
                    "weight": 195_000_000u64,
                    "class": "normal",
                    "partialFee": TEST_PARTIAL_FEE.to_string()
                }),
            )
            .with_method("author_submitExtrinsic", json!(to_hex(&[0xcc; 32])))
    }

    pub fn with_response(self, method: &str, params: Vec<Value>, result: Value) -> Self {
        if let Ok(mut exact) = self.exact.lock() {
            exact.insert((method.to_string(), Value::Array(params).to_string()), result);
        }
        self
    }

    pub fn with_method(self, method: &str, result: Value) -> Self {
        if let Ok(mut by_method) = self.by_method.lock() {
            by_method.insert(method.to_string(), result);
        }
        self
    }

    pub fn with_storage(self, key: &str, value: &[u8]) -> Self {
        self.with_response("state_getStorage", vec![json!(key)], json!(to_hex(value)))
    }

    /// Delay every response to `method`, to widen race windows.
    pub fn with_delay(mut self, method: &str, delay: Duration) -> Self {
        self.delays.insert(method.to_string(), delay);
        self
    }

    pub fn calls_to(&self, method: &str) -> usize {
        self.calls
            .lock()
            .map(|calls| calls.iter().filter(|(m, _)| m == method).count())
            .unwrap_or(0)
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn respond(&self, method: &str, params: &[Value]) -> Result<Value, RpcError> {
        let key = (method.to_string(), Value::Array(params.to_vec()).to_string());
        if let Some(value) = self.exact.lock().ok().and_then(|exact| exact.get(&key).cloned()) {
            return Ok(value);
        }
        if let Some(value) = self
            .by_method
            .lock()
            .ok()
            .and_then(|by_method| by_method.get(method).cloned())
        {
            return Ok(value);
        }
        if method == "state_getStorage" {
            return Ok(Value::Null);
        }
        Err(RpcError::Rpc {
            method: method.to_string(),
            code: -32601,
            message: "Method not found".to_string(),
        })
    }
}

impl RpcTransport for MockTransport {
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, RpcError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((method.to_string(), params.clone()));
        }
        if let Some(delay) = self.delays.get(method) {
            tokio::time::sleep(*delay).await;
        }
        self.respond(method, &params)
    }
}
