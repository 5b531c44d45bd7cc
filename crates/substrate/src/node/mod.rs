// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Typed, read-mostly access to a Substrate node.
//!
//! Metadata is fetched and indexed once per client: concurrent first callers
//! share the same in-flight fetch. Storage reads are addressed through the
//! client's own storage key deriver and served from a short-TTL cache.

mod cache;
mod rpc;

pub use cache::ReadCache;
pub use rpc::{HttpTransport, RpcError, RpcTransport};

use crate::metadata::{CallId, MetadataError, MetadataIndex, lookup_key};
use crate::scale::{
    AccountId, Enum, Hash, ScaleDecode, ScaleEncode, ScaleError, from_hex,
};
use crate::state::{
    AccountInfo, ActiveEraInfo, EraRewardPoints, Exposure, Nominations, RewardDestination,
    RuntimeVersion, SignedBlock, SlashingSpans, StakingLedger, ValidatorPrefs,
};
use crate::storage_key::{StorageKeyDeriver, StorageKeyError};
use crate::transaction::{FeeInfo, TransactionError, TransactionType};
use airgap_substrate_config::{Network, SubstrateConfig};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("Failed to decode node response: {0}")]
    Scale(#[from] ScaleError),

    #[error(transparent)]
    StorageKey(#[from] StorageKeyError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error("Invalid response from {method}: {reason}")]
    InvalidResponse { method: &'static str, reason: String },

    #[error("Could not {0}: required chain data is unavailable")]
    MissingAggregate(&'static str),
}

pub struct NodeClient<T: RpcTransport = HttpTransport> {
    transport: T,
    network: Network,
    metadata: OnceCell<Arc<MetadataIndex>>,
    cache: ReadCache,
    storage_keys: StorageKeyDeriver,
}

impl NodeClient<HttpTransport> {
    pub fn from_config(config: &SubstrateConfig) -> Self {
        Self::new(HttpTransport::new(config.url.clone()), config.network)
    }
}

impl<T: RpcTransport> NodeClient<T> {
    pub fn new(transport: T, network: Network) -> Self {
        Self {
            transport,
            network,
            metadata: OnceCell::new(),
            cache: ReadCache::new(network.cache_ttl()),
            storage_keys: StorageKeyDeriver::default(),
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ============================================================================================
    // Raw RPC
    // ============================================================================================

    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, NodeError> {
        if !ReadCache::is_cacheable(method) {
            return Ok(self.transport.request(method, params).await?);
        }

        let key = ReadCache::key(method, &params);
        if let Some(value) = self.cache.get(&key) {
            tracing::trace!(method, "read cache hit");
            return Ok(value);
        }

        tracing::trace!(method, "read cache miss");
        let value = self.transport.request(method, params).await?;
        self.cache.insert(key, value.clone());
        Ok(value)
    }

    async fn call_as<R: DeserializeOwned>(
        &self,
        method: &'static str,
        params: Vec<Value>,
    ) -> Result<R, NodeError> {
        let value = self.call(method, params).await?;
        serde_json::from_value(value).map_err(|e| NodeError::InvalidResponse {
            method,
            reason: e.to_string(),
        })
    }

    async fn call_hex(
        &self,
        method: &'static str,
        params: Vec<Value>,
    ) -> Result<Vec<u8>, NodeError> {
        let hex: String = self.call_as(method, params).await?;
        Ok(from_hex(&hex)?)
    }

    // ============================================================================================
    // Metadata and chain info
    // ============================================================================================

    /// Decoded metadata index, fetched at most once per client.
    pub async fn get_metadata(&self) -> Result<Arc<MetadataIndex>, NodeError> {
        let index = self
            .metadata
            .get_or_try_init(|| async {
                tracing::debug!(network = %self.network, "Fetching runtime metadata");
                let bytes = self.call_hex("state_getMetadata", vec![]).await?;
                let index = MetadataIndex::from_bytes(&bytes)?;
                Ok::<_, NodeError>(Arc::new(index))
            })
            .await?;
        Ok(index.clone())
    }

    pub async fn get_call_id(&self, tx_type: TransactionType) -> Result<CallId, NodeError> {
        Ok(self.get_metadata().await?.call_id(tx_type.call_key())?)
    }

    pub async fn get_runtime_version(&self) -> Result<RuntimeVersion, NodeError> {
        self.call_as("state_getRuntimeVersion", vec![]).await
    }

    pub async fn get_block_hash(&self, number: Option<u64>) -> Result<Hash<32>, NodeError> {
        let params = number.map(|n| vec![json!(n)]).unwrap_or_default();
        let hex: String = self.call_as("chain_getBlockHash", params).await?;
        Ok(Hash::from_hex(&hex)?)
    }

    pub async fn get_genesis_hash(&self) -> Result<Hash<32>, NodeError> {
        self.get_block_hash(Some(0)).await
    }

    pub async fn get_last_block(&self) -> Result<SignedBlock, NodeError> {
        self.call_as("chain_getBlock", vec![]).await
    }

    pub async fn get_current_height(&self) -> Result<u64, NodeError> {
        let block = self.get_last_block().await?;
        block
            .block
            .header
            .block_number()
            .ok_or_else(|| NodeError::InvalidResponse {
                method: "chain_getBlock",
                reason: format!("invalid block number {}", block.block.header.number),
            })
    }

    // ============================================================================================
    // Storage
    // ============================================================================================

    /// Read and decode a storage entry. An entry missing on chain is `None`.
    pub async fn get_storage<D: ScaleDecode>(
        &self,
        module: &str,
        entry: &str,
        args: &[&(dyn ScaleEncode + Sync)],
    ) -> Result<Option<D>, NodeError> {
        let metadata = self.get_metadata().await?;
        let info = metadata.storage_entry(&lookup_key(module, entry))?;
        let encoded: Vec<Vec<u8>> = args.iter().map(|arg| arg.encode()).collect();
        let key = self
            .storage_keys
            .derive_raw(&info.prefix, &info.name, &info.hashers, &encoded)?;

        match self.call("state_getStorage", vec![json!(key.to_hex())]).await? {
            Value::Null => Ok(None),
            Value::String(hex) => Ok(Some(D::decode_all(&from_hex(&hex)?)?)),
            other => Err(NodeError::InvalidResponse {
                method: "state_getStorage",
                reason: format!("expected hex string, got {}", other),
            }),
        }
    }

    async fn get_constant<D: ScaleDecode>(&self, module: &str, name: &str) -> Result<D, NodeError> {
        Ok(self.get_metadata().await?.constant_as(&lookup_key(module, name))?)
    }

    pub async fn get_account_info(
        &self,
        account: &AccountId,
    ) -> Result<Option<AccountInfo>, NodeError> {
        self.get_storage("System", "Account", &[account]).await
    }

    pub async fn get_existential_deposit(&self) -> Result<u128, NodeError> {
        self.get_constant("Balances", "ExistentialDeposit").await
    }

    /// Expected length of an era in milliseconds.
    pub async fn get_expected_era_duration(&self) -> Result<u64, NodeError> {
        let block_time: u64 = self.get_constant("Babe", "ExpectedBlockTime").await?;
        let epoch_duration: u64 = self.get_constant("Babe", "EpochDuration").await?;
        let sessions_per_era: u32 = self.get_constant("Staking", "SessionsPerEra").await?;
        Ok(block_time
            .saturating_mul(epoch_duration)
            .saturating_mul(sessions_per_era as u64))
    }

    /// Controller bonded to `stash`.
    pub async fn get_bonded(&self, stash: &AccountId) -> Result<Option<AccountId>, NodeError> {
        self.get_storage("Staking", "Bonded", &[stash]).await
    }

    pub async fn get_staking_ledger(
        &self,
        controller: &AccountId,
    ) -> Result<Option<StakingLedger>, NodeError> {
        self.get_storage("Staking", "Ledger", &[controller]).await
    }

    pub async fn get_nominations(
        &self,
        stash: &AccountId,
    ) -> Result<Option<Nominations>, NodeError> {
        self.get_storage("Staking", "Nominators", &[stash]).await
    }

    pub async fn get_reward_destination(
        &self,
        stash: &AccountId,
    ) -> Result<Option<RewardDestination>, NodeError> {
        let payee: Option<Enum<RewardDestination>> =
            self.get_storage("Staking", "Payee", &[stash]).await?;
        Ok(payee.map(|payee| payee.0))
    }

    pub async fn get_active_era(&self) -> Result<Option<ActiveEraInfo>, NodeError> {
        self.get_storage("Staking", "ActiveEra", &[]).await
    }

    pub async fn get_current_era(&self) -> Result<Option<u32>, NodeError> {
        self.get_storage("Staking", "CurrentEra", &[]).await
    }

    pub async fn get_session_validators(&self) -> Result<Vec<AccountId>, NodeError> {
        let validators: Option<Vec<AccountId>> =
            self.get_storage("Session", "Validators", &[]).await?;
        Ok(validators.unwrap_or_default())
    }

    pub async fn get_validator_exposure(
        &self,
        era: u32,
        validator: &AccountId,
    ) -> Result<Option<Exposure>, NodeError> {
        self.get_storage("Staking", "ErasStakersClipped", &[&era, validator])
            .await
    }

    pub async fn get_validator_prefs(
        &self,
        era: u32,
        validator: &AccountId,
    ) -> Result<Option<ValidatorPrefs>, NodeError> {
        self.get_storage("Staking", "ErasValidatorPrefs", &[&era, validator])
            .await
    }

    /// Total payout for `era`, set once the era has ended.
    pub async fn get_validator_reward(&self, era: u32) -> Result<Option<u128>, NodeError> {
        self.get_storage("Staking", "ErasValidatorReward", &[&era])
            .await
    }

    pub async fn get_reward_points(
        &self,
        era: u32,
    ) -> Result<Option<EraRewardPoints>, NodeError> {
        self.get_storage("Staking", "ErasRewardPoints", &[&era]).await
    }

    pub async fn get_slashing_spans(
        &self,
        stash: &AccountId,
    ) -> Result<Option<SlashingSpans>, NodeError> {
        self.get_storage("Staking", "SlashingSpans", &[stash]).await
    }

    // ============================================================================================
    // Transactions
    // ============================================================================================

    /// Partial fee reported by `payment_queryInfo` for an encoded extrinsic.
    pub async fn get_transfer_fee_estimate(&self, encoded: &str) -> Result<u128, NodeError> {
        let info: FeeInfo = self.call_as("payment_queryInfo", vec![json!(encoded)]).await?;
        tracing::debug!(fee = info.partial_fee, class = %info.class, "Queried fee");
        Ok(info.partial_fee)
    }

    /// Submit a signed extrinsic and return its hash.
    pub async fn submit_transaction(&self, encoded: &str) -> Result<String, NodeError> {
        let hash: String = self
            .call_as("author_submitExtrinsic", vec![json!(encoded)])
            .await?;
        tracing::info!(hash = %hash, "Submitted extrinsic");
        Ok(hash)
    }
}
