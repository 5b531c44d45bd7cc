// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wallet operations built on the node client: preparing unsigned
//! transactions for an offline signer, signing and submitting them, and the
//! account summaries a staking UI needs.

use crate::address::{Address, AddressError};
use crate::consts::PERBILL;
use crate::crypto::{CryptoError, KeyPair, Signer};
use crate::metadata::MetadataIndex;
use crate::node::{HttpTransport, NodeClient, NodeError, RpcTransport};
use crate::scale::{AccountId, ScaleEncode, to_hex};
use crate::staking::{
    self, NominatorReward, StakingActionContext, StakingActionType, StakingError, StakingState,
    UnlockingDetails, available_actions,
};
use crate::state::{AccountData, AccountInfo, RewardDestination, StakingLedger};
use crate::transaction::{
    ArgumentSet, Era, FeeCache, Method, MethodArgs, SigningContext, Transaction,
    TransactionError, TransactionPayload, TransactionType, placeholder_args,
};
use airgap_substrate_config::WalletConfig;
use futures::future::try_join_all;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error(transparent)]
    Node(#[from] NodeError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Staking(#[from] StakingError),

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("Insufficient balance: {required} required, {available} available")]
    InsufficientBalance { required: u128, available: u128 },

    #[error("No calls to prepare")]
    EmptyTransaction,

    #[error("Key pair {actual} cannot sign for {expected}")]
    SignerMismatch { expected: String, actual: String },

    #[error("Transaction is not signed")]
    Unsigned,
}

/// An unsigned transaction together with what the offline signer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTransaction {
    pub transaction: Transaction,
    pub payload: TransactionPayload,
    /// Estimated fee including the tip.
    pub fee: u128,
}

impl PreparedTransaction {
    pub fn signing_bytes(&self) -> Vec<u8> {
        self.payload.signing_bytes()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NominatorDetails {
    pub address: Address,
    pub balance: AccountData,
    pub spendable: u128,
    pub state: StakingState,
    pub bonded: u128,
    pub active: u128,
    pub unlocked: u128,
    pub unlocking: Vec<UnlockingDetails>,
    pub targets: Vec<AccountId>,
    pub reward_destination: Option<RewardDestination>,
    pub rewards: Vec<NominatorReward>,
    pub available_actions: Vec<StakingActionType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorDetails {
    pub address: Address,
    pub era: u32,
    /// Commission in parts per billion, if the validator has set preferences.
    /// Values beyond `u32` count as 100%.
    pub commission: Option<u32>,
    pub total_stake: u128,
    pub own_stake: u128,
    pub nominator_count: usize,
    pub status: ValidatorStatus,
}

/// Chain state a new transaction is built against.
struct ChainContext {
    account: Option<AccountInfo>,
    era: Era,
    signing: SigningContext,
}

pub struct Wallet<T: RpcTransport = HttpTransport> {
    node: NodeClient<T>,
    fees: FeeCache,
    signer: Signer,
    era_period: u64,
    reward_era_limit: u32,
}

impl Wallet<HttpTransport> {
    pub fn from_config(config: &WalletConfig) -> Self {
        Self::new(NodeClient::from_config(&config.substrate), config)
    }
}

impl<T: RpcTransport> Wallet<T> {
    pub fn new(node: NodeClient<T>, config: &WalletConfig) -> Self {
        Self {
            node,
            fees: FeeCache::new(),
            signer: Signer::default(),
            era_period: config.transaction.era_period,
            reward_era_limit: config.staking.reward_era_limit,
        }
    }

    pub fn node(&self) -> &NodeClient<T> {
        &self.node
    }

    pub fn resolve_address(&self, address: &str) -> Result<AccountId, WalletError> {
        Ok(Address::decode(address, Some(self.node.network()))?.account_id()?)
    }

    // ============================================================================================
    // Preparing
    // ============================================================================================

    pub async fn prepare_transfer(
        &self,
        from: &str,
        to: &str,
        value: u128,
        tip: u128,
    ) -> Result<PreparedTransaction, WalletError> {
        let dest = self.resolve_address(to)?;
        let args = ArgumentSet::new().dest(dest).value(value);
        self.prepare_staking(from, tip, &[(TransactionType::Transfer, args)])
            .await
    }

    /// Prepare one transaction for `calls`. More than one call is wrapped in a
    /// `Utility.batch`.
    pub async fn prepare_staking(
        &self,
        from: &str,
        tip: u128,
        calls: &[(TransactionType, ArgumentSet)],
    ) -> Result<PreparedTransaction, WalletError> {
        if calls.is_empty() {
            return Err(WalletError::EmptyTransaction);
        }
        let signer = self.resolve_address(from)?;

        // Schema errors surface before any RPC is made.
        let args = calls
            .iter()
            .map(|(tx_type, args)| MethodArgs::build(*tx_type, args))
            .collect::<Result<Vec<_>, _>>()?;
        let spent: u128 = calls
            .iter()
            .map(|(tx_type, args)| spent_value(*tx_type, args))
            .fold(0, u128::saturating_add);

        let (metadata, context) =
            futures::try_join!(self.node.get_metadata(), self.chain_context(&signer))?;

        let mut methods = args
            .into_iter()
            .map(|args| Method::resolve(&metadata, args))
            .collect::<Result<Vec<_>, _>>()?;
        let method = if methods.len() == 1 {
            methods.remove(0)
        } else {
            Method::resolve(&metadata, MethodArgs::SubmitBatch { calls: methods })?
        };

        let nonce = context.account.as_ref().map_or(0, |account| account.nonce);
        let transaction = Transaction::unsigned(signer, method, context.era, nonce, tip);

        let fee = self
            .estimate_fee(&transaction, &metadata)
            .await?
            .saturating_add(tip);
        let available = context
            .account
            .as_ref()
            .map_or(0, |account| account.data.spendable());
        let required = spent.saturating_add(fee);
        if available < required {
            return Err(WalletError::InsufficientBalance {
                required,
                available,
            });
        }

        tracing::debug!(
            tx_type = %transaction.tx_type(),
            nonce,
            fee,
            "Prepared transaction"
        );

        let payload = transaction.payload(&context.signing);
        Ok(PreparedTransaction {
            transaction,
            payload,
            fee,
        })
    }

    async fn chain_context(&self, signer: &AccountId) -> Result<ChainContext, NodeError> {
        let (account, height, runtime, genesis_hash) = futures::try_join!(
            self.node.get_account_info(signer),
            self.node.get_current_height(),
            self.node.get_runtime_version(),
            self.node.get_genesis_hash(),
        )?;

        // The checkpoint must be the era's birth block, not whatever head the node reports now.
        let era = Era::from_period(Some(self.era_period), height);
        let block_hash = self.node.get_block_hash(Some(era.birth(height))).await?;

        Ok(ChainContext {
            account,
            era,
            signing: SigningContext {
                spec_version: runtime.spec_version,
                transaction_version: runtime.transaction_version,
                genesis_hash,
                block_hash,
            },
        })
    }

    // ============================================================================================
    // Fees
    // ============================================================================================

    /// Fee without tip. Batches are estimated from the per-type fees of their
    /// members plus a safety margin.
    async fn estimate_fee(
        &self,
        transaction: &Transaction,
        metadata: &MetadataIndex,
    ) -> Result<u128, WalletError> {
        if let MethodArgs::SubmitBatch { calls } = &transaction.method.args {
            let fees = try_join_all(
                calls
                    .iter()
                    .map(|call| self.cached_fee(call.tx_type(), &transaction.signer, metadata)),
            )
            .await?;
            let total = fees.into_iter().fold(0, u128::saturating_add);
            return Ok(FeeCache::with_batch_margin(total));
        }

        let fee = self.query_fee(transaction).await?;
        self.fees.record(transaction.tx_type(), fee);
        Ok(fee)
    }

    async fn cached_fee(
        &self,
        tx_type: TransactionType,
        signer: &AccountId,
        metadata: &MetadataIndex,
    ) -> Result<u128, WalletError> {
        if let Some(fee) = self.fees.get(tx_type) {
            tracing::trace!(%tx_type, fee, "fee cache hit");
            return Ok(fee);
        }

        let method = Method::resolve(metadata, placeholder_args(tx_type))?;
        let placeholder = Transaction::unsigned(*signer, method, Era::Immortal, 0, 0);
        let fee = self.query_fee(&placeholder).await?;
        self.fees.record(tx_type, fee);
        Ok(fee)
    }

    async fn query_fee(&self, transaction: &Transaction) -> Result<u128, NodeError> {
        self.node
            .get_transfer_fee_estimate(&to_hex(&transaction.encode()))
            .await
    }

    // ============================================================================================
    // Signing and submission
    // ============================================================================================

    /// Sign the prepared payload with `key_pair`, which must belong to the
    /// transaction's signer.
    pub async fn sign_prepared(
        &self,
        prepared: &PreparedTransaction,
        key_pair: &KeyPair,
    ) -> Result<Transaction, WalletError> {
        let public_key = key_pair.public_key();
        if public_key != prepared.transaction.signer {
            return Err(WalletError::SignerMismatch {
                expected: prepared.transaction.signer.to_hex(),
                actual: public_key.to_hex(),
            });
        }

        let signature = self
            .signer
            .sign(key_pair, &prepared.signing_bytes())
            .await?;
        Ok(prepared.transaction.clone().with_signature(signature))
    }

    /// Submit a signed transaction and return its hash.
    pub async fn submit_signed(&self, transaction: &Transaction) -> Result<String, WalletError> {
        if !transaction.is_signed() {
            return Err(WalletError::Unsigned);
        }
        Ok(self
            .node
            .submit_transaction(&to_hex(&transaction.encode()))
            .await?)
    }

    // ============================================================================================
    // Staking details
    // ============================================================================================

    pub async fn get_nominator_details(
        &self,
        address: &str,
        desired_targets: &[AccountId],
    ) -> Result<NominatorDetails, WalletError> {
        const OPERATION: &str = "fetch nominator details";

        let stash = self.resolve_address(address)?;
        let (account, ledger, nominations, reward_destination, active_era, existential_deposit) =
            futures::try_join!(
                self.node.get_account_info(&stash),
                self.stash_ledger(&stash),
                self.node.get_nominations(&stash),
                self.node.get_reward_destination(&stash),
                self.node.get_active_era(),
                self.node.get_existential_deposit(),
            )?;
        let era_duration = match self.node.get_expected_era_duration().await {
            Ok(duration) => Some(duration),
            Err(e) => {
                tracing::warn!(error = %e, "Expected era duration is unavailable");
                None
            }
        };

        let (Some(account), Some(active_era), Some(era_duration)) =
            (account, active_era, era_duration)
        else {
            return Err(NodeError::MissingAggregate(OPERATION).into());
        };

        let targets = nominations
            .as_ref()
            .map(|nominations| nominations.targets.clone())
            .unwrap_or_default();
        let is_exposed = if targets.is_empty() {
            false
        } else {
            staking::is_exposed(&self.node, &stash, &targets, active_era.index).await?
        };
        let state = StakingState::derive(
            ledger.as_ref(),
            nominations.as_ref(),
            active_era.index,
            is_exposed,
        );

        let rewards = if state.is_nominating() {
            staking::nominator_rewards(&self.node, &stash, &targets, self.reward_era_limit)
                .await?
        } else {
            Vec::new()
        };

        let unlocked = ledger
            .as_ref()
            .map_or(0, |ledger| ledger.unlocked(active_era.index));
        let unlocking = ledger
            .as_ref()
            .map(|ledger| staking::unlocking_schedule(ledger, &active_era, era_duration))
            .unwrap_or_default();
        let spendable = account.data.spendable();

        let available_actions = available_actions(&StakingActionContext {
            state,
            spendable,
            existential_deposit,
            targets: &targets,
            desired_targets,
            unlocked,
            has_unclaimed_rewards: rewards.iter().any(|reward| !reward.collected),
        });

        Ok(NominatorDetails {
            address: Address::from_account_id(&stash, self.node.network()),
            balance: account.data,
            spendable,
            state,
            bonded: ledger.as_ref().map_or(0, |ledger| ledger.total.0),
            active: ledger.as_ref().map_or(0, |ledger| ledger.active.0),
            unlocked,
            unlocking,
            targets,
            reward_destination,
            rewards,
            available_actions,
        })
    }

    /// Ledger of `stash`, looked up through its bonded controller.
    async fn stash_ledger(&self, stash: &AccountId) -> Result<Option<StakingLedger>, NodeError> {
        match self.node.get_bonded(stash).await? {
            Some(controller) => self.node.get_staking_ledger(&controller).await,
            None => Ok(None),
        }
    }

    pub async fn get_validator_details(
        &self,
        address: &str,
    ) -> Result<ValidatorDetails, WalletError> {
        let stash = self.resolve_address(address)?;
        let (active_era, session_validators) = futures::try_join!(
            self.node.get_active_era(),
            self.node.get_session_validators()
        )?;
        let era = active_era
            .map(|active_era| active_era.index)
            .ok_or(NodeError::MissingAggregate("fetch validator details"))?;

        let (prefs, exposure) = futures::try_join!(
            self.node.get_validator_prefs(era, &stash),
            self.node.get_validator_exposure(era, &stash)
        )?;

        let status = if session_validators.contains(&stash) {
            ValidatorStatus::Active
        } else {
            ValidatorStatus::Inactive
        };

        Ok(ValidatorDetails {
            address: Address::from_account_id(&stash, self.node.network()),
            era,
            commission: prefs.map(|prefs| {
                prefs.commission.to_u32().unwrap_or(PERBILL as u32)
            }),
            total_stake: exposure.as_ref().map_or(0, |exposure| exposure.total.0),
            own_stake: exposure.as_ref().map_or(0, |exposure| exposure.own.0),
            nominator_count: exposure.as_ref().map_or(0, |exposure| exposure.others.len()),
            status,
        })
    }

    /// Rewards of `address` through `targets`, over `limit` past eras or the
    /// configured default.
    pub async fn get_nominator_rewards(
        &self,
        address: &str,
        targets: &[AccountId],
        limit: Option<u32>,
    ) -> Result<Vec<NominatorReward>, WalletError> {
        let nominator = self.resolve_address(address)?;
        let limit = limit.unwrap_or(self.reward_era_limit);
        Ok(staking::nominator_rewards(&self.node, &nominator, targets, limit).await?)
    }
}

/// Funds a call moves out of the spendable balance.
fn spent_value(tx_type: TransactionType, args: &ArgumentSet) -> u128 {
    match tx_type {
        TransactionType::Transfer | TransactionType::Bond | TransactionType::BondExtra => {
            args.value.unwrap_or(0)
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::verify_signature;
    use crate::scale::CompactInt;
    use crate::state::{
        ActiveEraInfo, Exposure, IndividualExposure, Nominations, UnlockChunk, ValidatorPrefs,
    };
    use crate::storage_key::StorageHasher;
    use crate::test_fixtures::{
        MockTransport, TEST_BLOCK_HASH, TEST_BLOCK_NUMBER, TEST_GENESIS_HASH, TEST_HEAD_HASH,
        TEST_PARTIAL_FEE, TEST_SPEC_VERSION, account, storage_key,
    };
    use airgap_substrate_config::Network;
    use serde_json::json;

    const DOT: u128 = 10_000_000_000;

    fn account_key(who: &AccountId) -> String {
        storage_key(
            "System",
            "Account",
            &[(StorageHasher::Blake2_128Concat, who.encode())],
        )
    }

    fn account_info(nonce: u32, free: u128, frozen: u128) -> AccountInfo {
        AccountInfo {
            nonce,
            refcount: 1,
            data: AccountData {
                free,
                reserved: 0,
                misc_frozen: frozen,
                fee_frozen: frozen,
            },
        }
    }

    fn active_era_key() -> String {
        storage_key("Staking", "ActiveEra", &[])
    }

    fn active_era(index: u32) -> ActiveEraInfo {
        ActiveEraInfo {
            index,
            start: Some(1_600_000_000_000),
        }
    }

    fn wallet(transport: MockTransport) -> Wallet<MockTransport> {
        Wallet::new(
            NodeClient::new(transport, Network::Polkadot),
            &WalletConfig::default(),
        )
    }

    fn nominate_args() -> ArgumentSet {
        ArgumentSet::new().targets(vec![account(0xa1), account(0xa2)])
    }

    fn bond_args(value: u128) -> ArgumentSet {
        ArgumentSet::new()
            .controller(account(0x01))
            .value(value)
            .payee(RewardDestination::Staked)
    }

    #[tokio::test]
    async fn test_prepare_transfer() {
        let signer = account(0x01);
        let transport = MockTransport::polkadot_like()
            .with_storage(&account_key(&signer), &account_info(4, 1_000 * DOT, 0).encode());
        let wallet = wallet(transport);

        let prepared = wallet
            .prepare_transfer(&signer.to_hex(), &account(0x02).to_hex(), 100 * DOT, 5)
            .await
            .unwrap();

        let transaction = &prepared.transaction;
        assert_eq!(transaction.tx_type(), TransactionType::Transfer);
        assert_eq!(transaction.nonce, CompactInt(4));
        assert_eq!(transaction.tip, CompactInt(5));
        assert_eq!(transaction.era, Era::Mortal { period: 64, phase: 3 });
        assert!(!transaction.is_signed());
        assert_eq!(prepared.fee, TEST_PARTIAL_FEE + 5);

        assert_eq!(prepared.payload.spec_version, TEST_SPEC_VERSION);
        assert_eq!(prepared.payload.genesis_hash.0, TEST_GENESIS_HASH);
        assert_eq!(prepared.payload.block_hash.0, TEST_BLOCK_HASH);
    }

    #[tokio::test]
    async fn test_prepare_checkpoints_era_birth_block() {
        let signer = account(0x01);
        // period 8192 quantizes the phase by 2, so the era is born one block back
        let birth = TEST_BLOCK_NUMBER - 1;
        let transport = MockTransport::polkadot_like()
            .with_storage(&account_key(&signer), &account_info(0, 1_000 * DOT, 0).encode())
            .with_response(
                "chain_getBlockHash",
                vec![json!(birth)],
                json!(to_hex(&[0xdd; 32])),
            );
        let mut config = WalletConfig::default();
        config.transaction.era_period = 8192;
        let wallet = Wallet::new(NodeClient::new(transport, Network::Polkadot), &config);

        let prepared = wallet
            .prepare_transfer(&signer.to_hex(), &account(0x02).to_hex(), DOT, 0)
            .await
            .unwrap();

        let era = prepared.transaction.era;
        assert_eq!(era, Era::Mortal { period: 8192, phase: 578 });
        assert_eq!(era.birth(TEST_BLOCK_NUMBER), birth);
        assert_eq!(prepared.payload.block_hash.0, [0xdd; 32]);
        assert_ne!(prepared.payload.block_hash.0, TEST_HEAD_HASH);

        let hash_requests: Vec<_> = wallet
            .node()
            .transport()
            .calls()
            .into_iter()
            .filter(|(method, _)| method == "chain_getBlockHash")
            .map(|(_, params)| params)
            .collect();
        assert!(hash_requests.contains(&vec![json!(birth)]));
        assert!(!hash_requests.iter().any(|params| params.is_empty()));
    }

    #[tokio::test]
    async fn test_prepare_immortal_checkpoints_genesis() {
        let signer = account(0x01);
        let transport = MockTransport::polkadot_like()
            .with_storage(&account_key(&signer), &account_info(0, 1_000 * DOT, 0).encode());
        let mut config = WalletConfig::default();
        config.transaction.era_period = 0;
        let wallet = Wallet::new(NodeClient::new(transport, Network::Polkadot), &config);

        let prepared = wallet
            .prepare_transfer(&signer.to_hex(), &account(0x02).to_hex(), DOT, 0)
            .await
            .unwrap();

        assert_eq!(prepared.transaction.era, Era::Immortal);
        assert_eq!(prepared.payload.block_hash.0, TEST_GENESIS_HASH);
    }

    #[tokio::test]
    async fn test_prepare_rejects_insufficient_balance() {
        let signer = account(0x01);
        let transport = MockTransport::polkadot_like()
            .with_storage(&account_key(&signer), &account_info(0, 100 * DOT, 0).encode());
        let wallet = wallet(transport);

        let result = wallet
            .prepare_transfer(&signer.to_hex(), &account(0x02).to_hex(), 100 * DOT, 0)
            .await;
        match result {
            Err(WalletError::InsufficientBalance {
                required,
                available,
            }) => {
                assert_eq!(required, 100 * DOT + TEST_PARTIAL_FEE);
                assert_eq!(available, 100 * DOT);
            }
            other => panic!("expected insufficient balance, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_prepare_rejects_missing_arguments_before_rpc() {
        let wallet = wallet(MockTransport::polkadot_like());
        let args = ArgumentSet::new().controller(account(0x01)).value(DOT);

        let result = wallet
            .prepare_staking(&account(0x01).to_hex(), 0, &[(TransactionType::Bond, args)])
            .await;
        assert!(matches!(
            result,
            Err(WalletError::Transaction(TransactionError::MissingArgument { .. }))
        ));
        assert!(wallet.node().transport().calls().is_empty());
    }

    #[tokio::test]
    async fn test_prepare_batch_uses_fee_cache() {
        let signer = account(0x01);
        let transport = MockTransport::polkadot_like()
            .with_storage(&account_key(&signer), &account_info(7, 1_000 * DOT, 0).encode());
        let wallet = wallet(transport);
        let calls = [
            (TransactionType::Bond, bond_args(10 * DOT)),
            (TransactionType::Nominate, nominate_args()),
        ];

        let prepared = wallet
            .prepare_staking(&signer.to_hex(), 0, &calls)
            .await
            .unwrap();
        assert_eq!(prepared.transaction.tx_type(), TransactionType::SubmitBatch);
        assert_eq!(prepared.fee, 2 * TEST_PARTIAL_FEE * 12 / 10);
        assert_eq!(wallet.node().transport().calls_to("payment_queryInfo"), 2);

        let again = wallet
            .prepare_staking(&signer.to_hex(), 0, &calls)
            .await
            .unwrap();
        assert_eq!(again.fee, prepared.fee);
        assert_eq!(wallet.node().transport().calls_to("payment_queryInfo"), 2);
    }

    #[tokio::test]
    async fn test_prepare_empty_batch() {
        let wallet = wallet(MockTransport::polkadot_like());
        let result = wallet.prepare_staking(&account(0x01).to_hex(), 0, &[]).await;
        assert!(matches!(result, Err(WalletError::EmptyTransaction)));
    }

    #[tokio::test]
    async fn test_sign_and_submit() {
        let key_pair = KeyPair::from_seed(&[7u8; 32]);
        let signer = key_pair.public_key();
        let transport = MockTransport::polkadot_like()
            .with_storage(&account_key(&signer), &account_info(0, 1_000 * DOT, 0).encode());
        let wallet = wallet(transport);

        let prepared = wallet
            .prepare_staking(
                &signer.to_hex(),
                0,
                &[(TransactionType::CancelNomination, ArgumentSet::new())],
            )
            .await
            .unwrap();

        let unsigned = prepared.transaction.clone();
        assert!(matches!(
            wallet.submit_signed(&unsigned).await,
            Err(WalletError::Unsigned)
        ));

        let signed = wallet.sign_prepared(&prepared, &key_pair).await.unwrap();
        assert!(signed.is_signed());
        assert!(verify_signature(
            &signed.signature.0,
            &prepared.signing_bytes(),
            &signer
        ));

        let hash = wallet.submit_signed(&signed).await.unwrap();
        assert_eq!(hash, to_hex(&[0xcc; 32]));
        assert_eq!(
            wallet.node().transport().calls_to("author_submitExtrinsic"),
            1
        );
    }

    #[tokio::test]
    async fn test_sign_rejects_foreign_key() {
        let signer = account(0x01);
        let transport = MockTransport::polkadot_like()
            .with_storage(&account_key(&signer), &account_info(0, 1_000 * DOT, 0).encode());
        let wallet = wallet(transport);
        let prepared = wallet
            .prepare_staking(
                &signer.to_hex(),
                0,
                &[(TransactionType::CancelNomination, ArgumentSet::new())],
            )
            .await
            .unwrap();

        let result = wallet
            .sign_prepared(&prepared, &KeyPair::from_seed(&[7u8; 32]))
            .await;
        assert!(matches!(result, Err(WalletError::SignerMismatch { .. })));
    }

    #[tokio::test]
    async fn test_nominator_details_not_bonded() {
        let stash = account(0x01);
        let transport = MockTransport::polkadot_like()
            .with_storage(&account_key(&stash), &account_info(0, 1_000 * DOT, 0).encode())
            .with_storage(&active_era_key(), &active_era(10).encode());
        let wallet = wallet(transport);

        let details = wallet
            .get_nominator_details(&stash.to_hex(), &[account(0xa1)])
            .await
            .unwrap();
        assert_eq!(details.state, StakingState::NotBonded);
        assert_eq!(details.bonded, 0);
        assert!(details.rewards.is_empty());
        assert_eq!(details.available_actions, vec![StakingActionType::BondNominate]);
    }

    #[tokio::test]
    async fn test_nominator_details_nominating_with_unlocked_funds() {
        let stash = account(0x01);
        let targets = vec![account(0xa1), account(0xa2)];
        let ledger = StakingLedger {
            stash,
            total: CompactInt(300 * DOT),
            active: CompactInt(200 * DOT),
            unlocking: vec![UnlockChunk {
                value: CompactInt(100 * DOT),
                era: CompactInt(5),
            }],
            claimed_rewards: vec![],
        };
        let nominations = Nominations {
            targets: targets.clone(),
            submitted_in: 10,
            suppressed: false,
        };
        let transport = MockTransport::polkadot_like()
            .with_storage(
                &account_key(&stash),
                &account_info(3, 300 * DOT, 300 * DOT).encode(),
            )
            .with_storage(&active_era_key(), &active_era(10).encode())
            .with_storage(
                &storage_key(
                    "Staking",
                    "Bonded",
                    &[(StorageHasher::Twox64Concat, stash.encode())],
                ),
                &stash.encode(),
            )
            .with_storage(
                &storage_key(
                    "Staking",
                    "Ledger",
                    &[(StorageHasher::Blake2_128Concat, stash.encode())],
                ),
                &ledger.encode(),
            )
            .with_storage(
                &storage_key(
                    "Staking",
                    "Nominators",
                    &[(StorageHasher::Twox64Concat, stash.encode())],
                ),
                &nominations.encode(),
            );
        let wallet = wallet(transport);

        let details = wallet
            .get_nominator_details(&stash.to_hex(), &targets)
            .await
            .unwrap();
        assert_eq!(details.state, StakingState::Nominating);
        assert_eq!(details.spendable, 0);
        assert_eq!(details.bonded, 300 * DOT);
        assert_eq!(details.unlocked, 100 * DOT);
        assert_eq!(details.unlocking.len(), 1);
        assert_eq!(details.unlocking[0].era, 5);
        assert_eq!(
            details.available_actions,
            vec![
                StakingActionType::CancelNomination,
                StakingActionType::WithdrawUnbonded
            ]
        );
    }

    #[tokio::test]
    async fn test_nominator_details_require_balance_and_active_era() {
        let stash = account(0x01);
        let transport = MockTransport::polkadot_like()
            .with_storage(&active_era_key(), &active_era(10).encode());
        let wallet = wallet(transport);

        let result = wallet.get_nominator_details(&stash.to_hex(), &[]).await;
        assert!(matches!(
            result,
            Err(WalletError::Node(NodeError::MissingAggregate(_)))
        ));
    }

    #[tokio::test]
    async fn test_validator_details() {
        let validator = account(0xa1);
        let era_validator_key = |entry: &str| {
            storage_key(
                "Staking",
                entry,
                &[
                    (StorageHasher::Twox64Concat, 10u32.encode()),
                    (StorageHasher::Twox64Concat, validator.encode()),
                ],
            )
        };
        let exposure = Exposure {
            total: CompactInt(500),
            own: CompactInt(300),
            others: vec![
                IndividualExposure {
                    who: account(0x01),
                    value: CompactInt(100),
                },
                IndividualExposure {
                    who: account(0x02),
                    value: CompactInt(100),
                },
            ],
        };
        let prefs = ValidatorPrefs {
            commission: CompactInt(100_000_000),
        };
        let transport = MockTransport::polkadot_like()
            .with_storage(&active_era_key(), &active_era(10).encode())
            .with_storage(
                &storage_key("Session", "Validators", &[]),
                &vec![validator, account(0xa2)].encode(),
            )
            .with_storage(&era_validator_key("ErasStakersClipped"), &exposure.encode())
            .with_storage(&era_validator_key("ErasValidatorPrefs"), &prefs.encode());
        let wallet = wallet(transport);

        let details = wallet
            .get_validator_details(&validator.to_hex())
            .await
            .unwrap();
        assert_eq!(details.era, 10);
        assert_eq!(details.commission, Some(100_000_000));
        assert_eq!(details.total_stake, 500);
        assert_eq!(details.own_stake, 300);
        assert_eq!(details.nominator_count, 2);
        assert_eq!(details.status, ValidatorStatus::Active);

        let inactive = wallet
            .get_validator_details(&account(0xa3).to_hex())
            .await
            .unwrap();
        assert_eq!(inactive.status, ValidatorStatus::Inactive);
        assert_eq!(inactive.commission, None);
        assert_eq!(inactive.nominator_count, 0);
    }
}
