// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Hash and signing collaborators.
//!
//! The hash primitives and the sr25519 scheme come from `sp-core` /
//! `sp-crypto-hashing`; this module only fixes their contracts and the
//! one-time readiness handle signing goes through.

use crate::scale::AccountId;
use sp_core::Pair as _;
use sp_core::sr25519;
use std::future::Future;
use thiserror::Error;
use tokio::sync::OnceCell;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid secret phrase or derivation path: {0}")]
    InvalidSecret(String),

    #[error("Crypto backend failed to initialize: {0}")]
    InitializationFailed(String),
}

// ================================================================================================
// Hash primitives
// ================================================================================================

/// Keyed-hash primitives used for storage keys.
pub trait HashBackend: Send + Sync {
    fn blake2_128(&self, data: &[u8]) -> [u8; 16];
    fn blake2_256(&self, data: &[u8]) -> [u8; 32];
    fn twox_64(&self, data: &[u8]) -> [u8; 8];
    fn twox_128(&self, data: &[u8]) -> [u8; 16];
    fn twox_256(&self, data: &[u8]) -> [u8; 32];
}

/// [`HashBackend`] backed by `sp-crypto-hashing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpHashing;

impl HashBackend for SpHashing {
    fn blake2_128(&self, data: &[u8]) -> [u8; 16] {
        sp_crypto_hashing::blake2_128(data)
    }

    fn blake2_256(&self, data: &[u8]) -> [u8; 32] {
        sp_crypto_hashing::blake2_256(data)
    }

    fn twox_64(&self, data: &[u8]) -> [u8; 8] {
        sp_crypto_hashing::twox_64(data)
    }

    fn twox_128(&self, data: &[u8]) -> [u8; 16] {
        sp_crypto_hashing::twox_128(data)
    }

    fn twox_256(&self, data: &[u8]) -> [u8; 32] {
        sp_crypto_hashing::twox_256(data)
    }
}

// ================================================================================================
// Key pairs
// ================================================================================================

/// sr25519 key pair derived from a mnemonic and an optional derivation path.
#[derive(Clone)]
pub struct KeyPair {
    pair: sr25519::Pair,
}

impl KeyPair {
    /// `derivation_path` uses the `//hard/soft` junction syntax, e.g. `//polkadot//0`.
    pub fn from_mnemonic(
        phrase: &str,
        derivation_path: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, CryptoError> {
        let suri = format!("{}{}", phrase, derivation_path.unwrap_or(""));
        let pair = sr25519::Pair::from_string(&suri, password)
            .map_err(|e| CryptoError::InvalidSecret(format!("{:?}", e)))?;
        Ok(Self { pair })
    }

    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            pair: sr25519::Pair::from_seed(seed),
        }
    }

    pub fn public_key(&self) -> AccountId {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(self.pair.public().as_ref());
        AccountId(bytes)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeyPair({})", self.public_key().to_hex())
    }
}

pub fn verify_signature(signature: &[u8; 64], message: &[u8], public_key: &AccountId) -> bool {
    let signature = sr25519::Signature::from_raw(*signature);
    let public = sr25519::Public::from_raw(public_key.0);
    sr25519::Pair::verify(&signature, message, &public)
}

// ================================================================================================
// Signing backend
// ================================================================================================

pub trait CryptoBackend: Send + Sync {
    /// One-time preparation before the first signature.
    fn initialize(&self) -> impl Future<Output = Result<(), CryptoError>> + Send;

    fn sign(&self, key_pair: &KeyPair, message: &[u8]) -> [u8; 64];
}

/// sr25519 through `sp-core`. Initialisation is a sign/verify self-test.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sr25519Backend;

impl CryptoBackend for Sr25519Backend {
    async fn initialize(&self) -> Result<(), CryptoError> {
        let probe = KeyPair::from_seed(&[1u8; 32]);
        let message = b"airgap-substrate readiness";
        let signature = self.sign(&probe, message);
        if !verify_signature(&signature, message, &probe.public_key()) {
            return Err(CryptoError::InitializationFailed(
                "sr25519 self-test signature did not verify".to_string(),
            ));
        }
        tracing::debug!("sr25519 backend ready");
        Ok(())
    }

    fn sign(&self, key_pair: &KeyPair, message: &[u8]) -> [u8; 64] {
        let signature = key_pair.pair.sign(message);
        let mut raw = [0u8; 64];
        raw.copy_from_slice(signature.as_ref());
        raw
    }
}

/// Signing handle: initialise once, await if in flight, reuse once done.
pub struct Signer<B: CryptoBackend = Sr25519Backend> {
    backend: B,
    ready: OnceCell<()>,
}

impl<B: CryptoBackend> Signer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            ready: OnceCell::new(),
        }
    }

    pub async fn ready(&self) -> Result<(), CryptoError> {
        self.ready
            .get_or_try_init(|| self.backend.initialize())
            .await
            .map(|_| ())
    }

    pub async fn sign(&self, key_pair: &KeyPair, message: &[u8]) -> Result<[u8; 64], CryptoError> {
        self.ready().await?;
        Ok(self.backend.sign(key_pair, message))
    }
}

impl Default for Signer<Sr25519Backend> {
    fn default() -> Self {
        Self::new(Sr25519Backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const DEV_PHRASE: &str =
        "bottom drive obey lake curtain smoke basket hold race lonely fit walk";

    struct CountingBackend {
        initializations: Arc<AtomicUsize>,
    }

    impl CryptoBackend for CountingBackend {
        async fn initialize(&self) -> Result<(), CryptoError> {
            self.initializations.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            Ok(())
        }

        fn sign(&self, key_pair: &KeyPair, message: &[u8]) -> [u8; 64] {
            Sr25519Backend.sign(key_pair, message)
        }
    }

    #[test]
    fn test_dev_phrase_alice() {
        let alice = KeyPair::from_mnemonic(DEV_PHRASE, Some("//Alice"), None).unwrap();
        assert_eq!(
            alice.public_key().to_hex(),
            "0xd43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d"
        );
    }

    #[test]
    fn test_invalid_mnemonic() {
        let result = KeyPair::from_mnemonic("not a mnemonic at all", None, None);
        assert!(matches!(result, Err(CryptoError::InvalidSecret(_))));
    }

    #[tokio::test]
    async fn test_sign_and_verify() {
        let signer = Signer::default();
        let key_pair = KeyPair::from_seed(&[7u8; 32]);
        let signature = signer.sign(&key_pair, b"payload").await.unwrap();

        assert!(verify_signature(&signature, b"payload", &key_pair.public_key()));
        assert!(!verify_signature(&signature, b"other", &key_pair.public_key()));
    }

    #[tokio::test]
    async fn test_concurrent_signers_initialize_once() {
        let initializations = Arc::new(AtomicUsize::new(0));
        let signer = Signer::new(CountingBackend {
            initializations: initializations.clone(),
        });
        let key_pair = KeyPair::from_seed(&[3u8; 32]);

        let (a, b, c) = tokio::join!(
            signer.sign(&key_pair, b"a"),
            signer.sign(&key_pair, b"b"),
            signer.sign(&key_pair, b"c"),
        );
        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        signer.sign(&key_pair, b"d").await.unwrap();

        assert_eq!(initializations.load(Ordering::SeqCst), 1);
    }
}
