// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Storage key derivation for `state_getStorage`.
//!
//! A key is `twox128(module) ‖ twox128(entry)` followed by every SCALE-encoded
//! argument hashed with the hasher configured for its position.

use crate::crypto::{HashBackend, SpHashing};
use crate::scale::{ScaleEncode, ScaleEnum, to_hex};
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageKeyError {
    #[error("Storage entry {module}.{entry} takes {expected} argument(s), got {actual}")]
    ArgumentCountMismatch {
        module: String,
        entry: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageHasher {
    Blake2_128,
    Blake2_256,
    Blake2_128Concat,
    Twox128,
    Twox256,
    Twox64Concat,
    Identity,
}

impl ScaleEnum for StorageHasher {
    const NAME: &'static str = "StorageHasher";

    fn from_discriminant(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageHasher::Blake2_128),
            1 => Some(StorageHasher::Blake2_256),
            2 => Some(StorageHasher::Blake2_128Concat),
            3 => Some(StorageHasher::Twox128),
            4 => Some(StorageHasher::Twox256),
            5 => Some(StorageHasher::Twox64Concat),
            6 => Some(StorageHasher::Identity),
            _ => None,
        }
    }

    fn discriminant(&self) -> u8 {
        *self as u8
    }
}

impl StorageHasher {
    pub fn hash(&self, backend: &dyn HashBackend, data: &[u8]) -> Vec<u8> {
        match self {
            StorageHasher::Blake2_128 => backend.blake2_128(data).to_vec(),
            StorageHasher::Blake2_256 => backend.blake2_256(data).to_vec(),
            StorageHasher::Blake2_128Concat => {
                let mut result = backend.blake2_128(data).to_vec();
                result.extend_from_slice(data);
                result
            }
            StorageHasher::Twox128 => backend.twox_128(data).to_vec(),
            StorageHasher::Twox256 => backend.twox_256(data).to_vec(),
            StorageHasher::Twox64Concat => {
                let mut result = backend.twox_64(data).to_vec();
                result.extend_from_slice(data);
                result
            }
            StorageHasher::Identity => data.to_vec(),
        }
    }
}

/// Derived lookup key into chain state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKey {
    pub module: String,
    pub entry: String,
    pub prefix: Vec<u8>,
    pub hashed_args: Vec<Vec<u8>>,
}

impl StorageKey {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.prefix.clone();
        for arg in &self.hashed_args {
            bytes.extend_from_slice(arg);
        }
        bytes
    }

    pub fn to_hex(&self) -> String {
        to_hex(&self.to_bytes())
    }
}

type MemoKey = (String, String, Vec<(StorageHasher, Vec<u8>)>);

/// Storage key deriver with a per-instance memo.
///
/// The same keys are re-requested many times within one query burst, so every
/// derived key is kept for the lifetime of the deriver.
pub struct StorageKeyDeriver<H: HashBackend = SpHashing> {
    backend: H,
    cache: Mutex<HashMap<MemoKey, StorageKey>>,
}

impl<H: HashBackend> StorageKeyDeriver<H> {
    pub fn new(backend: H) -> Self {
        Self {
            backend,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Derive the key for `module.entry` with the given hashers and already
    /// SCALE-encoded arguments, in positional order.
    pub fn derive_raw(
        &self,
        module: &str,
        entry: &str,
        hashers: &[StorageHasher],
        encoded_args: &[Vec<u8>],
    ) -> Result<StorageKey, StorageKeyError> {
        if hashers.len() != encoded_args.len() {
            return Err(StorageKeyError::ArgumentCountMismatch {
                module: module.to_string(),
                entry: entry.to_string(),
                expected: hashers.len(),
                actual: encoded_args.len(),
            });
        }

        let memo_key: MemoKey = (
            module.to_string(),
            entry.to_string(),
            hashers
                .iter()
                .copied()
                .zip(encoded_args.iter().cloned())
                .collect(),
        );

        if let Ok(cache) = self.cache.lock()
            && let Some(key) = cache.get(&memo_key)
        {
            tracing::trace!(module, entry, "storage key cache hit");
            return Ok(key.clone());
        }

        let mut prefix = self.backend.twox_128(module.as_bytes()).to_vec();
        prefix.extend_from_slice(&self.backend.twox_128(entry.as_bytes()));

        let hashed_args = hashers
            .iter()
            .zip(encoded_args)
            .map(|(hasher, arg)| hasher.hash(&self.backend, arg))
            .collect();

        let key = StorageKey {
            module: module.to_string(),
            entry: entry.to_string(),
            prefix,
            hashed_args,
        };

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(memo_key, key.clone());
        }

        Ok(key)
    }

    pub fn derive(
        &self,
        module: &str,
        entry: &str,
        hashers: &[StorageHasher],
        args: &[&dyn ScaleEncode],
    ) -> Result<StorageKey, StorageKeyError> {
        let encoded: Vec<Vec<u8>> = args.iter().map(|arg| arg.encode()).collect();
        self.derive_raw(module, entry, hashers, &encoded)
    }

    pub fn cached_keys(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }
}

impl Default for StorageKeyDeriver<SpHashing> {
    fn default() -> Self {
        Self::new(SpHashing)
    }
}
