// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! SS58 address codec.
//!
//! An address is `base58(version ‖ payload ‖ checksum)` where the checksum is
//! the leading 1 or 2 bytes of `blake2b-512("SS58PRE" ‖ version ‖ payload)`.

use crate::scale::{AccountId, ScaleError, from_hex};
use airgap_substrate_config::Network;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const SS58_PREFIX: &[u8] = b"SS58PRE";

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("Invalid base58 input: {0}")]
    InvalidBase58(#[from] bs58::decode::Error),

    #[error("Invalid hex public key: {0}")]
    InvalidHex(#[from] ScaleError),

    #[error("Invalid address length: {0} bytes")]
    InvalidLength(usize),

    #[error("Unsupported payload length: {0} bytes")]
    InvalidPayloadLength(usize),

    #[error("Address payload is not a 32-byte account id")]
    NotAnAccountId,
}

/// Network-checksummed public key.
///
/// Equality only looks at the payload, so the same key compares equal across
/// differently-prefixed networks.
#[derive(Clone)]
pub struct Address {
    version: u8,
    payload: Vec<u8>,
    checksum: Vec<u8>,
}

fn checksum_len(payload_len: usize) -> usize {
    if payload_len == 32 { 2 } else { 1 }
}

fn compute_checksum(version: u8, payload: &[u8]) -> Vec<u8> {
    let mut input = Vec::with_capacity(SS58_PREFIX.len() + 1 + payload.len());
    input.extend_from_slice(SS58_PREFIX);
    input.push(version);
    input.extend_from_slice(payload);
    let hash = sp_crypto_hashing::blake2_512(&input);
    hash[..checksum_len(payload.len())].to_vec()
}

fn is_hex(input: &str) -> bool {
    let stripped = input.strip_prefix("0x");
    match stripped {
        Some(rest) => rest.chars().all(|c| c.is_ascii_hexdigit()),
        // Without a prefix only a full 32-byte key is taken as hex.
        None => input.len() == 64 && input.chars().all(|c| c.is_ascii_hexdigit()),
    }
}

impl Address {
    /// Build an address for `payload` on `network`, computing its checksum.
    pub fn from_payload(payload: &[u8], network: Network) -> Result<Self, AddressError> {
        if !matches!(payload.len(), 1 | 2 | 4 | 32) {
            return Err(AddressError::InvalidPayloadLength(payload.len()));
        }
        let version = network.ss58_format();
        Ok(Self {
            version,
            payload: payload.to_vec(),
            checksum: compute_checksum(version, payload),
        })
    }

    pub fn from_account_id(account_id: &AccountId, network: Network) -> Self {
        let version = network.ss58_format();
        Self {
            version,
            payload: account_id.0.to_vec(),
            checksum: compute_checksum(version, &account_id.0),
        }
    }

    /// Parse either a hex public key or a base58 SS58 string.
    ///
    /// Hex input carries no version byte, so `network` (Polkadot if absent)
    /// supplies it. Base58 checksums are split off but not re-validated.
    pub fn decode(input: &str, network: Option<Network>) -> Result<Self, AddressError> {
        if is_hex(input) {
            let payload = from_hex(input)?;
            return Self::from_payload(&payload, network.unwrap_or_default());
        }

        let raw = bs58::decode(input).into_vec()?;
        if !matches!(raw.len(), 3 | 4 | 6 | 35) {
            return Err(AddressError::InvalidLength(raw.len()));
        }
        let checksum_start = raw.len() - if raw.len() == 35 { 2 } else { 1 };

        Ok(Self {
            version: raw[0],
            payload: raw[1..checksum_start].to_vec(),
            checksum: raw[checksum_start..].to_vec(),
        })
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn checksum(&self) -> &[u8] {
        &self.checksum
    }

    pub fn has_valid_checksum(&self) -> bool {
        compute_checksum(self.version, &self.payload) == self.checksum
    }

    pub fn account_id(&self) -> Result<AccountId, AddressError> {
        let bytes: [u8; 32] = self
            .payload
            .as_slice()
            .try_into()
            .map_err(|_| AddressError::NotAnAccountId)?;
        Ok(AccountId(bytes))
    }

    /// Same key, re-encoded for another network.
    pub fn with_network(&self, network: Network) -> Self {
        let version = network.ss58_format();
        Self {
            version,
            payload: self.payload.clone(),
            checksum: compute_checksum(version, &self.payload),
        }
    }
}

/// Encode `payload` as an SS58 string for `network`.
pub fn encode_address(payload: &[u8], network: Network) -> Result<String, AddressError> {
    Ok(Address::from_payload(payload, network)?.to_string())
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.payload == other.payload
    }
}

impl Eq for Address {}

impl std::hash::Hash for Address {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.payload.hash(state)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut raw = Vec::with_capacity(1 + self.payload.len() + self.checksum.len());
        raw.push(self.version);
        raw.extend_from_slice(&self.payload);
        raw.extend_from_slice(&self.checksum);
        f.write_str(&bs58::encode(raw).into_string())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::decode(s, None)
    }
}
