// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

/// Storage entries indexed from metadata, as (module prefix, entry name).
/// Everything else is decoded and dropped.
pub const STORAGE_ALLOW_LIST: &[(&str, &str)] = &[
    ("System", "Account"),
    ("Timestamp", "Now"),
    ("Session", "Validators"),
    ("Staking", "Bonded"),
    ("Staking", "Ledger"),
    ("Staking", "Payee"),
    ("Staking", "Nominators"),
    ("Staking", "CurrentEra"),
    ("Staking", "ActiveEra"),
    ("Staking", "ErasStakers"),
    ("Staking", "ErasStakersClipped"),
    ("Staking", "ErasValidatorPrefs"),
    ("Staking", "ErasValidatorReward"),
    ("Staking", "ErasRewardPoints"),
    ("Staking", "SlashingSpans"),
];

/// Modules whose constants are indexed.
pub const CONSTANT_ALLOW_LIST: &[&str] = &["Babe", "Balances", "Staking", "Timestamp"];

/// Extrinsic format version carried in the low bits of the first byte.
pub const EXTRINSIC_VERSION: u8 = 4;

/// Set on the version byte of signed extrinsics.
pub const SIGNED_FLAG: u8 = 0x80;

/// `MultiSignature::Sr25519`.
pub const SR25519_SIGNATURE_TYPE: u8 = 0x01;

pub const SIGNATURE_LENGTH: usize = 64;

/// Payloads longer than this are hashed with blake2-256 before signing.
pub const MAX_UNHASHED_PAYLOAD_LENGTH: usize = 256;

/// Safety margin applied to summed batch fee estimates, as a ratio.
pub const BATCH_FEE_MARGIN: (u128, u128) = (12, 10);

/// Commission and other `Perbill` values are parts per billion.
pub const PERBILL: u128 = 1_000_000_000;
