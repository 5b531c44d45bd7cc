// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod address;
pub mod consts;
pub mod crypto;
pub mod logging;
pub mod metadata;
pub mod node;
pub mod scale;
pub mod staking;
pub mod state;
pub mod storage_key;
pub mod transaction;
pub mod wallet;

pub use airgap_substrate_config::Network;

#[cfg(test)]
pub mod test_fixtures;
