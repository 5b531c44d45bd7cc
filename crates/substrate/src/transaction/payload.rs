// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::era::Era;
use super::method::Method;
use crate::consts::MAX_UNHASHED_PAYLOAD_LENGTH;
use crate::scale::{CompactInt, Hash, ScaleEncode};

/// The bytes a signer commits to: the call and its extra fields followed by
/// the chain-specific trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionPayload {
    pub method: Method,
    pub era: Era,
    pub nonce: CompactInt,
    pub tip: CompactInt,
    pub spec_version: u32,
    pub transaction_version: u32,
    pub genesis_hash: Hash<32>,
    /// Checkpoint block for mortal eras. Ignored for immortal ones.
    pub block_hash: Hash<32>,
}

impl TransactionPayload {
    /// The exact bytes handed to the signing primitive.
    pub fn signing_bytes(&self) -> Vec<u8> {
        let encoded = self.encode();
        if encoded.len() > MAX_UNHASHED_PAYLOAD_LENGTH {
            sp_crypto_hashing::blake2_256(&encoded).to_vec()
        } else {
            encoded
        }
    }
}

impl ScaleEncode for TransactionPayload {
    fn encode_to(&self, dest: &mut Vec<u8>) {
        self.method.encode_to(dest);
        self.era.encode_to(dest);
        self.nonce.encode_to(dest);
        self.tip.encode_to(dest);
        self.spec_version.encode_to(dest);
        self.transaction_version.encode_to(dest);
        self.genesis_hash.encode_to(dest);
        if self.era.is_mortal() {
            self.block_hash.encode_to(dest);
        } else {
            self.genesis_hash.encode_to(dest);
        }
    }
}
