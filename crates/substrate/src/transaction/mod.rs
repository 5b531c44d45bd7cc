// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Extrinsic construction, wire encoding and signing payloads.
//!
//! A [`Transaction`] is created unsigned with a zero-filled signature, turned
//! into a [`TransactionPayload`] for the offline signer, and re-encoded with
//! the returned signature for submission.

mod era;
mod fee;
mod method;
mod payload;

pub use era::Era;
pub use fee::{FeeCache, FeeInfo, placeholder_args};
pub use method::{ArgumentSet, Method, MethodArgs, TransactionType};
pub use payload::TransactionPayload;

use crate::consts::{EXTRINSIC_VERSION, SIGNATURE_LENGTH, SIGNED_FLAG, SR25519_SIGNATURE_TYPE};
use crate::metadata::{CallId, MetadataError, MetadataIndex};
use crate::scale::{
    AccountId, CompactInt, Hash, ScaleCursor, ScaleEncode, ScaleError, from_hex,
};
use thiserror::Error;

pub type Signature = Hash<SIGNATURE_LENGTH>;

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("Missing argument(s) for {tx_type} transaction: {}", fields.join(", "))]
    MissingArgument {
        tx_type: TransactionType,
        fields: Vec<&'static str>,
    },

    #[error("Call {0:?} is not present in metadata")]
    UnknownCall(CallId),

    #[error("Call {0} is not a supported transaction type")]
    UnsupportedCall(String),

    #[error("Unsupported extrinsic version {0}")]
    UnsupportedVersion(u8),

    #[error("Unsupported signature type {0}")]
    UnsupportedSignatureType(u8),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Scale(#[from] ScaleError),
}

/// Chain-specific fields appended to the signing payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningContext {
    pub spec_version: u32,
    pub transaction_version: u32,
    pub genesis_hash: Hash<32>,
    pub block_hash: Hash<32>,
}

/// Inputs to [`Transaction::create`].
#[derive(Debug, Clone)]
pub struct TransactionParams {
    pub signer: AccountId,
    pub tip: u128,
    pub call_id: CallId,
    pub args: ArgumentSet,
    pub era: Era,
    pub nonce: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub signer: AccountId,
    pub signature: Signature,
    pub era: Era,
    pub nonce: CompactInt,
    pub tip: CompactInt,
    pub method: Method,
    /// Signed bit of the version byte. Kept apart from `signature` so a decoded
    /// extrinsic re-encodes byte for byte, even with a zeroed signature.
    signed: bool,
}

impl Transaction {
    /// Build an unsigned transaction. Fails before encoding anything when the
    /// arguments do not satisfy the schema of `tx_type`.
    pub fn create(
        tx_type: TransactionType,
        params: TransactionParams,
    ) -> Result<Self, TransactionError> {
        let args = MethodArgs::build(tx_type, &params.args)?;
        Ok(Self::unsigned(
            params.signer,
            Method::new(params.call_id, args),
            params.era,
            params.nonce,
            params.tip,
        ))
    }

    pub fn unsigned(signer: AccountId, method: Method, era: Era, nonce: u32, tip: u128) -> Self {
        Self {
            signer,
            signature: Signature::zero(),
            era,
            nonce: nonce.into(),
            tip: tip.into(),
            method,
            signed: false,
        }
    }

    pub fn tx_type(&self) -> TransactionType {
        self.method.tx_type()
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    pub fn with_signature(mut self, signature: [u8; SIGNATURE_LENGTH]) -> Self {
        self.signature = Hash(signature);
        self.signed = true;
        self
    }

    pub fn payload(&self, context: &SigningContext) -> TransactionPayload {
        TransactionPayload {
            method: self.method.clone(),
            era: self.era,
            nonce: self.nonce,
            tip: self.tip,
            spec_version: context.spec_version,
            transaction_version: context.transaction_version,
            genesis_hash: context.genesis_hash,
            block_hash: context.block_hash,
        }
    }

    /// Decode a length-prefixed extrinsic, resolving its call through `index`.
    pub fn decode(bytes: &[u8], index: &MetadataIndex) -> Result<Self, TransactionError> {
        let mut outer = ScaleCursor::new(bytes);
        let body = outer.decode_next_bytes()?;
        outer.finish()?;

        let mut cursor = ScaleCursor::new(&body);
        let version = cursor.decode_next_u8()?;
        if version & !SIGNED_FLAG != EXTRINSIC_VERSION {
            return Err(TransactionError::UnsupportedVersion(version));
        }
        let signed = version & SIGNED_FLAG != 0;

        let signer = cursor.decode_next_account_id()?;
        let signature_type = cursor.decode_next_u8()?;
        if signature_type != SR25519_SIGNATURE_TYPE {
            return Err(TransactionError::UnsupportedSignatureType(signature_type));
        }
        let signature = cursor.decode_next_hash::<SIGNATURE_LENGTH>()?;
        let era = cursor.decode_next::<Era>()?;
        let nonce = cursor.decode_next_compact()?;
        let tip = cursor.decode_next_compact()?;
        let method = Method::decode_all(cursor.remaining(), index)?;

        Ok(Transaction {
            signer,
            signature,
            era,
            nonce,
            tip,
            method,
            signed,
        })
    }

    pub fn decode_hex(input: &str, index: &MetadataIndex) -> Result<Self, TransactionError> {
        Self::decode(&from_hex(input)?, index)
    }
}

impl ScaleEncode for Transaction {
    fn encode_to(&self, dest: &mut Vec<u8>) {
        let mut body = Vec::new();
        let version = if self.signed {
            EXTRINSIC_VERSION | SIGNED_FLAG
        } else {
            EXTRINSIC_VERSION
        };
        body.push(version);
        self.signer.encode_to(&mut body);
        body.push(SR25519_SIGNATURE_TYPE);
        self.signature.encode_to(&mut body);
        self.era.encode_to(&mut body);
        self.nonce.encode_to(&mut body);
        self.tip.encode_to(&mut body);
        self.method.encode_to(&mut body);

        body.as_slice().encode_to(dest);
    }
}
