// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Runtime metadata: the V11 blob decoder and the lookup tables built from it.
//!
//! Call ids, storage hashers and constants are resolved by keys of the form
//! `"{Module}_{lowerCamelName}"`, see [`lookup_key`].

mod decode;
mod index;

pub use decode::{
    CallArgMetadata, CallMetadata, ConstantMetadata, ErrorMetadata, EventMetadata,
    ExtrinsicMetadata, METADATA_MAGIC, METADATA_VERSION, ModuleMetadata, RuntimeMetadata,
    StorageEntryMetadata, StorageEntryModifier, StorageEntryType, StorageMetadata,
};
pub use index::{CallId, ConstantInfo, MetadataIndex, StorageEntryInfo, lookup_key};

use crate::scale::ScaleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Invalid metadata magic number: {0:#010x}")]
    InvalidMagic(u32),

    #[error("Unsupported metadata version {actual}, expected {expected}")]
    UnsupportedVersion { expected: u8, actual: u8 },

    #[error("Failed to decode metadata: {0}")]
    Scale(#[from] ScaleError),

    #[error("Call {0} not found in metadata")]
    MissingCall(String),

    #[error("Storage entry {0} not found in metadata")]
    MissingStorageEntry(String),

    #[error("Constant {0} not found in metadata")]
    MissingConstant(String),

    #[error("Dispatch index {index} of {name} does not fit in a byte")]
    IndexOverflow { name: String, index: usize },
}
