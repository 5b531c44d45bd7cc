// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::MetadataError;
use super::decode::RuntimeMetadata;
use crate::consts::{CONSTANT_ALLOW_LIST, STORAGE_ALLOW_LIST};
use crate::scale::ScaleDecode;
use crate::storage_key::StorageHasher;
use heck::ToLowerCamelCase;
use std::collections::HashMap;

/// Key under which calls, storage entries and constants are indexed.
///
/// `lookup_key("Staking", "bond_extra") == "Staking_bondExtra"` and
/// `lookup_key("Staking", "ErasStakersClipped") == "Staking_erasStakersClipped"`.
pub fn lookup_key(module: &str, name: &str) -> String {
    format!("{}_{}", module, name.to_lower_camel_case())
}

/// Position of a call in the runtime's dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallId {
    pub module_index: u8,
    pub call_index: u8,
}

impl CallId {
    pub fn new(module_index: u8, call_index: u8) -> Self {
        Self {
            module_index,
            call_index,
        }
    }
}

/// What the storage key deriver needs to address an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEntryInfo {
    pub prefix: String,
    pub name: String,
    pub hashers: Vec<StorageHasher>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantInfo {
    pub ty: String,
    pub value: Vec<u8>,
}

/// Name-keyed lookup tables built once from decoded metadata.
#[derive(Debug, Clone, Default)]
pub struct MetadataIndex {
    calls: HashMap<String, CallId>,
    call_keys: HashMap<CallId, String>,
    storage: HashMap<String, StorageEntryInfo>,
    constants: HashMap<String, ConstantInfo>,
}

impl MetadataIndex {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MetadataError> {
        Self::from_metadata(&RuntimeMetadata::decode_bytes(bytes)?)
    }

    /// Fails when a call's module or call position does not fit in a byte.
    pub fn from_metadata(metadata: &RuntimeMetadata) -> Result<Self, MetadataError> {
        let mut index = MetadataIndex::default();

        // Only modules that declare calls take a dispatch slot.
        let mut dispatch_slot: usize = 0;
        for module in &metadata.modules {
            if let Some(storage) = &module.storage {
                for entry in &storage.entries {
                    let listed = STORAGE_ALLOW_LIST
                        .iter()
                        .any(|(m, e)| *m == module.name && *e == entry.name);
                    if !listed {
                        continue;
                    }
                    index.storage.insert(
                        lookup_key(&module.name, &entry.name),
                        StorageEntryInfo {
                            prefix: storage.prefix.clone(),
                            name: entry.name.clone(),
                            hashers: entry.ty.hashers(),
                        },
                    );
                }
            }

            if let Some(calls) = &module.calls {
                let module_index = u8::try_from(dispatch_slot).map_err(|_| {
                    MetadataError::IndexOverflow {
                        name: module.name.clone(),
                        index: dispatch_slot,
                    }
                })?;
                for (position, call) in calls.iter().enumerate() {
                    let key = lookup_key(&module.name, &call.name);
                    let call_index = u8::try_from(position).map_err(|_| {
                        MetadataError::IndexOverflow {
                            name: key.clone(),
                            index: position,
                        }
                    })?;
                    let id = CallId::new(module_index, call_index);
                    index.call_keys.insert(id, key.clone());
                    index.calls.insert(key, id);
                }
                dispatch_slot += 1;
            }

            if CONSTANT_ALLOW_LIST.contains(&module.name.as_str()) {
                for constant in &module.constants {
                    index.constants.insert(
                        lookup_key(&module.name, &constant.name),
                        ConstantInfo {
                            ty: constant.ty.clone(),
                            value: constant.value.clone(),
                        },
                    );
                }
            }
        }

        tracing::debug!(
            modules = metadata.modules.len(),
            calls = index.calls.len(),
            storage_entries = index.storage.len(),
            constants = index.constants.len(),
            "Built metadata index"
        );

        Ok(index)
    }

    pub fn call_id(&self, key: &str) -> Result<CallId, MetadataError> {
        self.calls
            .get(key)
            .copied()
            .ok_or_else(|| MetadataError::MissingCall(key.to_string()))
    }

    /// Reverse lookup from a dispatch position to its call key.
    pub fn call_key(&self, id: CallId) -> Option<&str> {
        self.call_keys.get(&id).map(String::as_str)
    }

    pub fn storage_entry(&self, key: &str) -> Result<&StorageEntryInfo, MetadataError> {
        self.storage
            .get(key)
            .ok_or_else(|| MetadataError::MissingStorageEntry(key.to_string()))
    }

    pub fn constant(&self, key: &str) -> Result<&ConstantInfo, MetadataError> {
        self.constants
            .get(key)
            .ok_or_else(|| MetadataError::MissingConstant(key.to_string()))
    }

    /// Decode a constant's raw value as `T`.
    pub fn constant_as<T: ScaleDecode>(&self, key: &str) -> Result<T, MetadataError> {
        let constant = self.constant(key)?;
        Ok(T::decode_all(&constant.value)?)
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }
}
