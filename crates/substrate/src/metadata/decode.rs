// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decoder for the V11 runtime metadata layout returned by `state_getMetadata`.

use super::MetadataError;
use crate::impl_scale_struct;
use crate::scale::{
    DecodeResult, Enum, ScaleCursor, ScaleDecode, ScaleEncode, ScaleEnum, ScaleError, from_hex,
};
use crate::storage_key::StorageHasher;

/// `"meta"` read as a little-endian u32.
pub const METADATA_MAGIC: u32 = 0x6174_656d;
pub const METADATA_VERSION: u8 = 11;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeMetadata {
    pub modules: Vec<ModuleMetadata>,
    pub extrinsic: ExtrinsicMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMetadata {
    pub name: String,
    pub storage: Option<StorageMetadata>,
    pub calls: Option<Vec<CallMetadata>>,
    pub events: Option<Vec<EventMetadata>>,
    pub constants: Vec<ConstantMetadata>,
    pub errors: Vec<ErrorMetadata>,
}

impl_scale_struct!(ModuleMetadata {
    name: String,
    storage: Option<StorageMetadata>,
    calls: Option<Vec<CallMetadata>>,
    events: Option<Vec<EventMetadata>>,
    constants: Vec<ConstantMetadata>,
    errors: Vec<ErrorMetadata>,
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageMetadata {
    pub prefix: String,
    pub entries: Vec<StorageEntryMetadata>,
}

impl_scale_struct!(StorageMetadata {
    prefix: String,
    entries: Vec<StorageEntryMetadata>,
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEntryMetadata {
    pub name: String,
    pub modifier: Enum<StorageEntryModifier>,
    pub ty: StorageEntryType,
    pub default: Vec<u8>,
    pub docs: Vec<String>,
}

impl_scale_struct!(StorageEntryMetadata {
    name: String,
    modifier: Enum<StorageEntryModifier>,
    ty: StorageEntryType,
    default: Vec<u8>,
    docs: Vec<String>,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageEntryModifier {
    Optional,
    Default,
}

impl ScaleEnum for StorageEntryModifier {
    const NAME: &'static str = "StorageEntryModifier";

    fn from_discriminant(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageEntryModifier::Optional),
            1 => Some(StorageEntryModifier::Default),
            _ => None,
        }
    }

    fn discriminant(&self) -> u8 {
        *self as u8
    }
}

/// Shape of a storage entry and the hasher configured for each key position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageEntryType {
    Plain {
        value: String,
    },
    Map {
        hasher: StorageHasher,
        key: String,
        value: String,
        unused: bool,
    },
    DoubleMap {
        hasher: StorageHasher,
        key1: String,
        key2: String,
        value: String,
        key2_hasher: StorageHasher,
    },
}

impl StorageEntryType {
    /// Hashers in positional argument order. Plain entries take no arguments.
    pub fn hashers(&self) -> Vec<StorageHasher> {
        match self {
            StorageEntryType::Plain { .. } => Vec::new(),
            StorageEntryType::Map { hasher, .. } => vec![*hasher],
            StorageEntryType::DoubleMap {
                hasher,
                key2_hasher,
                ..
            } => vec![*hasher, *key2_hasher],
        }
    }
}

impl ScaleEncode for StorageEntryType {
    fn encode_to(&self, dest: &mut Vec<u8>) {
        match self {
            StorageEntryType::Plain { value } => {
                dest.push(0);
                value.encode_to(dest);
            }
            StorageEntryType::Map {
                hasher,
                key,
                value,
                unused,
            } => {
                dest.push(1);
                Enum(*hasher).encode_to(dest);
                key.encode_to(dest);
                value.encode_to(dest);
                unused.encode_to(dest);
            }
            StorageEntryType::DoubleMap {
                hasher,
                key1,
                key2,
                value,
                key2_hasher,
            } => {
                dest.push(2);
                Enum(*hasher).encode_to(dest);
                key1.encode_to(dest);
                key2.encode_to(dest);
                value.encode_to(dest);
                Enum(*key2_hasher).encode_to(dest);
            }
        }
    }
}

impl ScaleDecode for StorageEntryType {
    fn decode(bytes: &[u8]) -> Result<DecodeResult<Self>, ScaleError> {
        let mut cursor = ScaleCursor::new(bytes);
        let ty = match cursor.decode_next_u8()? {
            0 => StorageEntryType::Plain {
                value: cursor.decode_next_string()?,
            },
            1 => StorageEntryType::Map {
                hasher: cursor.decode_next_enum()?,
                key: cursor.decode_next_string()?,
                value: cursor.decode_next_string()?,
                unused: cursor.decode_next_bool()?,
            },
            2 => StorageEntryType::DoubleMap {
                hasher: cursor.decode_next_enum()?,
                key1: cursor.decode_next_string()?,
                key2: cursor.decode_next_string()?,
                value: cursor.decode_next_string()?,
                key2_hasher: cursor.decode_next_enum()?,
            },
            value => {
                return Err(ScaleError::UnknownDiscriminant {
                    type_name: "StorageEntryType",
                    value,
                });
            }
        };
        Ok(DecodeResult::new(cursor.offset(), ty))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallMetadata {
    pub name: String,
    pub args: Vec<CallArgMetadata>,
    pub docs: Vec<String>,
}

impl_scale_struct!(CallMetadata {
    name: String,
    args: Vec<CallArgMetadata>,
    docs: Vec<String>,
});

/// Argument descriptor. The type string is informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallArgMetadata {
    pub name: String,
    pub ty: String,
}

impl_scale_struct!(CallArgMetadata { name: String, ty: String });

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMetadata {
    pub name: String,
    pub args: Vec<String>,
    pub docs: Vec<String>,
}

impl_scale_struct!(EventMetadata {
    name: String,
    args: Vec<String>,
    docs: Vec<String>,
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantMetadata {
    pub name: String,
    pub ty: String,
    pub value: Vec<u8>,
    pub docs: Vec<String>,
}

impl_scale_struct!(ConstantMetadata {
    name: String,
    ty: String,
    value: Vec<u8>,
    docs: Vec<String>,
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMetadata {
    pub name: String,
    pub docs: Vec<String>,
}

impl_scale_struct!(ErrorMetadata {
    name: String,
    docs: Vec<String>,
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtrinsicMetadata {
    pub version: u8,
    pub signed_extensions: Vec<String>,
}

impl_scale_struct!(ExtrinsicMetadata {
    version: u8,
    signed_extensions: Vec<String>,
});

impl RuntimeMetadata {
    /// Decode a full metadata blob, checking the magic number and version first.
    pub fn decode_bytes(bytes: &[u8]) -> Result<Self, MetadataError> {
        let mut cursor = ScaleCursor::new(bytes);

        let magic = cursor.decode_next_u32()?;
        if magic != METADATA_MAGIC {
            return Err(MetadataError::InvalidMagic(magic));
        }

        let version = cursor.decode_next_u8()?;
        if version != METADATA_VERSION {
            return Err(MetadataError::UnsupportedVersion {
                expected: METADATA_VERSION,
                actual: version,
            });
        }

        let modules = cursor.decode_next::<Vec<ModuleMetadata>>()?;
        let extrinsic = cursor.decode_next::<ExtrinsicMetadata>()?;
        cursor.finish()?;

        Ok(RuntimeMetadata { modules, extrinsic })
    }

    pub fn decode_hex(input: &str) -> Result<Self, MetadataError> {
        Self::decode_bytes(&from_hex(input)?)
    }
}
