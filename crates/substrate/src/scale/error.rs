// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

/// Decode failures. All of them are fatal: the byte stream is either
/// well-formed or the whole operation is abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScaleError {
    #[error("Unexpected end of input: needed {needed} bytes, {available} available")]
    UnexpectedEnd { needed: usize, available: usize },

    #[error("Compact integer declares {0} magnitude bytes, at most 16 are supported")]
    CompactOverflow(usize),

    #[error("Compact integer {value} is not canonically encoded in mode {mode}")]
    NonCanonicalCompact { value: u128, mode: u8 },

    #[error("Invalid UTF-8 in string: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Unknown {type_name} discriminant: {value}")]
    UnknownDiscriminant { type_name: &'static str, value: u8 },

    #[error("Invalid optional tag: {0}")]
    InvalidOptionalTag(u8),

    #[error("Invalid boolean byte: {0}")]
    InvalidBool(u8),

    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    #[error("Value {value} does not fit into {target}")]
    OutOfRange { value: u128, target: &'static str },

    #[error("{0} trailing bytes left after decoding")]
    TrailingBytes(usize),
}

pub(crate) fn ensure_len(bytes: &[u8], needed: usize) -> Result<(), ScaleError> {
    if bytes.len() < needed {
        return Err(ScaleError::UnexpectedEnd {
            needed,
            available: bytes.len(),
        });
    }
    Ok(())
}
