// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! SCALE codec: primitive types, generic combinators and the cursor decoder.
//!
//! Every encodable type implements [`ScaleEncode`]; every decodable type
//! implements [`ScaleDecode`], which reports how many bytes were consumed
//! so that composite decoders can advance through a buffer.

mod compact;
mod cursor;
mod error;
mod types;

pub use compact::{CompactInt, CompactMode};
pub use cursor::ScaleCursor;
pub use error::ScaleError;
pub(crate) use error::ensure_len;
pub use types::{
    AccountId, Bytes, Enum, Hash, ScaleEnum, decode_array_with, decode_optional_with,
    decode_tuple_with,
};

/// Outcome of decoding one value from the start of a byte slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeResult<T> {
    pub bytes_consumed: usize,
    pub value: T,
}

impl<T> DecodeResult<T> {
    pub fn new(bytes_consumed: usize, value: T) -> Self {
        Self {
            bytes_consumed,
            value,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DecodeResult<U> {
        DecodeResult {
            bytes_consumed: self.bytes_consumed,
            value: f(self.value),
        }
    }
}

pub trait ScaleEncode {
    fn encode_to(&self, dest: &mut Vec<u8>);

    fn encode(&self) -> Vec<u8> {
        let mut dest = Vec::new();
        self.encode_to(&mut dest);
        dest
    }

    fn encode_hex(&self) -> String {
        to_hex(&self.encode())
    }
}

pub trait ScaleDecode: Sized {
    fn decode(bytes: &[u8]) -> Result<DecodeResult<Self>, ScaleError>;

    /// Decode a value that must span the whole input.
    fn decode_all(bytes: &[u8]) -> Result<Self, ScaleError> {
        let result = Self::decode(bytes)?;
        if result.bytes_consumed != bytes.len() {
            return Err(ScaleError::TrailingBytes(
                bytes.len() - result.bytes_consumed,
            ));
        }
        Ok(result.value)
    }

    fn decode_hex(input: &str) -> Result<DecodeResult<Self>, ScaleError> {
        Self::decode(&from_hex(input)?)
    }
}

impl<T: ScaleEncode + ?Sized> ScaleEncode for &T {
    fn encode_to(&self, dest: &mut Vec<u8>) {
        (**self).encode_to(dest)
    }
}

/// `0x`-prefixed lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse hex with or without the `0x` prefix.
pub fn from_hex(input: &str) -> Result<Vec<u8>, ScaleError> {
    let stripped = input.strip_prefix("0x").unwrap_or(input);
    hex::decode(stripped).map_err(|e| ScaleError::InvalidHex(format!("{}: {}", input, e)))
}

/// Implements [`ScaleEncode`] and [`ScaleDecode`] for a struct whose fields
/// are encoded one after the other in declaration order.
///
/// ```ignore
/// impl_scale_struct!(UnlockChunk { value: CompactInt, era: CompactInt });
/// ```
#[macro_export]
macro_rules! impl_scale_struct {
    ($name:ident { $($field:ident : $ty:ty),+ $(,)? }) => {
        impl $crate::scale::ScaleEncode for $name {
            fn encode_to(&self, dest: &mut Vec<u8>) {
                $( $crate::scale::ScaleEncode::encode_to(&self.$field, dest); )+
            }
        }

        impl $crate::scale::ScaleDecode for $name {
            fn decode(
                bytes: &[u8],
            ) -> Result<$crate::scale::DecodeResult<Self>, $crate::scale::ScaleError> {
                let mut cursor = $crate::scale::ScaleCursor::new(bytes);
                $( let $field = cursor.decode_next::<$ty>()?; )+
                Ok($crate::scale::DecodeResult::new(
                    cursor.offset(),
                    $name { $($field),+ },
                ))
            }
        }
    };
}
