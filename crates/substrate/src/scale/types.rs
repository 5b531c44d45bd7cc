// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Primitive SCALE types and the generic combinators built on them.

use super::compact::CompactInt;
use super::error::{ScaleError, ensure_len};
use super::{DecodeResult, ScaleDecode, ScaleEncode, to_hex};
use std::fmt;

// ================================================================================================
// Boolean and fixed-width integers
// ================================================================================================

impl ScaleEncode for bool {
    fn encode_to(&self, dest: &mut Vec<u8>) {
        dest.push(*self as u8);
    }
}

impl ScaleDecode for bool {
    fn decode(bytes: &[u8]) -> Result<DecodeResult<Self>, ScaleError> {
        ensure_len(bytes, 1)?;
        match bytes[0] {
            0 => Ok(DecodeResult::new(1, false)),
            1 => Ok(DecodeResult::new(1, true)),
            other => Err(ScaleError::InvalidBool(other)),
        }
    }
}

macro_rules! impl_fixed_int {
    ($($ty:ty),+) => {
        $(
            impl ScaleEncode for $ty {
                fn encode_to(&self, dest: &mut Vec<u8>) {
                    dest.extend_from_slice(&self.to_le_bytes());
                }
            }

            impl ScaleDecode for $ty {
                fn decode(bytes: &[u8]) -> Result<DecodeResult<Self>, ScaleError> {
                    const WIDTH: usize = std::mem::size_of::<$ty>();
                    ensure_len(bytes, WIDTH)?;
                    let mut raw = [0u8; WIDTH];
                    raw.copy_from_slice(&bytes[..WIDTH]);
                    Ok(DecodeResult::new(WIDTH, <$ty>::from_le_bytes(raw)))
                }
            }
        )+
    };
}

impl_fixed_int!(u8, u16, u32, u64, u128);

// ================================================================================================
// Length-prefixed bytes and strings
// ================================================================================================

/// Length-prefixed byte blob.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Bytes(pub Vec<u8>);

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes({})", to_hex(&self.0))
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Bytes(bytes)
    }
}

fn decode_length_prefixed(bytes: &[u8]) -> Result<DecodeResult<&[u8]>, ScaleError> {
    let prefix = CompactInt::decode(bytes)?;
    let len = prefix.value.to_usize()?;
    let start = prefix.bytes_consumed;
    ensure_len(bytes, start.saturating_add(len))?;
    Ok(DecodeResult::new(start + len, &bytes[start..start + len]))
}

impl ScaleEncode for Bytes {
    fn encode_to(&self, dest: &mut Vec<u8>) {
        CompactInt::from(self.0.len()).encode_to(dest);
        dest.extend_from_slice(&self.0);
    }
}

impl ScaleDecode for Bytes {
    fn decode(bytes: &[u8]) -> Result<DecodeResult<Self>, ScaleError> {
        Ok(decode_length_prefixed(bytes)?.map(|raw| Bytes(raw.to_vec())))
    }
}

impl ScaleEncode for str {
    fn encode_to(&self, dest: &mut Vec<u8>) {
        CompactInt::from(self.len()).encode_to(dest);
        dest.extend_from_slice(self.as_bytes());
    }
}

impl ScaleEncode for String {
    fn encode_to(&self, dest: &mut Vec<u8>) {
        self.as_str().encode_to(dest)
    }
}

impl ScaleDecode for String {
    fn decode(bytes: &[u8]) -> Result<DecodeResult<Self>, ScaleError> {
        let raw = decode_length_prefixed(bytes)?;
        let value = String::from_utf8(raw.value.to_vec())?;
        Ok(DecodeResult::new(raw.bytes_consumed, value))
    }
}

// ================================================================================================
// Fixed-width hashes and account ids
// ================================================================================================

/// Fixed-width hash, encoded without a length prefix.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash<const N: usize>(pub [u8; N]);

impl<const N: usize> Hash<N> {
    pub fn zero() -> Self {
        Hash([0u8; N])
    }

    /// A hash is empty iff every byte is zero.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    pub fn from_hex(input: &str) -> Result<Self, ScaleError> {
        let bytes = super::from_hex(input)?;
        let array: [u8; N] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            ScaleError::InvalidHex(format!("expected {} bytes, got {}", N, bytes.len()))
        })?;
        Ok(Hash(array))
    }
}

impl<const N: usize> Default for Hash<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> fmt::Debug for Hash<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", to_hex(&self.0))
    }
}

impl<const N: usize> fmt::Display for Hash<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_hex(&self.0))
    }
}

impl<const N: usize> ScaleEncode for Hash<N> {
    fn encode_to(&self, dest: &mut Vec<u8>) {
        dest.extend_from_slice(&self.0);
    }
}

impl<const N: usize> ScaleDecode for Hash<N> {
    fn decode(bytes: &[u8]) -> Result<DecodeResult<Self>, ScaleError> {
        ensure_len(bytes, N)?;
        let mut raw = [0u8; N];
        raw.copy_from_slice(&bytes[..N]);
        Ok(DecodeResult::new(N, Hash(raw)))
    }
}

/// 32-byte account id (an sr25519 public key).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn from_hex(input: &str) -> Result<Self, ScaleError> {
        Ok(AccountId(Hash::<32>::from_hex(input)?.0))
    }

    pub fn to_hex(&self) -> String {
        to_hex(&self.0)
    }
}

impl From<[u8; 32]> for AccountId {
    fn from(bytes: [u8; 32]) -> Self {
        AccountId(bytes)
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", to_hex(&self.0))
    }
}

impl ScaleEncode for AccountId {
    fn encode_to(&self, dest: &mut Vec<u8>) {
        dest.extend_from_slice(&self.0);
    }
}

impl ScaleDecode for AccountId {
    fn decode(bytes: &[u8]) -> Result<DecodeResult<Self>, ScaleError> {
        Ok(Hash::<32>::decode(bytes)?.map(|hash| AccountId(hash.0)))
    }
}

// ================================================================================================
// Enum
// ================================================================================================

/// A closed set of unit variants identified by a one-byte discriminant.
pub trait ScaleEnum: Sized + Copy {
    /// Name used in `UnknownDiscriminant` errors.
    const NAME: &'static str;

    fn from_discriminant(value: u8) -> Option<Self>;

    fn discriminant(&self) -> u8;
}

/// Wrapper giving any [`ScaleEnum`] its one-byte encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enum<T>(pub T);

impl<T: ScaleEnum> ScaleEncode for Enum<T> {
    fn encode_to(&self, dest: &mut Vec<u8>) {
        dest.push(self.0.discriminant());
    }
}

impl<T: ScaleEnum> ScaleDecode for Enum<T> {
    fn decode(bytes: &[u8]) -> Result<DecodeResult<Self>, ScaleError> {
        ensure_len(bytes, 1)?;
        let value = T::from_discriminant(bytes[0]).ok_or(ScaleError::UnknownDiscriminant {
            type_name: T::NAME,
            value: bytes[0],
        })?;
        Ok(DecodeResult::new(1, Enum(value)))
    }
}

// ================================================================================================
// Optional, Array, Tuple
// ================================================================================================

/// Decode `0` (None) or `1` followed by a value decoded with `decode_value`.
pub fn decode_optional_with<T>(
    bytes: &[u8],
    decode_value: impl Fn(&[u8]) -> Result<DecodeResult<T>, ScaleError>,
) -> Result<DecodeResult<Option<T>>, ScaleError> {
    ensure_len(bytes, 1)?;
    match bytes[0] {
        0 => Ok(DecodeResult::new(1, None)),
        1 => {
            let inner = decode_value(&bytes[1..])?;
            Ok(DecodeResult::new(1 + inner.bytes_consumed, Some(inner.value)))
        }
        tag => Err(ScaleError::InvalidOptionalTag(tag)),
    }
}

/// Decode a compact length followed by that many elements.
pub fn decode_array_with<T>(
    bytes: &[u8],
    decode_element: impl Fn(&[u8]) -> Result<DecodeResult<T>, ScaleError>,
) -> Result<DecodeResult<Vec<T>>, ScaleError> {
    let prefix = CompactInt::decode(bytes)?;
    let len = prefix.value.to_usize()?;
    let mut consumed = prefix.bytes_consumed;
    // Every element takes at least one byte, so a length beyond the buffer is truncation.
    let mut elements = Vec::with_capacity(len.min(bytes.len()));
    for _ in 0..len {
        let element = decode_element(&bytes[consumed..])?;
        consumed += element.bytes_consumed;
        elements.push(element.value);
    }
    Ok(DecodeResult::new(consumed, elements))
}

pub fn decode_tuple_with<T, R>(
    bytes: &[u8],
    decode_first: impl Fn(&[u8]) -> Result<DecodeResult<T>, ScaleError>,
    decode_second: impl Fn(&[u8]) -> Result<DecodeResult<R>, ScaleError>,
) -> Result<DecodeResult<(T, R)>, ScaleError> {
    let first = decode_first(bytes)?;
    let second = decode_second(&bytes[first.bytes_consumed..])?;
    Ok(DecodeResult::new(
        first.bytes_consumed + second.bytes_consumed,
        (first.value, second.value),
    ))
}

impl<T: ScaleEncode> ScaleEncode for Option<T> {
    fn encode_to(&self, dest: &mut Vec<u8>) {
        match self {
            None => dest.push(0),
            Some(value) => {
                dest.push(1);
                value.encode_to(dest);
            }
        }
    }
}

impl<T: ScaleDecode> ScaleDecode for Option<T> {
    fn decode(bytes: &[u8]) -> Result<DecodeResult<Self>, ScaleError> {
        decode_optional_with(bytes, T::decode)
    }
}

impl<T: ScaleEncode> ScaleEncode for [T] {
    fn encode_to(&self, dest: &mut Vec<u8>) {
        CompactInt::from(self.len()).encode_to(dest);
        for element in self {
            element.encode_to(dest);
        }
    }
}

impl<T: ScaleEncode> ScaleEncode for Vec<T> {
    fn encode_to(&self, dest: &mut Vec<u8>) {
        self.as_slice().encode_to(dest)
    }
}

impl<T: ScaleDecode> ScaleDecode for Vec<T> {
    fn decode(bytes: &[u8]) -> Result<DecodeResult<Self>, ScaleError> {
        decode_array_with(bytes, T::decode)
    }
}

impl<T: ScaleEncode, R: ScaleEncode> ScaleEncode for (T, R) {
    fn encode_to(&self, dest: &mut Vec<u8>) {
        self.0.encode_to(dest);
        self.1.encode_to(dest);
    }
}

impl<T: ScaleDecode, R: ScaleDecode> ScaleDecode for (T, R) {
    fn decode(bytes: &[u8]) -> Result<DecodeResult<Self>, ScaleError> {
        decode_tuple_with(bytes, T::decode, R::decode)
    }
}
