// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sequential reader threading a byte offset through successive decodes.

use super::compact::CompactInt;
use super::error::{ScaleError, ensure_len};
use super::types::{
    AccountId, Bytes, Enum, Hash, ScaleEnum, decode_array_with, decode_optional_with,
    decode_tuple_with,
};
use super::{DecodeResult, ScaleDecode};

/// Single mutable read position over an immutable buffer.
///
/// A cursor is owned by one decode operation at a time; composite decoders
/// create their own cursor over the sub-slice they were handed.
#[derive(Debug)]
pub struct ScaleCursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ScaleCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.offset..]
    }

    pub fn is_finished(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    /// Fail unless the whole buffer has been consumed.
    pub fn finish(&self) -> Result<(), ScaleError> {
        match self.bytes.len() - self.offset {
            0 => Ok(()),
            trailing => Err(ScaleError::TrailingBytes(trailing)),
        }
    }

    fn advance<T>(&mut self, result: DecodeResult<T>) -> T {
        self.offset += result.bytes_consumed;
        result.value
    }

    /// Decode with an explicit decoder function and advance past it.
    pub fn decode_next_with<T>(
        &mut self,
        decode: impl Fn(&[u8]) -> Result<DecodeResult<T>, ScaleError>,
    ) -> Result<T, ScaleError> {
        let result = decode(self.remaining())?;
        Ok(self.advance(result))
    }

    pub fn decode_next<T: ScaleDecode>(&mut self) -> Result<T, ScaleError> {
        self.decode_next_with(T::decode)
    }

    pub fn decode_next_bool(&mut self) -> Result<bool, ScaleError> {
        self.decode_next()
    }

    pub fn decode_next_u8(&mut self) -> Result<u8, ScaleError> {
        self.decode_next()
    }

    pub fn decode_next_u32(&mut self) -> Result<u32, ScaleError> {
        self.decode_next()
    }

    pub fn decode_next_u64(&mut self) -> Result<u64, ScaleError> {
        self.decode_next()
    }

    pub fn decode_next_u128(&mut self) -> Result<u128, ScaleError> {
        self.decode_next()
    }

    pub fn decode_next_compact(&mut self) -> Result<CompactInt, ScaleError> {
        self.decode_next()
    }

    pub fn decode_next_string(&mut self) -> Result<String, ScaleError> {
        self.decode_next()
    }

    pub fn decode_next_bytes(&mut self) -> Result<Vec<u8>, ScaleError> {
        Ok(self.decode_next::<Bytes>()?.0)
    }

    pub fn decode_next_hash<const N: usize>(&mut self) -> Result<Hash<N>, ScaleError> {
        self.decode_next()
    }

    pub fn decode_next_account_id(&mut self) -> Result<AccountId, ScaleError> {
        self.decode_next()
    }

    pub fn decode_next_enum<T: ScaleEnum>(&mut self) -> Result<T, ScaleError> {
        Ok(self.decode_next::<Enum<T>>()?.0)
    }

    /// Take `len` raw bytes without any prefix.
    pub fn decode_next_fixed(&mut self, len: usize) -> Result<&'a [u8], ScaleError> {
        let remaining = self.remaining();
        ensure_len(remaining, len)?;
        self.offset += len;
        Ok(&remaining[..len])
    }

    pub fn decode_next_array<T>(
        &mut self,
        decode_element: impl Fn(&[u8]) -> Result<DecodeResult<T>, ScaleError>,
    ) -> Result<Vec<T>, ScaleError> {
        self.decode_next_with(|bytes| decode_array_with(bytes, &decode_element))
    }

    pub fn decode_next_optional<T>(
        &mut self,
        decode_value: impl Fn(&[u8]) -> Result<DecodeResult<T>, ScaleError>,
    ) -> Result<Option<T>, ScaleError> {
        self.decode_next_with(|bytes| decode_optional_with(bytes, &decode_value))
    }

    pub fn decode_next_tuple<T, R>(
        &mut self,
        decode_first: impl Fn(&[u8]) -> Result<DecodeResult<T>, ScaleError>,
        decode_second: impl Fn(&[u8]) -> Result<DecodeResult<R>, ScaleError>,
    ) -> Result<(T, R), ScaleError> {
        self.decode_next_with(|bytes| decode_tuple_with(bytes, &decode_first, &decode_second))
    }
}
