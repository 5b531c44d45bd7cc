// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Variable-width unsigned integers.
//!
//! The two low bits of the first byte select the mode:
//! - `0b00`: single byte, values 0..=63
//! - `0b01`: two bytes, values 64..=16383
//! - `0b10`: four bytes, values 16384..=2^30-1
//! - `0b11`: big-integer mode, the upper six bits hold `byte_count - 4`,
//!   followed by `byte_count` little-endian magnitude bytes

use super::error::{ScaleError, ensure_len};
use super::{DecodeResult, ScaleDecode, ScaleEncode};

const SINGLE_BYTE_MAX: u128 = 0b0011_1111;
const TWO_BYTE_MAX: u128 = (1 << 14) - 1;
const FOUR_BYTE_MAX: u128 = (1 << 30) - 1;

/// Magnitudes are bounded by `u128`, the widest balance type on the
/// supported chains. Mode 3 payloads longer than 16 bytes are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CompactInt(pub u128);

/// Encoding mode chosen for a compact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompactMode {
    SingleByte,
    TwoByte,
    FourByte,
    BigInteger,
}

impl CompactInt {
    pub fn value(&self) -> u128 {
        self.0
    }

    pub fn mode(&self) -> CompactMode {
        match self.0 {
            0..=SINGLE_BYTE_MAX => CompactMode::SingleByte,
            ..=TWO_BYTE_MAX => CompactMode::TwoByte,
            ..=FOUR_BYTE_MAX => CompactMode::FourByte,
            _ => CompactMode::BigInteger,
        }
    }

    /// Narrow to `u32`, for lengths, eras and commissions.
    pub fn to_u32(&self) -> Result<u32, ScaleError> {
        u32::try_from(self.0).map_err(|_| ScaleError::OutOfRange {
            value: self.0,
            target: "u32",
        })
    }

    pub fn to_usize(&self) -> Result<usize, ScaleError> {
        usize::try_from(self.0).map_err(|_| ScaleError::OutOfRange {
            value: self.0,
            target: "usize",
        })
    }
}

impl From<u128> for CompactInt {
    fn from(value: u128) -> Self {
        CompactInt(value)
    }
}

impl From<u64> for CompactInt {
    fn from(value: u64) -> Self {
        CompactInt(value as u128)
    }
}

impl From<u32> for CompactInt {
    fn from(value: u32) -> Self {
        CompactInt(value as u128)
    }
}

impl From<usize> for CompactInt {
    fn from(value: usize) -> Self {
        CompactInt(value as u128)
    }
}

impl ScaleEncode for CompactInt {
    fn encode_to(&self, dest: &mut Vec<u8>) {
        let value = self.0;
        match self.mode() {
            CompactMode::SingleByte => dest.push((value as u8) << 2),
            CompactMode::TwoByte => {
                dest.extend_from_slice(&(((value as u16) << 2) | 0b01).to_le_bytes())
            }
            CompactMode::FourByte => {
                dest.extend_from_slice(&(((value as u32) << 2) | 0b10).to_le_bytes())
            }
            CompactMode::BigInteger => {
                let le = value.to_le_bytes();
                let significant = 16 - (value.leading_zeros() as usize / 8);
                let byte_count = significant.max(4);
                dest.push((((byte_count - 4) as u8) << 2) | 0b11);
                dest.extend_from_slice(&le[..byte_count]);
            }
        }
    }
}

impl ScaleDecode for CompactInt {
    fn decode(bytes: &[u8]) -> Result<DecodeResult<Self>, ScaleError> {
        ensure_len(bytes, 1)?;
        let first = bytes[0];

        let (value, consumed, mode, minimum) = match first & 0b11 {
            0b00 => ((first >> 2) as u128, 1, 0, 0),
            0b01 => {
                ensure_len(bytes, 2)?;
                let raw = u16::from_le_bytes([bytes[0], bytes[1]]);
                ((raw >> 2) as u128, 2, 1, SINGLE_BYTE_MAX + 1)
            }
            0b10 => {
                ensure_len(bytes, 4)?;
                let raw = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
                ((raw >> 2) as u128, 4, 2, TWO_BYTE_MAX + 1)
            }
            _ => {
                let byte_count = (first >> 2) as usize + 4;
                if byte_count > 16 {
                    return Err(ScaleError::CompactOverflow(byte_count));
                }
                ensure_len(bytes, 1 + byte_count)?;
                let mut le = [0u8; 16];
                le[..byte_count].copy_from_slice(&bytes[1..1 + byte_count]);
                let value = u128::from_le_bytes(le);
                // The most significant byte must carry data unless the minimum width is used.
                if byte_count > 4 && bytes[byte_count] == 0 {
                    return Err(ScaleError::NonCanonicalCompact { value, mode: 3 });
                }
                (value, 1 + byte_count, 3, FOUR_BYTE_MAX + 1)
            }
        };

        if value < minimum {
            return Err(ScaleError::NonCanonicalCompact { value, mode });
        }

        Ok(DecodeResult::new(consumed, CompactInt(value)))
    }
}
