// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::scale::{DecodeResult, ScaleDecode, ScaleEncode, ScaleError, ensure_len};

const MIN_PERIOD: u64 = 4;
const MAX_PERIOD: u64 = 1 << 16;

/// Transaction mortality window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Era {
    #[default]
    Immortal,
    Mortal { period: u64, phase: u64 },
}

impl Era {
    /// Mortal era starting at `current_height`. The period is rounded up to a
    /// power of two within `[4, 65536]` and the phase is quantized.
    pub fn mortal(period: u64, current_height: u64) -> Self {
        let period = period
            .checked_next_power_of_two()
            .unwrap_or(MAX_PERIOD)
            .clamp(MIN_PERIOD, MAX_PERIOD);
        let phase = current_height % period;
        let quantize_factor = quantize_factor(period);
        let quantized_phase = phase / quantize_factor * quantize_factor;

        Era::Mortal {
            period,
            phase: quantized_phase,
        }
    }

    /// Immortal when no period (or a zero period) is given.
    pub fn from_period(period: Option<u64>, current_height: u64) -> Self {
        match period {
            Some(period) if period > 0 => Era::mortal(period, current_height),
            _ => Era::Immortal,
        }
    }

    pub fn is_mortal(&self) -> bool {
        matches!(self, Era::Mortal { .. })
    }

    /// First block in which a transaction with this era is valid.
    pub fn birth(&self, current_height: u64) -> u64 {
        match self {
            Era::Immortal => 0,
            Era::Mortal { period, phase } => {
                (current_height.max(*phase) - phase) / period * period + phase
            }
        }
    }
}

fn quantize_factor(period: u64) -> u64 {
    (period >> 12).max(1)
}

impl ScaleEncode for Era {
    fn encode_to(&self, dest: &mut Vec<u8>) {
        match self {
            Era::Immortal => dest.push(0),
            Era::Mortal { period, phase } => {
                let trailing_zeros = (period.trailing_zeros() as u64)
                    .saturating_sub(1)
                    .clamp(1, 15);
                let encoded = trailing_zeros | ((phase / quantize_factor(*period)) << 4);
                dest.extend_from_slice(&(encoded as u16).to_le_bytes());
            }
        }
    }
}

impl ScaleDecode for Era {
    fn decode(bytes: &[u8]) -> Result<DecodeResult<Self>, ScaleError> {
        ensure_len(bytes, 1)?;
        if bytes[0] == 0 {
            return Ok(DecodeResult::new(1, Era::Immortal));
        }

        ensure_len(bytes, 2)?;
        let encoded = u16::from_le_bytes([bytes[0], bytes[1]]) as u64;
        let period = 2u64 << (encoded % 16);
        let phase = (encoded >> 4) * quantize_factor(period);
        // A low nibble of 0 (period 2) is valid on chain, but mortal eras here stay
        // within [4, 65536] and `Era::mortal` never emits one, so it is refused.
        if period < MIN_PERIOD || phase >= period {
            return Err(ScaleError::OutOfRange {
                value: phase as u128,
                target: "era phase",
            });
        }

        Ok(DecodeResult::new(2, Era::Mortal { period, phase }))
    }
}
