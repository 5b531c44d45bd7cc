// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Transaction types, their argument schemas and the encoded call.
//!
//! Argument layouts are fixed per transaction type; metadata only supplies the
//! `(module index, call index)` pair.

use super::TransactionError;
use crate::metadata::{CallId, MetadataIndex};
use crate::scale::{
    AccountId, CompactInt, DecodeResult, Enum, ScaleCursor, ScaleEncode, ScaleError,
};
use crate::state::RewardDestination;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionType {
    Transfer,
    Bond,
    Unbond,
    Rebond,
    BondExtra,
    WithdrawUnbonded,
    Nominate,
    CancelNomination,
    CollectPayout,
    SetPayee,
    SetController,
    SubmitBatch,
}

impl TransactionType {
    pub const ALL: [TransactionType; 12] = [
        TransactionType::Transfer,
        TransactionType::Bond,
        TransactionType::Unbond,
        TransactionType::Rebond,
        TransactionType::BondExtra,
        TransactionType::WithdrawUnbonded,
        TransactionType::Nominate,
        TransactionType::CancelNomination,
        TransactionType::CollectPayout,
        TransactionType::SetPayee,
        TransactionType::SetController,
        TransactionType::SubmitBatch,
    ];

    /// Metadata key of the call this type dispatches to.
    pub fn call_key(&self) -> &'static str {
        match self {
            TransactionType::Transfer => "Balances_transfer",
            TransactionType::Bond => "Staking_bond",
            TransactionType::Unbond => "Staking_unbond",
            TransactionType::Rebond => "Staking_rebond",
            TransactionType::BondExtra => "Staking_bondExtra",
            TransactionType::WithdrawUnbonded => "Staking_withdrawUnbonded",
            TransactionType::Nominate => "Staking_nominate",
            TransactionType::CancelNomination => "Staking_chill",
            TransactionType::CollectPayout => "Staking_payoutStakers",
            TransactionType::SetPayee => "Staking_setPayee",
            TransactionType::SetController => "Staking_setController",
            TransactionType::SubmitBatch => "Utility_batch",
        }
    }

    pub fn from_call_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.call_key() == key)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ================================================================================================
// Arguments
// ================================================================================================

/// Typed arguments, one variant per transaction type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodArgs {
    Transfer {
        dest: AccountId,
        value: CompactInt,
    },
    Bond {
        controller: AccountId,
        value: CompactInt,
        payee: RewardDestination,
    },
    Unbond {
        value: CompactInt,
    },
    Rebond {
        value: CompactInt,
    },
    BondExtra {
        value: CompactInt,
    },
    WithdrawUnbonded {
        num_slashing_spans: u32,
    },
    Nominate {
        targets: Vec<AccountId>,
    },
    CancelNomination,
    CollectPayout {
        validator_stash: AccountId,
        era: u32,
    },
    SetPayee {
        payee: RewardDestination,
    },
    SetController {
        controller: AccountId,
    },
    SubmitBatch {
        calls: Vec<Method>,
    },
}

/// Loosely populated argument bag, checked against a transaction type's
/// schema by [`MethodArgs::build`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentSet {
    pub dest: Option<AccountId>,
    pub value: Option<u128>,
    pub controller: Option<AccountId>,
    pub payee: Option<RewardDestination>,
    pub targets: Option<Vec<AccountId>>,
    pub num_slashing_spans: Option<u32>,
    pub validator_stash: Option<AccountId>,
    pub era: Option<u32>,
    pub calls: Option<Vec<Method>>,
}

impl ArgumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dest(mut self, dest: AccountId) -> Self {
        self.dest = Some(dest);
        self
    }

    pub fn value(mut self, value: u128) -> Self {
        self.value = Some(value);
        self
    }

    pub fn controller(mut self, controller: AccountId) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn payee(mut self, payee: RewardDestination) -> Self {
        self.payee = Some(payee);
        self
    }

    pub fn targets(mut self, targets: Vec<AccountId>) -> Self {
        self.targets = Some(targets);
        self
    }

    pub fn num_slashing_spans(mut self, spans: u32) -> Self {
        self.num_slashing_spans = Some(spans);
        self
    }

    pub fn validator_stash(mut self, stash: AccountId) -> Self {
        self.validator_stash = Some(stash);
        self
    }

    pub fn era(mut self, era: u32) -> Self {
        self.era = Some(era);
        self
    }

    pub fn calls(mut self, calls: Vec<Method>) -> Self {
        self.calls = Some(calls);
        self
    }
}

/// Collects the names of missing fields so that all of them are reported at once.
struct Required<'a> {
    args: &'a ArgumentSet,
    missing: Vec<&'static str>,
}

impl<'a> Required<'a> {
    fn take<T: Clone>(
        &mut self,
        name: &'static str,
        field: fn(&ArgumentSet) -> &Option<T>,
    ) -> Option<T> {
        let value = field(self.args).clone();
        if value.is_none() {
            self.missing.push(name);
        }
        value
    }
}

impl MethodArgs {
    /// Check `args` against the schema of `tx_type`, failing with every
    /// missing field before anything is encoded.
    pub fn build(tx_type: TransactionType, args: &ArgumentSet) -> Result<Self, TransactionError> {
        let mut req = Required {
            args,
            missing: Vec::new(),
        };

        let built = match tx_type {
            TransactionType::Transfer => {
                let dest = req.take("dest", |a| &a.dest);
                let value = req.take("value", |a| &a.value);
                dest.zip(value).map(|(dest, value)| MethodArgs::Transfer {
                    dest,
                    value: value.into(),
                })
            }
            TransactionType::Bond => {
                let controller = req.take("controller", |a| &a.controller);
                let value = req.take("value", |a| &a.value);
                let payee = req.take("payee", |a| &a.payee);
                match (controller, value, payee) {
                    (Some(controller), Some(value), Some(payee)) => Some(MethodArgs::Bond {
                        controller,
                        value: value.into(),
                        payee,
                    }),
                    _ => None,
                }
            }
            TransactionType::Unbond => req
                .take("value", |a| &a.value)
                .map(|value| MethodArgs::Unbond { value: value.into() }),
            TransactionType::Rebond => req
                .take("value", |a| &a.value)
                .map(|value| MethodArgs::Rebond { value: value.into() }),
            TransactionType::BondExtra => req
                .take("value", |a| &a.value)
                .map(|value| MethodArgs::BondExtra { value: value.into() }),
            TransactionType::WithdrawUnbonded => req
                .take("num_slashing_spans", |a| &a.num_slashing_spans)
                .map(|num_slashing_spans| MethodArgs::WithdrawUnbonded { num_slashing_spans }),
            TransactionType::Nominate => req
                .take("targets", |a| &a.targets)
                .map(|targets| MethodArgs::Nominate { targets }),
            TransactionType::CancelNomination => Some(MethodArgs::CancelNomination),
            TransactionType::CollectPayout => {
                let validator_stash = req.take("validator_stash", |a| &a.validator_stash);
                let era = req.take("era", |a| &a.era);
                validator_stash
                    .zip(era)
                    .map(|(validator_stash, era)| MethodArgs::CollectPayout {
                        validator_stash,
                        era,
                    })
            }
            TransactionType::SetPayee => req
                .take("payee", |a| &a.payee)
                .map(|payee| MethodArgs::SetPayee { payee }),
            TransactionType::SetController => req
                .take("controller", |a| &a.controller)
                .map(|controller| MethodArgs::SetController { controller }),
            TransactionType::SubmitBatch => req
                .take("calls", |a| &a.calls)
                .map(|calls| MethodArgs::SubmitBatch { calls }),
        };

        match built {
            Some(args) if req.missing.is_empty() => Ok(args),
            _ => Err(TransactionError::MissingArgument {
                tx_type,
                fields: req.missing,
            }),
        }
    }

    pub fn tx_type(&self) -> TransactionType {
        match self {
            MethodArgs::Transfer { .. } => TransactionType::Transfer,
            MethodArgs::Bond { .. } => TransactionType::Bond,
            MethodArgs::Unbond { .. } => TransactionType::Unbond,
            MethodArgs::Rebond { .. } => TransactionType::Rebond,
            MethodArgs::BondExtra { .. } => TransactionType::BondExtra,
            MethodArgs::WithdrawUnbonded { .. } => TransactionType::WithdrawUnbonded,
            MethodArgs::Nominate { .. } => TransactionType::Nominate,
            MethodArgs::CancelNomination => TransactionType::CancelNomination,
            MethodArgs::CollectPayout { .. } => TransactionType::CollectPayout,
            MethodArgs::SetPayee { .. } => TransactionType::SetPayee,
            MethodArgs::SetController { .. } => TransactionType::SetController,
            MethodArgs::SubmitBatch { .. } => TransactionType::SubmitBatch,
        }
    }

    /// Decode the arguments of `tx_type` in schema order.
    fn decode_for(
        tx_type: TransactionType,
        cursor: &mut ScaleCursor<'_>,
        index: &MetadataIndex,
    ) -> Result<Self, TransactionError> {
        let args = match tx_type {
            TransactionType::Transfer => MethodArgs::Transfer {
                dest: cursor.decode_next_account_id()?,
                value: cursor.decode_next_compact()?,
            },
            TransactionType::Bond => MethodArgs::Bond {
                controller: cursor.decode_next_account_id()?,
                value: cursor.decode_next_compact()?,
                payee: cursor.decode_next_enum()?,
            },
            TransactionType::Unbond => MethodArgs::Unbond {
                value: cursor.decode_next_compact()?,
            },
            TransactionType::Rebond => MethodArgs::Rebond {
                value: cursor.decode_next_compact()?,
            },
            TransactionType::BondExtra => MethodArgs::BondExtra {
                value: cursor.decode_next_compact()?,
            },
            TransactionType::WithdrawUnbonded => MethodArgs::WithdrawUnbonded {
                num_slashing_spans: cursor.decode_next_u32()?,
            },
            TransactionType::Nominate => MethodArgs::Nominate {
                targets: cursor.decode_next()?,
            },
            TransactionType::CancelNomination => MethodArgs::CancelNomination,
            TransactionType::CollectPayout => MethodArgs::CollectPayout {
                validator_stash: cursor.decode_next_account_id()?,
                era: cursor.decode_next_u32()?,
            },
            TransactionType::SetPayee => MethodArgs::SetPayee {
                payee: cursor.decode_next_enum()?,
            },
            TransactionType::SetController => MethodArgs::SetController {
                controller: cursor.decode_next_account_id()?,
            },
            TransactionType::SubmitBatch => {
                let count = cursor.decode_next_compact()?.to_usize()?;
                let mut calls = Vec::with_capacity(count.min(cursor.remaining().len()));
                for _ in 0..count {
                    let call = Method::decode(cursor.remaining(), index)?;
                    cursor.decode_next_fixed(call.bytes_consumed)?;
                    calls.push(call.value);
                }
                MethodArgs::SubmitBatch { calls }
            }
        };
        Ok(args)
    }
}

impl ScaleEncode for MethodArgs {
    fn encode_to(&self, dest: &mut Vec<u8>) {
        match self {
            MethodArgs::Transfer { dest: to, value } => {
                to.encode_to(dest);
                value.encode_to(dest);
            }
            MethodArgs::Bond {
                controller,
                value,
                payee,
            } => {
                controller.encode_to(dest);
                value.encode_to(dest);
                Enum(*payee).encode_to(dest);
            }
            MethodArgs::Unbond { value }
            | MethodArgs::Rebond { value }
            | MethodArgs::BondExtra { value } => value.encode_to(dest),
            MethodArgs::WithdrawUnbonded { num_slashing_spans } => {
                num_slashing_spans.encode_to(dest)
            }
            MethodArgs::Nominate { targets } => targets.encode_to(dest),
            MethodArgs::CancelNomination => {}
            MethodArgs::CollectPayout {
                validator_stash,
                era,
            } => {
                validator_stash.encode_to(dest);
                era.encode_to(dest);
            }
            MethodArgs::SetPayee { payee } => Enum(*payee).encode_to(dest),
            MethodArgs::SetController { controller } => controller.encode_to(dest),
            MethodArgs::SubmitBatch { calls } => calls.encode_to(dest),
        }
    }
}

// ================================================================================================
// Method
// ================================================================================================

/// A call: dispatch position followed by the encoded arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub call_id: CallId,
    pub args: MethodArgs,
}

impl Method {
    pub fn new(call_id: CallId, args: MethodArgs) -> Self {
        Self { call_id, args }
    }

    /// Resolve the call id for `args` from the metadata index.
    pub fn resolve(index: &MetadataIndex, args: MethodArgs) -> Result<Self, TransactionError> {
        let call_id = index.call_id(args.tx_type().call_key())?;
        Ok(Self::new(call_id, args))
    }

    pub fn tx_type(&self) -> TransactionType {
        self.args.tx_type()
    }

    /// Decode a call, mapping its dispatch position back to a transaction type.
    pub fn decode(
        bytes: &[u8],
        index: &MetadataIndex,
    ) -> Result<DecodeResult<Self>, TransactionError> {
        let mut cursor = ScaleCursor::new(bytes);
        let call_id = CallId::new(cursor.decode_next_u8()?, cursor.decode_next_u8()?);
        let key = index
            .call_key(call_id)
            .ok_or(TransactionError::UnknownCall(call_id))?;
        let tx_type = TransactionType::from_call_key(key)
            .ok_or_else(|| TransactionError::UnsupportedCall(key.to_string()))?;
        let args = MethodArgs::decode_for(tx_type, &mut cursor, index)?;
        Ok(DecodeResult::new(cursor.offset(), Method { call_id, args }))
    }

    pub fn decode_all(bytes: &[u8], index: &MetadataIndex) -> Result<Self, TransactionError> {
        let result = Self::decode(bytes, index)?;
        if result.bytes_consumed != bytes.len() {
            return Err(ScaleError::TrailingBytes(bytes.len() - result.bytes_consumed).into());
        }
        Ok(result.value)
    }
}

impl ScaleEncode for Method {
    fn encode_to(&self, dest: &mut Vec<u8>) {
        dest.push(self.call_id.module_index);
        dest.push(self.call_id.call_index);
        self.args.encode_to(dest);
    }
}
