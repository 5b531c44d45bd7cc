// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::scale::AccountId;
use crate::state::{Nominations, StakingLedger};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StakingState {
    NotBonded,
    BondedNotNominating,
    Nominating,
    /// Nominations exist but none of them is backing an active validator.
    NominatingInactive,
}

impl StakingState {
    /// `is_exposed` tells whether the nominator backs any validator in the
    /// active era.
    pub fn derive(
        ledger: Option<&StakingLedger>,
        nominations: Option<&Nominations>,
        active_era: u32,
        is_exposed: bool,
    ) -> Self {
        let bonded = ledger.is_some_and(|ledger| ledger.total.0 > 0);
        match (bonded, nominations) {
            (false, _) => StakingState::NotBonded,
            (true, None) => StakingState::BondedNotNominating,
            (true, Some(nominations)) if nominations.targets.is_empty() => {
                StakingState::BondedNotNominating
            }
            (true, Some(nominations)) => {
                if nominations.submitted_in < active_era && !is_exposed {
                    StakingState::NominatingInactive
                } else {
                    StakingState::Nominating
                }
            }
        }
    }

    pub fn is_bonded(&self) -> bool {
        !matches!(self, StakingState::NotBonded)
    }

    pub fn is_nominating(&self) -> bool {
        matches!(
            self,
            StakingState::Nominating | StakingState::NominatingInactive
        )
    }
}

/// Actions offered to the user. Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StakingActionType {
    BondNominate,
    Nominate,
    BondExtra,
    Unbond,
    ChangeNomination,
    CancelNomination,
    CollectRewards,
    WithdrawUnbonded,
}

/// Inputs of the available-actions state machine.
#[derive(Debug, Clone)]
pub struct StakingActionContext<'a> {
    pub state: StakingState,
    pub spendable: u128,
    pub existential_deposit: u128,
    pub targets: &'a [AccountId],
    pub desired_targets: &'a [AccountId],
    pub unlocked: u128,
    pub has_unclaimed_rewards: bool,
}

/// Actions available in the current state, sorted by action type.
pub fn available_actions(ctx: &StakingActionContext<'_>) -> Vec<StakingActionType> {
    let mut actions = Vec::new();
    let can_bond = ctx.spendable > ctx.existential_deposit;

    match ctx.state {
        StakingState::NotBonded => {
            if can_bond {
                actions.push(StakingActionType::BondNominate);
            }
        }
        StakingState::BondedNotNominating => {
            actions.push(StakingActionType::Nominate);
            actions.push(StakingActionType::Unbond);
        }
        StakingState::Nominating | StakingState::NominatingInactive => {
            let current: BTreeSet<_> = ctx.targets.iter().collect();
            let desired: BTreeSet<_> = ctx.desired_targets.iter().collect();
            if current == desired {
                actions.push(StakingActionType::CancelNomination);
            } else {
                actions.push(StakingActionType::ChangeNomination);
            }
            if ctx.has_unclaimed_rewards {
                actions.push(StakingActionType::CollectRewards);
            }
        }
    }

    if ctx.state.is_bonded() {
        if can_bond {
            actions.push(StakingActionType::BondExtra);
        }
        if ctx.unlocked > 0 {
            actions.push(StakingActionType::WithdrawUnbonded);
        }
    }

    actions.sort();
    actions.dedup();
    actions
}
