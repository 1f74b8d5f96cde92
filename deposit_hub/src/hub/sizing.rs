//! Sizing arithmetic of the hub.
//!
//! Pure functions over figures read from the ledger and the pool. All amounts are WAD unless
//! noted otherwise.

use alloy_primitives::U256;

use crate::{
    constants::{max_int256, ray},
    interfaces::Pool,
    utils::{
        common::divup,
        error::{arithmetic_err, HubResult},
    },
};

/// Figures the hub reads from the pool once per call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolReading {
    /// Assets currently held, including accrued yield
    pub assets: U256,
    pub max_deposit: U256,
    pub max_withdraw: U256,
    pub active: bool,
}

impl PoolReading {
    pub fn read(pool: &dyn Pool) -> Self {
        Self {
            assets: pool.asset_balance(),
            max_deposit: pool.max_deposit(),
            max_withdraw: pool.max_withdraw(),
            active: pool.active(),
        }
    }
}

/// Debt of the market against its ceilings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ceilings {
    /// Normalized debt of the pool's position
    pub art: U256,
    /// Market debt ceiling [RAD]
    pub line: U256,
    /// Total system debt [RAD]
    pub debt: U256,
    /// Global debt ceiling [RAD]
    pub global_line: U256,
}

impl Ceilings {
    /// Market ceiling in whole units, rounded down
    pub fn line_wad(&self) -> U256 {
        self.line / ray()
    }

    /// Amount that has to be unwound to get back under both ceilings.
    ///
    /// The market overage is measured against the truncated ceiling, the global overage is
    /// rounded up, so the result always lands strictly under both.
    pub fn excess(&self) -> HubResult<U256> {
        let ilk_excess = self.art.saturating_sub(self.line_wad());
        let global_excess = if self.debt > self.global_line {
            divup(self.debt - self.global_line, ray())?
        } else {
            U256::ZERO
        };
        Ok(ilk_excess.max(global_excess))
    }

    /// Room left under both ceilings
    pub fn headroom(&self) -> U256 {
        let ilk_room = self.line_wad().saturating_sub(self.art);
        let global_room = self.global_line.saturating_sub(self.debt) / ray();
        ilk_room.min(global_room)
    }
}

/// Reduction the healthy path asks for: ceiling overages, or the plan wanting less than the pool holds
pub fn unwind_requirement(ceilings: &Ceilings, target: U256, assets: U256) -> HubResult<U256> {
    Ok(ceilings.excess()?.max(assets.saturating_sub(target)))
}

/// Increase the healthy path asks for when there is nothing to unwind
pub fn wind_amount(ceilings: &Ceilings, target: U256, assets: U256, max_deposit: U256) -> U256 {
    target
        .saturating_sub(assets)
        .min(ceilings.headroom())
        .min(max_deposit)
}

/// Settled amounts of an unwind
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnwindAmounts {
    /// Principal paid back
    pub amount: U256,
    /// Yield skimmed on the way
    pub fee: U256,
}

impl UnwindAmounts {
    pub fn is_empty(&self) -> bool {
        self.amount.is_zero() && self.fee.is_zero()
    }

    /// What has to leave the pool
    pub fn total(&self) -> HubResult<U256> {
        self.amount
            .checked_add(self.fee)
            .ok_or_else(|| arithmetic_err("Unwind total overflowed."))
    }
}

/// Splits an unwind into principal and fee.
///
/// `amount` never exceeds what was requested, what the pool can release, what is owed (`debt`),
/// or the signed range of the ledger. Whatever the pool holds above `debt` is fee, trimmed so the
/// total still fits under `max_withdraw`.
pub fn unwind_amounts(
    requested: U256,
    max_withdraw: U256,
    debt: U256,
    assets: U256,
) -> UnwindAmounts {
    let amount = requested.min(max_withdraw).min(debt).min(max_int256());
    let fee = assets.saturating_sub(debt).min(max_withdraw - amount);
    UnwindAmounts { amount, fee }
}

/// Yield above the recorded debt that can be taken out right now
pub fn reap_amount(assets: U256, art: U256, max_withdraw: U256) -> U256 {
    assets.saturating_sub(art).min(max_withdraw)
}
