//! Yield-bearing venue of a market

use alloy_primitives::{Address, U256};
#[cfg(test)]
use mockall::automock;

use crate::types::HookTag;

/// One instance per market. Holds the assets the hub has deposited.
///
/// Boolean returns report success; the hub aborts the call on `false`.
#[cfg_attr(test, automock)]
pub trait Pool {
    fn deposit(&mut self, wad: U256) -> bool;
    /// Withdraws `wad` from the venue and hands it to the hub
    fn withdraw(&mut self, wad: U256) -> bool;
    fn transfer(&mut self, dst: Address, wad: U256) -> bool;
    fn transfer_all(&mut self, dst: Address) -> bool;
    /// Pays out `wad` units of the redeemable asset during global settlement
    fn exit(&mut self, dst: Address, wad: U256) -> bool {
        self.transfer(dst, wad)
    }
    fn pre_debt_change(&mut self, tag: HookTag);
    fn post_debt_change(&mut self, tag: HookTag);

    fn asset_balance(&self) -> U256;
    fn max_deposit(&self) -> U256;
    fn max_withdraw(&self) -> U256;
    /// Asset handed out on `exit`
    fn redeemable(&self) -> Address;
    fn active(&self) -> bool;
    /// Anyone may cage the market when set
    fn wild(&self) -> bool;
}
