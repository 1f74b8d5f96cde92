//! Target allocation strategy of a market

use alloy_primitives::U256;
#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
pub trait Plan {
    /// Assets the pool should hold, given what it holds now
    fn target_assets(&self, current_assets: U256) -> U256;
    fn active(&self) -> bool;
    /// Anyone may cage the market when set
    fn wild(&self) -> bool;
}
