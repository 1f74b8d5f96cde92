//! Admin controlled settings of a market

use alloy_primitives::Address;

/// Settings filed by the wards. Only mutable while the market is not caged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IlkSettings {
    /// Pool capability of the market
    pub pool: Address,
    /// Plan capability of the market
    pub plan: Address,
    /// Grace period between cage and cull, in seconds
    pub tau: u64,
}

impl IlkSettings {
    /// Sets the pool address.
    pub fn pool(&mut self, pool: Address) -> &mut Self {
        self.pool = pool;
        self
    }

    /// Sets the plan address.
    pub fn plan(&mut self, plan: Address) -> &mut Self {
        self.plan = plan;
        self
    }

    /// Sets the grace period, denominated in seconds.
    pub fn tau(&mut self, tau: u64) -> &mut Self {
        self.tau = tau;
        self
    }
}
