//! Resolves the hub's collaborators by address

use alloy_primitives::Address;

use super::{Ledger, Plan, Pool, Settlement};
use crate::{types::Ilk, utils::error::HubResult};

/// Settlement module paired with the ledger it settles against
pub struct Settle<'a> {
    pub end: &'a mut dyn Settlement,
    pub ledger: &'a mut dyn Ledger,
}

impl Settle<'_> {
    pub fn skim(self, ilk: &Ilk, urn: Address) -> HubResult<()> {
        self.end.skim(self.ledger, ilk, urn)
    }
}

/// Everything outside the hub.
///
/// `Clone` is the commit model: the hub snapshots the environment before a mutating call and
/// restores the snapshot if the call fails, so a call either commits every ledger and pool
/// mutation or none of them.
pub trait Environment: Clone {
    /// Current unix timestamp in seconds
    fn now(&self) -> u64;
    fn ledger(&self) -> &dyn Ledger;
    fn ledger_mut(&mut self) -> &mut dyn Ledger;
    fn pool(&self, at: Address) -> Option<&dyn Pool>;
    fn pool_mut(&mut self, at: Address) -> Option<&mut dyn Pool>;
    fn plan(&self, at: Address) -> Option<&dyn Plan>;
    fn settlement(&self, at: Address) -> Option<&dyn Settlement>;
    fn settle(&mut self, at: Address) -> Option<Settle<'_>>;
}
