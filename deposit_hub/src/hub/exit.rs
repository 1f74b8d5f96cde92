//! Redemption of collateral units during global settlement

use alloy_primitives::{Address, U256};
use tracing::info;

use super::Hub;
use crate::{
    interfaces::Environment,
    journal::HubEvent,
    types::Ilk,
    utils::{
        common::to_neg_int,
        error::{HubError, HubResult, PoolOp},
    },
};

impl<E: Environment> Hub<E> {
    /// Burns `wad` of the caller's collateral units and pays `usr` the matching pool shares
    pub fn exit(&mut self, caller: Address, ilk: &Ilk, usr: Address, wad: U256) -> HubResult<()> {
        let _guard = self.lock.try_lock()?;
        self.atomically("exit", |hub, journal| {
            if hub.env.ledger().live() {
                return Err(HubError::LedgerLive);
            }
            let pool_at = hub.record(ilk)?.settings.pool;

            hub.env
                .ledger_mut()
                .slip(ilk, caller, to_neg_int(wad)?)?;
            if !hub.pool_at_mut(pool_at)?.exit(usr, wad) {
                return Err(HubError::PoolFailure(PoolOp::Exit));
            }

            info!(ilk = %ilk, %caller, %usr, %wad, "exited");
            journal.record(HubEvent::exit(ilk, usr, wad));
            Ok(())
        })
    }
}
