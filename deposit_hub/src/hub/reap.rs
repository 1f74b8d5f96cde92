//! Yield collection

use tracing::{debug, info};

use super::{
    sizing::{self, PoolReading},
    Hub,
};
use crate::{
    interfaces::Environment,
    journal::{HubEvent, JournalCollection},
    types::{HookTag, Ilk},
    utils::{
        common::to_rad,
        error::{HubError, HubResult, PoolOp},
    },
};

impl<E: Environment> Hub<E> {
    /// Sends whatever the pool holds above the market's debt to the vow
    pub fn reap(&mut self, ilk: &Ilk) -> HubResult<()> {
        let _guard = self.lock.try_lock()?;
        self.atomically("reap", |hub, journal| hub.collect(journal, ilk))
    }

    fn collect(&mut self, journal: &mut JournalCollection, ilk: &Ilk) -> HubResult<()> {
        if !self.env.ledger().live() {
            return Err(HubError::LedgerNotLive);
        }
        let record = self.record(ilk)?;
        if record.data.is_caged() {
            return Err(HubError::IlkCaged(ilk.to_string()));
        }
        let pool_at = record.settings.pool;
        let plan_at = record.settings.plan;
        if !self.pool_at(pool_at)?.active() || !self.plan_at(plan_at)?.active() {
            return Err(HubError::IlkInactive(ilk.to_string()));
        }

        self.pool_at_mut(pool_at)?.pre_debt_change(HookTag::Reap);

        let reading = PoolReading::read(self.pool_at(pool_at)?);
        let art = self.env.ledger().urn(ilk, pool_at).art;
        let fees = sizing::reap_amount(reading.assets, art, reading.max_withdraw);
        debug!(ilk = %ilk, assets = %reading.assets, %art, %fees, "reaping");

        if !fees.is_zero() {
            if !self.pool_at_mut(pool_at)?.withdraw(fees) {
                return Err(HubError::PoolFailure(PoolOp::Withdraw));
            }
            let hub = self.address;
            let vow = self.state.vow;
            let ledger = self.env.ledger_mut();
            ledger.join(hub, fees)?;
            ledger.move_dai(hub, vow, to_rad(fees)?)?;
            info!(ilk = %ilk, %fees, "reaped");
        }
        journal.record(HubEvent::reap(ilk, fees));

        self.pool_at_mut(pool_at)?.post_debt_change(HookTag::Reap);
        Ok(())
    }
}
