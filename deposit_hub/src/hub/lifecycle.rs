//! Cage, cull, uncull and quit

use alloy_primitives::Address;
use tracing::info;

use super::Hub;
use crate::{
    interfaces::Environment,
    journal::{HubEvent, JournalCollection},
    types::Ilk,
    utils::{
        common::{format_timestamp, only_ward, to_int, to_neg_int, to_rad},
        error::{arithmetic_err, HubError, HubResult, PoolOp},
    },
};

impl<E: Environment> Hub<E> {
    /// Starts the wind-down of a market: `execute` only unwinds from now on and `cull` becomes
    /// possible for anyone once `tau` has elapsed.
    ///
    /// Callable by a ward, by the market's pool, or by anyone once the pool or the plan reports
    /// itself compromised.
    pub fn cage(&mut self, caller: Address, ilk: &Ilk) -> HubResult<()> {
        self.atomically("cage", |hub, journal| {
            if !hub.env.ledger().live() {
                return Err(HubError::LedgerNotLive);
            }
            let record = hub.record(ilk)?;
            if record.data.is_caged() {
                return Err(HubError::AlreadyCaged(ilk.to_string()));
            }

            let pool_at = record.settings.pool;
            let plan_at = record.settings.plan;
            let tau = record.settings.tau;
            let allowed = hub.wards(caller)
                || caller == pool_at
                || hub.env.pool(pool_at).map_or(false, |pool| pool.wild())
                || hub.env.plan(plan_at).map_or(false, |plan| plan.wild());
            if !allowed {
                return Err(HubError::Unauthorized);
            }

            let tic = hub
                .env
                .now()
                .checked_add(tau)
                .ok_or_else(|| arithmetic_err("cull timestamp overflowed"))?;
            // zero reads as never caged
            if tic == 0 {
                return Err(HubError::ZeroTic(ilk.to_string()));
            }
            hub.record_mut(ilk)?.data.tic(tic);

            info!(ilk = %ilk, %caller, cullable_from = %format_timestamp(tic), "caged");
            journal.record(HubEvent::Cage {
                ilk: ilk.to_string(),
                tic,
            });
            Ok(())
        })
    }

    /// Writes the pool's position off to the vow.
    ///
    /// Any collateral above the debt is burnt, leaving the pool with exactly `art` free units to
    /// redeem through later unwinds.
    pub fn cull(&mut self, caller: Address, ilk: &Ilk) -> HubResult<()> {
        self.atomically("cull", |hub, journal| hub.write_off(journal, caller, ilk))
    }

    fn write_off(
        &mut self,
        journal: &mut JournalCollection,
        caller: Address,
        ilk: &Ilk,
    ) -> HubResult<()> {
        if !self.env.ledger().live() {
            return Err(HubError::LedgerNotLive);
        }
        let record = self.record(ilk)?;
        let status = record.data.status();
        if !record.data.is_caged() {
            return Err(HubError::NotCaged(ilk.to_string()));
        }
        if !status.cullable_at(self.env.now()) && !self.wards(caller) {
            return Err(HubError::Unauthorized);
        }
        if record.data.culled {
            return Err(HubError::AlreadyCulled(ilk.to_string()));
        }

        let pool_at = record.settings.pool;
        let vow = self.state.vow;
        let ledger = self.env.ledger_mut();
        let urn = ledger.urn(ilk, pool_at);
        ledger.grab(
            ilk,
            pool_at,
            pool_at,
            vow,
            to_neg_int(urn.ink)?,
            to_neg_int(urn.art)?,
        )?;
        if urn.ink > urn.art {
            // only the debt part stays redeemable
            ledger.slip(ilk, pool_at, to_neg_int(urn.ink - urn.art)?)?;
        }

        self.record_mut(ilk)?.data.culled(true);
        info!(ilk = %ilk, ink = %urn.ink, art = %urn.art, "culled");
        journal.record(HubEvent::cull(ilk, urn.ink, urn.art));
        Ok(())
    }

    /// Restores a culled position during global shutdown so the settlement module can skim it.
    ///
    /// The vow takes on fresh bad debt for the collateral the pool still holds.
    pub fn uncull(&mut self, ilk: &Ilk) -> HubResult<()> {
        self.atomically("uncull", |hub, journal| {
            let record = hub.record(ilk)?;
            if !record.data.culled {
                return Err(HubError::NotCulled(ilk.to_string()));
            }
            if hub.env.ledger().live() {
                return Err(HubError::LedgerLive);
            }

            let pool_at = record.settings.pool;
            let vow = hub.state.vow;
            let ledger = hub.env.ledger_mut();
            let wad = ledger.gem(ilk, pool_at);
            let delta = to_int(wad)?;
            ledger.suck(vow, vow, to_rad(wad)?)?;
            ledger.grab(ilk, pool_at, pool_at, vow, delta, delta)?;

            hub.record_mut(ilk)?.data.culled(false);
            info!(ilk = %ilk, %wad, "unculled");
            journal.record(HubEvent::uncull(ilk, wad));
            Ok(())
        })
    }

    /// Hands the pool's shares and its ledger position over to `who`, typically to migrate the
    /// market to a new hub.
    pub fn quit(&mut self, caller: Address, ilk: &Ilk, who: Address) -> HubResult<()> {
        only_ward(&self.state.wards, caller)?;
        let _guard = self.lock.try_lock()?;
        self.atomically("quit", |hub, journal| {
            if !hub.env.ledger().live() {
                return Err(HubError::LedgerNotLive);
            }
            let record = hub.record(ilk)?.clone();
            let pool_at = record.settings.pool;

            if !hub.pool_at_mut(pool_at)?.transfer_all(who) {
                return Err(HubError::PoolFailure(PoolOp::TransferAll));
            }

            let hub_address = hub.address;
            let ledger = hub.env.ledger_mut();
            if record.data.culled {
                let gem = ledger.gem(ilk, pool_at);
                ledger.slip(ilk, pool_at, to_neg_int(gem)?)?;
            } else {
                if !ledger.can(who, hub_address) {
                    return Err(HubError::PositionNotAccepted(who.to_string()));
                }
                let urn = ledger.urn(ilk, pool_at);
                ledger.fork(ilk, pool_at, who, to_int(urn.ink)?, to_int(urn.art)?)?;
            }

            info!(ilk = %ilk, %who, culled = record.data.culled, "quit");
            journal.record(HubEvent::Quit {
                ilk: ilk.to_string(),
                usr: who.to_string(),
            });
            Ok(())
        })
    }
}
