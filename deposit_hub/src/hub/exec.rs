//! Wind / unwind decision of a market

use alloy_primitives::{Address, U256};
use tracing::{debug, info};

use super::{
    sizing::{self, Ceilings, PoolReading},
    Hub,
};
use crate::{
    constants::ray,
    interfaces::Environment,
    journal::{HubEvent, JournalCollection},
    types::{HookTag, Ilk, Mode},
    utils::{
        common::{to_int, to_neg_int, to_rad},
        error::{HubError, HubResult, PoolOp},
    },
};

impl<E: Environment> Hub<E> {
    /// Moves the market towards its plan's target, within the debt ceilings.
    ///
    /// Unwinds everything once the market is caged, its pool or plan goes inactive, or the
    /// ledger is shut down.
    pub fn execute(&mut self, ilk: &Ilk) -> HubResult<()> {
        let _guard = self.lock.try_lock()?;
        self.atomically("execute", |hub, journal| hub.exec(journal, ilk))
    }

    fn exec(&mut self, journal: &mut JournalCollection, ilk: &Ilk) -> HubResult<()> {
        let record = self.record(ilk)?.clone();
        let pool_at = record.settings.pool;
        let plan_at = record.settings.plan;

        let ilk_ledger = self.env.ledger().ilk(ilk);
        if ilk_ledger.rate != ray() {
            return Err(HubError::RateNotOne(ilk.to_string()));
        }

        self.pool_at_mut(pool_at)?.pre_debt_change(HookTag::Exec);

        let urn = self.env.ledger().urn(ilk, pool_at);
        if urn.ink < urn.art {
            return Err(HubError::InkBelowArt(ilk.to_string()));
        }
        if urn.art != ilk_ledger.art {
            return Err(HubError::MoreThanOneUrn(ilk.to_string()));
        }

        let reading = PoolReading::read(self.pool_at(pool_at)?);
        let live = self.env.ledger().live();
        let mode = Mode::of(live, record.data.culled);

        if mode == Mode::GlobalShutdown {
            if !self.settlement()?.debt().is_zero() {
                return Err(HubError::EndDebtAlreadySet);
            }
            if record.data.culled {
                return Err(HubError::CulledDuringShutdown(ilk.to_string()));
            }
            self.unwind(journal, ilk, pool_at, U256::MAX, mode, &reading)?;
        } else if record.data.is_caged() || !reading.active || !self.plan_at(plan_at)?.active() {
            self.unwind(journal, ilk, pool_at, U256::MAX, mode, &reading)?;
        } else {
            let target = self.plan_at(plan_at)?.target_assets(reading.assets);
            let ledger = self.env.ledger();
            let ceilings = Ceilings {
                art: urn.art,
                line: ilk_ledger.line,
                debt: ledger.debt(),
                global_line: ledger.global_line(),
            };
            debug!(ilk = %ilk, %target, assets = %reading.assets, ?ceilings, "sizing");

            let to_unwind = sizing::unwind_requirement(&ceilings, target, reading.assets)?;
            if !to_unwind.is_zero() {
                self.unwind(journal, ilk, pool_at, to_unwind, Mode::Normal, &reading)?;
            } else {
                let to_wind =
                    sizing::wind_amount(&ceilings, target, reading.assets, reading.max_deposit);
                self.wind(journal, ilk, pool_at, to_wind)?;
            }
        }

        self.pool_at_mut(pool_at)?.post_debt_change(HookTag::Exec);
        Ok(())
    }

    /// Mints matching collateral and debt for the pool and deposits the drawn stablecoin
    fn wind(
        &mut self,
        journal: &mut JournalCollection,
        ilk: &Ilk,
        pool_at: Address,
        amount: U256,
    ) -> HubResult<()> {
        if amount.is_zero() {
            journal.record(HubEvent::wind(ilk, U256::ZERO));
            return Ok(());
        }

        let hub = self.address;
        let delta = to_int(amount)?;
        let ledger = self.env.ledger_mut();
        ledger.slip(ilk, pool_at, delta)?;
        ledger.frob(ilk, pool_at, pool_at, hub, delta, delta)?;
        // rate is one, so normalized debt is exactly the stablecoin to draw
        ledger.exit(hub, pool_at, amount)?;

        if !self.pool_at_mut(pool_at)?.deposit(amount) {
            return Err(HubError::PoolFailure(PoolOp::Deposit));
        }

        info!(ilk = %ilk, %amount, "wound");
        journal.record(HubEvent::wind(ilk, amount));
        Ok(())
    }

    /// Withdraws up to `requested` from the pool and pays back the debt figure of `mode`
    fn unwind(
        &mut self,
        journal: &mut JournalCollection,
        ilk: &Ilk,
        pool_at: Address,
        requested: U256,
        mode: Mode,
        reading: &PoolReading,
    ) -> HubResult<()> {
        let hub = self.address;
        let vow = self.state.vow;
        let end = self.state.end;

        let debt = match mode {
            Mode::Normal => self.env.ledger().urn(ilk, pool_at).art,
            Mode::ModuleCulled => self.env.ledger().gem(ilk, pool_at),
            Mode::GlobalShutdown => {
                self.env
                    .settle(end)
                    .ok_or_else(|| {
                        HubError::NonExistentValue(format!("settlement module {}", end))
                    })?
                    .skim(ilk, pool_at)
                    .map_err(|err| HubError::Settlement(err.to_string()))?;
                self.env.ledger().gem(ilk, end)
            }
        };

        let amounts =
            sizing::unwind_amounts(requested, reading.max_withdraw, debt, reading.assets);
        if amounts.is_empty() {
            journal.record(HubEvent::unwind(ilk, U256::ZERO, U256::ZERO));
            return Ok(());
        }

        let total = amounts.total()?;
        if !self.pool_at_mut(pool_at)?.withdraw(total) {
            return Err(HubError::PoolFailure(PoolOp::Withdraw));
        }

        let delta = to_neg_int(amounts.amount)?;
        let ledger = self.env.ledger_mut();
        ledger.join(hub, total)?;
        match mode {
            Mode::Normal => {
                ledger.frob(ilk, pool_at, pool_at, hub, delta, delta)?;
                ledger.slip(ilk, pool_at, delta)?;
                ledger.move_dai(hub, vow, to_rad(amounts.fee)?)?;
            }
            Mode::ModuleCulled => {
                ledger.slip(ilk, pool_at, delta)?;
                ledger.move_dai(hub, vow, to_rad(total)?)?;
            }
            Mode::GlobalShutdown => {
                ledger.slip(ilk, end, delta)?;
                ledger.move_dai(hub, vow, to_rad(total)?)?;
            }
        }

        info!(ilk = %ilk, ?mode, amount = %amounts.amount, fee = %amounts.fee, "unwound");
        journal.record(HubEvent::unwind(ilk, amounts.amount, amounts.fee));
        Ok(())
    }
}
