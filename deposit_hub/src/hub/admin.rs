//! Wards and filed parameters

use alloy_primitives::Address;
use tracing::info;

use super::Hub;
use crate::{
    interfaces::Environment,
    journal::HubEvent,
    types::{HubParam, Ilk, IlkParam},
    utils::{
        common::only_ward,
        error::{HubError, HubResult},
    },
};

impl<E: Environment> Hub<E> {
    pub fn rely(&mut self, caller: Address, usr: Address) -> HubResult<()> {
        self.atomically("rely", |hub, journal| {
            only_ward(&hub.state.wards, caller)?;
            hub.state.wards.insert(usr);
            info!(%usr, "relied");
            journal.record(HubEvent::Rely {
                usr: usr.to_string(),
            });
            Ok(())
        })
    }

    pub fn deny(&mut self, caller: Address, usr: Address) -> HubResult<()> {
        self.atomically("deny", |hub, journal| {
            only_ward(&hub.state.wards, caller)?;
            hub.state.wards.remove(&usr);
            info!(%usr, "denied");
            journal.record(HubEvent::Deny {
                usr: usr.to_string(),
            });
            Ok(())
        })
    }

    /// Files a hub wide address
    pub fn file(&mut self, caller: Address, param: HubParam) -> HubResult<()> {
        self.atomically("file", |hub, journal| {
            only_ward(&hub.state.wards, caller)?;
            if !hub.env.ledger().live() {
                return Err(HubError::LedgerNotLive);
            }

            let (what, data) = match param {
                HubParam::Vow(vow) => {
                    hub.state.vow = vow;
                    ("vow", vow)
                }
                HubParam::End(end) => {
                    hub.state.end = end;
                    ("end", end)
                }
            };
            info!(what, %data, "filed");
            journal.record(HubEvent::File {
                what: what.to_string(),
                data: data.to_string(),
            });
            Ok(())
        })
    }

    /// Files a market parameter, registering the market on first use.
    ///
    /// Rejected once the market is caged.
    pub fn file_ilk(&mut self, caller: Address, ilk: &Ilk, param: IlkParam) -> HubResult<()> {
        self.atomically("file_ilk", |hub, journal| {
            only_ward(&hub.state.wards, caller)?;
            if !hub.env.ledger().live() {
                return Err(HubError::LedgerNotLive);
            }

            let record = hub.state.ilks.entry(*ilk).or_default();
            if record.data.is_caged() {
                return Err(HubError::IlkCaged(ilk.to_string()));
            }
            match param {
                IlkParam::Pool(pool) => record.settings.pool(pool),
                IlkParam::Plan(plan) => record.settings.plan(plan),
                IlkParam::Tau(tau) => record.settings.tau(tau),
            };

            info!(ilk = %ilk, what = param.what(), data = %param.data(), "filed");
            journal.record(HubEvent::FileIlk {
                ilk: ilk.to_string(),
                what: param.what().to_string(),
                data: param.data(),
            });
            Ok(())
        })
    }
}
