//! The orchestrator.
//!
//! Entry points are spread over the submodules by concern:
//! - `admin`: wards and filed parameters
//! - `exec`: the wind / unwind decision
//! - `reap`: yield collection
//! - `exit`: redemption during global settlement
//! - `lifecycle`: cage, cull, uncull and quit

use std::collections::HashSet;

use alloy_primitives::Address;
use tracing::{info, warn};

use crate::{
    constants::DEFAULT_JOURNAL_CAPACITY,
    ilk::{stable::StableIlk, status::IlkStatus},
    interfaces::{Environment, Plan, Pool, Settlement},
    journal::{HubEvent, Journal, JournalCollection},
    state::HubState,
    types::{Ilk, IlkQuery, InitArgs},
    utils::{
        common::string_to_address,
        error::{HubError, HubResult},
    },
};

use self::lock::Lock;

mod admin;
mod exec;
mod exit;
mod lifecycle;
pub(crate) mod lock;
mod reap;
pub(crate) mod sizing;

/// Capital allocation hub
pub struct Hub<E: Environment> {
    /// The hub's own account in the ledger
    address: Address,
    env: E,
    state: HubState,
    lock: Lock,
    journal: Journal,
}

impl<E: Environment> Hub<E> {
    /// Deploys a hub at `address` with `deployer` as its only ward
    pub fn new(address: Address, env: E, deployer: Address) -> HubResult<Self> {
        let mut hub = Self {
            address,
            env,
            state: HubState::default(),
            lock: Lock::default(),
            journal: Journal::open(DEFAULT_JOURNAL_CAPACITY)?,
        };
        hub.state.wards.insert(deployer);

        let mut journal = JournalCollection::open(hub.env.now());
        journal.record(HubEvent::Rely {
            usr: deployer.to_string(),
        });
        hub.journal.commit(journal)?;
        Ok(hub)
    }

    /// Builds a hub from its configuration
    pub fn init(env: E, args: InitArgs) -> HubResult<Self> {
        let mut state = HubState {
            vow: string_to_address(&args.vow)?,
            ..Default::default()
        };
        if let Some(end) = &args.end {
            state.end = string_to_address(end)?;
        }
        state.wards = args
            .wards
            .iter()
            .map(|ward| string_to_address(ward))
            .collect::<HubResult<HashSet<_>>>()?;

        for input in &args.ilks {
            let ilk: Ilk = input.ilk.parse()?;
            let mut record = StableIlk::default();
            record
                .settings
                .pool(string_to_address(&input.pool)?)
                .plan(string_to_address(&input.plan)?)
                .tau(input.tau);
            record.mint(&mut state.ilks, ilk)?;
        }

        let hub = Self {
            address: string_to_address(&args.hub)?,
            env,
            state,
            lock: Lock::default(),
            journal: Journal::open(args.journal_capacity.unwrap_or(DEFAULT_JOURNAL_CAPACITY))?,
        };
        info!(
            hub = %hub.address,
            wards = hub.state.wards.len(),
            ilks = hub.state.ilks.len(),
            "hub initialized"
        );
        Ok(hub)
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    /// Direct access to the collaborators, bypassing the hub
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Returns `true` while a guarded entry point is running
    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    pub fn wards(&self, usr: Address) -> bool {
        self.state.wards.contains(&usr)
    }

    pub fn vow(&self) -> Address {
        self.state.vow
    }

    pub fn end(&self) -> Address {
        self.state.end
    }

    pub fn ilks(&self) -> Vec<Ilk> {
        let mut ilks: Vec<Ilk> = self.state.ilks.keys().copied().collect();
        ilks.sort();
        ilks
    }

    pub fn pool(&self, ilk: &Ilk) -> Address {
        self.state
            .ilks
            .get(ilk)
            .map_or(Address::ZERO, |record| record.settings.pool)
    }

    pub fn plan(&self, ilk: &Ilk) -> Address {
        self.state
            .ilks
            .get(ilk)
            .map_or(Address::ZERO, |record| record.settings.plan)
    }

    pub fn tau(&self, ilk: &Ilk) -> u64 {
        self.state
            .ilks
            .get(ilk)
            .map_or(0, |record| record.settings.tau)
    }

    pub fn tic(&self, ilk: &Ilk) -> u64 {
        self.state.ilks.get(ilk).map_or(0, |record| record.data.tic)
    }

    pub fn culled(&self, ilk: &Ilk) -> bool {
        self.state
            .ilks
            .get(ilk)
            .map_or(false, |record| record.data.culled)
    }

    pub fn status(&self, ilk: &Ilk) -> IlkStatus {
        self.state
            .ilks
            .get(ilk)
            .map_or(IlkStatus::Live, |record| record.data.status())
    }

    pub fn ilk_query(&self, ilk: &Ilk) -> Option<IlkQuery> {
        self.state.ilks.get(ilk).map(|record| record.query(ilk))
    }

    /// Runs `call` all-or-nothing.
    ///
    /// The environment and the registry are restored and the collected events dropped when `call`
    /// fails; on success the events are committed to the journal.
    fn atomically<T, F>(&mut self, op: &'static str, call: F) -> HubResult<T>
    where
        F: FnOnce(&mut Self, &mut JournalCollection) -> HubResult<T>,
    {
        let env = self.env.clone();
        let state = self.state.clone();
        let mut journal = JournalCollection::open(self.env.now());

        let result = call(self, &mut journal).and_then(|value| {
            self.journal.commit(journal)?;
            Ok(value)
        });

        if let Err(err) = &result {
            warn!(op, error = %err, "call reverted");
            self.env = env;
            self.state = state;
        }
        result
    }

    fn record(&self, ilk: &Ilk) -> HubResult<&StableIlk> {
        self.state
            .ilks
            .get(ilk)
            .ok_or_else(|| HubError::NonExistentValue(format!("market {}", ilk)))
    }

    fn record_mut(&mut self, ilk: &Ilk) -> HubResult<&mut StableIlk> {
        self.state
            .ilks
            .get_mut(ilk)
            .ok_or_else(|| HubError::NonExistentValue(format!("market {}", ilk)))
    }

    fn pool_at(&self, at: Address) -> HubResult<&dyn Pool> {
        self.env
            .pool(at)
            .ok_or_else(|| HubError::NonExistentValue(format!("pool {}", at)))
    }

    fn pool_at_mut(&mut self, at: Address) -> HubResult<&mut dyn Pool> {
        self.env
            .pool_mut(at)
            .ok_or_else(|| HubError::NonExistentValue(format!("pool {}", at)))
    }

    fn plan_at(&self, at: Address) -> HubResult<&dyn Plan> {
        self.env
            .plan(at)
            .ok_or_else(|| HubError::NonExistentValue(format!("plan {}", at)))
    }

    fn settlement(&self) -> HubResult<&dyn Settlement> {
        let end = self.state.end;
        self.env
            .settlement(end)
            .ok_or_else(|| HubError::NonExistentValue(format!("settlement module {}", end)))
    }
}
