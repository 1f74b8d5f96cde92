//! In-memory collaborators for tests: a ledger, a settlement module, pools and plans.

use std::collections::{HashMap, HashSet};

use alloy_primitives::{Address, I256, U256};

use crate::{
    constants::ray,
    hub::Hub,
    interfaces::{Environment, IlkLedger, Ledger, Plan, Pool, Settle, Settlement, Urn},
    types::{HookTag, HubParam, Ilk, IlkParam},
    utils::{
        common::{to_int, to_neg_int},
        error::{HubError, HubResult},
    },
};

pub fn hub() -> Address {
    Address::repeat_byte(0xa0)
}

pub fn ward() -> Address {
    Address::repeat_byte(0xa1)
}

pub fn vow() -> Address {
    Address::repeat_byte(0xa2)
}

pub fn end() -> Address {
    Address::repeat_byte(0xa3)
}

pub fn pool_a() -> Address {
    Address::repeat_byte(0xb0)
}

pub fn plan_a() -> Address {
    Address::repeat_byte(0xb1)
}

pub fn user() -> Address {
    Address::repeat_byte(0xc0)
}

pub fn stranger() -> Address {
    Address::repeat_byte(0xc1)
}

pub fn ilk() -> Ilk {
    Ilk::from_name("DIRECT-SIM-A").unwrap()
}

pub fn u(value: u64) -> U256 {
    U256::from(value)
}

/// `value` whole units as a RAD balance
pub fn rad(value: u64) -> U256 {
    U256::from(value) * ray()
}

pub const NOW: u64 = 1_700_000_000;
pub const TAU: u64 = 3_600;

fn apply(value: U256, delta: I256, what: &str) -> HubResult<U256> {
    let result = if delta.is_negative() {
        value.checked_sub(delta.unsigned_abs())
    } else {
        value.checked_add(delta.into_raw())
    };
    result.ok_or_else(|| HubError::Ledger(format!("Vat/{}", what)))
}

fn scale(delta: I256, rate: U256) -> HubResult<I256> {
    let abs = delta
        .unsigned_abs()
        .checked_mul(rate)
        .ok_or_else(|| HubError::Ledger("Vat/mul-overflow".to_string()))?;
    if delta.is_negative() {
        to_neg_int(abs)
    } else {
        to_int(abs)
    }
}

#[derive(Clone, Debug)]
pub struct SimVat {
    pub live: bool,
    pub ilks: HashMap<Ilk, IlkLedger>,
    pub urns: HashMap<(Ilk, Address), Urn>,
    pub gems: HashMap<(Ilk, Address), U256>,
    pub dai: HashMap<Address, U256>,
    pub sin: HashMap<Address, U256>,
    /// Stablecoin tokens released through `exit`
    pub tokens: HashMap<Address, U256>,
    pub debt: U256,
    pub vice: U256,
    pub line: U256,
    pub wishes: HashSet<(Address, Address)>,
}

impl Default for SimVat {
    fn default() -> Self {
        Self {
            live: true,
            ilks: HashMap::new(),
            urns: HashMap::new(),
            gems: HashMap::new(),
            dai: HashMap::new(),
            sin: HashMap::new(),
            tokens: HashMap::new(),
            debt: U256::ZERO,
            vice: U256::ZERO,
            line: rad(1_000_000_000_000),
            wishes: HashSet::new(),
        }
    }
}

impl SimVat {
    pub fn init_ilk(&mut self, ilk: Ilk, line: U256) {
        self.ilks.insert(
            ilk,
            IlkLedger {
                art: U256::ZERO,
                rate: ray(),
                line,
            },
        );
    }

    pub fn set_line(&mut self, ilk: &Ilk, line: U256) {
        if let Some(state) = self.ilks.get_mut(ilk) {
            state.line = line;
        }
    }

    pub fn set_rate(&mut self, ilk: &Ilk, rate: U256) {
        if let Some(state) = self.ilks.get_mut(ilk) {
            state.rate = rate;
        }
    }

    pub fn hope(&mut self, owner: Address, delegate: Address) {
        self.wishes.insert((owner, delegate));
    }

    pub fn cage(&mut self) {
        self.live = false;
    }

    /// Third party paying back part of the debt of `urn`, leaving its collateral in place
    pub fn repay(&mut self, ilk: &Ilk, urn: Address, wad: U256) {
        let position = self.urns.entry((*ilk, urn)).or_default();
        position.art -= wad;
        if let Some(state) = self.ilks.get_mut(ilk) {
            state.art -= wad;
        }
        self.debt -= wad * ray();
    }

    fn ilk_state(&self, ilk: &Ilk) -> HubResult<IlkLedger> {
        self.ilks
            .get(ilk)
            .copied()
            .ok_or_else(|| HubError::Ledger("Vat/ilk-not-init".to_string()))
    }
}

impl Ledger for SimVat {
    fn live(&self) -> bool {
        self.live
    }

    fn ilk(&self, ilk: &Ilk) -> IlkLedger {
        self.ilks.get(ilk).copied().unwrap_or_default()
    }

    fn urn(&self, ilk: &Ilk, urn: Address) -> Urn {
        self.urns.get(&(*ilk, urn)).copied().unwrap_or_default()
    }

    fn gem(&self, ilk: &Ilk, usr: Address) -> U256 {
        self.gems.get(&(*ilk, usr)).copied().unwrap_or_default()
    }

    fn dai(&self, usr: Address) -> U256 {
        self.dai.get(&usr).copied().unwrap_or_default()
    }

    fn debt(&self) -> U256 {
        self.debt
    }

    fn global_line(&self) -> U256 {
        self.line
    }

    fn can(&self, owner: Address, delegate: Address) -> bool {
        owner == delegate || self.wishes.contains(&(owner, delegate))
    }

    fn slip(&mut self, ilk: &Ilk, usr: Address, wad: I256) -> HubResult<()> {
        let gem = apply(self.gem(ilk, usr), wad, "gem-underflow")?;
        self.gems.insert((*ilk, usr), gem);
        Ok(())
    }

    fn frob(
        &mut self,
        ilk: &Ilk,
        urn: Address,
        v: Address,
        w: Address,
        dink: I256,
        dart: I256,
    ) -> HubResult<()> {
        if !self.live {
            return Err(HubError::Ledger("Vat/not-live".to_string()));
        }
        let mut state = self.ilk_state(ilk)?;
        let mut position = self.urn(ilk, urn);
        position.ink = apply(position.ink, dink, "ink-underflow")?;
        position.art = apply(position.art, dart, "art-underflow")?;
        state.art = apply(state.art, dart, "Art-underflow")?;

        let dtab = scale(dart, state.rate)?;
        let debt = apply(self.debt, dtab, "debt-underflow")?;
        if dart.is_positive() && (state.art * state.rate > state.line || debt > self.line) {
            return Err(HubError::Ledger("Vat/ceiling-exceeded".to_string()));
        }
        let gem = apply(self.gem(ilk, v), -dink, "gem-underflow")?;
        let dai = apply(self.dai(w), dtab, "dai-underflow")?;

        self.ilks.insert(*ilk, state);
        self.urns.insert((*ilk, urn), position);
        self.gems.insert((*ilk, v), gem);
        self.dai.insert(w, dai);
        self.debt = debt;
        Ok(())
    }

    fn grab(
        &mut self,
        ilk: &Ilk,
        urn: Address,
        v: Address,
        w: Address,
        dink: I256,
        dart: I256,
    ) -> HubResult<()> {
        let mut state = self.ilk_state(ilk)?;
        let mut position = self.urn(ilk, urn);
        position.ink = apply(position.ink, dink, "ink-underflow")?;
        position.art = apply(position.art, dart, "art-underflow")?;
        state.art = apply(state.art, dart, "Art-underflow")?;

        let dtab = scale(dart, state.rate)?;
        let gem = apply(self.gem(ilk, v), -dink, "gem-underflow")?;
        let sin = apply(
            self.sin.get(&w).copied().unwrap_or_default(),
            -dtab,
            "sin-underflow",
        )?;
        let vice = apply(self.vice, -dtab, "vice-underflow")?;

        self.ilks.insert(*ilk, state);
        self.urns.insert((*ilk, urn), position);
        self.gems.insert((*ilk, v), gem);
        self.sin.insert(w, sin);
        self.vice = vice;
        Ok(())
    }

    fn fork(
        &mut self,
        ilk: &Ilk,
        src: Address,
        dst: Address,
        dink: I256,
        dart: I256,
    ) -> HubResult<()> {
        let mut from = self.urn(ilk, src);
        let mut to = self.urn(ilk, dst);
        from.ink = apply(from.ink, -dink, "ink-underflow")?;
        from.art = apply(from.art, -dart, "art-underflow")?;
        to.ink = apply(to.ink, dink, "ink-overflow")?;
        to.art = apply(to.art, dart, "art-overflow")?;
        self.urns.insert((*ilk, src), from);
        self.urns.insert((*ilk, dst), to);
        Ok(())
    }

    fn move_dai(&mut self, src: Address, dst: Address, rad: U256) -> HubResult<()> {
        let from = self
            .dai(src)
            .checked_sub(rad)
            .ok_or_else(|| HubError::Ledger("Vat/dai-underflow".to_string()))?;
        self.dai.insert(src, from);
        let to = self.dai(dst) + rad;
        self.dai.insert(dst, to);
        Ok(())
    }

    fn suck(&mut self, u: Address, v: Address, rad: U256) -> HubResult<()> {
        let sin = self.sin.get(&u).copied().unwrap_or_default() + rad;
        self.sin.insert(u, sin);
        let dai = self.dai(v) + rad;
        self.dai.insert(v, dai);
        self.vice += rad;
        self.debt += rad;
        Ok(())
    }

    fn join(&mut self, usr: Address, wad: U256) -> HubResult<()> {
        let dai = self.dai(usr) + wad * ray();
        self.dai.insert(usr, dai);
        Ok(())
    }

    fn exit(&mut self, src: Address, dst: Address, wad: U256) -> HubResult<()> {
        let from = self
            .dai(src)
            .checked_sub(wad * ray())
            .ok_or_else(|| HubError::Ledger("Vat/dai-underflow".to_string()))?;
        self.dai.insert(src, from);
        *self.tokens.entry(dst).or_default() += wad;
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct SimEnd {
    pub debt: U256,
    /// Refuses to settle positions when set
    pub halted: bool,
    pub vow: Address,
    pub address: Address,
}

impl Settlement for SimEnd {
    fn debt(&self) -> U256 {
        self.debt
    }

    fn skim(&mut self, ledger: &mut dyn Ledger, ilk: &Ilk, urn: Address) -> HubResult<()> {
        if self.halted {
            return Err(HubError::Ledger("End/skim-halted".to_string()));
        }
        let position = ledger.urn(ilk, urn);
        let owe = position.art * ledger.ilk(ilk).rate / ray();
        let wad = position.ink.min(owe);
        ledger.grab(
            ilk,
            urn,
            self.address,
            self.vow,
            to_neg_int(wad)?,
            to_neg_int(position.art)?,
        )
    }
}

#[derive(Clone, Debug)]
pub struct SimPool {
    pub assets: U256,
    pub deposit_cap: U256,
    pub withdraw_cap: Option<U256>,
    pub active: bool,
    pub wild: bool,
    pub fail_deposit: bool,
    pub fail_withdraw: bool,
    pub fail_transfer: bool,
    pub redeemable: Address,
    pub hooks: Vec<(&'static str, HookTag)>,
    pub transfers: Vec<(Address, U256)>,
}

impl Default for SimPool {
    fn default() -> Self {
        Self {
            assets: U256::ZERO,
            deposit_cap: U256::MAX,
            withdraw_cap: None,
            active: true,
            wild: false,
            fail_deposit: false,
            fail_withdraw: false,
            fail_transfer: false,
            redeemable: Address::repeat_byte(0xd0),
            hooks: vec![],
            transfers: vec![],
        }
    }
}

impl Pool for SimPool {
    fn deposit(&mut self, wad: U256) -> bool {
        if self.fail_deposit {
            return false;
        }
        self.assets += wad;
        true
    }

    fn withdraw(&mut self, wad: U256) -> bool {
        if self.fail_withdraw || wad > self.assets {
            return false;
        }
        self.assets -= wad;
        true
    }

    fn transfer(&mut self, dst: Address, wad: U256) -> bool {
        if self.fail_transfer || wad > self.assets {
            return false;
        }
        self.assets -= wad;
        self.transfers.push((dst, wad));
        true
    }

    fn transfer_all(&mut self, dst: Address) -> bool {
        if self.fail_transfer {
            return false;
        }
        self.transfers.push((dst, self.assets));
        self.assets = U256::ZERO;
        true
    }

    fn pre_debt_change(&mut self, tag: HookTag) {
        self.hooks.push(("pre", tag));
    }

    fn post_debt_change(&mut self, tag: HookTag) {
        self.hooks.push(("post", tag));
    }

    fn asset_balance(&self) -> U256 {
        self.assets
    }

    fn max_deposit(&self) -> U256 {
        self.deposit_cap
    }

    fn max_withdraw(&self) -> U256 {
        self.withdraw_cap
            .map_or(self.assets, |cap| cap.min(self.assets))
    }

    fn redeemable(&self) -> Address {
        self.redeemable
    }

    fn active(&self) -> bool {
        self.active
    }

    fn wild(&self) -> bool {
        self.wild
    }
}

#[derive(Clone, Debug)]
pub struct SimPlan {
    pub target: U256,
    pub active: bool,
    pub wild: bool,
}

impl Default for SimPlan {
    fn default() -> Self {
        Self {
            target: U256::ZERO,
            active: true,
            wild: false,
        }
    }
}

impl Plan for SimPlan {
    fn target_assets(&self, _current_assets: U256) -> U256 {
        self.target
    }

    fn active(&self) -> bool {
        self.active
    }

    fn wild(&self) -> bool {
        self.wild
    }
}

#[derive(Clone, Debug)]
pub struct Chain {
    pub now: u64,
    pub vat: SimVat,
    pub end: SimEnd,
    pub pools: HashMap<Address, SimPool>,
    pub plans: HashMap<Address, SimPlan>,
}

impl Default for Chain {
    fn default() -> Self {
        Self {
            now: NOW,
            vat: SimVat::default(),
            end: SimEnd {
                debt: U256::ZERO,
                halted: false,
                vow: vow(),
                address: end(),
            },
            pools: HashMap::new(),
            plans: HashMap::new(),
        }
    }
}

impl Chain {
    pub fn pool_state(&self, at: Address) -> &SimPool {
        &self.pools[&at]
    }

    pub fn pool_state_mut(&mut self, at: Address) -> &mut SimPool {
        self.pools.entry(at).or_default()
    }

    pub fn plan_state_mut(&mut self, at: Address) -> &mut SimPlan {
        self.plans.entry(at).or_default()
    }
}

impl Environment for Chain {
    fn now(&self) -> u64 {
        self.now
    }

    fn ledger(&self) -> &dyn Ledger {
        &self.vat
    }

    fn ledger_mut(&mut self) -> &mut dyn Ledger {
        &mut self.vat
    }

    fn pool(&self, at: Address) -> Option<&dyn Pool> {
        self.pools.get(&at).map(|pool| pool as &dyn Pool)
    }

    fn pool_mut(&mut self, at: Address) -> Option<&mut dyn Pool> {
        self.pools.get_mut(&at).map(|pool| pool as &mut dyn Pool)
    }

    fn plan(&self, at: Address) -> Option<&dyn Plan> {
        self.plans.get(&at).map(|plan| plan as &dyn Plan)
    }

    fn settlement(&self, at: Address) -> Option<&dyn Settlement> {
        (at == self.end.address).then_some(&self.end as &dyn Settlement)
    }

    fn settle(&mut self, at: Address) -> Option<Settle<'_>> {
        if at != self.end.address {
            return None;
        }
        Some(Settle {
            end: &mut self.end,
            ledger: &mut self.vat,
        })
    }
}

/// A hub with one market (`ilk()`) whose ceiling is `line` whole units, backed by `pool_a()` and
/// `plan_a()`, filed by `ward()`
pub fn setup(line: u64) -> Hub<Chain> {
    let mut chain = Chain::default();
    chain.vat.init_ilk(ilk(), rad(line));
    chain.pools.insert(pool_a(), SimPool::default());
    chain.plans.insert(plan_a(), SimPlan::default());

    let mut hub = Hub::new(hub(), chain, ward()).unwrap();
    hub.file(ward(), HubParam::Vow(vow())).unwrap();
    hub.file(ward(), HubParam::End(end())).unwrap();
    hub.file_ilk(ward(), &ilk(), IlkParam::Pool(pool_a())).unwrap();
    hub.file_ilk(ward(), &ilk(), IlkParam::Plan(plan_a())).unwrap();
    hub.file_ilk(ward(), &ilk(), IlkParam::Tau(TAU)).unwrap();
    hub
}

/// `setup` plus a first `execute` that winds `amount`
pub fn wound(line: u64, amount: u64) -> Hub<Chain> {
    let mut hub = setup(line);
    hub.env_mut().plan_state_mut(plan_a()).target = u(amount);
    hub.execute(&ilk()).unwrap();
    hub
}

pub fn pool(hub: &Hub<Chain>) -> &SimPool {
    hub.env().pool_state(pool_a())
}

pub fn pool_mut(hub: &mut Hub<Chain>) -> &mut SimPool {
    hub.env_mut().pool_state_mut(pool_a())
}

pub fn position(hub: &Hub<Chain>) -> Urn {
    hub.env().vat.urn(&ilk(), pool_a())
}
