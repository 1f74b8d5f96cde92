//! Central debt ledger

use alloy_primitives::{Address, I256, U256};

use crate::{types::Ilk, utils::error::HubResult};

/// Per market figures of the ledger
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IlkLedger {
    /// Total normalized debt of the market [WAD]
    pub art: U256,
    /// Accumulated rate [RAY]
    pub rate: U256,
    /// Debt ceiling of the market [RAD]
    pub line: U256,
}

/// A single position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Urn {
    /// Locked collateral [WAD]
    pub ink: U256,
    /// Normalized debt [WAD]
    pub art: U256,
}

/// Debt and collateral primitives of the ledger.
///
/// Mutations return `Err(HubError::Ledger(..))` when the ledger refuses them; the hub treats that
/// as fatal for the whole call.
pub trait Ledger {
    /// `false` once the ledger has been globally shut down
    fn live(&self) -> bool;
    fn ilk(&self, ilk: &Ilk) -> IlkLedger;
    fn urn(&self, ilk: &Ilk, urn: Address) -> Urn;
    /// Free collateral units held by `usr` [WAD]
    fn gem(&self, ilk: &Ilk, usr: Address) -> U256;
    /// Internal stablecoin balance [RAD]
    fn dai(&self, usr: Address) -> U256;
    /// Total system debt [RAD]
    fn debt(&self) -> U256;
    /// Global debt ceiling [RAD]
    fn global_line(&self) -> U256;
    /// Whether `owner` lets `delegate` modify its positions
    fn can(&self, owner: Address, delegate: Address) -> bool;

    /// Mints or burns free collateral units
    fn slip(&mut self, ilk: &Ilk, usr: Address, wad: I256) -> HubResult<()>;
    /// Modifies a position, taking collateral from `v` and crediting debt to `w`
    fn frob(
        &mut self,
        ilk: &Ilk,
        urn: Address,
        v: Address,
        w: Address,
        dink: I256,
        dart: I256,
    ) -> HubResult<()>;
    /// Confiscates (or restores) a position, sending collateral to `v` and bad debt to `w`
    fn grab(
        &mut self,
        ilk: &Ilk,
        urn: Address,
        v: Address,
        w: Address,
        dink: I256,
        dart: I256,
    ) -> HubResult<()>;
    /// Moves part of a position from `src` to `dst`
    fn fork(&mut self, ilk: &Ilk, src: Address, dst: Address, dink: I256, dart: I256)
        -> HubResult<()>;
    /// Transfers internal stablecoin [RAD]
    fn move_dai(&mut self, src: Address, dst: Address, rad: U256) -> HubResult<()>;
    /// Creates matching bad debt at `u` and stablecoin at `v` [RAD]
    fn suck(&mut self, u: Address, v: Address, rad: U256) -> HubResult<()>;
    /// Burns `wad` stablecoin tokens held by the hub and credits `usr` internally
    fn join(&mut self, usr: Address, wad: U256) -> HubResult<()>;
    /// Debits `src` internally and releases `wad` stablecoin tokens to `dst`
    fn exit(&mut self, src: Address, dst: Address, wad: U256) -> HubResult<()>;
}
