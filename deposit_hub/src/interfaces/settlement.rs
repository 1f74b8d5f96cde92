//! Global settlement module, only consulted once the ledger is shut down

use alloy_primitives::{Address, U256};

use super::Ledger;
use crate::{types::Ilk, utils::error::HubResult};

pub trait Settlement {
    /// Outstanding system debt fixed by the settlement process [RAD]
    fn debt(&self) -> U256;
    /// Settles the position `urn`, crediting its backing collateral to the settlement module
    fn skim(&mut self, ledger: &mut dyn Ledger, ilk: &Ilk, urn: Address) -> HubResult<()>;
}
