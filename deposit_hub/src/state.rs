use std::collections::{HashMap, HashSet};

use alloy_primitives::Address;

use crate::{ilk::stable::StableIlk, types::Ilk};

/// Registry owned by the hub. Snapshotted together with the environment on every mutating call.
#[derive(Clone, Debug, Default)]
pub struct HubState {
    /// Authorized admins
    pub wards: HashSet<Address>,
    /// Sink for fees and written-off debt
    pub vow: Address,
    /// Settlement module
    pub end: Address,
    /// Supported markets
    pub ilks: HashMap<Ilk, StableIlk>,
}
