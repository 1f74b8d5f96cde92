//! Stored market record

use std::collections::HashMap;

use crate::{
    types::{Ilk, IlkQuery},
    utils::error::{HubError, HubResult},
};

use super::{data::IlkData, settings::IlkSettings};

/// Market record as kept in the hub's registry
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StableIlk {
    /// Admin settings
    pub settings: IlkSettings,
    /// Lifecycle state
    pub data: IlkData,
}

impl StableIlk {
    /// Registers the record under `ilk`, refusing to overwrite an existing market
    pub fn mint(&self, registry: &mut HashMap<Ilk, StableIlk>, ilk: Ilk) -> HubResult<()> {
        if registry.contains_key(&ilk) {
            return Err(HubError::DuplicateIlk(ilk.to_string()));
        }
        registry.insert(ilk, self.clone());
        Ok(())
    }

    pub fn query(&self, ilk: &Ilk) -> IlkQuery {
        IlkQuery {
            ilk: ilk.to_string(),
            pool: self.settings.pool.to_string(),
            plan: self.settings.plan.to_string(),
            tau: self.settings.tau,
            tic: self.data.tic,
            culled: self.data.culled,
            status: self.data.status(),
        }
    }
}
