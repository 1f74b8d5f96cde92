//! Mutable lifecycle data of a market

use super::status::IlkStatus;

/// Lifecycle fields, only written by the hub's cage / cull / uncull transitions
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IlkData {
    /// Timestamp from which the market may be culled. `0` means not caged.
    pub tic: u64,
    /// Whether the market's debt has been written off
    pub culled: bool,
}

impl IlkData {
    /// Sets the cull timestamp.
    pub fn tic(&mut self, tic: u64) -> &mut Self {
        self.tic = tic;
        self
    }

    /// Sets the culled flag.
    pub fn culled(&mut self, culled: bool) -> &mut Self {
        self.culled = culled;
        self
    }

    pub fn is_caged(&self) -> bool {
        self.tic != 0
    }

    pub fn status(&self) -> IlkStatus {
        match (self.tic, self.culled) {
            (0, _) => IlkStatus::Live,
            (tic, false) => IlkStatus::Caged { tic },
            (tic, true) => IlkStatus::Culled { tic },
        }
    }
}
