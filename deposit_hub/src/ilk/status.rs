//! Lifecycle view of a market

use candid::CandidType;

/// Lifecycle stage of a market, derived from `tic` and `culled`.
///
/// ```plain
///   Live ──cage──► Caged ──cull──► Culled
///                    ▲               │
///                    └────uncull─────┘  (global shutdown only)
/// ```
#[derive(Clone, Copy, CandidType, Debug, PartialEq, Eq)]
pub enum IlkStatus {
    /// Not caged
    Live,
    /// Caged, write-off permitted from `tic` on
    Caged {
        /// Timestamp in seconds
        tic: u64,
    },
    /// Debt written off
    Culled { tic: u64 },
}

impl IlkStatus {
    /// Returns `true` if the market is caged and its grace period is over at `now`
    pub fn cullable_at(&self, now: u64) -> bool {
        matches!(self, IlkStatus::Caged { tic } if *tic <= now)
    }
}
