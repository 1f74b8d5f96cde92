//! Deposit Hub's Constants

use alloy_primitives::U256;

/// Scale of token amounts and normalized debt
pub const WAD: u128 = 1_000_000_000_000_000_000; // e18
pub fn wad() -> U256 {
    U256::from(WAD)
}

/// Scale of ledger rates
pub const RAY: u128 = 1_000_000_000_000_000_000_000_000_000; // e27
pub fn ray() -> U256 {
    U256::from(RAY)
}

/// Scale of internal stablecoin balances and debt ceilings (WAD * RAY)
pub fn rad() -> U256 {
    wad() * ray()
}

/// Largest amount that still fits the ledger's signed deltas
pub fn max_int256() -> U256 {
    U256::MAX >> 1
}

/// Number of journal entries kept when no capacity is configured
pub const DEFAULT_JOURNAL_CAPACITY: u64 = 10_000;

/// Upper bound of a candid encoded journal entry
pub const MAX_JOURNAL_ENTRY_BYTES: u32 = 1_024;
