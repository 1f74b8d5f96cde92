//! Structured event journal.
//!
//! Every mutating call collects its events in a [`JournalCollection`]. The collection is only
//! committed to the [`Journal`] once the call has succeeded, so a reverted call leaves no trace
//! besides its `tracing` diagnostics.

use std::borrow::Cow;

use alloy_primitives::{Address, U256};
use candid::{CandidType, Decode, Encode, Nat};
use ic_stable_structures::{storable::Bound, DefaultMemoryImpl, Storable, Vec as StableVec};
use serde::Deserialize;
use tracing::debug;

use crate::{
    constants::MAX_JOURNAL_ENTRY_BYTES,
    types::Ilk,
    utils::{
        common::u256_to_nat,
        error::{HubError, HubResult},
    },
};

/// Operations recorded by the hub, with their settled amounts
#[derive(Clone, CandidType, Debug, Deserialize, PartialEq)]
pub enum HubEvent {
    Rely { usr: String },
    Deny { usr: String },
    File { what: String, data: String },
    FileIlk { ilk: String, what: String, data: String },
    Wind { ilk: String, amount: Nat },
    Unwind { ilk: String, amount: Nat, fee: Nat },
    Reap { ilk: String, fees: Nat },
    Exit { ilk: String, usr: String, amount: Nat },
    Cage { ilk: String, tic: u64 },
    Cull { ilk: String, ink: Nat, art: Nat },
    Uncull { ilk: String, wad: Nat },
    Quit { ilk: String, usr: String },
}

impl HubEvent {
    pub fn wind(ilk: &Ilk, amount: U256) -> Self {
        HubEvent::Wind {
            ilk: ilk.to_string(),
            amount: u256_to_nat(&amount),
        }
    }

    pub fn unwind(ilk: &Ilk, amount: U256, fee: U256) -> Self {
        HubEvent::Unwind {
            ilk: ilk.to_string(),
            amount: u256_to_nat(&amount),
            fee: u256_to_nat(&fee),
        }
    }

    pub fn reap(ilk: &Ilk, fees: U256) -> Self {
        HubEvent::Reap {
            ilk: ilk.to_string(),
            fees: u256_to_nat(&fees),
        }
    }

    pub fn exit(ilk: &Ilk, usr: Address, amount: U256) -> Self {
        HubEvent::Exit {
            ilk: ilk.to_string(),
            usr: usr.to_string(),
            amount: u256_to_nat(&amount),
        }
    }

    pub fn cull(ilk: &Ilk, ink: U256, art: U256) -> Self {
        HubEvent::Cull {
            ilk: ilk.to_string(),
            ink: u256_to_nat(&ink),
            art: u256_to_nat(&art),
        }
    }

    pub fn uncull(ilk: &Ilk, wad: U256) -> Self {
        HubEvent::Uncull {
            ilk: ilk.to_string(),
            wad: u256_to_nat(&wad),
        }
    }
}

/// Journal entry
#[derive(Clone, CandidType, Debug, Deserialize, PartialEq)]
pub struct JournalEntry {
    /// Unix timestamp in seconds
    pub timestamp: u64,
    pub event: HubEvent,
}

impl Storable for JournalEntry {
    fn to_bytes(&self) -> Cow<[u8]> {
        Cow::Owned(Encode!(self).expect("journal entries are candid encodable"))
    }

    fn from_bytes(bytes: Cow<[u8]>) -> Self {
        Decode!(bytes.as_ref(), Self).expect("journal entries are written by `to_bytes`")
    }

    const BOUND: Bound = Bound::Bounded {
        max_size: MAX_JOURNAL_ENTRY_BYTES,
        is_fixed_size: false,
    };
}

/// Events of a single call, pending commit
#[derive(Debug, Default)]
pub struct JournalCollection {
    timestamp: u64,
    events: Vec<HubEvent>,
}

impl JournalCollection {
    /// Opens an empty collection stamped with `timestamp`
    pub fn open(timestamp: u64) -> Self {
        Self {
            timestamp,
            events: vec![],
        }
    }

    pub fn record(&mut self, event: HubEvent) {
        debug!(?event, "event recorded");
        self.events.push(event);
    }

    pub fn events(&self) -> &[HubEvent] {
        &self.events
    }
}

/// Committed events, oldest first, bounded by `capacity` plus a tenth of it
pub struct Journal {
    entries: StableVec<JournalEntry, DefaultMemoryImpl>,
    capacity: u64,
}

impl Journal {
    pub fn open(capacity: u64) -> HubResult<Self> {
        let entries = StableVec::init(DefaultMemoryImpl::default())
            .map_err(|err| HubError::Journal(format!("{:?}", err)))?;
        Ok(Self { entries, capacity })
    }

    /// Appends every event of `collection`. Either all of them land or none.
    pub fn commit(&mut self, collection: JournalCollection) -> HubResult<()> {
        let start = self.entries.len();
        for event in collection.events {
            let entry = JournalEntry {
                timestamp: collection.timestamp,
                event,
            };
            if let Err(err) = self.entries.push(&entry) {
                while self.entries.len() > start {
                    self.entries.pop();
                }
                return Err(HubError::Journal(format!("{:?}", err)));
            }
        }
        self.prune();
        Ok(())
    }

    pub fn len(&self) -> u64 {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries.iter().collect()
    }

    pub fn events(&self) -> Vec<HubEvent> {
        self.entries.iter().map(|entry| entry.event).collect()
    }

    /// Drops the oldest entries beyond the capacity.
    ///
    /// Runs once the journal overshoots its capacity by a tenth, then trims back to the capacity.
    fn prune(&mut self) {
        let len = self.entries.len();
        let slack = (self.capacity / 10).max(1);
        if len <= self.capacity.saturating_add(slack) {
            return;
        }
        let excess = len - self.capacity;

        for i in excess..len {
            if let Some(item) = self.entries.get(i) {
                self.entries.set(i - excess, &item);
            }
        }

        for _ in 0..excess {
            self.entries.pop();
        }
    }
}
