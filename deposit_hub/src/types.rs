use std::{fmt, str::FromStr};

use alloy_primitives::{Address, B256};
use candid::CandidType;
use serde::{Deserialize, Serialize};

use crate::{
    ilk::status::IlkStatus,
    utils::error::{HubError, HubResult},
};

/// Market identifier. A short ASCII name right-padded to 32 bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ilk(pub B256);

impl Ilk {
    /// Packs `name` into a 32-byte identifier
    pub fn from_name(name: &str) -> HubResult<Self> {
        let bytes = name.as_bytes();
        if bytes.is_empty() || bytes.len() > 32 {
            return Err(HubError::DecodingError(format!(
                "Market name must be 1 to 32 bytes long, got {}.",
                bytes.len()
            )));
        }
        let mut padded = [0u8; 32];
        padded[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(B256::from(padded)))
    }

    /// The printable name of the identifier, if it has one
    pub fn name(&self) -> Option<String> {
        let bytes = self.0.as_slice();
        let end = bytes.iter().rposition(|b| *b != 0)? + 1;
        let trimmed = &bytes[..end];
        if trimmed.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            String::from_utf8(trimmed.to_vec()).ok()
        } else {
            None
        }
    }
}

impl fmt::Display for Ilk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(&name),
            None => write!(f, "0x{}", hex::encode(self.0)),
        }
    }
}

impl FromStr for Ilk {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("0x") {
            Some(stripped) if stripped.len() == 64 => {
                let bytes = hex::decode(stripped)
                    .map_err(|err| HubError::DecodingError(err.to_string()))?;
                Ok(Self(B256::from_slice(&bytes)))
            }
            _ => Self::from_name(s),
        }
    }
}

/// Determines which ledger figure is authoritative for the debt of a market during an unwind.
/// Computed at the top of every entry point, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Debt is the pool's position in the ledger
    Normal,
    /// Debt was written off; the seized collateral is what is left to release
    ModuleCulled,
    /// The ledger is shut down; the settlement module holds the collateral
    GlobalShutdown,
}

impl Mode {
    pub fn of(live: bool, culled: bool) -> Self {
        if !live {
            Mode::GlobalShutdown
        } else if culled {
            Mode::ModuleCulled
        } else {
            Mode::Normal
        }
    }
}

/// Passed to the pool hooks that bracket every balance mutation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookTag {
    Exec,
    Reap,
}

/// Hub wide parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HubParam {
    /// Account receiving fees and written-off debt
    Vow(Address),
    /// Settlement module used during global shutdown
    End(Address),
}

/// Per market parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IlkParam {
    Pool(Address),
    Plan(Address),
    /// Grace period between caging and culling, in seconds
    Tau(u64),
}

impl IlkParam {
    pub fn what(&self) -> &'static str {
        match self {
            IlkParam::Pool(_) => "pool",
            IlkParam::Plan(_) => "plan",
            IlkParam::Tau(_) => "tau",
        }
    }

    pub fn data(&self) -> String {
        match self {
            IlkParam::Pool(address) | IlkParam::Plan(address) => address.to_string(),
            IlkParam::Tau(tau) => tau.to_string(),
        }
    }
}

#[derive(Clone, CandidType, Debug, Deserialize, Serialize, PartialEq)]
pub struct IlkInput {
    pub ilk: String,
    pub pool: String,
    pub plan: String,
    #[serde(default)]
    pub tau: u64,
}

#[derive(Clone, CandidType, Debug, Deserialize, Serialize, PartialEq)]
pub struct InitArgs {
    /// The hub's own account in the ledger
    pub hub: String,
    pub wards: Vec<String>,
    pub vow: String,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub ilks: Vec<IlkInput>,
    #[serde(default)]
    pub journal_capacity: Option<u64>,
}

impl InitArgs {
    /// Parses the init arguments from a JSON document
    pub fn from_json(json: &str) -> HubResult<Self> {
        serde_json::from_str(json).map_err(|err| HubError::DecodingError(err.to_string()))
    }
}

/// Read-only snapshot of a market
#[derive(Clone, CandidType, Debug, PartialEq)]
pub struct IlkQuery {
    pub ilk: String,
    pub pool: String,
    pub plan: String,
    pub tau: u64,
    pub tic: u64,
    pub culled: bool,
    pub status: IlkStatus,
}
