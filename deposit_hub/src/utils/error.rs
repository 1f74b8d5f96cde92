use candid::CandidType;
use serde::Deserialize;
use thiserror::Error;

/// Deposit Hub Result
pub type HubResult<T> = Result<T, HubError>;

/// Pool operation that reported a failure
#[derive(Clone, Copy, CandidType, Debug, Deserialize, PartialEq, Eq)]
pub enum PoolOp {
    Deposit,
    Withdraw,
    TransferAll,
    Exit,
}

/// Coarse classification of [`HubError`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller lacks the required capability
    Authorization,
    /// The market or the ledger is in the wrong lifecycle state
    Precondition,
    /// An accounting invariant would be violated
    Invariant,
    /// A pool, ledger or settlement call reported failure
    Collaborator,
}

/// Deposit Hub Errors
#[derive(Clone, CandidType, Debug, Deserialize, PartialEq, Error)]
pub enum HubError {
    /// Unauthorized access
    #[error("unauthorized")]
    Unauthorized,
    /// Another mutating entry point is in progress
    #[error("hub is locked")]
    Locked,
    /// The ledger has been globally shut down
    #[error("ledger is not live")]
    LedgerNotLive,
    /// The operation is only valid during global shutdown
    #[error("ledger is still live")]
    LedgerLive,
    /// The market has been caged
    #[error("market {0} is caged")]
    IlkCaged(String),
    /// `cage` was called on a market that is already caged
    #[error("market {0} is already caged")]
    AlreadyCaged(String),
    /// Caging now would set a cull timestamp of zero
    #[error("market {0} would be caged at timestamp zero")]
    ZeroTic(String),
    /// `cull` was called on a market that is not caged
    #[error("market {0} is not caged")]
    NotCaged(String),
    /// `cull` was called twice
    #[error("market {0} is already culled")]
    AlreadyCulled(String),
    /// `uncull` was called on a market that was never culled
    #[error("market {0} was not culled")]
    NotCulled(String),
    /// The market has to be unculled before it can be unwound during shutdown
    #[error("market {0} has to be unculled first")]
    CulledDuringShutdown(String),
    /// The pool or the plan reports itself inactive
    #[error("market {0} is inactive")]
    IlkInactive(String),
    /// The settlement module already fixed the system debt
    #[error("settlement debt is already set")]
    EndDebtAlreadySet,
    /// The recipient has not authorized the hub to move positions into it
    #[error("recipient {0} does not accept positions from the hub")]
    PositionNotAccepted(String),
    /// The market is already registered
    #[error("market {0} is already registered")]
    DuplicateIlk(String),
    /// A requested value does not exist
    #[error("missing value: {0}")]
    NonExistentValue(String),
    /// The ledger accrues interest on this market
    #[error("rate of market {0} is not one")]
    RateNotOne(String),
    /// The pool urn holds less collateral than debt
    #[error("collateral below debt for market {0}")]
    InkBelowArt(String),
    /// Somebody else holds debt on this market
    #[error("more than one position on market {0}")]
    MoreThanOneUrn(String),
    /// A value does not fit into the signed representable range
    #[error("signed overflow")]
    Overflow,
    /// Arithmetic error
    #[error("arithmetic error: {0}")]
    Arithmetic(String),
    /// The pool reported failure
    #[error("pool {0:?} failed")]
    PoolFailure(PoolOp),
    /// The ledger rejected a mutation
    #[error("ledger error: {0}")]
    Ledger(String),
    /// The settlement module rejected a call
    #[error("settlement error: {0}")]
    Settlement(String),
    /// Decoding issue
    #[error("decoding error: {0}")]
    DecodingError(String),
    /// The event journal could not be written
    #[error("journal error: {0}")]
    Journal(String),
}

impl HubError {
    /// Returns the taxonomy class of the error
    pub fn class(&self) -> ErrorClass {
        match self {
            HubError::Unauthorized => ErrorClass::Authorization,
            HubError::Locked
            | HubError::LedgerNotLive
            | HubError::LedgerLive
            | HubError::IlkCaged(_)
            | HubError::AlreadyCaged(_)
            | HubError::ZeroTic(_)
            | HubError::NotCaged(_)
            | HubError::AlreadyCulled(_)
            | HubError::NotCulled(_)
            | HubError::CulledDuringShutdown(_)
            | HubError::IlkInactive(_)
            | HubError::EndDebtAlreadySet
            | HubError::PositionNotAccepted(_)
            | HubError::DuplicateIlk(_)
            | HubError::NonExistentValue(_)
            | HubError::DecodingError(_) => ErrorClass::Precondition,
            HubError::RateNotOne(_)
            | HubError::InkBelowArt(_)
            | HubError::MoreThanOneUrn(_)
            | HubError::Overflow
            | HubError::Arithmetic(_) => ErrorClass::Invariant,
            HubError::PoolFailure(_)
            | HubError::Ledger(_)
            | HubError::Settlement(_)
            | HubError::Journal(_) => ErrorClass::Collaborator,
        }
    }
}

pub fn arithmetic_err<S: AsRef<str>>(s: S) -> HubError {
    HubError::Arithmetic(s.as_ref().to_string())
}
