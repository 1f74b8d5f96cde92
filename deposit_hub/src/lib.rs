pub mod constants;
pub mod hub;
pub mod ilk;
pub mod interfaces;
pub mod journal;
mod state;
pub mod types;
mod utils;

#[cfg(test)]
mod sim;

pub use hub::Hub;
pub use ilk::status::IlkStatus;
pub use journal::{HubEvent, Journal, JournalEntry};
pub use types::{HookTag, HubParam, Ilk, IlkInput, IlkParam, IlkQuery, InitArgs, Mode};
pub use utils::error::{ErrorClass, HubError, HubResult, PoolOp};
