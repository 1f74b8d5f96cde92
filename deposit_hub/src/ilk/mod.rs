//! Market records kept by the hub

pub(crate) mod data;
pub(crate) mod settings;
pub(crate) mod stable;
pub mod status;
