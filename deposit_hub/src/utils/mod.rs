//! Utility and helper functions needed for:
//! - Fixed point and signed-range arithmetic
//! - Authorization checks
//! - Error handling
//! - Type casting

pub(crate) mod common;
pub(crate) mod error;
