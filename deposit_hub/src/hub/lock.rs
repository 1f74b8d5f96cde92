//! Hub Locking System
//!
//! A single flag shared by every mutating entry point of the hub. Acquiring it hands out a
//! [`LockGuard`]; dropping the guard releases the flag, on success and failure alike.
//!
//! ```plain
//! Lock State Machine:
//!
//!              ┌──────────┐
//!         ┌────► Unlocked │
//!         │    └──────────┘
//!         │         │
//!   guard dropped  try_lock
//!         │         │
//!         │         ▼
//!         │    ┌─────────┐
//!         └────┤ Locked  ├──── try_lock ──► Err(Locked)
//!              └─────────┘
//! ```

use std::{cell::Cell, rc::Rc};

use crate::utils::error::{HubError, HubResult};

/// Reentrancy lock of the hub
#[derive(Clone, Debug, Default)]
pub struct Lock {
    /// Current lock state
    is_locked: Rc<Cell<bool>>,
}

impl Lock {
    /// Attempts to acquire the lock.
    ///
    /// # Returns
    /// * `Ok(LockGuard)` - Lock acquired, released when the guard drops
    /// * `Err(HubError::Locked)` - Another entry point holds the lock
    pub fn try_lock(&self) -> HubResult<LockGuard> {
        if self.is_locked.get() {
            return Err(HubError::Locked);
        }
        self.is_locked.set(true);
        Ok(LockGuard {
            is_locked: Rc::clone(&self.is_locked),
        })
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked.get()
    }
}

/// Scoped ownership of the [`Lock`]
#[derive(Debug)]
pub struct LockGuard {
    is_locked: Rc<Cell<bool>>,
}

impl Drop for LockGuard {
    /// Unlocks the hub when the guard goes out of scope
    fn drop(&mut self) {
        self.is_locked.set(false);
    }
}
