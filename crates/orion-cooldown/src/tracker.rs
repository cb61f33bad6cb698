// orion-cooldown/src/tracker.rs
// ============================================================================
// Module: ORION Cooldown Tracker
// Description: Fail-closed façade over a CooldownStore.
// Purpose: Answer "is this action/target pair in cooldown" without ever
// surfacing a store error as "don't know" (§4.3).
// Dependencies: orion-cooldown::{error, key, store}
// ============================================================================

//! Fail-closed façade over a CooldownStore.

use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use crate::key::CooldownKey;
use crate::store::CooldownStore;

/// Fail-closed cooldown tracker (§4.3).
///
/// `in_cooldown` never returns `Err`: a store failure is treated as "in
/// cooldown" (§4.3, "tracker fails closed"), matching the brain's
/// treatment of every unverifiable precondition as the least-privileged
/// outcome.
pub struct CooldownTracker {
    /// Backing store consulted for the last-execution instant.
    store: Arc<dyn CooldownStore>,
}

impl CooldownTracker {
    /// Builds a tracker over `store`.
    #[must_use]
    pub const fn new(store: Arc<dyn CooldownStore>) -> Self {
        Self { store }
    }

    /// Records `now` as `key`'s last-execution instant. Returns `Err` only
    /// for diagnostic purposes; callers that ignore the error still behave
    /// correctly because a failed record simply means the next
    /// `in_cooldown` call sees no prior execution and fails open on the
    /// *record* path only — the *read* path still fails closed.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the write could not be performed.
    pub fn record(&self, key: &CooldownKey, now: Instant) -> Result<(), crate::error::CooldownError> {
        self.store.record(key, now)
    }

    /// Returns `true` iff `key` is currently within `cooldown` of its last
    /// recorded execution, or if the store could not be read (§4.3).
    #[must_use]
    pub fn in_cooldown(&self, key: &CooldownKey, cooldown: Duration, now: Instant) -> bool {
        match self.store.last_execution(key) {
            Ok(Some(last)) => now.saturating_duration_since(last) < cooldown,
            Ok(None) => false,
            Err(_) => true,
        }
    }
}
