// orion-cooldown/src/store.rs
// ============================================================================
// Module: ORION Cooldown Store
// Description: Pluggable backing store trait plus an in-memory reference
// implementation.
// Purpose: Record and query the last-execution instant per cooldown key
// (§4.3).
// Dependencies: orion-contracts, std::sync
// ============================================================================

//! Pluggable backing store trait plus an in-memory reference implementation.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Instant;

use crate::error::CooldownError;
use crate::key::CooldownKey;

/// External key-value store backing the cooldown tracker (§4.3, "backing
/// store is external (key-value)").
pub trait CooldownStore: Send + Sync {
    /// Records `now` as the last-execution instant for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CooldownError::Unavailable`] if the store cannot be
    /// written.
    fn record(&self, key: &CooldownKey, now: Instant) -> Result<(), CooldownError>;

    /// Returns the last-execution instant recorded for `key`, or `None` if
    /// none has ever been recorded.
    ///
    /// # Errors
    ///
    /// Returns [`CooldownError::Unavailable`] if the store cannot be read.
    fn last_execution(&self, key: &CooldownKey) -> Result<Option<Instant>, CooldownError>;
}

/// Reference [`CooldownStore`] backed by an in-process map.
#[derive(Debug, Default)]
pub struct InMemoryCooldownStore {
    /// Last-execution instant per cooldown key.
    entries: Mutex<BTreeMap<CooldownKey, Instant>>,
}

impl InMemoryCooldownStore {
    /// Builds an empty in-memory cooldown store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CooldownStore for InMemoryCooldownStore {
    fn record(&self, key: &CooldownKey, now: Instant) -> Result<(), CooldownError> {
        let mut entries = self.entries.lock().map_err(|_| CooldownError::Unavailable("cooldown store mutex poisoned".to_string()))?;
        entries.insert(key.clone(), now);
        Ok(())
    }

    fn last_execution(&self, key: &CooldownKey) -> Result<Option<Instant>, CooldownError> {
        let entries = self.entries.lock().map_err(|_| CooldownError::Unavailable("cooldown store mutex poisoned".to_string()))?;
        Ok(entries.get(key).copied())
    }
}
