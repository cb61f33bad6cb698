// orion-breaker/src/breaker.rs
// ============================================================================
// Module: ORION Circuit Breaker
// Description: Per-action-type CLOSED/OPEN/HALF_OPEN state machine.
// Purpose: Gate SAFE action execution on a rolling failure window, failing
// closed on any internal error (§4.4).
// Dependencies: orion-contracts, orion-breaker::{error, state}
// ============================================================================

//! Per-action-type CLOSED/OPEN/HALF_OPEN state machine.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use orion_contracts::ActionType;

use crate::error::BreakerError;
use crate::state::BreakerEntry;
use crate::state::BreakerState;

/// Per-`action_type` circuit breaker registry (§4.4).
///
/// Consulted by the brain before `EXECUTE_SAFE_ACTION` and by the
/// commander before dispatch. `threshold`, `window`, and
/// `half_open_probes` are shared across every tracked action type,
/// mirroring the single `circuit_breaker` block in the policy document.
pub struct CircuitBreaker {
    /// Consecutive windowed failures before the breaker opens.
    threshold: u32,
    /// Rolling window over which failures are counted, and the OPEN
    /// cool-down before a HALF_OPEN trial.
    window: Duration,
    /// Trial admissions allowed while HALF_OPEN.
    half_open_probes: u32,
    /// Per-action-type state.
    entries: Mutex<BTreeMap<ActionType, BreakerEntry>>,
}

impl CircuitBreaker {
    /// Builds a breaker registry with the given shared thresholds.
    #[must_use]
    pub fn new(threshold: u32, window: Duration, half_open_probes: u32) -> Self {
        Self { threshold, window, half_open_probes, entries: Mutex::new(BTreeMap::new()) }
    }

    /// Returns `true` iff `action_type` may currently be attempted.
    ///
    /// Any internal failure (lock poisoning) fails closed to `false`
    /// (§4.4).
    #[must_use]
    pub fn admits(&self, action_type: &ActionType, now: Instant) -> bool {
        let Ok(mut entries) = self.entries.lock() else {
            return false;
        };
        let entry = entries.entry(action_type.clone()).or_default();
        Self::prune(entry, self.window, now);
        match entry.state {
            BreakerState::Closed => true,
            BreakerState::Open => {
                let Some(opened_at) = entry.opened_at else {
                    return false;
                };
                if now.saturating_duration_since(opened_at) >= self.window {
                    entry.state = BreakerState::HalfOpen;
                    entry.half_open_admitted = 1;
                    true
                } else {
                    false
                }
            }
            BreakerState::HalfOpen => {
                if entry.half_open_admitted < self.half_open_probes {
                    entry.half_open_admitted = entry.half_open_admitted.saturating_add(1);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Reports a successful attempt for `action_type` (§4.4, "HALF_OPEN →
    /// CLOSED on a successful probe").
    ///
    /// # Errors
    ///
    /// Returns [`BreakerError::Unavailable`] if the internal lock is
    /// poisoned.
    pub fn record_success(&self, action_type: &ActionType) -> Result<(), BreakerError> {
        let mut entries = self.entries.lock().map_err(|_| BreakerError::Unavailable("breaker mutex poisoned".to_string()))?;
        let entry = entries.entry(action_type.clone()).or_default();
        if entry.state == BreakerState::HalfOpen {
            entry.state = BreakerState::Closed;
            entry.failures.clear();
            entry.opened_at = None;
            entry.half_open_admitted = 0;
        }
        Ok(())
    }

    /// Reports a failed attempt for `action_type` (§4.4, "CLOSED → OPEN
    /// when failures in window ≥ threshold"; "HALF_OPEN → OPEN on any
    /// probe failure").
    ///
    /// # Errors
    ///
    /// Returns [`BreakerError::Unavailable`] if the internal lock is
    /// poisoned.
    pub fn record_failure(&self, action_type: &ActionType, now: Instant) -> Result<(), BreakerError> {
        let mut entries = self.entries.lock().map_err(|_| BreakerError::Unavailable("breaker mutex poisoned".to_string()))?;
        let entry = entries.entry(action_type.clone()).or_default();
        match entry.state {
            BreakerState::HalfOpen => {
                entry.state = BreakerState::Open;
                entry.opened_at = Some(now);
                entry.half_open_admitted = 0;
            }
            BreakerState::Closed => {
                entry.failures.push_back(now);
                Self::prune(entry, self.window, now);
                if u32::try_from(entry.failures.len()).unwrap_or(u32::MAX) >= self.threshold {
                    entry.state = BreakerState::Open;
                    entry.opened_at = Some(now);
                }
            }
            BreakerState::Open => {}
        }
        Ok(())
    }

    /// Returns the current state of `action_type`'s breaker, defaulting to
    /// [`BreakerState::Closed`] for an action type never reported on.
    #[must_use]
    pub fn state_of(&self, action_type: &ActionType) -> Option<BreakerState> {
        let entries = self.entries.lock().ok()?;
        Some(entries.get(action_type).map_or(BreakerState::Closed, |entry| entry.state))
    }

    fn prune(entry: &mut BreakerEntry, window: Duration, now: Instant) {
        while let Some(&oldest) = entry.failures.front() {
            if now.saturating_duration_since(oldest) > window {
                entry.failures.pop_front();
            } else {
                break;
            }
        }
    }
}
