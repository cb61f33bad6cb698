// orion-breaker/src/state.rs
// ============================================================================
// Module: ORION Circuit Breaker State
// Description: Per-action-type state machine state.
// Purpose: Hold the rolling failure window and half-open bookkeeping for
// one action type (§4.4).
// Dependencies: std::collections::VecDeque, std::time::Instant
// ============================================================================

//! Per-action-type state machine state.

use std::collections::VecDeque;
use std::time::Instant;

/// Circuit state for a single action type (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    /// Normal operation; all calls admitted.
    Closed,
    /// Tripped; all calls rejected until `window` elapses since `opened_at`.
    Open,
    /// Trial period; up to `half_open_probes` calls admitted, awaiting
    /// one resolving success or failure.
    HalfOpen,
}

/// Mutable bookkeeping for one action type's breaker.
#[derive(Debug)]
pub(crate) struct BreakerEntry {
    /// Current state.
    pub(crate) state: BreakerState,
    /// Failure instants within the rolling window, oldest first.
    pub(crate) failures: VecDeque<Instant>,
    /// Instant the breaker last transitioned to OPEN.
    pub(crate) opened_at: Option<Instant>,
    /// Probes admitted since entering HALF_OPEN.
    pub(crate) half_open_admitted: u32,
}

impl Default for BreakerEntry {
    fn default() -> Self {
        Self { state: BreakerState::Closed, failures: VecDeque::new(), opened_at: None, half_open_admitted: 0 }
    }
}
