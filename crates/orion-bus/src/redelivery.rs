// orion-bus/src/redelivery.rs
// ============================================================================
// Module: ORION Bus Redelivery Policy
// Description: Caller-governed backoff for handler failures.
// Purpose: Give subscribe() a concrete value to implement "failure
// re-delivers after backoff governed by the caller" (§4.1) against.
// Dependencies: (none)
// ============================================================================

//! Caller-governed backoff for handler failures.

use std::time::Duration;

/// Backoff schedule applied when a subscription handler returns failure
/// (§4.1).
///
/// # Invariants
/// - `base <= max`; `multiplier >= 1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RedeliveryPolicy {
    /// Delay before the first redelivery attempt.
    base: Duration,
    /// Ceiling on the computed delay, regardless of attempt count.
    max: Duration,
    /// Growth factor applied per failed attempt.
    multiplier: f64,
}

impl RedeliveryPolicy {
    /// Builds a redelivery policy.
    ///
    /// `multiplier` below `1.0` is clamped to `1.0` (no policy may shrink
    /// backoff over repeated failures).
    #[must_use]
    pub fn new(base: Duration, max: Duration, multiplier: f64) -> Self {
        Self { base, max, multiplier: multiplier.max(1.0) }
    }

    /// A policy with no backoff: every redelivery is attempted immediately.
    #[must_use]
    pub const fn immediate() -> Self {
        Self { base: Duration::ZERO, max: Duration::ZERO, multiplier: 1.0 }
    }

    /// Computes the delay before the `attempt`-th redelivery (`attempt`
    /// starts at `0` for the first retry after the original failure).
    #[must_use]
    #[allow(clippy::cast_precision_loss, reason = "attempt counts are small and bounded by in-process retry loops, not untrusted input")]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let scaled = self.base.as_secs_f64() * self.multiplier.powi(attempt as i32);
        Duration::from_secs_f64(scaled).min(self.max).max(self.base)
    }
}

impl Default for RedeliveryPolicy {
    fn default() -> Self {
        Self::new(Duration::from_millis(100), Duration::from_secs(30), 2.0)
    }
}
