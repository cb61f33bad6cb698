// orion-breaker/src/error.rs
// ============================================================================
// Module: ORION Circuit Breaker Errors
// Description: Error type for the circuit breaker registry.
// Purpose: Let internal failures (lock poisoning) be reported distinctly
// from a normal "not admits" decision (§4.4).
// Dependencies: thiserror
// ============================================================================

//! Error type for the circuit breaker registry.

use thiserror::Error;

/// Errors raised by [`crate::breaker::CircuitBreaker`]'s mutating
/// operations.
///
/// `admits` never returns this: an internal failure there collapses to
/// `false` (§4.4, "breaker failure path also returns 'not admits'").
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BreakerError {
    /// The breaker's internal state could not be accessed.
    #[error("circuit breaker unavailable: {0}")]
    Unavailable(String),
}
