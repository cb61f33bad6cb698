// orion-breaker/src/lib.rs
// ============================================================================
// Module: ORION Circuit Breaker
// Description: Public API surface for the ORION circuit breaker.
// Purpose: Expose CircuitBreaker and its state/error types.
// Dependencies: crate::{breaker, error, state}
// ============================================================================

//! ## Overview
//! Per-`action_type` CLOSED/OPEN/HALF_OPEN circuit breaker (§4.4),
//! consulted by the brain before proposing `EXECUTE_SAFE_ACTION` and by
//! the commander before dispatching a handler. Every internal failure
//! fails closed: [`CircuitBreaker::admits`] returns `false` rather than
//! propagating an error.

#![forbid(unsafe_code)]

pub mod breaker;
pub mod error;
pub mod state;

pub use breaker::CircuitBreaker;
pub use error::BreakerError;
pub use state::BreakerState;
