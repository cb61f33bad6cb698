// orion-commander/src/breaker_port.rs
// ============================================================================
// Module: ORION Commander Circuit Breaker Port
// Description: Interface the commander consults and updates around dispatch.
// Purpose: Let the commander consult/report to a circuit breaker (§4.4,
// "consulted by... the Commander before dispatch") without depending on
// `orion-breaker` (§9, strict dependency order: commander depends on
// contracts and policy only).
// Dependencies: orion-contracts
// ============================================================================

//! Interface the commander consults and updates around dispatch.

use orion_contracts::ActionType;

/// Capability set the commander needs from a circuit breaker (§4.4, §4.7
/// step 5 "report to circuit breaker").
///
/// `orion_breaker::CircuitBreaker` implements this trait at the composition
/// root that wires brain, commander, and breaker to the same instance; the
/// commander crate itself only ever sees the trait object.
pub trait CircuitBreakerPort: Send + Sync {
    /// Returns `true` if `action_type` may currently be dispatched.
    fn admits(&self, action_type: &ActionType) -> bool;
    /// Records a successful execution.
    fn record_success(&self, action_type: &ActionType);
    /// Records a failed execution.
    fn record_failure(&self, action_type: &ActionType);
}
