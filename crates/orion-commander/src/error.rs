// orion-commander/src/error.rs
// ============================================================================
// Module: ORION Commander Errors
// Description: Error type for dispatch and execution failures.
// Purpose: Name the §7 error kinds the commander itself raises.
// Dependencies: thiserror, orion-contracts
// ============================================================================

//! Error type for dispatch and execution failures.

use thiserror::Error;

use orion_contracts::ActionType;
use orion_contracts::DecisionId;

/// Errors raised by [`crate::commander::Commander`] dispatch and execution
/// (§4.7, §7).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommanderError {
    /// A decision arrived with a type other than `EXECUTE_SAFE_ACTION`, or
    /// `classify(action_type)` no longer agrees it is `SAFE` (§4.7, "Reject
    /// with a failure outcome otherwise").
    #[error("decision does not carry a SAFE EXECUTE_SAFE_ACTION proposal")]
    NotSafeAction,
    /// `admin_identity` on an approval decision does not match the
    /// configured admin (§7 `UNAUTHORIZED`).
    #[error("admin identity does not match the configured admin")]
    Unauthorized,
    /// The approval decision's `expires_at` is not after `now` (§7
    /// `EXPIRED`).
    #[error("approval decision for {0} arrived past its expiry")]
    Expired(DecisionId),
    /// No decision with this id has been observed by the commander.
    #[error("decision {0} is not known to the commander")]
    UnknownDecision(DecisionId),
    /// The referenced original decision is known but was not `RISKY`.
    #[error("decision {0} was not a RISKY proposal")]
    NotRisky(DecisionId),
    /// No handler is registered for this action type (§7
    /// `UNKNOWN_ACTION_TYPE`).
    #[error("no handler registered for action type {0}")]
    UnknownActionType(ActionType),
    /// The handler did not complete within its deadline (§7 `TIMEOUT`).
    #[error("handler for {0} exceeded its execution deadline")]
    Timeout(ActionType),
    /// The handler returned an error (§7 `HANDLER_FAILED`).
    #[error("handler for {0} failed: {1}")]
    HandlerFailed(ActionType, String),
    /// Both the handler and its rollback failed (§7 `ROLLBACK_FAILED`).
    #[error("handler for {0} failed ({1}) and rollback also failed: {2}")]
    RollbackFailed(ActionType, String, String),
    /// The circuit breaker does not admit this action type (§7
    /// `CIRCUIT_OPEN`).
    #[error("circuit open for action type {0}")]
    CircuitOpen(ActionType),
}
