// orion-contracts/src/outcome.rs
// ============================================================================
// Module: ORION Outcome
// Description: Terminal execution result for an action.
// Purpose: Close the audit trail from decision through to effect.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! §3: "Every `Action` that reaches a terminal state produces exactly one
//! `Outcome`, published by the commander." [`Outcome`] is that closing
//! record; [`OutcomeStatus`] mirrors [`crate::ActionState`]'s terminal
//! variants one-to-one.

use serde::Deserialize;
use serde::Serialize;

use crate::identifiers::ActionId;
use crate::identifiers::OutcomeId;
use crate::record::RecordMeta;

/// Terminal result of an executed [`crate::Action`] (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// The action completed without error.
    Succeeded,
    /// The action failed and was not rolled back.
    Failed,
    /// The action failed and was rolled back.
    RolledBack,
}

/// Structured error detail attached to a non-succeeded [`Outcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeError {
    /// Stable, handler-defined error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// The terminal result of an [`crate::Action`] (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Record envelope (version, timestamp, source — must be the commander).
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Unique outcome identifier.
    pub outcome_id: OutcomeId,
    /// The action this outcome closes out.
    pub action_id: ActionId,
    /// Terminal status.
    pub status: OutcomeStatus,
    /// Wall-clock execution time in milliseconds.
    pub execution_time_ms: u64,
    /// Error detail, present when `status` is not `Succeeded`.
    pub error: Option<OutcomeError>,
}
