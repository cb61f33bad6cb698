// orion-contracts/src/action.rs
// ============================================================================
// Module: ORION Action
// Description: Commander-side execution record for a proposed action.
// Purpose: Track an action's lifecycle from pending through a terminal state.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! §3: "`safety_classification` is never `UNKNOWN` on an `Action` — the
//! commander refuses to construct one from an unresolved classification."
//! [`Action`] therefore reuses [`crate::SafetyClassification`] rather than
//! the policy store's three-valued [`crate::Classification`].

use serde::Deserialize;
use serde::Serialize;

use crate::decision::SafetyClassification;
use crate::identifiers::ActionId;
use crate::identifiers::ActionType;
use crate::identifiers::DecisionId;
use crate::record::RecordMeta;

/// Lifecycle state of an [`Action`] (§3, §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionState {
    /// Constructed but not yet dispatched to a handler.
    Pending,
    /// Dispatched to a handler; execution in progress.
    Executing,
    /// Execution completed without error.
    Succeeded,
    /// Execution failed.
    Failed,
    /// Execution failed and was rolled back.
    RolledBack,
}

/// A concrete, dispatchable unit of execution constructed by the commander
/// (§3, §4.6).
///
/// # Invariants
/// - `safety_classification` is never absent and never the policy store's
///   `Unknown` — see module docs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Record envelope (version, timestamp, source — must be the commander).
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Unique action identifier.
    pub action_id: ActionId,
    /// The decision this action was constructed from.
    pub decision_id: DecisionId,
    /// Action type to execute.
    pub action_type: ActionType,
    /// Safety classification, carried over from the originating decision.
    pub safety_classification: SafetyClassification,
    /// Action parameters, opaque to the commander core.
    pub parameters: serde_json::Value,
    /// Current lifecycle state.
    pub state: ActionState,
    /// Whether this action is a dry run (no side effects performed).
    pub dry_run: bool,
    /// Whether the handler for this action type supports rollback.
    pub rollback_enabled: bool,
}

impl Action {
    /// Returns `true` when `state` is terminal (§4.6: terminal states do not
    /// transition further).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.state, ActionState::Succeeded | ActionState::Failed | ActionState::RolledBack)
    }
}
