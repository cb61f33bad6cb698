// orion-approval/src/pending.rs
// ============================================================================
// Module: ORION Pending Approval
// Description: State held for one outstanding approval request.
// Purpose: Give the coordinator's pending-set a concrete value type (§4.6).
// Dependencies: orion-contracts
// ============================================================================

//! State held for one outstanding approval request.

use orion_contracts::ActionType;
use orion_contracts::DecisionId;
use orion_contracts::ProposedAction;
use orion_contracts::RiskLevel;
use orion_contracts::Timestamp;

/// State the coordinator holds for one pending approval request (§4.6).
#[derive(Debug, Clone, PartialEq)]
pub struct PendingApproval {
    /// The decision this request was raised for.
    pub decision_id: DecisionId,
    /// The action type requested.
    pub action_type: ActionType,
    /// Risk level of the requested action.
    pub risk_level: RiskLevel,
    /// The action to construct if approved.
    pub requested_action: ProposedAction,
    /// Deadline past which the request is swept without a decision.
    pub expires_at: Timestamp,
}
