// orion-contracts/src/decision.rs
// ============================================================================
// Module: ORION Decision
// Description: Immutable audit record emitted by the brain.
// Purpose: Capture which predicate fired and what, if anything, was proposed.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! §3: every `Decision` "references an existing Incident"; a decision of
//! type `EXECUTE_SAFE_ACTION` "MUST carry `safety_classification = SAFE`
//! and `requires_approval = false`"; a decision of type `REQUEST_APPROVAL`
//! "MUST carry `safety_classification = RISKY` and `requires_approval =
//! true`". [`Decision::new`] is the only constructor and enforces both
//! rules so an invalid combination cannot be built, let alone published.

use serde::Deserialize;
use serde::Serialize;

use crate::identifiers::ActionType;
use crate::identifiers::DecisionId;
use crate::identifiers::IncidentId;
use crate::record::RecordMeta;

/// Minimum length of a [`Decision::reasoning`] string (§3, §8 P2).
pub const MIN_REASONING_LEN: usize = 10;

/// The kind of decision the brain emitted for an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionType {
    /// No action was taken.
    NoAction,
    /// An action was proposed for a human to carry out manually.
    SuggestAction,
    /// A SAFE action was proposed for immediate, unattended execution.
    ExecuteSafeAction,
    /// A RISKY action requires an identified admin's approval before it may
    /// execute.
    RequestApproval,
}

/// Safety classification carried on a [`Decision`] or [`crate::Action`].
///
/// Unlike the policy store's three-valued classification result (defined in
/// `orion-policy`, which depends on this crate rather than the reverse),
/// this type has no `Unknown` variant: §3 states "`UNKNOWN` is not a valid
/// value anywhere an action crosses a module boundary", and a
/// `Decision`/`Action` is exactly such a boundary crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyClassification {
    /// Permitted for unattended execution at sufficient autonomy.
    Safe,
    /// Requires identified human approval at N3, and is refused below N3.
    Risky,
}

/// The action a decision proposes, shared between [`Decision::proposed_action`]
/// and the action the commander ultimately constructs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedAction {
    /// Action type to execute.
    pub action_type: ActionType,
    /// Action parameters, opaque to the brain and commander core.
    pub parameters: serde_json::Value,
    /// Whether this action should be dry-run rather than actually executed.
    pub dry_run: bool,
    /// Whether the action's handler supports rollback on failure.
    pub rollback_enabled: bool,
}

/// Errors raised constructing an invalid [`Decision`].
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum DecisionError {
    /// `reasoning` is shorter than [`MIN_REASONING_LEN`] characters (§3, P2).
    #[error("reasoning must be at least {MIN_REASONING_LEN} characters, got {0}")]
    ReasoningTooShort(usize),
    /// An `EXECUTE_SAFE_ACTION` decision did not carry `SAFE` +
    /// `requires_approval = false` (§3).
    #[error("EXECUTE_SAFE_ACTION decisions must be SAFE and not require approval")]
    InvalidExecuteSafeAction,
    /// A `REQUEST_APPROVAL` decision did not carry `RISKY` +
    /// `requires_approval = true` (§3).
    #[error("REQUEST_APPROVAL decisions must be RISKY and require approval")]
    InvalidRequestApproval,
    /// An `EXECUTE_SAFE_ACTION` or `REQUEST_APPROVAL` decision had no
    /// `proposed_action`.
    #[error("decision type {0:?} requires a proposed action")]
    MissingProposedAction(DecisionType),
}

/// Immutable audit record emitted by the brain for an incident (§3, §4.5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Record envelope (version, timestamp, source — must be the brain).
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Unique decision identifier.
    pub decision_id: DecisionId,
    /// The incident this decision was made about.
    pub incident_id: IncidentId,
    /// The kind of decision.
    pub decision_type: DecisionType,
    /// Safety classification of the proposed action, when any.
    pub safety_classification: Option<SafetyClassification>,
    /// Whether this decision requires human approval before acting.
    pub requires_approval: bool,
    /// Human-readable justification, at least [`MIN_REASONING_LEN`] characters.
    pub reasoning: String,
    /// The action proposed by this decision, when any.
    pub proposed_action: Option<ProposedAction>,
}

impl Decision {
    /// Constructs a decision, enforcing the invariants named in §3.
    ///
    /// # Errors
    ///
    /// Returns a [`DecisionError`] when `reasoning` is too short, or when
    /// `decision_type`/`safety_classification`/`requires_approval`/
    /// `proposed_action` do not satisfy §3's combination rules.
    #[allow(clippy::too_many_arguments, reason = "mirrors the record's own field count; a builder would not reduce call-site complexity for a single internal constructor")]
    pub fn new(
        meta: RecordMeta,
        decision_id: DecisionId,
        incident_id: IncidentId,
        decision_type: DecisionType,
        safety_classification: Option<SafetyClassification>,
        requires_approval: bool,
        reasoning: String,
        proposed_action: Option<ProposedAction>,
    ) -> Result<Self, DecisionError> {
        if reasoning.chars().count() < MIN_REASONING_LEN {
            return Err(DecisionError::ReasoningTooShort(reasoning.chars().count()));
        }
        match decision_type {
            DecisionType::ExecuteSafeAction => {
                if safety_classification != Some(SafetyClassification::Safe) || requires_approval {
                    return Err(DecisionError::InvalidExecuteSafeAction);
                }
                if proposed_action.is_none() {
                    return Err(DecisionError::MissingProposedAction(decision_type));
                }
            }
            DecisionType::RequestApproval => {
                if safety_classification != Some(SafetyClassification::Risky) || !requires_approval {
                    return Err(DecisionError::InvalidRequestApproval);
                }
                if proposed_action.is_none() {
                    return Err(DecisionError::MissingProposedAction(decision_type));
                }
            }
            DecisionType::NoAction | DecisionType::SuggestAction => {}
        }
        Ok(Self {
            meta,
            decision_id,
            incident_id,
            decision_type,
            safety_classification,
            requires_approval,
            reasoning,
            proposed_action,
        })
    }
}
