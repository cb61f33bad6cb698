// orion-contracts/src/approval.rs
// ============================================================================
// Module: ORION Approval
// Description: Human-in-the-loop approval request and decision records.
// Purpose: Carry a RISKY decision to an identified admin and record their
// answer.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! §3, §4.4: a `REQUEST_APPROVAL` decision produces exactly one
//! `ApprovalRequest`; an admin's answer produces exactly one
//! `ApprovalDecision` referencing it. §4.4 additionally requires every
//! request to carry an `expires_at`, and every decision to be attributable
//! to an identified admin — there is no anonymous approval path.

use serde::Deserialize;
use serde::Serialize;

use crate::decision::ProposedAction;
use crate::identifiers::ActionType;
use crate::identifiers::ApprovalId;
use crate::identifiers::ApprovalRequestId;
use crate::identifiers::DecisionId;
use crate::record::RecordMeta;
use crate::time::Timestamp;

/// Risk level carried on an [`ApprovalRequest`], mirroring the decision's
/// safety classification at the point approval was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Elevated risk requiring human sign-off.
    Risky,
}

/// A request for an identified admin to approve or deny a proposed action
/// (§3, §4.4).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalRequest {
    /// Record envelope (version, timestamp, source).
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Unique approval request identifier.
    pub approval_request_id: ApprovalRequestId,
    /// The decision this request was raised for.
    pub decision_id: DecisionId,
    /// Action type the request covers.
    pub action_type: ActionType,
    /// Risk level of the requested action.
    pub risk_level: RiskLevel,
    /// The action an approving admin would authorize.
    pub requested_action: ProposedAction,
    /// Deadline after which this request can no longer be approved (§4.4,
    /// §8 P7).
    pub expires_at: Timestamp,
}

/// An identified admin's channel of communication, used to attribute
/// [`ApprovalDecision::admin_identity`] (§9 redesign: closed variants
/// instead of ad hoc channel strings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "channel", rename_all = "snake_case")]
pub enum AdminChannel {
    /// A Telegram chat identified by numeric chat ID.
    Telegram {
        /// Telegram chat identifier.
        chat_id: i64,
    },
    /// A local CLI operator identified by username.
    Cli {
        /// Local username.
        username: String,
    },
}

/// The admin's answer to an [`ApprovalRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalAnswer {
    /// The action is approved for execution.
    Approve,
    /// The action is denied.
    Deny,
    /// The action is approved, bypassing whatever `overrides` grants (§4.6,
    /// force override).
    Force,
}

/// Bypass permissions attached to a `force` approval decision (§4.6,
/// "`overrides ⊆ {override_circuit_breaker, override_cooldown}`").
///
/// Carried on the [`ApprovalDecision`] itself rather than passed alongside
/// it: the approval coordinator is the sole producer of `ApprovalDecision`
/// records, so the admin's override choice has nowhere else to travel from
/// coordinator to commander.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceOverrides {
    /// Bypass the circuit breaker's `admits` check for this dispatch.
    pub override_circuit_breaker: bool,
    /// Bypass the cooldown tracker's `in_cooldown` check for this dispatch.
    pub override_cooldown: bool,
}

impl ForceOverrides {
    /// No overrides granted: a `force` with this value is dispatched under
    /// the same breaker/cooldown checks as a plain `approve`.
    #[must_use]
    pub const fn none() -> Self {
        Self { override_circuit_breaker: false, override_cooldown: false }
    }
}

/// An identified admin's answer to an [`ApprovalRequest`] (§3, §4.4).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalDecision {
    /// Record envelope (version, timestamp, source).
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Unique approval decision identifier.
    pub approval_id: ApprovalId,
    /// The request this decision answers.
    pub approval_request_id: ApprovalRequestId,
    /// The brain decision that originated the request.
    pub decision_id: DecisionId,
    /// Approve, deny, or force.
    pub decision: ApprovalAnswer,
    /// Bypass permissions granted alongside `decision`. Only meaningful
    /// when `decision = Force`; `Approve`/`Deny` always carry
    /// [`ForceOverrides::none`].
    pub overrides: ForceOverrides,
    /// The identified admin who answered.
    pub admin_identity: AdminChannel,
    /// Optional free-text reason supplied by the admin.
    pub reason: Option<String>,
    /// When this decision was issued.
    pub issued_at: Timestamp,
    /// The expiry carried over from the originating request.
    pub expires_at: Timestamp,
}

impl ApprovalDecision {
    /// Returns `true` when this decision was issued before `expires_at`
    /// (§4.4, §8 P7: "an approval issued after its request's `expires_at`
    /// MUST NOT authorize execution").
    #[must_use]
    pub fn is_timely(&self) -> bool {
        self.expires_at.is_at_or_after(self.issued_at)
    }
}
