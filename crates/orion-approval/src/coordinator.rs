// orion-approval/src/coordinator.rs
// ============================================================================
// Module: ORION Approval Coordinator
// Description: Pending-request tracking, identity-gated approve/deny/force,
// and expiry sweeping.
// Purpose: Enforce single-admin authority with time-limited, one-shot
// approvals (§4.6).
// Dependencies: orion-contracts, orion-approval::{config, error, overrides,
// pending}
// ============================================================================

//! Pending-request tracking, identity-gated approve/deny/force, and expiry sweeping.

use std::collections::BTreeMap;

use orion_contracts::AdminChannel;
use orion_contracts::ApprovalAnswer;
use orion_contracts::ApprovalDecision;
use orion_contracts::ApprovalId;
use orion_contracts::ApprovalRequest;
use orion_contracts::ApprovalRequestId;
use orion_contracts::ContractVersion;
use orion_contracts::ForceOverrides;
use orion_contracts::MIN_REASONING_LEN;
use orion_contracts::RecordMeta;
use orion_contracts::SourceId;
use orion_contracts::Timestamp;

use crate::config::AdminConfig;
use crate::error::ApprovalError;
use crate::pending::PendingApproval;

/// Tracks pending approval requests, validates admin identity, and emits
/// approval decisions (§4.6).
///
/// Owned by a single task (§5, "the ApprovalCoordinator's pending-set is
/// owned by a single task and mutated only through its methods") — every
/// operation takes `&mut self`, not an internal lock.
pub struct ApprovalCoordinator {
    /// The single configured admin identity.
    admin: AdminConfig,
    /// Requests awaiting an approve/deny/force decision.
    pending: BTreeMap<ApprovalRequestId, PendingApproval>,
}

impl ApprovalCoordinator {
    /// Builds a coordinator gated by `admin`, with no pending requests.
    #[must_use]
    pub fn new(admin: AdminConfig) -> Self {
        Self { admin, pending: BTreeMap::new() }
    }

    /// Returns the number of requests currently pending.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Inserts a newly raised approval request (§4.6).
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Expired`] if `request.expires_at <= now`,
    /// or [`ApprovalError::AlreadyPending`] if its id is already tracked.
    pub fn handle_approval_request(&mut self, request: &ApprovalRequest, now: Timestamp) -> Result<(), ApprovalError> {
        if !request.expires_at.is_at_or_after(now) {
            return Err(ApprovalError::Expired(request.approval_request_id));
        }
        if self.pending.contains_key(&request.approval_request_id) {
            return Err(ApprovalError::AlreadyPending(request.approval_request_id));
        }
        self.pending.insert(
            request.approval_request_id,
            PendingApproval {
                decision_id: request.decision_id,
                action_type: request.action_type.clone(),
                risk_level: request.risk_level,
                requested_action: request.requested_action.clone(),
                expires_at: request.expires_at,
            },
        );
        Ok(())
    }

    /// Approves a pending request (§4.6).
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Unauthorized`] if `admin_identity` does not
    /// match the configured admin, [`ApprovalError::NotFound`] if the
    /// request is not pending, or [`ApprovalError::Expired`] if it is past
    /// its deadline.
    pub fn approve(&mut self, request_id: ApprovalRequestId, admin_identity: AdminChannel, reason: Option<String>, now: Timestamp) -> Result<ApprovalDecision, ApprovalError> {
        let pending = self.take_authorized_pending(request_id, &admin_identity, now)?;
        Ok(self.emit(request_id, pending.decision_id, ApprovalAnswer::Approve, ForceOverrides::none(), admin_identity, reason, now, pending.expires_at))
    }

    /// Denies a pending request (§4.6).
    ///
    /// A request already past its deadline is rejected with
    /// [`ApprovalError::Expired`] rather than silently denied: expiry is
    /// exclusively [`ApprovalCoordinator::sweep`]'s concern, so a decision
    /// channel never races it.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Unauthorized`], [`ApprovalError::NotFound`],
    /// or [`ApprovalError::Expired`] as for [`ApprovalCoordinator::approve`].
    pub fn deny(&mut self, request_id: ApprovalRequestId, admin_identity: AdminChannel, reason: Option<String>, now: Timestamp) -> Result<ApprovalDecision, ApprovalError> {
        let pending = self.take_authorized_pending(request_id, &admin_identity, now)?;
        Ok(self.emit(request_id, pending.decision_id, ApprovalAnswer::Deny, ForceOverrides::none(), admin_identity, reason, now, now))
    }

    /// Force-approves a pending request, optionally bypassing the
    /// commander's own cooldown/breaker checks (§4.6).
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Unauthorized`], [`ApprovalError::NotFound`],
    /// or [`ApprovalError::Expired`] as for [`ApprovalCoordinator::approve`],
    /// or [`ApprovalError::ReasonTooShort`] if `reason` is under
    /// [`MIN_REASONING_LEN`] characters.
    pub fn force(&mut self, request_id: ApprovalRequestId, admin_identity: AdminChannel, reason: String, overrides: ForceOverrides, now: Timestamp) -> Result<ApprovalDecision, ApprovalError> {
        if reason.chars().count() < MIN_REASONING_LEN {
            return Err(ApprovalError::ReasonTooShort(reason.chars().count()));
        }
        let pending = self.take_authorized_pending(request_id, &admin_identity, now)?;
        Ok(self.emit(request_id, pending.decision_id, ApprovalAnswer::Force, overrides, admin_identity, Some(reason), now, pending.expires_at))
    }

    /// Removes every pending request past its deadline, returning their ids
    /// for the caller to log as an escalation record (§4.6, "an escalation
    /// record is logged. Expiration never implies approval.").
    ///
    /// No [`ApprovalDecision`] is emitted for swept requests (§8 P7,
    /// "silence ≠ permission").
    pub fn sweep(&mut self, now: Timestamp) -> Vec<ApprovalRequestId> {
        let expired: Vec<ApprovalRequestId> = self.pending.iter().filter(|(_, pending)| !pending.expires_at.is_at_or_after(now)).map(|(id, _)| *id).collect();
        for id in &expired {
            self.pending.remove(id);
        }
        expired
    }

    /// Validates identity and existence/expiry, removing and returning the
    /// pending entry on success. Shared by approve/deny/force.
    fn take_authorized_pending(&mut self, request_id: ApprovalRequestId, admin_identity: &AdminChannel, now: Timestamp) -> Result<PendingApproval, ApprovalError> {
        if !self.admin.matches(admin_identity) {
            return Err(ApprovalError::Unauthorized);
        }
        let Some(pending) = self.pending.get(&request_id) else {
            return Err(ApprovalError::NotFound(request_id));
        };
        if !pending.expires_at.is_at_or_after(now) {
            return Err(ApprovalError::Expired(request_id));
        }
        self.pending.remove(&request_id).ok_or(ApprovalError::NotFound(request_id))
    }

    /// Builds the emitted `ApprovalDecision` record.
    #[allow(clippy::too_many_arguments, reason = "mirrors ApprovalDecision's own field count")]
    fn emit(&self, request_id: ApprovalRequestId, decision_id: orion_contracts::DecisionId, answer: ApprovalAnswer, overrides: ForceOverrides, admin_identity: AdminChannel, reason: Option<String>, issued_at: Timestamp, expires_at: Timestamp) -> ApprovalDecision {
        ApprovalDecision {
            meta: RecordMeta { version: ContractVersion::CURRENT, timestamp: issued_at, source: SourceId::approval_coordinator() },
            approval_id: ApprovalId::new(),
            approval_request_id: request_id,
            decision_id,
            decision: answer,
            overrides,
            admin_identity,
            reason,
            issued_at,
            expires_at,
        }
    }
}
