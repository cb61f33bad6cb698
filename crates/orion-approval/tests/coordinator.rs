// orion-approval/tests/coordinator.rs
// ============================================================================
// Module: ORION Approval Coordinator Integration Tests
// Description: Tests for identity-gated approve/deny/force and sweep.
// Purpose: Exercise ApprovalCoordinator against §4.6 and §8 scenarios 4-5.
// Dependencies: orion-approval, orion-contracts
// ============================================================================
//! ## Overview
//! Validates `ApprovalCoordinator` against §4.6's operations and the
//! relevant scenarios in §8.

#![allow(clippy::panic, clippy::unwrap_used, clippy::expect_used, reason = "Test-only panic-based assertions are permitted.")]

use orion_approval::AdminConfig;
use orion_approval::ApprovalCoordinator;
use orion_approval::ApprovalError;
use orion_approval::ForceOverrides;
use orion_contracts::AdminChannel;
use orion_contracts::ApprovalAnswer;
use orion_contracts::ApprovalRequest;
use orion_contracts::ApprovalRequestId;
use orion_contracts::ContractVersion;
use orion_contracts::DecisionId;
use orion_contracts::ProposedAction;
use orion_contracts::RecordMeta;
use orion_contracts::RiskLevel;
use orion_contracts::SourceId;
use orion_contracts::Timestamp;
use serde_json::json;
use time::Duration as TimeDuration;
use time::OffsetDateTime;

fn now_timestamp() -> Timestamp {
    Timestamp::from_offset(OffsetDateTime::now_utc())
}

fn admin_cli() -> AdminChannel {
    AdminChannel::Cli { username: "oncall".to_string() }
}

fn request_expiring_in(seconds: i64, issued_at: Timestamp) -> ApprovalRequest {
    ApprovalRequest {
        meta: RecordMeta { version: ContractVersion::CURRENT, timestamp: issued_at, source: SourceId::brain() },
        approval_request_id: ApprovalRequestId::new(),
        decision_id: DecisionId::new(),
        action_type: orion_contracts::ActionType::new("acknowledge_incident"),
        risk_level: RiskLevel::Risky,
        requested_action: ProposedAction { action_type: orion_contracts::ActionType::new("acknowledge_incident"), parameters: json!({}), dry_run: false, rollback_enabled: false },
        expires_at: issued_at.plus(TimeDuration::seconds(seconds)),
    }
}

fn coordinator() -> ApprovalCoordinator {
    ApprovalCoordinator::new(AdminConfig::new(None, Some("oncall".to_string())).expect("at least one channel configured"))
}

#[test]
fn approve_by_matching_admin_succeeds() {
    let mut coordinator = coordinator();
    let now = now_timestamp();
    let request = request_expiring_in(300, now);
    coordinator.handle_approval_request(&request, now).expect("request accepted");

    let decision = coordinator.approve(request.approval_request_id, admin_cli(), None, now).expect("approval succeeds");

    assert_eq!(decision.decision, ApprovalAnswer::Approve);
    assert_eq!(decision.approval_request_id, request.approval_request_id);
    assert_eq!(decision.decision_id, request.decision_id);
    assert_eq!(coordinator.pending_count(), 0);
}

#[test]
fn approve_by_mismatched_identity_is_unauthorized() {
    let mut coordinator = coordinator();
    let now = now_timestamp();
    let request = request_expiring_in(300, now);
    coordinator.handle_approval_request(&request, now).expect("request accepted");

    let outcome = coordinator.approve(request.approval_request_id, AdminChannel::Cli { username: "intruder".to_string() }, None, now);

    assert_eq!(outcome, Err(ApprovalError::Unauthorized));
    // the request remains pending after a rejected attempt
    assert_eq!(coordinator.pending_count(), 1);
}

#[test]
fn deny_emits_a_decision_with_no_standing_window() {
    let mut coordinator = coordinator();
    let now = now_timestamp();
    let request = request_expiring_in(300, now);
    coordinator.handle_approval_request(&request, now).expect("request accepted");

    let decision = coordinator.deny(request.approval_request_id, admin_cli(), Some("not needed".to_string()), now).expect("deny succeeds");

    assert_eq!(decision.decision, ApprovalAnswer::Deny);
    assert_eq!(decision.expires_at, now);
}

#[test]
fn scenario_5_unauthorized_identity_emits_no_decision() {
    // §8 scenario 5: an unauthorised identity attempting to answer a RISKY
    // request is refused and the request remains untouched.
    let mut coordinator = coordinator();
    let now = now_timestamp();
    let request = request_expiring_in(300, now);
    coordinator.handle_approval_request(&request, now).expect("request accepted");

    let outcome = coordinator.deny(request.approval_request_id, AdminChannel::Telegram { chat_id: 999 }, None, now);

    assert_eq!(outcome, Err(ApprovalError::Unauthorized));
}

#[test]
fn force_rejects_a_reason_under_the_minimum_length() {
    let mut coordinator = coordinator();
    let now = now_timestamp();
    let request = request_expiring_in(300, now);
    coordinator.handle_approval_request(&request, now).expect("request accepted");

    let outcome = coordinator.force(request.approval_request_id, admin_cli(), "short".to_string(), ForceOverrides::none(), now);

    assert_eq!(outcome, Err(ApprovalError::ReasonTooShort(5)));
    assert_eq!(coordinator.pending_count(), 1);
}

#[test]
fn force_with_sufficient_reason_succeeds() {
    let mut coordinator = coordinator();
    let now = now_timestamp();
    let request = request_expiring_in(300, now);
    coordinator.handle_approval_request(&request, now).expect("request accepted");

    let decision = coordinator.force(request.approval_request_id, admin_cli(), "breaker is flapping on a known-bad sensor".to_string(), ForceOverrides { override_circuit_breaker: true, override_cooldown: false }, now).expect("force succeeds");

    assert_eq!(decision.decision, ApprovalAnswer::Force);
    assert!(decision.overrides.override_circuit_breaker);
    assert!(!decision.overrides.override_cooldown);
}

#[test]
fn duplicate_request_id_is_rejected() {
    let mut coordinator = coordinator();
    let now = now_timestamp();
    let request = request_expiring_in(300, now);
    coordinator.handle_approval_request(&request, now).expect("first insert accepted");

    let outcome = coordinator.handle_approval_request(&request, now);

    assert_eq!(outcome, Err(ApprovalError::AlreadyPending(request.approval_request_id)));
}

#[test]
fn handle_approval_request_rejects_an_already_expired_request() {
    let mut coordinator = coordinator();
    let now = now_timestamp();
    let request = request_expiring_in(-1, now);

    let outcome = coordinator.handle_approval_request(&request, now);

    assert_eq!(outcome, Err(ApprovalError::Expired(request.approval_request_id)));
}

#[test]
fn scenario_4_silence_past_expiry_is_swept_without_a_decision() {
    // §8 scenario 4: a RISKY request at N3 with no admin answer within its
    // window produces no ApprovalDecision; sweep removes it as expired.
    let mut coordinator = coordinator();
    let now = now_timestamp();
    let request = request_expiring_in(300, now);
    coordinator.handle_approval_request(&request, now).expect("request accepted");

    let later = now.plus(TimeDuration::seconds(301));
    let approve_after_expiry = coordinator.approve(request.approval_request_id, admin_cli(), None, later);
    assert_eq!(approve_after_expiry, Err(ApprovalError::Expired(request.approval_request_id)));

    let swept = coordinator.sweep(later);
    assert_eq!(swept, vec![request.approval_request_id]);
    assert_eq!(coordinator.pending_count(), 0);
}

#[test]
fn sweep_leaves_unexpired_requests_pending() {
    let mut coordinator = coordinator();
    let now = now_timestamp();
    let request = request_expiring_in(300, now);
    coordinator.handle_approval_request(&request, now).expect("request accepted");

    let swept = coordinator.sweep(now);

    assert!(swept.is_empty());
    assert_eq!(coordinator.pending_count(), 1);
}

#[test]
fn answering_an_unknown_request_id_is_not_found() {
    let mut coordinator = coordinator();
    let now = now_timestamp();
    let unknown_id = ApprovalRequestId::new();

    let outcome = coordinator.approve(unknown_id, admin_cli(), None, now);

    assert_eq!(outcome, Err(ApprovalError::NotFound(unknown_id)));
}
