// orion-commander/tests/commander.rs
// ============================================================================
// Module: ORION Commander Integration Tests
// Description: Tests for dispatch rules, the execution pipeline, and
// idempotence.
// Purpose: Exercise Commander against §4.7 and §8's P4/P5 properties.
// Dependencies: orion-commander, orion-contracts, orion-policy
// ============================================================================
//! ## Overview
//! Validates `Commander` against §4.7's dispatch rules and execution
//! pipeline, and §8 properties P4 (idempotence) and P5 (outcome
//! determinism).

#![allow(clippy::panic, clippy::unwrap_used, clippy::expect_used, reason = "Test-only panic-based assertions are permitted.")]

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use orion_commander::ActionHandler;
use orion_commander::CircuitBreakerPort;
use orion_commander::Commander;
use orion_commander::CommanderError;
use orion_commander::HandlerContext;
use orion_commander::HandlerError;
use orion_commander::ForceOverrides;
use orion_commander::HandlerRegistry;
use orion_commander::TrustedAdmin;
use orion_contracts::ActionState;
use orion_contracts::ActionType;
use orion_contracts::AdminChannel;
use orion_contracts::ApprovalAnswer;
use orion_contracts::ApprovalDecision;
use orion_contracts::ApprovalId;
use orion_contracts::ApprovalRequestId;
use orion_contracts::ContractVersion;
use orion_contracts::Decision;
use orion_contracts::DecisionId;
use orion_contracts::DecisionType;
use orion_contracts::IncidentId;
use orion_contracts::OutcomeStatus;
use orion_contracts::ProposedAction;
use orion_contracts::RecordMeta;
use orion_contracts::SafetyClassification;
use orion_contracts::SourceId;
use orion_contracts::Timestamp;
use orion_policy::PolicyDocument;
use orion_policy::PolicyStore;
use serde_json::json;
use time::OffsetDateTime;

fn now_timestamp() -> Timestamp {
    Timestamp::from_offset(OffsetDateTime::now_utc())
}

#[derive(Default)]
struct TestBreaker {
    admits: AtomicBool,
    successes: AtomicU32,
    failures: AtomicU32,
}

impl TestBreaker {
    fn new(admits: bool) -> Self {
        Self { admits: AtomicBool::new(admits), successes: AtomicU32::new(0), failures: AtomicU32::new(0) }
    }
}

impl CircuitBreakerPort for TestBreaker {
    fn admits(&self, _action_type: &ActionType) -> bool {
        self.admits.load(Ordering::SeqCst)
    }

    fn record_success(&self, _action_type: &ActionType) {
        self.successes.fetch_add(1, Ordering::SeqCst);
    }

    fn record_failure(&self, _action_type: &ActionType) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }
}

struct CountingHandler {
    invocations: AtomicU32,
    fail: bool,
}

impl CountingHandler {
    fn succeeding() -> Self {
        Self { invocations: AtomicU32::new(0), fail: false }
    }

    fn failing() -> Self {
        Self { invocations: AtomicU32::new(0), fail: true }
    }
}

impl ActionHandler for CountingHandler {
    fn validates(&self, _parameters: &serde_json::Value) -> Result<(), HandlerError> {
        Ok(())
    }

    fn execute(&self, _context: HandlerContext<'_>, _parameters: &serde_json::Value) -> Result<(), HandlerError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        if self.fail { Err(HandlerError::new("handler failed on purpose")) } else { Ok(()) }
    }

    fn rollback(&self, _context: HandlerContext<'_>, _parameters: &serde_json::Value) -> Result<(), HandlerError> {
        Ok(())
    }
}

struct SleepyHandler;

impl ActionHandler for SleepyHandler {
    fn validates(&self, _parameters: &serde_json::Value) -> Result<(), HandlerError> {
        Ok(())
    }

    fn execute(&self, _context: HandlerContext<'_>, _parameters: &serde_json::Value) -> Result<(), HandlerError> {
        thread::sleep(Duration::from_millis(30));
        Ok(())
    }

    fn rollback(&self, _context: HandlerContext<'_>, _parameters: &serde_json::Value) -> Result<(), HandlerError> {
        Ok(())
    }
}

fn action_type() -> ActionType {
    ActionType::new("acknowledge_incident")
}

fn policy_store(safe: bool) -> PolicyStore {
    let (safe_list, risky_list) = if safe { (r#"["acknowledge_incident"]"#, "[]") } else { ("[]", r#"["acknowledge_incident"]"#) };
    let text = format!(
        r#"
safe_actions = {safe_list}
risky_actions = {risky_list}
autonomy_level = "n3"
[cooldowns]
[circuit_breaker]
threshold = 3
window_secs = 60
half_open_probes = 1
[approvals]
default_timeout_secs = 300
max_timeout_secs = 600
[approvals.per_action_type]
"#
    );
    PolicyStore::from_document(PolicyDocument::parse(&text).expect("valid fixture"))
}

fn admin() -> TrustedAdmin {
    TrustedAdmin::new(None, Some("oncall".to_string()))
}

fn safe_decision(now: Timestamp) -> Decision {
    Decision::new(
        RecordMeta { version: ContractVersion::CURRENT, timestamp: now, source: SourceId::brain() },
        DecisionId::new(),
        IncidentId::new(),
        DecisionType::ExecuteSafeAction,
        Some(SafetyClassification::Safe),
        false,
        "safe action approved for automatic execution".to_string(),
        Some(ProposedAction { action_type: action_type(), parameters: json!({}), dry_run: false, rollback_enabled: false }),
    )
    .expect("valid decision")
}

fn dry_run_decision(now: Timestamp) -> Decision {
    Decision::new(
        RecordMeta { version: ContractVersion::CURRENT, timestamp: now, source: SourceId::brain() },
        DecisionId::new(),
        IncidentId::new(),
        DecisionType::ExecuteSafeAction,
        Some(SafetyClassification::Safe),
        false,
        "safe action approved for automatic execution".to_string(),
        Some(ProposedAction { action_type: action_type(), parameters: json!({}), dry_run: true, rollback_enabled: false }),
    )
    .expect("valid decision")
}

fn risky_decision(now: Timestamp) -> Decision {
    Decision::new(
        RecordMeta { version: ContractVersion::CURRENT, timestamp: now, source: SourceId::brain() },
        DecisionId::new(),
        IncidentId::new(),
        DecisionType::RequestApproval,
        Some(SafetyClassification::Risky),
        true,
        "risky action requires approval at current autonomy".to_string(),
        Some(ProposedAction { action_type: action_type(), parameters: json!({}), dry_run: false, rollback_enabled: false }),
    )
    .expect("valid decision")
}

fn approval_decision_for(decision_id: DecisionId, answer: ApprovalAnswer, admin_identity: AdminChannel, now: Timestamp, window_secs: i64) -> ApprovalDecision {
    approval_decision_with_overrides(decision_id, answer, ForceOverrides::none(), admin_identity, now, window_secs)
}

fn approval_decision_with_overrides(decision_id: DecisionId, answer: ApprovalAnswer, overrides: ForceOverrides, admin_identity: AdminChannel, now: Timestamp, window_secs: i64) -> ApprovalDecision {
    ApprovalDecision {
        meta: RecordMeta { version: ContractVersion::CURRENT, timestamp: now, source: SourceId::approval_coordinator() },
        approval_id: ApprovalId::new(),
        approval_request_id: ApprovalRequestId::new(),
        decision_id,
        decision: answer,
        overrides,
        admin_identity,
        reason: None,
        issued_at: now,
        expires_at: now.plus(time::Duration::seconds(window_secs)),
    }
}

#[test]
fn dispatches_safe_decision_to_its_handler_and_succeeds() {
    let breaker = Arc::new(TestBreaker::new(true));
    let handler = Arc::new(CountingHandler::succeeding());
    let handlers = HandlerRegistry::new().with_handler(action_type(), handler.clone());
    let mut commander = Commander::new(policy_store(true), admin(), handlers, breaker.clone());
    let now = now_timestamp();

    let outcome = commander.dispatch_decision(&safe_decision(now), now).expect("dispatch accepted").expect("outcome emitted");

    assert_eq!(outcome.status, OutcomeStatus::Succeeded);
    assert_eq!(handler.invocations.load(Ordering::SeqCst), 1);
    assert_eq!(breaker.successes.load(Ordering::SeqCst), 1);
}

#[test]
fn rejects_a_decision_whose_action_type_no_longer_classifies_as_safe() {
    let breaker = Arc::new(TestBreaker::new(true));
    let handlers = HandlerRegistry::new().with_handler(action_type(), Arc::new(CountingHandler::succeeding()));
    let mut commander = Commander::new(policy_store(false), admin(), handlers, breaker);
    let now = now_timestamp();

    let outcome = commander.dispatch_decision(&safe_decision(now), now);

    assert_eq!(outcome, Err(CommanderError::NotSafeAction));
}

#[test]
fn rejects_a_risky_proposal_arriving_directly_as_a_decision() {
    let breaker = Arc::new(TestBreaker::new(true));
    let handlers = HandlerRegistry::new();
    let mut commander = Commander::new(policy_store(true), admin(), handlers, breaker);
    let now = now_timestamp();

    let outcome = commander.dispatch_decision(&risky_decision(now), now);

    assert_eq!(outcome, Err(CommanderError::NotSafeAction));
}

#[test]
fn unknown_action_type_fails_with_unknown_action_type_outcome() {
    let breaker = Arc::new(TestBreaker::new(true));
    let handlers = HandlerRegistry::new();
    let mut commander = Commander::new(policy_store(true), admin(), handlers, breaker);
    let now = now_timestamp();

    let outcome = commander.dispatch_decision(&safe_decision(now), now).expect("dispatch accepted").expect("outcome emitted");

    assert_eq!(outcome.status, OutcomeStatus::Failed);
    assert_eq!(outcome.error.expect("error detail").code, "UNKNOWN_ACTION_TYPE");
}

#[test]
fn p5_dry_run_never_invokes_the_handler_and_always_succeeds() {
    let breaker = Arc::new(TestBreaker::new(true));
    let handler = Arc::new(CountingHandler::failing());
    let handlers = HandlerRegistry::new().with_handler(action_type(), handler.clone());
    let mut commander = Commander::new(policy_store(true), admin(), handlers, breaker);
    let now = now_timestamp();

    let outcome = commander.dispatch_decision(&dry_run_decision(now), now).expect("dispatch accepted").expect("outcome emitted");

    assert_eq!(outcome.status, OutcomeStatus::Succeeded);
    assert_eq!(handler.invocations.load(Ordering::SeqCst), 0);
}

#[test]
fn handler_failure_without_rollback_terminates_failed() {
    let breaker = Arc::new(TestBreaker::new(true));
    let handlers = HandlerRegistry::new().with_handler(action_type(), Arc::new(CountingHandler::failing()));
    let mut commander = Commander::new(policy_store(true), admin(), handlers, breaker.clone());
    let now = now_timestamp();

    let outcome = commander.dispatch_decision(&safe_decision(now), now).expect("dispatch accepted").expect("outcome emitted");

    assert_eq!(outcome.status, OutcomeStatus::Failed);
    assert_eq!(outcome.error.expect("error detail").code, "HANDLER_FAILED");
    assert_eq!(breaker.failures.load(Ordering::SeqCst), 1);
}

#[test]
fn breaker_not_admitting_rejects_dispatch_before_invoking_the_handler() {
    let breaker = Arc::new(TestBreaker::new(false));
    let handler = Arc::new(CountingHandler::succeeding());
    let handlers = HandlerRegistry::new().with_handler(action_type(), handler.clone());
    let mut commander = Commander::new(policy_store(true), admin(), handlers, breaker);
    let now = now_timestamp();

    let outcome = commander.dispatch_decision(&safe_decision(now), now).expect("dispatch accepted").expect("outcome emitted");

    assert_eq!(outcome.status, OutcomeStatus::Failed);
    assert_eq!(outcome.error.expect("error detail").code, "CIRCUIT_OPEN");
    assert_eq!(handler.invocations.load(Ordering::SeqCst), 0);
}

#[test]
fn handler_exceeding_its_deadline_fails_with_timeout() {
    let breaker = Arc::new(TestBreaker::new(true));
    let handlers = HandlerRegistry::new().with_handler(action_type(), Arc::new(SleepyHandler));
    let mut commander = Commander::new(policy_store(true), admin(), handlers, breaker).with_handler_timeout(Duration::from_millis(1));
    let now = now_timestamp();

    let outcome = commander.dispatch_decision(&safe_decision(now), now).expect("dispatch accepted").expect("outcome emitted");

    assert_eq!(outcome.status, OutcomeStatus::Failed);
    assert_eq!(outcome.error.expect("error detail").code, "TIMEOUT");
}

#[test]
fn p4_redelivery_of_the_same_decision_invokes_the_handler_at_most_once() {
    let breaker = Arc::new(TestBreaker::new(true));
    let handler = Arc::new(CountingHandler::succeeding());
    let handlers = HandlerRegistry::new().with_handler(action_type(), handler.clone());
    let mut commander = Commander::new(policy_store(true), admin(), handlers, breaker);
    let now = now_timestamp();
    let decision = safe_decision(now);

    let first = commander.dispatch_decision(&decision, now).expect("first dispatch accepted");
    let second = commander.dispatch_decision(&decision, now).expect("redelivery accepted");

    assert!(first.is_some());
    assert_eq!(handler.invocations.load(Ordering::SeqCst), 1);
    // not yet acknowledged: the prior outcome is re-emitted, not a second invocation
    assert_eq!(second, first);
}

#[test]
fn acknowledged_outcomes_are_not_re_emitted_on_redelivery() {
    let breaker = Arc::new(TestBreaker::new(true));
    let handler = Arc::new(CountingHandler::succeeding());
    let handlers = HandlerRegistry::new().with_handler(action_type(), handler.clone());
    let mut commander = Commander::new(policy_store(true), admin(), handlers, breaker);
    let now = now_timestamp();
    let decision = safe_decision(now);

    let first = commander.dispatch_decision(&decision, now).expect("first dispatch accepted").expect("outcome emitted");
    commander.acknowledge(first.action_id);

    let second = commander.dispatch_decision(&decision, now).expect("redelivery accepted");

    assert!(second.is_none());
    assert_eq!(handler.invocations.load(Ordering::SeqCst), 1);
    assert_eq!(commander.action_state(first.action_id), Some(ActionState::Succeeded));
}

#[test]
fn scenario_4_approved_risky_decision_executes_via_the_approval_path() {
    let breaker = Arc::new(TestBreaker::new(true));
    let handler = Arc::new(CountingHandler::succeeding());
    let handlers = HandlerRegistry::new().with_handler(action_type(), handler.clone());
    let mut commander = Commander::new(policy_store(false), admin(), handlers, breaker);
    let now = now_timestamp();
    let decision = risky_decision(now);
    commander.dispatch_decision(&decision, now).expect_err("a RequestApproval decision is not directly executable");

    let approval = approval_decision_for(decision.decision_id, ApprovalAnswer::Approve, AdminChannel::Cli { username: "oncall".to_string() }, now, 300);
    let outcome = commander.dispatch_approval_decision(&approval, now).expect("approval accepted").expect("outcome emitted");

    assert_eq!(outcome.status, OutcomeStatus::Succeeded);
    assert_eq!(handler.invocations.load(Ordering::SeqCst), 1);
}

#[test]
fn scenario_5_unauthorized_approval_identity_is_rejected() {
    let breaker = Arc::new(TestBreaker::new(true));
    let handlers = HandlerRegistry::new().with_handler(action_type(), Arc::new(CountingHandler::succeeding()));
    let mut commander = Commander::new(policy_store(false), admin(), handlers, breaker);
    let now = now_timestamp();
    let decision = risky_decision(now);
    let _ = commander.dispatch_decision(&decision, now);

    let approval = approval_decision_for(decision.decision_id, ApprovalAnswer::Approve, AdminChannel::Cli { username: "intruder".to_string() }, now, 300);
    let outcome = commander.dispatch_approval_decision(&approval, now);

    assert_eq!(outcome, Err(CommanderError::Unauthorized));
}

#[test]
fn deny_decision_produces_no_outcome() {
    let breaker = Arc::new(TestBreaker::new(true));
    let handlers = HandlerRegistry::new().with_handler(action_type(), Arc::new(CountingHandler::succeeding()));
    let mut commander = Commander::new(policy_store(false), admin(), handlers, breaker);
    let now = now_timestamp();
    let decision = risky_decision(now);
    let _ = commander.dispatch_decision(&decision, now);

    let denial = approval_decision_for(decision.decision_id, ApprovalAnswer::Deny, AdminChannel::Cli { username: "oncall".to_string() }, now, 300);
    let outcome = commander.dispatch_approval_decision(&denial, now).expect("deny accepted");

    assert!(outcome.is_none());
}

#[test]
fn expired_approval_decision_is_rejected() {
    let breaker = Arc::new(TestBreaker::new(true));
    let handlers = HandlerRegistry::new().with_handler(action_type(), Arc::new(CountingHandler::succeeding()));
    let mut commander = Commander::new(policy_store(false), admin(), handlers, breaker);
    let now = now_timestamp();
    let decision = risky_decision(now);
    let _ = commander.dispatch_decision(&decision, now);

    let approval = approval_decision_for(decision.decision_id, ApprovalAnswer::Approve, AdminChannel::Cli { username: "oncall".to_string() }, now, -1);
    let later = now.plus(time::Duration::seconds(1));
    let outcome = commander.dispatch_approval_decision(&approval, later);

    assert_eq!(outcome, Err(CommanderError::Expired(decision.decision_id)));
}

#[test]
fn approval_for_an_unknown_decision_is_rejected() {
    let breaker = Arc::new(TestBreaker::new(true));
    let handlers = HandlerRegistry::new();
    let mut commander = Commander::new(policy_store(false), admin(), handlers, breaker);
    let now = now_timestamp();
    let unknown_decision_id = DecisionId::new();

    let approval = approval_decision_for(unknown_decision_id, ApprovalAnswer::Approve, AdminChannel::Cli { username: "oncall".to_string() }, now, 300);
    let outcome = commander.dispatch_approval_decision(&approval, now);

    assert_eq!(outcome, Err(CommanderError::UnknownDecision(unknown_decision_id)));
}

#[test]
fn force_override_bypasses_an_open_breaker() {
    let breaker = Arc::new(TestBreaker::new(false));
    let handlers = HandlerRegistry::new().with_handler(action_type(), Arc::new(CountingHandler::succeeding()));
    let mut commander = Commander::new(policy_store(false), admin(), handlers, breaker.clone());
    let now = now_timestamp();
    let decision = risky_decision(now);
    let _ = commander.dispatch_decision(&decision, now);

    let overrides = ForceOverrides { override_circuit_breaker: true, override_cooldown: false };
    let forced = approval_decision_with_overrides(decision.decision_id, ApprovalAnswer::Force, overrides, AdminChannel::Cli { username: "oncall".to_string() }, now, 300);
    assert!(forced.overrides.override_circuit_breaker);
    let outcome = commander.dispatch_approval_decision(&forced, now).expect("force accepted").expect("outcome emitted");

    assert_eq!(outcome.status, OutcomeStatus::Succeeded);
    assert_eq!(breaker.successes.load(Ordering::SeqCst), 1);
}

#[test]
fn approve_without_override_still_honors_an_open_breaker() {
    let breaker = Arc::new(TestBreaker::new(false));
    let handlers = HandlerRegistry::new().with_handler(action_type(), Arc::new(CountingHandler::succeeding()));
    let mut commander = Commander::new(policy_store(false), admin(), handlers, breaker);
    let now = now_timestamp();
    let decision = risky_decision(now);
    let _ = commander.dispatch_decision(&decision, now);

    let approval = approval_decision_for(decision.decision_id, ApprovalAnswer::Approve, AdminChannel::Cli { username: "oncall".to_string() }, now, 300);
    let outcome = commander.dispatch_approval_decision(&approval, now).expect("approval accepted").expect("outcome emitted");

    assert_eq!(outcome.status, OutcomeStatus::Failed);
    assert_eq!(outcome.error.expect("error detail").code, "CIRCUIT_OPEN");
}
