// orion-brain/tests/brain.rs
// ============================================================================
// Module: ORION Brain Integration Tests
// Description: Tests for the ten-step decision pipeline.
// Purpose: Exercise Brain::decide against §4.5 and §8's scenarios 1-4.
// Dependencies: orion-brain, orion-contracts, orion-policy, orion-cooldown,
// orion-breaker
// ============================================================================
//! ## Overview
//! Validates `Brain::decide` against §4.5 and the concrete scenarios in §8.

#![allow(clippy::panic, clippy::unwrap_used, clippy::expect_used, reason = "Test-only panic-based assertions are permitted.")]

use std::sync::Arc;
use std::time::Duration as StdDuration;
use std::time::Instant;

use orion_breaker::CircuitBreaker;
use orion_brain::Brain;
use orion_brain::CandidateActionMap;
use orion_contracts::ActionType;
use orion_contracts::CorrelationWindow;
use orion_contracts::DecisionType;
use orion_contracts::EventId;
use orion_contracts::Incident;
use orion_contracts::IncidentId;
use orion_contracts::IncidentState;
use orion_contracts::IncidentType;
use orion_contracts::Severity;
use orion_contracts::Timestamp;
use orion_cooldown::CooldownTracker;
use orion_cooldown::InMemoryCooldownStore;
use orion_policy::PolicyDocument;
use orion_policy::PolicyStore;
use time::OffsetDateTime;

fn now_timestamp() -> Timestamp {
    Timestamp::from_offset(OffsetDateTime::now_utc())
}

fn incident(severity: Severity) -> Incident {
    let timestamp = now_timestamp();
    Incident {
        meta: orion_contracts::RecordMeta { version: orion_contracts::ContractVersion::CURRENT, timestamp, source: orion_contracts::SourceId::correlator() },
        incident_id: IncidentId::new(),
        incident_type: IncidentType::new("disk_pressure"),
        severity,
        event_ids: vec![EventId::new()],
        correlation_window: CorrelationWindow { start: timestamp, end: timestamp },
        state: IncidentState::Open,
    }
}

fn candidates() -> CandidateActionMap {
    CandidateActionMap::new().with_rule(IncidentType::new("disk_pressure"), Severity::Medium, ActionType::new("acknowledge_incident"))
}

fn policy_document(autonomy: &str, safe: bool) -> String {
    let (safe_list, risky_list) = if safe { (r#"["acknowledge_incident"]"#, "[]") } else { ("[]", r#"["acknowledge_incident"]"#) };
    format!(
        r#"
safe_actions = {safe_list}
risky_actions = {risky_list}
autonomy_level = "{autonomy}"

[circuit_breaker]
threshold = 3
window_secs = 60
half_open_probes = 1

[approvals]
default_timeout_secs = 300
max_timeout_secs = 3600
"#
    )
}

fn brain_with(autonomy: &str, safe: bool) -> Brain {
    let document = PolicyDocument::parse(&policy_document(autonomy, safe)).expect("policy document");
    let policy = PolicyStore::from_document(document);
    let cooldown = CooldownTracker::new(Arc::new(InMemoryCooldownStore::new()));
    let breaker = Arc::new(CircuitBreaker::new(3, StdDuration::from_secs(60), 1));
    Brain::new(policy, cooldown, breaker, candidates())
}

#[test]
fn scenario_1_n0_observe_only() {
    let brain = brain_with("n0", true);
    let (decision, approval) = brain.decide(&incident(Severity::High), Instant::now(), now_timestamp()).expect("decision");
    assert_eq!(decision.decision_type, DecisionType::NoAction);
    assert_eq!(decision.reasoning, "observe-only mode");
    assert!(approval.is_none());
}

#[test]
fn scenario_2_n2_safe_execute_and_records_cooldown() {
    let brain = brain_with("n2", true);
    let now = Instant::now();
    let (decision, approval) = brain.decide(&incident(Severity::Medium), now, now_timestamp()).expect("decision");
    assert_eq!(decision.decision_type, DecisionType::ExecuteSafeAction);
    assert_eq!(decision.safety_classification, Some(orion_contracts::SafetyClassification::Safe));
    assert!(approval.is_none());
    assert_eq!(decision.proposed_action.expect("proposed action").action_type, ActionType::new("acknowledge_incident"));
}

#[test]
fn scenario_3_n2_cooldown_blocks_repeat() {
    let brain = brain_with("n2", true);
    let now = Instant::now();
    let incident = incident(Severity::Medium);
    let (first, _) = brain.decide(&incident, now, now_timestamp()).expect("first decision");
    assert_eq!(first.decision_type, DecisionType::ExecuteSafeAction);

    let (second, _) = brain.decide(&incident, now, now_timestamp()).expect("second decision");
    assert_eq!(second.decision_type, DecisionType::NoAction);
    assert!(second.reasoning.contains("cooldown"));
}

#[test]
fn scenario_4_n3_risky_requests_approval() {
    let brain = brain_with("n3", false);
    let (decision, approval) = brain.decide(&incident(Severity::Medium), Instant::now(), now_timestamp()).expect("decision");
    assert_eq!(decision.decision_type, DecisionType::RequestApproval);
    assert_eq!(decision.safety_classification, Some(orion_contracts::SafetyClassification::Risky));
    assert!(decision.requires_approval);
    let approval = approval.expect("approval request");
    assert_eq!(approval.decision_id, decision.decision_id);
}

#[test]
fn risky_below_n3_is_no_action() {
    let brain = brain_with("n2", false);
    let (decision, approval) = brain.decide(&incident(Severity::Medium), Instant::now(), now_timestamp()).expect("decision");
    assert_eq!(decision.decision_type, DecisionType::NoAction);
    assert!(decision.reasoning.contains("risky"));
    assert!(approval.is_none());
}

#[test]
fn unavailable_policy_fails_closed_to_no_action() {
    let cooldown = CooldownTracker::new(Arc::new(InMemoryCooldownStore::new()));
    let breaker = Arc::new(CircuitBreaker::new(3, StdDuration::from_secs(60), 1));
    let brain = Brain::new(PolicyStore::unavailable(), cooldown, breaker, candidates());
    let (decision, approval) = brain.decide(&incident(Severity::High), Instant::now(), now_timestamp()).expect("decision");
    assert_eq!(decision.decision_type, DecisionType::NoAction);
    assert_eq!(decision.reasoning, "policy unavailable");
    assert!(approval.is_none());
}

#[test]
fn schema_invalid_incident_is_ignored() {
    let brain = brain_with("n2", true);
    let mut broken = incident(Severity::Medium);
    broken.event_ids.clear();
    assert!(brain.decide(&broken, Instant::now(), now_timestamp()).is_none());
}

#[test]
fn every_emitted_decision_has_sufficiently_long_reasoning() {
    for autonomy in ["n0", "n1", "n2", "n3"] {
        for safe in [true, false] {
            let brain = brain_with(autonomy, safe);
            if let Some((decision, _)) = brain.decide(&incident(Severity::Medium), Instant::now(), now_timestamp()) {
                assert!(decision.reasoning.chars().count() >= orion_contracts::MIN_REASONING_LEN);
            }
        }
    }
}
