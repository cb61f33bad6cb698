// orion-contracts/src/lib.rs
// ============================================================================
// Module: ORION Contracts
// Description: Public API surface for the ORION wire record types.
// Purpose: Expose every record, identifier, and validation seam shared across
// the policy, cooldown, breaker, brain, approval, commander, and edge crates.
// Dependencies: crate::{action, approval, decision, edge, event, identifiers,
// incident, outcome, record, severity, time}
// ============================================================================

//! ## Overview
//! `orion-contracts` defines the record shapes that cross module boundaries
//! in an ORION deployment (§3, §6): `Event`, `Incident`, `Decision`,
//! `ApprovalRequest`/`ApprovalDecision`, `Action`, `Outcome`, and the edge
//! wire records. It owns no runtime behavior — no bus, no policy evaluation,
//! no execution — only the types and the handful of structural invariants
//! (`version`/`timestamp`/`source`, source-prefix constraints, reasoning
//! length, `SAFE`/`RISKY` combination rules) that every other ORION crate
//! builds on.

#![forbid(unsafe_code)]

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod action;
pub mod approval;
pub mod decision;
pub mod edge;
pub mod event;
pub mod identifiers;
pub mod incident;
pub mod outcome;
pub mod record;
pub mod severity;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use action::Action;
pub use action::ActionState;
pub use approval::AdminChannel;
pub use approval::ApprovalAnswer;
pub use approval::ApprovalDecision;
pub use approval::ApprovalRequest;
pub use approval::ForceOverrides;
pub use approval::RiskLevel;
pub use decision::Decision;
pub use decision::DecisionError;
pub use decision::DecisionType;
pub use decision::ProposedAction;
pub use decision::SafetyClassification;
pub use decision::MIN_REASONING_LEN;
pub use edge::ConnectionStatus;
pub use edge::EdgeCommand;
pub use edge::EdgeCommandKind;
pub use edge::EdgeError;
pub use edge::EdgeHealth;
pub use edge::EdgeSafetyState;
pub use event::Event;
pub use identifiers::ActionId;
pub use identifiers::ActionType;
pub use identifiers::ApprovalId;
pub use identifiers::ApprovalRequestId;
pub use identifiers::DecisionId;
pub use identifiers::EventId;
pub use identifiers::EventType;
pub use identifiers::HealthId;
pub use identifiers::IncidentId;
pub use identifiers::IncidentType;
pub use identifiers::OutcomeId;
pub use identifiers::SourceId;
pub use identifiers::TargetFingerprint;
pub use incident::CorrelationWindow;
pub use incident::Incident;
pub use incident::IncidentState;
pub use outcome::Outcome;
pub use outcome::OutcomeError;
pub use outcome::OutcomeStatus;
pub use record::check_source_constraint;
pub use record::required_source_prefix;
pub use record::ContractVersion;
pub use record::DefaultSchemaRegistry;
pub use record::RecordKind;
pub use record::RecordMeta;
pub use record::SchemaError;
pub use record::SchemaRegistry;
pub use record::SourceConstraintError;
pub use severity::Severity;
pub use time::Timestamp;
