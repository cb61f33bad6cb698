// orion-contracts/src/record.rs
// ============================================================================
// Module: ORION Record Metadata
// Description: Shared record envelope, versioning, and source constraints.
// Purpose: Provide the fields every ORION record carries and the validation
// seam the bus adapter consults before accepting a record.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! §3 requires "every record has a UUID identity, an ISO-8601 UTC
//! `timestamp`, a `version` string, and a `source` identifying the emitting
//! module." [`RecordMeta`] is that shared envelope. §4.1 requires the bus
//! adapter to look up a schema for a record's declared type and reject
//! unknown types or invalid payloads before appending; [`SchemaRegistry`] is
//! the seam that lookup runs through — a pluggable validator is explicitly
//! out of scope for this core (§1), so the registry here validates only the
//! record-kind tag and the source constraint, deferring structural
//! validation to `serde`'s own `deny_unknown_fields`/enum rejection at
//! deserialization time.

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::identifiers::SourceId;
use crate::time::Timestamp;

/// Contract schema version for a record type.
///
/// # Invariants
/// - Compared structurally; there is no implicit upgrade between versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractVersion(u32);

impl ContractVersion {
    /// The current contract version for every record type defined in this
    /// crate. §6: "Version changes that break compatibility require a new
    /// `version` constant and parallel support during migration" — bumping
    /// this constant is that seam; this crate does not implement migration.
    pub const CURRENT: Self = Self(1);

    /// Returns the version as a plain integer.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// Fields common to every ORION record (§3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMeta {
    /// Contract version for this record's type.
    pub version: ContractVersion,
    /// RFC 3339 UTC timestamp assigned by the emitter.
    pub timestamp: Timestamp,
    /// Identity of the emitting module.
    pub source: SourceId,
}

/// The bus topics a record kind may be published to, used to look up the
/// source constraint for that kind (§3, "source fields are
/// pattern-constrained").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordKind {
    /// `events` topic.
    Event,
    /// `incidents` topic.
    Incident,
    /// `decisions` topic.
    Decision,
    /// `approval_requests` topic.
    ApprovalRequest,
    /// `approval_decisions` topic.
    ApprovalDecision,
    /// `actions` topic (internal to the commander).
    Action,
    /// `outcomes` topic.
    Outcome,
    /// `edge.health` topic.
    EdgeHealth,
    /// `edge.commands` topic.
    EdgeCommand,
}

impl RecordKind {
    /// Returns the logical bus topic name for this record kind.
    #[must_use]
    pub const fn topic(self) -> &'static str {
        match self {
            Self::Event => "events",
            Self::Incident => "incidents",
            Self::Decision => "decisions",
            Self::ApprovalRequest => "approval_requests",
            Self::ApprovalDecision => "approval_decisions",
            Self::Action => "actions",
            Self::Outcome => "outcomes",
            Self::EdgeHealth => "edge.health",
            Self::EdgeCommand => "edge.commands",
        }
    }
}

/// The required emitter identity for a record kind, or `None` when any
/// source is permitted (events may originate from any observer).
///
/// # Invariants
/// - Returns `Some` only for kinds §3 explicitly restricts: incidents
///   (correlator), decisions (brain), outcomes (commander).
#[must_use]
pub fn required_source_prefix(kind: RecordKind) -> Option<&'static str> {
    match kind {
        RecordKind::Incident => Some("correlator"),
        RecordKind::Decision => Some("brain"),
        RecordKind::Outcome => Some("commander"),
        RecordKind::Event
        | RecordKind::ApprovalRequest
        | RecordKind::ApprovalDecision
        | RecordKind::Action
        | RecordKind::EdgeHealth
        | RecordKind::EdgeCommand => None,
    }
}

/// Errors returned when a record fails the source-constraint check at
/// publish time (§3, "Records violating source constraints are rejected at
/// publish").
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceConstraintError {
    /// The record's `source` does not match the required prefix for its kind.
    #[error("record of kind {kind:?} requires source prefix {expected}, got {actual}")]
    Mismatch {
        /// Record kind being validated.
        kind: RecordKind,
        /// Required source prefix.
        expected: &'static str,
        /// Actual source on the record.
        actual: String,
    },
}

/// Validates a record's `source` field against the constraint for its kind.
///
/// # Errors
///
/// Returns [`SourceConstraintError::Mismatch`] when the record's source does
/// not match the kind's required prefix.
pub fn check_source_constraint(kind: RecordKind, source: &SourceId) -> Result<(), SourceConstraintError> {
    let Some(expected) = required_source_prefix(kind) else {
        return Ok(());
    };
    if source.as_str() == expected || source.as_str().starts_with(expected) {
        Ok(())
    } else {
        Err(SourceConstraintError::Mismatch {
            kind,
            expected,
            actual: source.as_str().to_string(),
        })
    }
}

/// Errors returned by schema lookup and validation (§4.1).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// No schema is registered for the record's declared type.
    #[error("unknown schema for topic {0}")]
    UnknownSchema(String),
    /// The record failed structural or semantic validation.
    #[error("validation failed: {detail}")]
    ValidationFailed {
        /// Human-readable validation failure detail.
        detail: String,
    },
}

/// Pluggable schema validator consulted by the bus adapter at publish time.
///
/// Full schema validation (unknown fields, enum mismatch, format
/// violations) is out of scope for this core (§1); implementations of this
/// trait are expected to delegate most of that work to `serde`'s own
/// deserialization of a strongly typed record before it ever reaches
/// `validate`. `validate` is the seam for the remaining cross-field and
/// source-constraint checks this crate can express without a general
/// schema language.
pub trait SchemaRegistry: Send + Sync {
    /// Validates a record of the given kind for the given source identity.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownSchema`] when `kind` has no registered
    /// schema, or [`SchemaError::ValidationFailed`] when validation fails.
    fn validate(&self, kind: RecordKind, meta: &RecordMeta) -> Result<(), SchemaError>;
}

/// Reference [`SchemaRegistry`] implementation enforcing exactly the rules
/// named in §3 and §4.1: every declared record kind is known, and source
/// constraints are checked.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSchemaRegistry;

impl SchemaRegistry for DefaultSchemaRegistry {
    fn validate(&self, kind: RecordKind, meta: &RecordMeta) -> Result<(), SchemaError> {
        check_source_constraint(kind, &meta.source).map_err(|err| SchemaError::ValidationFailed {
            detail: err.to_string(),
        })
    }
}
