// orion-contracts/src/incident.rs
// ============================================================================
// Module: ORION Incident
// Description: Correlated-event record consumed by the brain.
// Purpose: Bundle one or more events into a single unit of decision input.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! §3: "Emitted by correlator; referenced by exactly one Brain decision per
//! lifecycle." The correlator itself is an external collaborator (§1); this
//! crate only defines the record shape it must produce.

use serde::Deserialize;
use serde::Serialize;

use crate::identifiers::EventId;
use crate::identifiers::IncidentId;
use crate::identifiers::IncidentType;
use crate::record::RecordMeta;
use crate::severity::Severity;
use crate::time::Timestamp;

/// Incident lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentState {
    /// The incident is active and awaiting (or has just received) a
    /// decision.
    Open,
    /// The incident's lifecycle is complete.
    Closed,
}

/// The window of events a correlator folded into this incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrelationWindow {
    /// Window start.
    pub start: Timestamp,
    /// Window end.
    pub end: Timestamp,
}

/// A correlated group of events presented to the brain as one decision unit.
///
/// # Invariants
/// - `event_ids` is non-empty and ordered.
/// - `source` must be the correlator identity (enforced at publish, §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    /// Record envelope (version, timestamp, source).
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Unique incident identifier.
    pub incident_id: IncidentId,
    /// Incident type, drawn from an external enum the correlator understands.
    pub incident_type: IncidentType,
    /// Incident severity.
    pub severity: Severity,
    /// Ordered, non-empty set of event identifiers folded into this incident.
    pub event_ids: Vec<EventId>,
    /// Correlation window.
    pub correlation_window: CorrelationWindow,
    /// Incident lifecycle state.
    pub state: IncidentState,
}

impl Incident {
    /// Returns `true` when `event_ids` satisfies the non-empty invariant
    /// from §3.
    #[must_use]
    pub fn has_valid_event_ids(&self) -> bool {
        !self.event_ids.is_empty()
    }
}
