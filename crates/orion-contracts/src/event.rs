// orion-contracts/src/event.rs
// ============================================================================
// Module: ORION Event
// Description: Immutable observation record.
// Purpose: Carry raw observations onto the bus for correlation into incidents.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! §3: "Born on observation; immutable; never mutated." Events carry an
//! opaque `data` payload the core never interprets — correlation into
//! incidents is an external collaborator (§1).

use serde::Deserialize;
use serde::Serialize;

use crate::identifiers::EventId;
use crate::identifiers::EventType;
use crate::record::RecordMeta;
use crate::severity::Severity;

/// An immutable observation emitted by a sensor or collector.
///
/// # Invariants
/// - Never mutated after publish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Record envelope (version, timestamp, source).
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Unique event identifier.
    pub event_id: EventId,
    /// Event type, drawn from an external enum the correlator understands.
    pub event_type: EventType,
    /// Event severity.
    pub severity: Severity,
    /// Opaque event payload, not interpreted by this core.
    pub data: serde_json::Value,
}
