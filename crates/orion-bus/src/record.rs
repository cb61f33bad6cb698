// orion-bus/src/record.rs
// ============================================================================
// Module: ORION Bus Envelope
// Description: The transport-level wrapper around a published record.
// Purpose: Carry a record's topic offset alongside its contract metadata and
// opaque payload.
// Dependencies: orion-contracts, serde_json
// ============================================================================

//! The transport-level wrapper around a published record.

use orion_contracts::RecordKind;
use orion_contracts::RecordMeta;

/// Monotonically increasing position of a record within its topic log
/// (§4.1, "an append-only, per-topic, totally-ordered log").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Offset(u64);

impl Offset {
    /// Wraps a raw offset value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw offset value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// A record as it sits on the bus: contract metadata plus an opaque JSON
/// payload, tagged with the topic offset it was appended at.
///
/// The bus itself never interprets `payload` beyond the schema check
/// performed at publish time — consumers deserialize it into the concrete
/// `orion-contracts` type their topic carries.
#[derive(Debug, Clone, PartialEq)]
pub struct BusEnvelope {
    /// Position within the topic log.
    pub offset: Offset,
    /// Declared record kind, used to route to the right schema and topic.
    pub kind: RecordKind,
    /// Shared record envelope (version, timestamp, source).
    pub meta: RecordMeta,
    /// Opaque record payload.
    pub payload: serde_json::Value,
}
