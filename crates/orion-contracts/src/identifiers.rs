// orion-contracts/src/identifiers.rs
// ============================================================================
// Module: ORION Identifiers
// Description: RFC 4122 identifiers for every ORION record type.
// Purpose: Provide strongly typed, serializable UUID wrappers with stable
// string forms.
// Dependencies: serde, uuid
// ============================================================================

//! ## Overview
//! Every ORION record carries a UUID identity (§3). Identifiers are opaque
//! newtypes over [`uuid::Uuid`] so that an `EventId` and a `DecisionId` are
//! never interchangeable at compile time, even though both are UUIDs on the
//! wire.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Declares a UUID-backed identifier newtype with the standard accessor set.
macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID value.
            #[must_use]
            pub const fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Returns the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

uuid_identifier!(
    /// Identifier for an [`crate::Event`].
    EventId
);
uuid_identifier!(
    /// Identifier for an [`crate::Incident`].
    IncidentId
);
uuid_identifier!(
    /// Identifier for a [`crate::Decision`].
    DecisionId
);
uuid_identifier!(
    /// Identifier for an [`crate::ApprovalRequest`].
    ApprovalRequestId
);
uuid_identifier!(
    /// Identifier for an [`crate::ApprovalDecision`].
    ApprovalId
);
uuid_identifier!(
    /// Identifier for an [`crate::Action`].
    ActionId
);
uuid_identifier!(
    /// Identifier for an [`crate::Outcome`].
    OutcomeId
);
uuid_identifier!(
    /// Identifier for an edge health report.
    HealthId
);

/// Action type name (e.g. `acknowledge_incident`).
///
/// # Invariants
/// - Never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionType(String);

impl ActionType {
    /// Creates a new action type identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the action type as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ActionType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ActionType {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Opaque fingerprint identifying the target of an action, used as half of
/// the cooldown tracker's composite key (§4.3).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetFingerprint(String);

impl TargetFingerprint {
    /// Creates a new target fingerprint.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the fingerprint as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TargetFingerprint {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Incident type name (e.g. `disk_pressure`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncidentType(String);

impl IncidentType {
    /// Creates a new incident type identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the incident type as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IncidentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for IncidentType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Event type name (e.g. `disk_usage_sample`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventType(String);

impl EventType {
    /// Creates a new event type identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the event type as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for EventType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Identifies the module that emitted a record, validated against
/// [`crate::SourceConstraint`] at publish time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    /// Creates a new source identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the source identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The well-known identity of the correlator.
    #[must_use]
    pub fn correlator() -> Self {
        Self::new("correlator")
    }

    /// The well-known identity of the brain.
    #[must_use]
    pub fn brain() -> Self {
        Self::new("brain")
    }

    /// The well-known identity of the commander.
    #[must_use]
    pub fn commander() -> Self {
        Self::new("commander")
    }

    /// The well-known identity of the approval coordinator.
    #[must_use]
    pub fn approval_coordinator() -> Self {
        Self::new("approval-coordinator")
    }

    /// The well-known identity of the edge safety kernel, scoped to a device.
    #[must_use]
    pub fn edge(device_id: &str) -> Self {
        Self::new(format!("edge:{device_id}"))
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
