// orion-bus/src/error.rs
// ============================================================================
// Module: ORION Bus Errors
// Description: Failure modes for publish and subscribe.
// Purpose: Give callers a stable, programmatically matchable error enum.
// Dependencies: orion-contracts, thiserror
// ============================================================================

//! Failure modes for publish and subscribe.

use orion_contracts::SchemaError;
use orion_contracts::SourceConstraintError;
use thiserror::Error;

/// Errors returned by a [`crate::BusAdapter`] (§4.1, §7).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    /// No schema is registered for the record's declared type.
    #[error("unknown schema for topic {0}")]
    UnknownSchema(String),
    /// The record failed validation before it could be appended.
    #[error("validation failed: {detail}")]
    ValidationFailed {
        /// Human-readable validation failure detail.
        detail: String,
    },
    /// A consumer group is already subscribed to this topic.
    #[error("group {group} is already subscribed to topic {topic}")]
    AlreadySubscribed {
        /// Topic name.
        topic: String,
        /// Consumer group name.
        group: String,
    },
    /// The transport is unavailable (§7 `BUS_UNAVAILABLE`).
    #[error("bus unavailable: {0}")]
    Unavailable(String),
}

impl From<SchemaError> for BusError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::UnknownSchema(topic) => Self::UnknownSchema(topic),
            SchemaError::ValidationFailed { detail } => Self::ValidationFailed { detail },
        }
    }
}

impl From<SourceConstraintError> for BusError {
    fn from(err: SourceConstraintError) -> Self {
        Self::ValidationFailed { detail: err.to_string() }
    }
}
