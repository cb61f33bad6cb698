// orion-commander/src/handlers/acknowledge_incident.rs
// ============================================================================
// Module: ORION Acknowledge-Incident Handler
// Description: The one concrete SAFE action handler for this phase.
// Purpose: Record that an incident has been acknowledged; idempotent, with
// a no-op rollback (§4.7).
// Dependencies: orion-contracts
// ============================================================================

//! The one concrete SAFE action handler for this phase.

use std::sync::Mutex;

use crate::handler::ActionHandler;
use crate::handler::HandlerContext;
use crate::handler::HandlerError;

/// Acknowledges an incident by recording its `action_id` (§4.7, "the only
/// concrete handler is `acknowledge_incident`, which is idempotent and
/// whose rollback is a no-op").
///
/// Acknowledgement is a pure record-keeping step with no external side
/// effect in this phase; the `acknowledged` set exists so tests and
/// callers can observe which actions this handler has actually run for.
#[derive(Default)]
pub struct AcknowledgeIncidentHandler {
    acknowledged: Mutex<Vec<orion_contracts::ActionId>>,
}

impl AcknowledgeIncidentHandler {
    /// Builds a handler with no acknowledgements recorded yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the ids of every action this handler has acknowledged, in
    /// invocation order. Returns an empty list if the internal mutex is
    /// poisoned.
    #[must_use]
    pub fn acknowledged_ids(&self) -> Vec<orion_contracts::ActionId> {
        self.acknowledged.lock().map(|guard| guard.clone()).unwrap_or_default()
    }
}

impl ActionHandler for AcknowledgeIncidentHandler {
    fn validates(&self, _parameters: &serde_json::Value) -> Result<(), HandlerError> {
        Ok(())
    }

    fn execute(&self, context: HandlerContext<'_>, _parameters: &serde_json::Value) -> Result<(), HandlerError> {
        let Ok(mut acknowledged) = self.acknowledged.lock() else {
            return Err(HandlerError::new("acknowledge_incident handler mutex poisoned"));
        };
        acknowledged.push(context.action_id);
        Ok(())
    }

    fn rollback(&self, _context: HandlerContext<'_>, _parameters: &serde_json::Value) -> Result<(), HandlerError> {
        Ok(())
    }
}
