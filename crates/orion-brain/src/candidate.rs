// orion-brain/src/candidate.rs
// ============================================================================
// Module: ORION Candidate Action Map
// Description: Static (incident_type, minimum severity) -> action_type
// mapping.
// Purpose: Implement §4.5 step 4's "determine candidate_action_type from
// (incident_type, severity) using a static mapping".
// Dependencies: orion-contracts
// ============================================================================

//! Static (incident_type, minimum severity) -> action_type mapping.

use std::collections::BTreeMap;

use orion_contracts::ActionType;
use orion_contracts::IncidentType;
use orion_contracts::Severity;

/// Static mapping from an incident type to the action type it suggests once
/// the incident's severity reaches a configured minimum (§4.5 step 4, "e.g.,
/// medium-and-above incidents map to `acknowledge_incident`").
///
/// The mapping is threshold-based rather than an exact `(incident_type,
/// severity)` lookup: a rule registered for `Severity::Medium` also fires
/// for `High` and `Critical` incidents of the same type.
#[derive(Debug, Clone, Default)]
pub struct CandidateActionMap {
    /// Per-incident-type minimum severity and the action type it proposes.
    rules: BTreeMap<IncidentType, (Severity, ActionType)>,
}

impl CandidateActionMap {
    /// Builds an empty candidate action map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule: incidents of `incident_type` at `minimum_severity`
    /// or above propose `action_type`.
    #[must_use]
    pub fn with_rule(mut self, incident_type: IncidentType, minimum_severity: Severity, action_type: ActionType) -> Self {
        self.rules.insert(incident_type, (minimum_severity, action_type));
        self
    }

    /// Returns the candidate action type for `incident_type` at `severity`,
    /// or `None` if no rule is registered or the incident's severity falls
    /// below the rule's minimum (§4.5 step 4).
    #[must_use]
    pub fn lookup(&self, incident_type: &IncidentType, severity: Severity) -> Option<ActionType> {
        let (minimum_severity, action_type) = self.rules.get(incident_type)?;
        if severity >= *minimum_severity { Some(action_type.clone()) } else { None }
    }
}
