// orion-commander/src/record.rs
// ============================================================================
// Module: ORION Commander Action Record
// Description: The commander's owned state for one synthesised action.
// Purpose: Pair an Action with its eventual Outcome for idempotent
// re-delivery handling (§4.7, "Outcomes are re-emitted on duplicates only
// if the prior outcome was never acknowledged").
// Dependencies: orion-contracts
// ============================================================================

//! The commander's owned state for one synthesised action.

use orion_contracts::Action;
use orion_contracts::Outcome;

/// One entry in the commander's `actions` map (§4.7, §5: "owned by a single
/// task").
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRecord {
    /// The action as last known to the commander.
    pub action: Action,
    /// The terminal outcome, once reached.
    pub outcome: Option<Outcome>,
    /// Whether the emitted outcome has been acknowledged by its consumer.
    pub acknowledged: bool,
}

impl ActionRecord {
    /// Wraps a freshly constructed, not-yet-executed action.
    #[must_use]
    pub const fn new(action: Action) -> Self {
        Self { action, outcome: None, acknowledged: false }
    }
}
