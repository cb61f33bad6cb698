// orion-cooldown/src/key.rs
// ============================================================================
// Module: ORION Cooldown Key
// Description: Composite key identifying a cooldown-tracked action/target
// pair.
// Purpose: Give the cooldown store a single, orderable key type (§4.3).
// Dependencies: orion-contracts
// ============================================================================

//! Composite key identifying a cooldown-tracked action/target pair.

use orion_contracts::ActionType;
use orion_contracts::TargetFingerprint;

/// Composite key for the cooldown tracker: an action type applied to a
/// specific target (§4.3).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CooldownKey {
    /// The action type being rate-limited.
    pub action_type: ActionType,
    /// The target the action was applied to.
    pub target_fingerprint: TargetFingerprint,
}

impl CooldownKey {
    /// Builds a cooldown key from its parts.
    #[must_use]
    pub const fn new(action_type: ActionType, target_fingerprint: TargetFingerprint) -> Self {
        Self { action_type, target_fingerprint }
    }
}
