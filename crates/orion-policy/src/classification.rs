// orion-policy/src/classification.rs
// ============================================================================
// Module: ORION Policy Classification
// Description: Three-valued safety classification produced by the policy
// store.
// Purpose: Distinguish "known safe", "known risky", and "not classified" so
// the brain can fail closed on the third (§3, §4.2).
// Dependencies: none
// ============================================================================

//! Three-valued safety classification produced by the policy store.

/// Result of classifying an action type against the loaded policy document
/// (§4.2).
///
/// Unlike [`orion_contracts::SafetyClassification`], `Unknown` is a valid
/// value here: it is the policy store's honest answer when an action type
/// appears in neither `safe_actions` nor `risky_actions`, or when the store
/// itself is unavailable. The brain treats `Unknown` as NO_ACTION (§4.5 step
/// 9) rather than ever forwarding it past its own boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Listed in `safe_actions`.
    Safe,
    /// Listed in `risky_actions`.
    Risky,
    /// Listed in neither, or the policy store is unavailable.
    Unknown,
}
