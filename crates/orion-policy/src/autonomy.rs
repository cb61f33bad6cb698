// orion-policy/src/autonomy.rs
// ============================================================================
// Module: ORION Autonomy Level
// Description: Escalating permission level governing brain decisions.
// Purpose: Let the brain compare autonomy thresholds with `>=`/`<` (§4.5
// steps 3, 6, 7).
// Dependencies: serde
// ============================================================================

//! Escalating permission level governing brain decisions.

use serde::Deserialize;
use serde::Serialize;

/// Escalating autonomy level (glossary: "N0 observe-only; N2 automatic SAFE
/// actions; N3 adds human-gated RISKY actions").
///
/// # Invariants
/// - Variant order is the comparison order; do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutonomyLevel {
    /// Observe-only: the brain never proposes or executes an action.
    N0,
    /// Reserved escalation step between observe-only and automatic SAFE
    /// execution.
    N1,
    /// Automatic execution of SAFE actions permitted.
    N2,
    /// SAFE actions execute automatically; RISKY actions may be requested
    /// for approval.
    N3,
}
