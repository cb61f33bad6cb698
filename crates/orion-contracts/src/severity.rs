// orion-contracts/src/severity.rs
// ============================================================================
// Module: ORION Severity
// Description: Ordered severity classification shared by events and incidents.
// Purpose: Let the brain's candidate-action mapping compare severities
// ("medium-and-above") instead of hand-matching each variant.
// Dependencies: serde
// ============================================================================

//! Ordered severity classification shared by events and incidents.

use serde::Deserialize;
use serde::Serialize;

/// Severity of an event or incident, ordered from least to most severe.
///
/// # Invariants
/// - Variant order is the comparison order; do not reorder without checking
///   every `>=`/`<` comparison against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational; no action warranted.
    Info,
    /// Low severity.
    Low,
    /// Medium severity; the threshold at which the static candidate-action
    /// mapping (§4.5 step 4) starts producing non-empty results.
    Medium,
    /// High severity.
    High,
    /// Critical severity.
    Critical,
}
