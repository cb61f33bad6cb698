// orion-cooldown/src/error.rs
// ============================================================================
// Module: ORION Cooldown Errors
// Description: Error type for the cooldown store trait.
// Purpose: Let a real backing store report "unreachable" distinctly, while
// every caller still collapses it to "in cooldown" (§4.3).
// Dependencies: thiserror
// ============================================================================

//! Error type for the cooldown store trait.

use thiserror::Error;

/// Errors a [`crate::CooldownStore`] implementation may report.
///
/// `CooldownTracker::in_cooldown` never propagates this to its own
/// caller: any `Err` here is fail-closed to `true` (§4.3, "tracker fails
/// closed — if the store is unreachable, `in_cooldown` returns true").
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CooldownError {
    /// The backing store could not be reached.
    #[error("cooldown store unreachable: {0}")]
    Unavailable(String),
}
