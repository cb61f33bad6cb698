// orion-brain/src/lib.rs
// ============================================================================
// Module: ORION Brain
// Description: Public API surface for the ORION brain.
// Purpose: Expose Brain and the candidate action map it consults.
// Dependencies: crate::{brain, candidate, reasoning}
// ============================================================================

//! ## Overview
//! `orion-brain` consumes incidents and emits exactly one decision per
//! incident by applying the ordered predicate chain of §4.5: schema
//! validity, policy availability, autonomy level, the static candidate
//! action mapping, classification, cooldown, and circuit breaker state, in
//! that order. The brain performs no I/O beyond the decision (and, at N3,
//! approval request) it returns — publishing is the caller's
//! responsibility.

#![forbid(unsafe_code)]

pub mod brain;
pub mod candidate;
pub mod reasoning;

pub use brain::Brain;
pub use candidate::CandidateActionMap;
