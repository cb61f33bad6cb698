// orion-policy/src/lib.rs
// ============================================================================
// Module: ORION Policy
// Description: Public API surface for the ORION policy store.
// Purpose: Expose PolicyStore and the document/classification/autonomy
// types it reads.
// Dependencies: crate::{autonomy, classification, document, error, store}
// ============================================================================

//! ## Overview
//! `orion-policy` loads the operator-authored policy file into a
//! [`PolicyStore`] and answers the questions the rest of the kernel asks of
//! it: is this action type SAFE, RISKY, or unclassified (§4.2); what is its
//! configured cooldown (§4.3); what are the shared circuit breaker
//! thresholds (§4.4); what is the effective approval timeout (§4.6); and
//! what autonomy level gates brain decisions (§4.5). A store that failed to
//! load, or was never loaded, is represented by
//! [`PolicyStore::unavailable`] rather than by an `Option<PolicyStore>` at
//! every call site — every accessor already degrades to its fail-closed
//! answer.

#![forbid(unsafe_code)]

pub mod autonomy;
pub mod classification;
pub mod document;
pub mod error;
pub mod store;

pub use autonomy::AutonomyLevel;
pub use classification::Classification;
pub use document::ApprovalsConfig;
pub use document::CircuitBreakerConfig;
pub use document::PolicyDocument;
pub use error::PolicyError;
pub use store::PolicyStore;
