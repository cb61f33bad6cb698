// orion-policy/src/error.rs
// ============================================================================
// Module: ORION Policy Errors
// Description: Load-time error type for the policy document.
// Purpose: Distinguish io/parse/validation failure while loading a policy
// file, mirroring the kernel's config-loading error shape.
// Dependencies: thiserror
// ============================================================================

//! Load-time error type for the policy document.

use thiserror::Error;

/// Errors raised while loading or validating a [`crate::document::PolicyDocument`].
///
/// None of these are raised once a [`crate::store::PolicyStore`] exists:
/// a store that failed to load is represented by
/// [`crate::store::PolicyStore::unavailable`], not by propagating this
/// error further (§4.2, "policy store unavailable fails closed").
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// The policy file could not be read.
    #[error("policy io error: {0}")]
    Io(String),
    /// The policy file's contents are not valid TOML.
    #[error("policy parse error: {0}")]
    Parse(String),
    /// The parsed document violates a policy invariant.
    #[error("invalid policy: {0}")]
    Invalid(String),
}
