// orion-policy/src/store.rs
// ============================================================================
// Module: ORION Policy Store
// Description: Read-only, fail-closed view over a loaded policy document.
// Purpose: Give the brain and commander a single type to query for
// classification, cooldown, approval timeout, and autonomy level, without a
// separate "is this store valid" branch at every call site (§4.2).
// Dependencies: orion-contracts, std::fs
// ============================================================================

//! Read-only, fail-closed view over a loaded policy document.

use std::fs;
use std::path::Path;
use std::time::Duration;

use orion_contracts::ActionType;

use crate::autonomy::AutonomyLevel;
use crate::classification::Classification;
use crate::document::PolicyDocument;
use crate::error::PolicyError;

/// Read-only view over a policy document, or the fail-closed sentinel
/// returned by [`PolicyStore::unavailable`].
///
/// Every accessor degrades to the conservative answer when the store is
/// unavailable: [`PolicyStore::classify`] returns
/// [`Classification::Unknown`], and [`PolicyStore::cooldown`] /
/// [`PolicyStore::approval_timeout`] return `None` (§4.2, "policy store
/// unavailable fails closed").
#[derive(Debug, Clone)]
pub struct PolicyStore {
    document: Option<PolicyDocument>,
}

impl PolicyStore {
    /// Reads and validates the policy file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Io`] if the file cannot be read or exceeds
    /// the size limit, [`PolicyError::Parse`] if it is not valid TOML, or
    /// [`PolicyError::Invalid`] if it fails validation.
    pub fn load(path: &Path) -> Result<Self, PolicyError> {
        let text = fs::read_to_string(path).map_err(|error| PolicyError::Io(error.to_string()))?;
        let document = PolicyDocument::parse(&text)?;
        Ok(Self { document: Some(document) })
    }

    /// Wraps an already-parsed document, bypassing file I/O.
    #[must_use]
    pub const fn from_document(document: PolicyDocument) -> Self {
        Self { document: Some(document) }
    }

    /// Returns the fail-closed sentinel store: every accessor returns its
    /// most conservative answer (§4.2).
    #[must_use]
    pub const fn unavailable() -> Self {
        Self { document: None }
    }

    /// Returns `true` when this store holds a loaded document.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.document.is_some()
    }

    /// Classifies `action_type` against the loaded document (§4.2).
    #[must_use]
    pub fn classify(&self, action_type: &ActionType) -> Classification {
        let Some(document) = &self.document else {
            return Classification::Unknown;
        };
        if document.safe_actions.contains(action_type) {
            Classification::Safe
        } else if document.risky_actions.contains(action_type) {
            Classification::Risky
        } else {
            Classification::Unknown
        }
    }

    /// Returns the configured cooldown duration for `action_type`, or
    /// `None` if unconfigured or the store is unavailable (§4.3).
    #[must_use]
    pub fn cooldown(&self, action_type: &ActionType) -> Option<Duration> {
        let document = self.document.as_ref()?;
        document.cooldowns.get(action_type).copied().map(Duration::from_secs)
    }

    /// Returns the effective approval timeout for `action_type`, clamped to
    /// `approvals.max_timeout_secs`, or `None` if the store is unavailable
    /// (§4.6).
    #[must_use]
    pub fn approval_timeout(&self, action_type: &ActionType) -> Option<Duration> {
        let document = self.document.as_ref()?;
        let raw = document.approvals.per_action_type.get(action_type).copied().unwrap_or(document.approvals.default_timeout_secs);
        Some(Duration::from_secs(raw.min(document.approvals.max_timeout_secs)))
    }

    /// Returns the configured circuit breaker thresholds, or `None` if the
    /// store is unavailable (§4.4).
    #[must_use]
    pub fn circuit_breaker(&self) -> Option<(u32, Duration, u32)> {
        let document = self.document.as_ref()?;
        let config = &document.circuit_breaker;
        Some((config.threshold, Duration::from_secs(config.window_secs), config.half_open_probes))
    }

    /// Returns the configured autonomy level, or [`AutonomyLevel::N0`] if
    /// the store is unavailable. Brain decisions check
    /// [`PolicyStore::is_available`] before this (§4.5 step 2), so the
    /// fallback here exists only to give this accessor a total return type.
    #[must_use]
    pub fn autonomy_level(&self) -> AutonomyLevel {
        self.document.as_ref().map_or(AutonomyLevel::N0, |document| document.autonomy_level)
    }
}
