// orion-policy/src/document.rs
// ============================================================================
// Module: ORION Policy Document
// Description: TOML-deserializable shape of the policy file.
// Purpose: Hold the classification lists, cooldown durations, circuit
// breaker thresholds, and approval timeouts the rest of the kernel reads
// through `PolicyStore` (§4.2, §4.3, §4.4, §4.6).
// Dependencies: orion-contracts, serde
// ============================================================================

//! TOML-deserializable shape of the policy file.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use orion_contracts::ActionType;
use serde::Deserialize;

use crate::autonomy::AutonomyLevel;
use crate::error::PolicyError;

/// Largest policy file this crate will read, in bytes.
///
/// Guards against an operator pointing `PolicyStore::load` at an
/// unbounded or adversarial file.
pub(crate) const MAX_POLICY_FILE_SIZE: usize = 1024 * 1024;

/// Largest number of distinct action types a single list may name.
pub(crate) const MAX_ACTION_TYPES: usize = 4096;

/// Circuit breaker thresholds shared by every action type's breaker
/// instance (§4.4).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CircuitBreakerConfig {
    /// Consecutive (or windowed) failures before the breaker opens.
    pub threshold: u32,
    /// Rolling window, in seconds, over which failures are counted.
    pub window_secs: u64,
    /// Successful probes required in HALF_OPEN before closing again.
    pub half_open_probes: u32,
}

impl CircuitBreakerConfig {
    fn validate(&self) -> Result<(), PolicyError> {
        if self.threshold == 0 {
            return Err(PolicyError::Invalid("circuit_breaker.threshold must be at least 1".to_string()));
        }
        if self.window_secs == 0 {
            return Err(PolicyError::Invalid("circuit_breaker.window_secs must be at least 1".to_string()));
        }
        if self.half_open_probes == 0 {
            return Err(PolicyError::Invalid("circuit_breaker.half_open_probes must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Approval timeout configuration (§4.6).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApprovalsConfig {
    /// Timeout, in seconds, applied when an action type has no override.
    pub default_timeout_secs: u64,
    /// Upper bound, in seconds, every effective timeout is clamped to.
    pub max_timeout_secs: u64,
    /// Per-action-type timeout overrides, in seconds.
    #[serde(default)]
    pub per_action_type: BTreeMap<ActionType, u64>,
}

impl ApprovalsConfig {
    fn validate(&self) -> Result<(), PolicyError> {
        if self.default_timeout_secs == 0 {
            return Err(PolicyError::Invalid("approvals.default_timeout_secs must be at least 1".to_string()));
        }
        if self.default_timeout_secs > self.max_timeout_secs {
            return Err(PolicyError::Invalid("approvals.default_timeout_secs exceeds approvals.max_timeout_secs".to_string()));
        }
        if self.per_action_type.len() > MAX_ACTION_TYPES {
            return Err(PolicyError::Invalid("approvals.per_action_type has too many entries".to_string()));
        }
        Ok(())
    }
}

/// Parsed, pre-validation contents of a policy file (§4.2, §4.3, §4.4,
/// §4.6).
///
/// # Invariants
/// - `safe_actions` and `risky_actions` are disjoint.
/// - every duration field is non-zero.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyDocument {
    /// Action types the policy store classifies as SAFE.
    pub safe_actions: BTreeSet<ActionType>,
    /// Action types the policy store classifies as RISKY.
    pub risky_actions: BTreeSet<ActionType>,
    /// Per-action-type cooldown durations, in seconds. An action type with
    /// no entry has no configured cooldown.
    #[serde(default)]
    pub cooldowns: BTreeMap<ActionType, u64>,
    /// Shared circuit breaker thresholds (§4.4).
    pub circuit_breaker: CircuitBreakerConfig,
    /// Approval timeout configuration (§4.6).
    pub approvals: ApprovalsConfig,
    /// Autonomy level gating brain decisions (§4.5).
    pub autonomy_level: AutonomyLevel,
}

impl PolicyDocument {
    /// Parses `text` as TOML and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Io`] if `text` exceeds [`MAX_POLICY_FILE_SIZE`],
    /// [`PolicyError::Parse`] if it is not valid TOML matching this shape,
    /// or [`PolicyError::Invalid`] if it fails validation.
    pub fn parse(text: &str) -> Result<Self, PolicyError> {
        if text.len() > MAX_POLICY_FILE_SIZE {
            return Err(PolicyError::Io(format!("policy file exceeds {MAX_POLICY_FILE_SIZE} bytes")));
        }
        let document: Self = toml::from_str(text).map_err(|error| PolicyError::Parse(error.to_string()))?;
        document.validate()?;
        Ok(document)
    }

    fn validate(&self) -> Result<(), PolicyError> {
        if self.safe_actions.len() > MAX_ACTION_TYPES || self.risky_actions.len() > MAX_ACTION_TYPES {
            return Err(PolicyError::Invalid("action type list exceeds the maximum allowed entries".to_string()));
        }
        if let Some(overlap) = self.safe_actions.intersection(&self.risky_actions).next() {
            return Err(PolicyError::Invalid(format!("action type {overlap:?} is listed as both safe and risky")));
        }
        if self.cooldowns.len() > MAX_ACTION_TYPES {
            return Err(PolicyError::Invalid("cooldowns has too many entries".to_string()));
        }
        self.circuit_breaker.validate()?;
        self.approvals.validate()?;
        for (action_type, timeout) in &self.approvals.per_action_type {
            if *timeout > self.approvals.max_timeout_secs {
                return Err(PolicyError::Invalid(format!(
                    "approvals.per_action_type[{action_type:?}] exceeds approvals.max_timeout_secs"
                )));
            }
        }
        Ok(())
    }
}
