// orion-approval/src/config.rs
// ============================================================================
// Module: ORION Admin Configuration
// Description: The single configured admin identity.
// Purpose: Hold the channel(s) an identified admin may approve through, and
// compare an incoming identity against them structurally (§6, §9 redesign
// flag "admin identity as string comparisons").
// Dependencies: orion-contracts
// ============================================================================

//! The single configured admin identity.

use orion_contracts::AdminChannel;

/// Errors constructing an [`AdminConfig`].
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum AdminConfigError {
    /// Neither channel was configured (§6, "at least one of the two
    /// channels MUST be configured").
    #[error("admin configuration must set at least one of telegram_chat_id or cli_identity")]
    NoChannelConfigured,
}

/// The single admin identity authorised to approve, deny, or force RISKY
/// actions (§4.6, §6).
///
/// # Invariants
/// - At least one of `telegram_chat_id` / `cli_username` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    /// Telegram chat id channel, if configured.
    telegram_chat_id: Option<i64>,
    /// CLI username channel, if configured.
    cli_username: Option<String>,
}

impl AdminConfig {
    /// Builds an admin configuration from its channels.
    ///
    /// # Errors
    ///
    /// Returns [`AdminConfigError::NoChannelConfigured`] if both are `None`.
    pub fn new(telegram_chat_id: Option<i64>, cli_username: Option<String>) -> Result<Self, AdminConfigError> {
        if telegram_chat_id.is_none() && cli_username.is_none() {
            return Err(AdminConfigError::NoChannelConfigured);
        }
        Ok(Self { telegram_chat_id, cli_username })
    }

    /// Returns `true` iff `identity` structurally matches the configured
    /// admin channel(s).
    #[must_use]
    pub fn matches(&self, identity: &AdminChannel) -> bool {
        match identity {
            AdminChannel::Telegram { chat_id } => self.telegram_chat_id == Some(*chat_id),
            AdminChannel::Cli { username } => self.cli_username.as_deref() == Some(username.as_str()),
        }
    }
}
