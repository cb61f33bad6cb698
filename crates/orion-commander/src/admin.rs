// orion-commander/src/admin.rs
// ============================================================================
// Module: ORION Commander Trusted Admin
// Description: Re-validation of the admin identity carried on an approval
// decision.
// Purpose: Defense in depth — the commander does not trust that an inbound
// ApprovalDecision was actually produced by the approval coordinator's own
// identity check (§4.7, "admin_identity matches ADMIN").
// Dependencies: orion-contracts
// ============================================================================

//! Re-validation of the admin identity carried on an approval decision.

use orion_contracts::AdminChannel;

/// The single admin identity the commander accepts approval decisions from.
///
/// Deliberately independent of `orion-approval::AdminConfig`: the commander
/// crate does not depend on `orion-approval` (§9, strict dependency order),
/// so it carries its own copy of the same structural-match logic over the
/// channels configured for this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedAdmin {
    telegram_chat_id: Option<i64>,
    cli_username: Option<String>,
}

impl TrustedAdmin {
    /// Builds a trusted admin identity from its channels.
    #[must_use]
    pub const fn new(telegram_chat_id: Option<i64>, cli_username: Option<String>) -> Self {
        Self { telegram_chat_id, cli_username }
    }

    /// Returns `true` iff `identity` structurally matches the configured
    /// channel(s).
    #[must_use]
    pub fn matches(&self, identity: &AdminChannel) -> bool {
        match identity {
            AdminChannel::Telegram { chat_id } => self.telegram_chat_id == Some(*chat_id),
            AdminChannel::Cli { username } => self.cli_username.as_deref() == Some(username.as_str()),
        }
    }
}
