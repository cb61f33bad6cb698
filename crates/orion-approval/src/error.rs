// orion-approval/src/error.rs
// ============================================================================
// Module: ORION Approval Coordinator Errors
// Description: Error type for approval coordinator operations.
// Purpose: Name the §7 error kinds the coordinator itself raises.
// Dependencies: thiserror
// ============================================================================

//! Error type for approval coordinator operations.

use thiserror::Error;

use orion_contracts::ApprovalRequestId;

/// Errors raised by [`crate::coordinator::ApprovalCoordinator`] operations
/// (§4.6, §7).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApprovalError {
    /// `admin_identity` does not match the configured admin (§7
    /// `UNAUTHORIZED`).
    #[error("admin identity does not match the configured admin")]
    Unauthorized,
    /// The referenced request is past its deadline (§7 `EXPIRED`).
    #[error("approval request {0} has expired")]
    Expired(ApprovalRequestId),
    /// The referenced request is not pending.
    #[error("approval request {0} is not pending")]
    NotFound(ApprovalRequestId),
    /// `handle_approval_request` was called with an id already pending.
    #[error("approval request {0} is already pending")]
    AlreadyPending(ApprovalRequestId),
    /// A `force` call's reason was shorter than the minimum length.
    #[error("force reason must be at least {0} characters")]
    ReasonTooShort(usize),
}
