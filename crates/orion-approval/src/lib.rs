// orion-approval/src/lib.rs
// ============================================================================
// Crate: orion-approval
// Description: Human-in-the-loop approval coordination for RISKY actions.
// Purpose: Track pending approval requests, gate approve/deny/force on a
// single identified admin, and sweep expired requests (§4.6).
// Dependencies: orion-contracts, thiserror
// ============================================================================

//! Approval coordination for ORION's human-in-the-loop escalation path.
//!
//! A [`coordinator::ApprovalCoordinator`] is the sole authority over pending
//! [`orion_contracts::ApprovalRequest`] records: it validates the admin
//! identity on every answer, enforces that answers on expired requests fail
//! rather than silently resolve, and produces [`orion_contracts::ApprovalDecision`]
//! records that the commander subsequently dispatches against.

#![forbid(unsafe_code)]

mod config;
mod coordinator;
mod error;
mod pending;

pub use config::AdminConfig;
pub use config::AdminConfigError;
pub use coordinator::ApprovalCoordinator;
pub use error::ApprovalError;
pub use orion_contracts::ForceOverrides;
pub use pending::PendingApproval;
