// orion-commander/src/lib.rs
// ============================================================================
// Crate: orion-commander
// Description: Action synthesis, idempotent execution, and outcome
// publication.
// Purpose: Implement the commander component of the ORION decision kernel
// (§4.7).
// Dependencies: orion-contracts, orion-policy, thiserror, serde_json
// ============================================================================

//! Action execution for ORION's decision kernel.
//!
//! [`Commander`] consumes `Decision` records (for SAFE actions) and
//! `ApprovalDecision` records (for approved RISKY actions), constructs
//! [`orion_contracts::Action`]s deterministically, dispatches them to a
//! [`HandlerRegistry`], and publishes the resulting
//! [`orion_contracts::Outcome`]. It re-derives SAFE/RISKY classification
//! itself from its own [`orion_policy::PolicyStore`] rather than trusting
//! the brain's prior classification.

#![forbid(unsafe_code)]

mod admin;
mod breaker_port;
mod commander;
mod error;
mod handler;
pub mod handlers;
mod record;

pub use admin::TrustedAdmin;
pub use breaker_port::CircuitBreakerPort;
pub use commander::Commander;
pub use commander::DEFAULT_HANDLER_TIMEOUT;
pub use error::CommanderError;
pub use handler::ActionHandler;
pub use handler::HandlerContext;
pub use handler::HandlerError;
pub use handler::HandlerRegistry;
pub use orion_contracts::ForceOverrides;
pub use record::ActionRecord;
