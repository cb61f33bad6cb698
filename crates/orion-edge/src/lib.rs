// orion-edge/src/lib.rs
// ============================================================================
// Crate: orion-edge
// Description: Edge safety kernel: dead-man's-switch and sticky safe-state
// manager.
// Purpose: Implement ORION's §4.8 edge component.
// Dependencies: orion-contracts, tokio, thiserror
// ============================================================================

//! The edge safety kernel.
//!
//! [`DeadMansSwitch`] and [`SafeStateManager`] are two cooperating state
//! machines intended to run inside an independently deployed edge-device
//! process (§2: "runs on an edge device"). This crate depends only on
//! [`orion_contracts`] for the wire shape of edge commands and health
//! reports; it has no dependency on the brain, commander, or approval
//! coordinator, since loss of contact with all three is exactly the
//! condition it exists to survive.

#![forbid(unsafe_code)]

mod actuator;
mod command;
mod error;
mod health;
mod safe_state;
mod watchdog;

pub use actuator::SafetyActuator;
pub use actuator::WatchdogTrigger;
pub use command::EdgeCommandHandler;
pub use command::EdgeCommandOutcome;
pub use error::KernelError;
pub use health::EdgeHealthReporter;
pub use safe_state::SafeState;
pub use safe_state::SafeStateManager;
pub use watchdog::DeadMansSwitch;
pub use watchdog::WatchdogState;
