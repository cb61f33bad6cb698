// orion-edge/src/command.rs
// ============================================================================
// Module: ORION Edge Command Handler
// Description: Dispatches RESUME/STOP/MOVE/CALIBRATE/STATUS to the
// watchdog and safe-state manager.
// Purpose: Implement §6's edge command behavior table, including the
// SAFE_MODE gating invariant P9.
// Dependencies: orion-contracts
// ============================================================================

//! Dispatches RESUME/STOP/MOVE/CALIBRATE/STATUS to the watchdog and safe-state manager.

use std::sync::Arc;

use orion_contracts::EdgeCommand;
use orion_contracts::EdgeCommandKind;

use crate::error::KernelError;
use crate::safe_state::SafeState;
use crate::safe_state::SafeStateManager;
use crate::watchdog::DeadMansSwitch;

/// Result of dispatching a single [`EdgeCommand`] (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeCommandOutcome {
    /// RESUME cleared the watchdog and exited SAFE_MODE.
    Resumed,
    /// STOP brought the device to a stationary state.
    Stopped,
    /// STOP arrived while already in SAFE_MODE; no further effect.
    Ignored,
    /// MOVE or CALIBRATE was dispatched to device-specific actuators.
    Dispatched,
    /// MOVE or CALIBRATE was rejected because the device is in SAFE_MODE
    /// (§8 P9).
    Rejected,
    /// STATUS will be answered by the next heartbeat.
    Reported,
}

/// Dispatches edge commands to the watchdog and safe-state manager (§6).
///
/// Device-specific actuation for MOVE/CALIBRATE is out of this kernel's
/// scope; this handler only decides whether such a command may proceed
/// (§8 P9), not how the device carries it out.
pub struct EdgeCommandHandler {
    watchdog: Arc<DeadMansSwitch>,
    safe_state: Arc<SafeStateManager>,
}

impl EdgeCommandHandler {
    /// Builds a handler over the given watchdog and safe-state manager.
    #[must_use]
    pub const fn new(watchdog: Arc<DeadMansSwitch>, safe_state: Arc<SafeStateManager>) -> Self {
        Self { watchdog, safe_state }
    }

    /// Dispatches `command` per §6's behavior table.
    ///
    /// Every command received from the brain rearms the watchdog (§4.8,
    /// "`reset()` (called on every message received from the brain)")
    /// before its own effect is applied.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::NotInSafeMode`] only if RESUME arrives while
    /// already out of SAFE_MODE.
    pub fn handle(&self, command: &EdgeCommand) -> Result<EdgeCommandOutcome, KernelError> {
        self.watchdog.reset();
        match command.kind {
            EdgeCommandKind::Resume => {
                self.watchdog.clear_triggered();
                self.safe_state.exit_safe_mode()?;
                Ok(EdgeCommandOutcome::Resumed)
            }
            EdgeCommandKind::Stop => {
                if self.safe_state.state() == SafeState::SafeMode {
                    Ok(EdgeCommandOutcome::Ignored)
                } else {
                    self.safe_state.stop_movement();
                    Ok(EdgeCommandOutcome::Stopped)
                }
            }
            EdgeCommandKind::Move | EdgeCommandKind::Calibrate => {
                if self.safe_state.state() == SafeState::SafeMode { Ok(EdgeCommandOutcome::Rejected) } else { Ok(EdgeCommandOutcome::Dispatched) }
            }
            EdgeCommandKind::Status => Ok(EdgeCommandOutcome::Reported),
        }
    }
}
