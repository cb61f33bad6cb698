// orion-edge/src/safe_state.rs
// ============================================================================
// Module: ORION Safe State Manager
// Description: Sticky NORMAL/SAFE_MODE state machine for an edge device.
// Purpose: Implement the §4.8 SafeStateManager.
// Dependencies: std::sync::Mutex
// ============================================================================

//! Sticky NORMAL/SAFE_MODE state machine for an edge device.

use std::sync::Arc;
use std::sync::Mutex;

use crate::actuator::SafetyActuator;
use crate::actuator::WatchdogTrigger;
use crate::error::KernelError;

/// Operating state of a [`SafeStateManager`] (§4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafeState {
    /// Operating normally; commands dispatch to actuators.
    Normal,
    /// Sticky safe state; only an identified RESUME clears it.
    SafeMode,
}

/// Sticky NORMAL/SAFE_MODE state machine (§4.8).
///
/// `enter_safe_mode` is idempotent; `exit_safe_mode` requires SAFE_MODE and
/// fails [`KernelError::NotInSafeMode`] otherwise. Reconnection alone never
/// clears SAFE_MODE (§4.8, "SAFE_MODE is sticky").
pub struct SafeStateManager {
    state: Mutex<SafeState>,
    actuator: Arc<dyn SafetyActuator>,
}

impl SafeStateManager {
    /// Builds a manager in NORMAL, driving `actuator` on transitions.
    #[must_use]
    pub fn new(actuator: Arc<dyn SafetyActuator>) -> Self {
        Self { state: Mutex::new(SafeState::Normal), actuator }
    }

    /// Current state. Fails closed to SAFE_MODE if the internal lock is
    /// poisoned, matching §7's "partial failure... treated as deny".
    #[must_use]
    pub fn state(&self) -> SafeState {
        self.state.lock().map_or(SafeState::SafeMode, |guard| *guard)
    }

    /// Transitions NORMAL → SAFE_MODE and invokes the sit-and-freeze
    /// capability. A no-op if already in SAFE_MODE.
    pub fn enter_safe_mode(&self) {
        let entered = {
            let Ok(mut state) = self.state.lock() else { return };
            if *state == SafeState::SafeMode {
                false
            } else {
                *state = SafeState::SafeMode;
                true
            }
        };
        if entered {
            self.actuator.enter_sit_freeze();
        }
    }

    /// Invokes the sit-and-freeze capability without transitioning state
    /// (§6, a manual STOP "stops movement" but is not the watchdog-timeout
    /// path that enters the sticky SAFE_MODE state per §4.8 invariant (a)).
    /// A no-op if already in SAFE_MODE; callers check that first so STOP is
    /// reported `Ignored` rather than re-freezing.
    pub fn stop_movement(&self) {
        self.actuator.enter_sit_freeze();
    }

    /// Transitions SAFE_MODE → NORMAL and invokes the resume capability.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::NotInSafeMode`] if the current state is not
    /// SAFE_MODE.
    pub fn exit_safe_mode(&self) -> Result<(), KernelError> {
        let Ok(mut state) = self.state.lock() else { return Err(KernelError::NotInSafeMode) };
        if *state != SafeState::SafeMode {
            return Err(KernelError::NotInSafeMode);
        }
        *state = SafeState::Normal;
        drop(state);
        self.actuator.resume();
        Ok(())
    }
}

impl WatchdogTrigger for SafeStateManager {
    fn on_trigger(&self) {
        self.enter_safe_mode();
    }
}
