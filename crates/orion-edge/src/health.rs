// orion-edge/src/health.rs
// ============================================================================
// Module: ORION Edge Health Reporter
// Description: Assembles periodic EdgeHealth records from kernel state.
// Purpose: Make "reported via the next heartbeat" (§6, STATUS) concrete.
// Dependencies: orion-contracts
// ============================================================================

//! Assembles periodic EdgeHealth records from kernel state.

use std::sync::Arc;
use std::time::Instant;

use orion_contracts::ConnectionStatus;
use orion_contracts::EdgeError;
use orion_contracts::EdgeHealth;
use orion_contracts::EdgeSafetyState;
use orion_contracts::HealthId;
use orion_contracts::SourceId;
use orion_contracts::Timestamp;

use crate::safe_state::SafeState;
use crate::safe_state::SafeStateManager;
use crate::watchdog::DeadMansSwitch;

/// Assembles an [`EdgeHealth`] record from current kernel state on each
/// periodic tick (§6).
pub struct EdgeHealthReporter {
    device_id: String,
    watchdog: Arc<DeadMansSwitch>,
    safe_state: Arc<SafeStateManager>,
    started_at: Instant,
}

impl EdgeHealthReporter {
    /// Builds a reporter for `device_id`, timing uptime from construction.
    #[must_use]
    pub fn new(device_id: impl Into<String>, watchdog: Arc<DeadMansSwitch>, safe_state: Arc<SafeStateManager>) -> Self {
        Self { device_id: device_id.into(), watchdog, safe_state, started_at: Instant::now() }
    }

    /// Builds the current health record. `errors` reported non-empty force
    /// `state = ERROR` regardless of the safe-state manager's state, since
    /// an unrecoverable device error outranks RUNNING/SAFE_MODE for
    /// observability purposes.
    #[must_use]
    pub fn report(&self, now: Timestamp, connection_status: ConnectionStatus, errors: Vec<EdgeError>) -> EdgeHealth {
        let safety_state = if errors.is_empty() {
            match self.safe_state.state() {
                SafeState::Normal => EdgeSafetyState::Running,
                SafeState::SafeMode => EdgeSafetyState::SafeMode,
            }
        } else {
            EdgeSafetyState::Error
        };
        EdgeHealth {
            health_id: HealthId::new(),
            timestamp: now,
            source: SourceId::edge(&self.device_id),
            device_id: self.device_id.clone(),
            safety_state,
            uptime_seconds: self.started_at.elapsed().as_secs(),
            connection_status,
            errors,
        }
    }

    /// Milliseconds remaining on the watchdog, surfaced for the `STATUS`
    /// command path.
    #[must_use]
    pub fn watchdog_remaining_ms(&self) -> u64 {
        self.watchdog.remaining_ms()
    }
}
