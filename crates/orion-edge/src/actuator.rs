// orion-edge/src/actuator.rs
// ============================================================================
// Module: ORION Edge Actuator Capabilities
// Description: Interface abstractions the edge kernel invokes on state
// transitions.
// Purpose: Replace closure fields with injected capability traits (§9
// redesign flag).
// Dependencies: none
// ============================================================================

//! §9's redesign flag calls for replacing "closure fields" on the
//! safe-state manager and the watchdog with "an interface abstraction...
//! passed at construction". [`SafetyActuator`] is the named capability for
//! [`crate::SafeStateManager`]; [`WatchdogTrigger`] is its counterpart for
//! [`crate::DeadMansSwitch`], letting both be exercised against a fake in
//! tests without a running device.

/// Kinematics capability a [`crate::SafeStateManager`] drives on transition
/// (§4.8, §9).
pub trait SafetyActuator: Send + Sync {
    /// Invoked exactly once per NORMAL → SAFE_MODE transition. Implementors
    /// MUST bring the device to a stationary, powered-safe position.
    fn enter_sit_freeze(&self);

    /// Invoked exactly once per SAFE_MODE → NORMAL transition.
    fn resume(&self);
}

/// Notification capability a [`crate::DeadMansSwitch`] invokes on trigger
/// (§4.8).
pub trait WatchdogTrigger: Send + Sync {
    /// Invoked at most once per ARMED → TRIGGERED transition.
    fn on_trigger(&self);
}
