// orion-contracts/src/edge.rs
// ============================================================================
// Module: ORION Edge Wire Records
// Description: Commands and health reports exchanged with edge devices.
// Purpose: Define the wire shape for the edge safety kernel's dead man's
// switch and safe-state protocol.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! §6: edge devices publish `EdgeHealth` on the `edge.health` topic and
//! consume `EdgeCommand` from `edge.commands`. The edge kernel itself
//! (watchdog, safe-mode transition) runs on the device; this crate only
//! defines what crosses the wire.

use serde::Deserialize;
use serde::Serialize;

use crate::identifiers::HealthId;
use crate::identifiers::SourceId;
use crate::time::Timestamp;

/// A command dispatched to an edge device (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeCommandKind {
    /// Resume normal operation from safe mode.
    Resume,
    /// Stop all actuation immediately.
    Stop,
    /// Move to a commanded position or state.
    Move,
    /// Run a calibration routine.
    Calibrate,
    /// Request an immediate health report.
    Status,
}

/// A command sent to an edge device over the `edge.commands` topic (§6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeCommand {
    /// Kind of command.
    pub kind: EdgeCommandKind,
    /// Command parameters, opaque to the core; interpreted by the device's
    /// own firmware.
    pub parameters: serde_json::Value,
}

/// Safety state an edge device reports as part of [`EdgeHealth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeSafetyState {
    /// Operating normally.
    Running,
    /// Forced into safe mode by the device's own watchdog.
    SafeMode,
    /// Reporting an unrecoverable error.
    Error,
}

/// Connectivity state of the bus link reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    /// Link to the bus is established.
    Connected,
    /// Link to the bus is degraded but not lost.
    Degraded,
    /// Link to the bus is lost; this report is stale by the time it is
    /// observed.
    Disconnected,
}

/// A device-reported error entry included in an [`EdgeHealth`] record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeError {
    /// Device-defined error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// A periodic health report published by an edge device on `edge.health`
/// (§6, §8 P8/P9).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeHealth {
    /// Unique health report identifier.
    pub health_id: HealthId,
    /// When this report was produced by the device.
    pub timestamp: Timestamp,
    /// Identity of the reporting device (`edge:<device_id>`).
    pub source: SourceId,
    /// Device identifier.
    pub device_id: String,
    /// Safety state reported by the device's own watchdog.
    pub safety_state: EdgeSafetyState,
    /// Seconds since the device last rebooted.
    pub uptime_seconds: u64,
    /// Connectivity state of the bus link.
    pub connection_status: ConnectionStatus,
    /// Errors reported since the previous health report.
    pub errors: Vec<EdgeError>,
}
