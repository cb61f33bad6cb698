// orion-edge/src/error.rs
// ============================================================================
// Module: ORION Edge Errors
// Description: Error type for the edge safety kernel.
// Purpose: Name the §7 error kind the edge kernel itself raises.
// Dependencies: thiserror
// ============================================================================

//! Error type for the edge safety kernel.

use thiserror::Error;

/// Errors raised by the edge safety kernel (§4.8, §7).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    /// `exit_safe_mode` was called while the manager was not in SAFE_MODE
    /// (§7 `NOT_IN_SAFE_MODE`).
    #[error("not in safe mode")]
    NotInSafeMode,
}
