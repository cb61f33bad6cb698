// orion-commander/src/handler.rs
// ============================================================================
// Module: ORION Action Handler
// Description: Pluggable execution capability for one action type.
// Purpose: Give the commander a polymorphic extension point (§4.7,
// "Action handlers are the polymorphic extension point").
// Dependencies: orion-contracts, std::collections
// ============================================================================

//! Pluggable execution capability for one action type.

use std::collections::BTreeMap;
use std::sync::Arc;

use orion_contracts::ActionId;
use orion_contracts::ActionType;

/// Identifying context passed to a handler alongside its parameters.
#[derive(Debug, Clone, Copy)]
pub struct HandlerContext<'a> {
    /// The action being executed.
    pub action_id: ActionId,
    /// The action type this handler was registered for.
    pub action_type: &'a ActionType,
}

/// Error returned by a handler's `execute`, `rollback`, or `validates`
/// (§7 `HANDLER_FAILED{inner}` / `ROLLBACK_FAILED{inner}`).
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl HandlerError {
    /// Builds a handler error from any displayable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The capability set every concrete action handler implements (§4.7).
pub trait ActionHandler: Send + Sync {
    /// Validates `parameters` before the commander constructs an `Action`
    /// from them.
    ///
    /// # Errors
    ///
    /// Returns a [`HandlerError`] when `parameters` are not acceptable.
    fn validates(&self, parameters: &serde_json::Value) -> Result<(), HandlerError>;

    /// Executes the action.
    ///
    /// # Errors
    ///
    /// Returns a [`HandlerError`] when execution fails.
    fn execute(&self, context: HandlerContext<'_>, parameters: &serde_json::Value) -> Result<(), HandlerError>;

    /// Rolls back a previously attempted execution.
    ///
    /// # Errors
    ///
    /// Returns a [`HandlerError`] when rollback itself fails.
    fn rollback(&self, context: HandlerContext<'_>, parameters: &serde_json::Value) -> Result<(), HandlerError>;
}

/// `action_type → handler` lookup table, the commander's pluggable
/// extension point, grounded on the same identifier-keyed `BTreeMap<K, Arc<dyn
/// Trait>>` registry shape used elsewhere in this workspace for provider-like
/// lookups.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: BTreeMap<ActionType, Arc<dyn ActionHandler>>,
}

impl HandlerRegistry {
    /// Builds an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { handlers: BTreeMap::new() }
    }

    /// Registers `handler` for `action_type`, replacing any prior handler.
    #[must_use]
    pub fn with_handler(mut self, action_type: ActionType, handler: Arc<dyn ActionHandler>) -> Self {
        self.handlers.insert(action_type, handler);
        self
    }

    /// Looks up the handler registered for `action_type`, if any.
    #[must_use]
    pub fn get(&self, action_type: &ActionType) -> Option<&Arc<dyn ActionHandler>> {
        self.handlers.get(action_type)
    }
}
