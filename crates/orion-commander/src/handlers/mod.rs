// orion-commander/src/handlers/mod.rs
// ============================================================================
// Module: ORION Commander Handlers
// Description: Concrete action handler implementations.
// Purpose: House the Phase 3 handler set (§4.7, "the only concrete handler
// is acknowledge_incident").
// Dependencies: orion-contracts
// ============================================================================

//! Concrete action handler implementations.

mod acknowledge_incident;

pub use acknowledge_incident::AcknowledgeIncidentHandler;
