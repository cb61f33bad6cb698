// orion-commander/src/commander.rs
// ============================================================================
// Module: ORION Commander
// Description: Action synthesis, idempotent execution, and outcome
// publication for SAFE decisions and approved RISKY ones.
// Purpose: Implement the §4.7 dispatch rules and seven-step execution
// pipeline.
// Dependencies: orion-contracts, orion-policy
// ============================================================================

//! Action synthesis, idempotent execution, and outcome publication for SAFE decisions and approved RISKY ones.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use orion_contracts::Action;
use orion_contracts::ActionId;
use orion_contracts::ActionState;
use orion_contracts::ApprovalAnswer;
use orion_contracts::ApprovalDecision;
use orion_contracts::ContractVersion;
use orion_contracts::Decision;
use orion_contracts::DecisionId;
use orion_contracts::DecisionType;
use orion_contracts::Outcome;
use orion_contracts::OutcomeError;
use orion_contracts::OutcomeId;
use orion_contracts::OutcomeStatus;
use orion_contracts::ProposedAction;
use orion_contracts::RecordMeta;
use orion_contracts::SafetyClassification;
use orion_contracts::SourceId;
use orion_contracts::Timestamp;
use orion_policy::Classification;
use orion_policy::PolicyStore;

use crate::admin::TrustedAdmin;
use crate::breaker_port::CircuitBreakerPort;
use crate::error::CommanderError;
use crate::handler::ActionHandler;
use crate::handler::HandlerContext;
use crate::handler::HandlerRegistry;
use crate::record::ActionRecord;

/// Default deadline for a single handler invocation when policy carries no
/// more specific value (§4.7 step 4). The policy document (§4.2) defines no
/// per-action-type handler timeout field, only approval timeouts, so this
/// is a commander-local constant rather than a policy lookup.
pub const DEFAULT_HANDLER_TIMEOUT: Duration = Duration::from_secs(30);

fn duration_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Executes SAFE decisions and approved RISKY proposals against registered
/// handlers, owning the action-state map for this process (§4.7, §5).
pub struct Commander {
    policy: PolicyStore,
    admin: TrustedAdmin,
    handlers: HandlerRegistry,
    breaker: Arc<dyn CircuitBreakerPort>,
    handler_timeout: Duration,
    actions: BTreeMap<ActionId, ActionRecord>,
    processed: BTreeSet<ActionId>,
    known_decisions: BTreeMap<DecisionId, Decision>,
}

impl Commander {
    /// Builds a commander over `policy`, gated by `admin`, dispatching to
    /// `handlers`, and reporting outcomes to `breaker`.
    #[must_use]
    pub fn new(policy: PolicyStore, admin: TrustedAdmin, handlers: HandlerRegistry, breaker: Arc<dyn CircuitBreakerPort>) -> Self {
        Self { policy, admin, handlers, breaker, handler_timeout: DEFAULT_HANDLER_TIMEOUT, actions: BTreeMap::new(), processed: BTreeSet::new(), known_decisions: BTreeMap::new() }
    }

    /// Overrides the default per-handler execution deadline.
    #[must_use]
    pub const fn with_handler_timeout(mut self, timeout: Duration) -> Self {
        self.handler_timeout = timeout;
        self
    }

    /// Marks a previously emitted outcome for `action_id` as acknowledged
    /// by its consumer, so a re-delivered decision for the same action
    /// re-emits nothing further (§4.7, "re-emitted only if the prior
    /// outcome was never acknowledged").
    pub fn acknowledge(&mut self, action_id: ActionId) {
        if let Some(record) = self.actions.get_mut(&action_id) {
            record.acknowledged = true;
        }
    }

    /// Returns the current lifecycle state of `action_id`, if known.
    #[must_use]
    pub fn action_state(&self, action_id: ActionId) -> Option<ActionState> {
        self.actions.get(&action_id).map(|record| record.action.state)
    }

    /// Dispatches a `Decision` from the brain (§4.7, "From a decision").
    ///
    /// # Errors
    ///
    /// Returns [`CommanderError::NotSafeAction`] when `decision` is not an
    /// `EXECUTE_SAFE_ACTION` whose action type `classify`s as `SAFE`.
    pub fn dispatch_decision(&mut self, decision: &Decision, issued_at: Timestamp) -> Result<Option<Outcome>, CommanderError> {
        self.known_decisions.insert(decision.decision_id, decision.clone());
        match decision.decision_type {
            DecisionType::ExecuteSafeAction => {
                let proposed = decision.proposed_action.clone().ok_or(CommanderError::NotSafeAction)?;
                if self.policy.classify(&proposed.action_type) != Classification::Safe {
                    return Err(CommanderError::NotSafeAction);
                }
                let action = Self::build_action(decision.decision_id, &proposed, SafetyClassification::Safe, issued_at);
                Ok(self.execute_action(action, issued_at, false))
            }
            DecisionType::NoAction => Ok(None),
            DecisionType::SuggestAction | DecisionType::RequestApproval => Err(CommanderError::NotSafeAction),
        }
    }

    /// Dispatches an `ApprovalDecision` from the approval coordinator
    /// (§4.7, "From an approval decision").
    ///
    /// # Errors
    ///
    /// Returns [`CommanderError::Unauthorized`], [`CommanderError::Expired`],
    /// [`CommanderError::UnknownDecision`], or [`CommanderError::NotRisky`]
    /// when the referenced decision does not satisfy the dispatch rule.
    pub fn dispatch_approval_decision(&mut self, decision: &ApprovalDecision, now: Timestamp) -> Result<Option<Outcome>, CommanderError> {
        if !self.admin.matches(&decision.admin_identity) {
            return Err(CommanderError::Unauthorized);
        }
        if decision.decision == ApprovalAnswer::Deny {
            return Ok(None);
        }
        if decision.expires_at <= now {
            return Err(CommanderError::Expired(decision.decision_id));
        }
        let original = self.known_decisions.get(&decision.decision_id).ok_or(CommanderError::UnknownDecision(decision.decision_id))?;
        if original.safety_classification != Some(SafetyClassification::Risky) {
            return Err(CommanderError::NotRisky(decision.decision_id));
        }
        let proposed = original.proposed_action.clone().ok_or(CommanderError::NotRisky(decision.decision_id))?;
        let action = Self::build_action(decision.decision_id, &proposed, SafetyClassification::Risky, now);
        let bypass_breaker = decision.decision == ApprovalAnswer::Force && decision.overrides.override_circuit_breaker;
        Ok(self.execute_action(action, now, bypass_breaker))
    }

    fn build_action(decision_id: DecisionId, proposed: &ProposedAction, classification: SafetyClassification, issued_at: Timestamp) -> Action {
        Action {
            meta: RecordMeta { version: ContractVersion::CURRENT, timestamp: issued_at, source: SourceId::commander() },
            action_id: ActionId::from_uuid(decision_id.as_uuid()),
            decision_id,
            action_type: proposed.action_type.clone(),
            safety_classification: classification,
            parameters: proposed.parameters.clone(),
            state: ActionState::Pending,
            dry_run: proposed.dry_run,
            rollback_enabled: proposed.rollback_enabled,
        }
    }

    /// The seven-step execution pipeline (§4.7). Returns `None` when the
    /// action was already terminal and its prior outcome was acknowledged.
    fn execute_action(&mut self, action: Action, issued_at: Timestamp, bypass_breaker: bool) -> Option<Outcome> {
        let action_id = action.action_id;
        let action_type = action.action_type.clone();

        if self.processed.contains(&action_id) {
            let record = self.actions.get(&action_id)?;
            return if record.acknowledged { None } else { record.outcome.clone() };
        }
        self.processed.insert(action_id);
        self.actions.insert(action_id, ActionRecord::new(action.clone()));

        if let Some(record) = self.actions.get_mut(&action_id) {
            record.action.state = ActionState::Executing;
        }

        if action.dry_run {
            return Some(self.finish(action_id, issued_at, OutcomeStatus::Succeeded, 0, None));
        }

        if !bypass_breaker && !self.breaker.admits(&action_type) {
            return Some(self.finish(action_id, issued_at, OutcomeStatus::Failed, 0, Some(OutcomeError { code: "CIRCUIT_OPEN".to_string(), message: format!("circuit open for {action_type}") })));
        }

        let Some(handler) = self.handlers.get(&action_type).cloned() else {
            return Some(self.finish(action_id, issued_at, OutcomeStatus::Failed, 0, Some(OutcomeError { code: "UNKNOWN_ACTION_TYPE".to_string(), message: format!("no handler registered for {action_type}") })));
        };

        let context = HandlerContext { action_id, action_type: &action_type };
        let started = Instant::now();
        let outcome_result = handler.execute(context, &action.parameters);
        let elapsed = started.elapsed();

        if elapsed > self.handler_timeout {
            let message = format!("handler for {action_type} exceeded its deadline");
            return Some(self.finish_failed(&action, &handler, context, issued_at, "TIMEOUT", message, duration_ms(elapsed)));
        }

        match outcome_result {
            Ok(()) => {
                self.breaker.record_success(&action_type);
                Some(self.finish(action_id, issued_at, OutcomeStatus::Succeeded, duration_ms(elapsed), None))
            }
            Err(handler_error) => {
                self.breaker.record_failure(&action_type);
                Some(self.finish_failed(&action, &handler, context, issued_at, "HANDLER_FAILED", handler_error.0, duration_ms(elapsed)))
            }
        }
    }

    /// Finishes a failed execution, invoking rollback first when
    /// `action.rollback_enabled` (§5, "the commander treats the action as
    /// `failed{TIMEOUT}` and triggers rollback if enabled" — the same rule
    /// applies uniformly to a handler-reported failure).
    #[allow(clippy::too_many_arguments, reason = "internal helper factoring out the timeout/handler-failure rollback branch")]
    fn finish_failed(&mut self, action: &Action, handler: &Arc<dyn ActionHandler>, context: HandlerContext<'_>, issued_at: Timestamp, code: &str, message: String, execution_time_ms: u64) -> Outcome {
        let action_id = action.action_id;
        if !action.rollback_enabled {
            return self.finish(action_id, issued_at, OutcomeStatus::Failed, execution_time_ms, Some(OutcomeError { code: code.to_string(), message }));
        }
        match handler.rollback(context, &action.parameters) {
            Ok(()) => self.finish(action_id, issued_at, OutcomeStatus::RolledBack, execution_time_ms, Some(OutcomeError { code: code.to_string(), message })),
            Err(rollback_error) => self.finish(action_id, issued_at, OutcomeStatus::Failed, execution_time_ms, Some(OutcomeError { code: "ROLLBACK_FAILED".to_string(), message: format!("{message}; rollback: {}", rollback_error.0) })),
        }
    }

    fn finish(&mut self, action_id: ActionId, timestamp: Timestamp, status: OutcomeStatus, execution_time_ms: u64, error: Option<OutcomeError>) -> Outcome {
        let state = match status {
            OutcomeStatus::Succeeded => ActionState::Succeeded,
            OutcomeStatus::Failed => ActionState::Failed,
            OutcomeStatus::RolledBack => ActionState::RolledBack,
        };
        let outcome = Outcome { meta: RecordMeta { version: ContractVersion::CURRENT, timestamp, source: SourceId::commander() }, outcome_id: OutcomeId::new(), action_id, status, execution_time_ms, error };
        if let Some(record) = self.actions.get_mut(&action_id) {
            record.action.state = state;
            record.outcome = Some(outcome.clone());
        }
        outcome
    }
}
