// orion-bus/src/memory.rs
// ============================================================================
// Module: ORION In-Memory Bus
// Description: Reference BusAdapter backend for wiring the kernel end to end.
// Purpose: Drive brain/approval/commander integration tests without a real
// transport; not a production log (§1, "the message transport itself" is
// out of scope).
// Dependencies: orion-contracts, tokio, tokio-util
// ============================================================================

//! ## Overview
//! [`InMemoryBus`] implements [`BusAdapter`] by holding one append-only
//! `Vec<BusEnvelope>` per topic behind a `std::sync::Mutex`, and one cursor
//! per `(topic, group)`. `subscribe` spawns a background task that polls
//! its cursor, invokes the handler in delivery order, and only advances the
//! cursor on success — a failed delivery is retried at the same offset
//! after the caller's [`RedeliveryPolicy`], matching §4.1's "failure
//! re-delivers after backoff governed by the caller."

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::Mutex;

use orion_contracts::RecordKind;
use orion_contracts::RecordMeta;
use orion_contracts::SchemaRegistry;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

use crate::error::BusError;
use crate::record::BusEnvelope;
use crate::record::Offset;
use crate::redelivery::RedeliveryPolicy;

/// Callback invoked once per delivered [`BusEnvelope`] by a subscription.
///
/// Returning `Err` causes the same envelope to be redelivered after the
/// subscription's [`RedeliveryPolicy`] (§4.1). Implementations are
/// responsible for their own idempence across redeliveries (§4.1,
/// "Consumers are responsible for their own idempotence").
pub trait BusHandler: Send + Sync {
    /// Handles one delivered envelope.
    ///
    /// # Errors
    ///
    /// Any `Err` triggers redelivery of the same envelope.
    fn handle(&self, envelope: &BusEnvelope) -> Result<(), String>;
}

/// A `BusAdapter` publishes schema-validated records to per-topic logs and
/// delivers them to at most one in-flight consumer per `(topic, group)`
/// (§4.1).
pub trait BusAdapter: Send + Sync {
    /// Validates and appends a record to its topic (§4.1 steps 1-4).
    ///
    /// # Errors
    ///
    /// Returns [`BusError::UnknownSchema`] or
    /// [`BusError::ValidationFailed`] when the record is rejected.
    fn publish(&self, kind: RecordKind, meta: RecordMeta, payload: serde_json::Value) -> Result<Offset, BusError>;

    /// Registers a consumer for `kind` under `group`, delivering records in
    /// append order with at most one in flight at a time (§4.1).
    ///
    /// # Errors
    ///
    /// Returns [`BusError::AlreadySubscribed`] when `group` is already
    /// subscribed to `kind`.
    fn subscribe(
        &self,
        kind: RecordKind,
        group: &str,
        handler: Arc<dyn BusHandler>,
        redelivery: RedeliveryPolicy,
    ) -> Result<SubscriptionHandle, BusError>;
}

/// Handle returned by [`BusAdapter::subscribe`], used to stop the
/// background delivery task during graceful shutdown (§5, "a propagated
/// cancellation token").
#[derive(Debug, Clone)]
pub struct SubscriptionHandle {
    /// Cancellation token observed by the subscription's delivery loop.
    cancel: CancellationToken,
}

impl SubscriptionHandle {
    /// Requests that the subscription's delivery loop stop after its
    /// current in-flight handler call returns.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

/// Shared state behind every clone of an [`InMemoryBus`].
struct Shared {
    /// Schema registry consulted by `publish` before appending.
    registry: Arc<dyn SchemaRegistry>,
    /// Per-topic append-only logs.
    topics: Mutex<BTreeMap<RecordKind, Vec<BusEnvelope>>>,
    /// Per-`(topic, group)` cursor: the next offset to deliver.
    cursors: Mutex<BTreeMap<(RecordKind, String), u64>>,
    /// Active `(topic, group)` subscriptions, to reject duplicates.
    groups: Mutex<BTreeSet<(RecordKind, String)>>,
    /// Woken on every publish so idle subscription loops do not busy-poll.
    notify: Notify,
}

/// Reference [`BusAdapter`] backed by in-process, per-topic vectors (§4.1).
///
/// Cloning an `InMemoryBus` shares the same underlying logs and cursors —
/// it is the handle type, not the storage.
#[derive(Clone)]
pub struct InMemoryBus {
    /// Shared storage and subscription bookkeeping.
    shared: Arc<Shared>,
}

impl InMemoryBus {
    /// Builds an empty bus validating records through `registry`.
    #[must_use]
    pub fn new(registry: Arc<dyn SchemaRegistry>) -> Self {
        Self {
            shared: Arc::new(Shared {
                registry,
                topics: Mutex::new(BTreeMap::new()),
                cursors: Mutex::new(BTreeMap::new()),
                groups: Mutex::new(BTreeSet::new()),
                notify: Notify::new(),
            }),
        }
    }

    /// Returns the number of records appended to `kind`'s topic so far.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Unavailable`] if the internal lock is poisoned.
    pub fn len(&self, kind: RecordKind) -> Result<usize, BusError> {
        let topics = self.shared.topics.lock().map_err(|_| BusError::Unavailable("topic log mutex poisoned".to_string()))?;
        Ok(topics.get(&kind).map_or(0, Vec::len))
    }

    /// Returns `true` when `kind`'s topic has no records.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Unavailable`] if the internal lock is poisoned.
    pub fn is_empty(&self, kind: RecordKind) -> Result<bool, BusError> {
        Ok(self.len(kind)? == 0)
    }

    /// Runs one subscription's delivery loop until cancelled.
    #[allow(clippy::cast_possible_truncation, reason = "offsets are bounded by in-process Vec::len, never by untrusted input")]
    async fn run_subscription(
        shared: Arc<Shared>,
        kind: RecordKind,
        group: String,
        handler: Arc<dyn BusHandler>,
        redelivery: RedeliveryPolicy,
        cancel: CancellationToken,
    ) {
        let mut attempt: u32 = 0;
        loop {
            if cancel.is_cancelled() {
                return;
            }
            let notified = shared.notify.notified();
            let next_envelope = {
                let Ok(topics) = shared.topics.lock() else {
                    return;
                };
                let Ok(cursors) = shared.cursors.lock() else {
                    return;
                };
                let next_offset = cursors.get(&(kind, group.clone())).copied().unwrap_or(0);
                topics.get(&kind).and_then(|log| log.get(next_offset as usize).cloned())
            };
            let Some(envelope) = next_envelope else {
                tokio::select! {
                    () = notified => {}
                    () = cancel.cancelled() => return,
                }
                continue;
            };
            match handler.handle(&envelope) {
                Ok(()) => {
                    attempt = 0;
                    let Ok(mut cursors) = shared.cursors.lock() else {
                        return;
                    };
                    cursors.insert((kind, group.clone()), envelope.offset.as_u64() + 1);
                }
                Err(_detail) => {
                    let delay = redelivery.delay_for(attempt);
                    attempt = attempt.saturating_add(1);
                    if delay.is_zero() {
                        continue;
                    }
                    tokio::select! {
                        () = tokio::time::sleep(delay) => {}
                        () = cancel.cancelled() => return,
                    }
                }
            }
        }
    }
}

impl BusAdapter for InMemoryBus {
    fn publish(&self, kind: RecordKind, meta: RecordMeta, payload: serde_json::Value) -> Result<Offset, BusError> {
        self.shared.registry.validate(kind, &meta)?;
        let mut topics = self.shared.topics.lock().map_err(|_| BusError::Unavailable("topic log mutex poisoned".to_string()))?;
        let log = topics.entry(kind).or_default();
        let offset = Offset::new(log.len() as u64);
        log.push(BusEnvelope { offset, kind, meta, payload });
        self.shared.notify.notify_waiters();
        Ok(offset)
    }

    fn subscribe(
        &self,
        kind: RecordKind,
        group: &str,
        handler: Arc<dyn BusHandler>,
        redelivery: RedeliveryPolicy,
    ) -> Result<SubscriptionHandle, BusError> {
        let mut groups = self.shared.groups.lock().map_err(|_| BusError::Unavailable("group registry mutex poisoned".to_string()))?;
        let key = (kind, group.to_string());
        if !groups.insert(key.clone()) {
            return Err(BusError::AlreadySubscribed { topic: kind.topic().to_string(), group: group.to_string() });
        }
        drop(groups);
        let cancel = CancellationToken::new();
        let shared = Arc::clone(&self.shared);
        let task_cancel = cancel.clone();
        tokio::spawn(Self::run_subscription(shared, kind, key.1, handler, redelivery, task_cancel));
        Ok(SubscriptionHandle { cancel })
    }
}
