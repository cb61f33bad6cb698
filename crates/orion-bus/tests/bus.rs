// orion-bus/tests/bus.rs
// ============================================================================
// Module: ORION Bus Integration Tests
// Description: Tests for publish/subscribe ordering, redelivery, and
// per-group cursors.
// Purpose: Exercise InMemoryBus end to end, as the rest of the kernel uses it.
// Dependencies: orion-bus, orion-contracts, tokio
// ============================================================================
//! ## Overview
//! Validates `InMemoryBus` publish/subscribe semantics against §4.1.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use orion_bus::BusAdapter;
use orion_bus::BusEnvelope;
use orion_bus::BusHandler;
use orion_bus::InMemoryBus;
use orion_bus::RedeliveryPolicy;
use orion_contracts::DefaultSchemaRegistry;
use orion_contracts::RecordKind;
use orion_contracts::RecordMeta;
use orion_contracts::SourceId;
use orion_contracts::Timestamp;
use serde_json::json;
use time::OffsetDateTime;

fn meta(source: SourceId) -> RecordMeta {
    RecordMeta { version: orion_contracts::ContractVersion::CURRENT, timestamp: Timestamp::from_offset(OffsetDateTime::now_utc()), source }
}

struct RecordingHandler {
    seen: Arc<Mutex<Vec<BusEnvelope>>>,
}

impl BusHandler for RecordingHandler {
    fn handle(&self, envelope: &BusEnvelope) -> Result<(), String> {
        self.seen.lock().expect("seen lock").push(envelope.clone());
        Ok(())
    }
}

struct FlakyHandler {
    failures_remaining: Mutex<u32>,
    seen: Arc<Mutex<Vec<BusEnvelope>>>,
}

impl BusHandler for FlakyHandler {
    fn handle(&self, envelope: &BusEnvelope) -> Result<(), String> {
        let mut remaining = self.failures_remaining.lock().expect("failures lock");
        if *remaining > 0 {
            *remaining -= 1;
            return Err("synthetic failure".to_string());
        }
        self.seen.lock().expect("seen lock").push(envelope.clone());
        Ok(())
    }
}

#[tokio::test]
async fn publish_rejects_incident_from_non_correlator_source() {
    let bus = InMemoryBus::new(Arc::new(DefaultSchemaRegistry));
    let result = bus.publish(RecordKind::Incident, meta(SourceId::new("impostor")), json!({}));
    assert!(result.is_err());
}

#[tokio::test]
async fn publish_accepts_incident_from_correlator_source() {
    let bus = InMemoryBus::new(Arc::new(DefaultSchemaRegistry));
    let result = bus.publish(RecordKind::Incident, meta(SourceId::correlator()), json!({"n": 1}));
    assert!(result.is_ok());
    assert_eq!(bus.len(RecordKind::Incident).expect("len"), 1);
}

#[tokio::test]
async fn subscriber_receives_records_in_append_order() {
    let bus = InMemoryBus::new(Arc::new(DefaultSchemaRegistry));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let handler = Arc::new(RecordingHandler { seen: Arc::clone(&seen) });
    bus.subscribe(RecordKind::Event, "group-a", handler, RedeliveryPolicy::immediate()).expect("subscribe");

    for n in 0..5 {
        bus.publish(RecordKind::Event, meta(SourceId::new("sensor")), json!({"n": n})).expect("publish");
    }

    tokio::time::sleep(Duration::from_millis(50)).await;
    let seen = seen.lock().expect("seen lock");
    assert_eq!(seen.len(), 5);
    for (expected, envelope) in (0..5).zip(seen.iter()) {
        assert_eq!(envelope.payload["n"], expected);
    }
}

#[tokio::test]
async fn independent_groups_each_see_every_record() {
    let bus = InMemoryBus::new(Arc::new(DefaultSchemaRegistry));
    let seen_a = Arc::new(Mutex::new(Vec::new()));
    let seen_b = Arc::new(Mutex::new(Vec::new()));
    bus.subscribe(RecordKind::Event, "group-a", Arc::new(RecordingHandler { seen: Arc::clone(&seen_a) }), RedeliveryPolicy::immediate())
        .expect("subscribe a");
    bus.subscribe(RecordKind::Event, "group-b", Arc::new(RecordingHandler { seen: Arc::clone(&seen_b) }), RedeliveryPolicy::immediate())
        .expect("subscribe b");

    bus.publish(RecordKind::Event, meta(SourceId::new("sensor")), json!({"n": 1})).expect("publish");

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(seen_a.lock().expect("lock").len(), 1);
    assert_eq!(seen_b.lock().expect("lock").len(), 1);
}

#[tokio::test]
async fn failed_handler_redelivers_same_envelope() {
    let bus = InMemoryBus::new(Arc::new(DefaultSchemaRegistry));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let handler = Arc::new(FlakyHandler { failures_remaining: Mutex::new(2), seen: Arc::clone(&seen) });
    bus.subscribe(RecordKind::Event, "group-a", handler, RedeliveryPolicy::new(Duration::from_millis(5), Duration::from_millis(20), 1.0))
        .expect("subscribe");

    bus.publish(RecordKind::Event, meta(SourceId::new("sensor")), json!({"n": 1})).expect("publish");

    tokio::time::sleep(Duration::from_millis(200)).await;
    let seen = seen.lock().expect("lock");
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].payload["n"], 1);
}

#[tokio::test]
async fn duplicate_subscription_is_rejected() {
    let bus = InMemoryBus::new(Arc::new(DefaultSchemaRegistry));
    let handler = Arc::new(RecordingHandler { seen: Arc::new(Mutex::new(Vec::new())) });
    bus.subscribe(RecordKind::Event, "group-a", Arc::clone(&handler) as Arc<dyn BusHandler>, RedeliveryPolicy::immediate()).expect("first subscribe");
    let result = bus.subscribe(RecordKind::Event, "group-a", handler, RedeliveryPolicy::immediate());
    assert!(result.is_err());
}

#[tokio::test]
async fn subscription_handle_stops_delivery() {
    let bus = InMemoryBus::new(Arc::new(DefaultSchemaRegistry));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let handle = bus.subscribe(RecordKind::Event, "group-a", Arc::new(RecordingHandler { seen: Arc::clone(&seen) }), RedeliveryPolicy::immediate()).expect("subscribe");
    handle.stop();
    tokio::time::sleep(Duration::from_millis(20)).await;
    bus.publish(RecordKind::Event, meta(SourceId::new("sensor")), json!({"n": 1})).expect("publish");
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(seen.lock().expect("lock").len(), 0);
}
