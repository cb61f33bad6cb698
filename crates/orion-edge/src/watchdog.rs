// orion-edge/src/watchdog.rs
// ============================================================================
// Module: ORION Dead-Man's-Switch
// Description: Sticky watchdog timer forcing a safe transition on silence.
// Purpose: Implement the §4.8 Dead-Man's-Switch state machine.
// Dependencies: tokio, std::sync::Mutex
// ============================================================================

//! ## Overview
//! §4.8: "Scoped acquisition of a timer resource with guaranteed release on
//! drop." [`DeadMansSwitch`] spawns a single-shot `tokio::time::sleep` task
//! per arming and stores its [`tokio::task::JoinHandle`] so `reset`,
//! `stop`, and `Drop` can all abort a stale timer rather than let it race a
//! newer one.
//!
//! Structurally grounded (state vocabulary and "sticky until explicit
//! command" semantics only) on a watchdog driver in the retrieval pack;
//! rehosted here behind a `Mutex`-guarded state machine with an injected
//! trigger capability, since that driver's own implementation targets
//! bare-metal hardware registers.

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use tokio::task::JoinHandle;

use crate::actuator::WatchdogTrigger;

/// Lifecycle state of a [`DeadMansSwitch`] (§4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchdogState {
    /// Counting down toward `expire`.
    Armed,
    /// Fired; sticky until `clear_triggered`.
    Triggered,
    /// Explicitly halted; `reset` is a no-op until a new switch is built.
    Stopped,
}

struct Inner {
    state: WatchdogState,
    armed_at: Option<Instant>,
    handle: Option<JoinHandle<()>>,
}

struct Shared {
    timeout: Duration,
    trigger: Arc<dyn WatchdogTrigger>,
    inner: Mutex<Inner>,
}

impl Shared {
    fn expire(&self) {
        let fired = {
            let Ok(mut inner) = self.inner.lock() else { return };
            if inner.state != WatchdogState::Armed {
                return;
            }
            inner.state = WatchdogState::Triggered;
            inner.armed_at = None;
            inner.handle = None;
            true
        };
        if fired {
            self.trigger.on_trigger();
        }
    }
}

fn spawn_timer(shared: &Arc<Shared>) -> JoinHandle<()> {
    let task_shared = Arc::clone(shared);
    tokio::spawn(async move {
        tokio::time::sleep(task_shared.timeout).await;
        task_shared.expire();
    })
}

/// Sticky single-shot watchdog timer (§4.8).
///
/// Every public method takes the internal lock, performs its state-machine
/// step, and releases the lock before invoking `trigger` (§5: "releases
/// before invoking external callbacks; callbacks MUST NOT re-enter").
pub struct DeadMansSwitch {
    shared: Arc<Shared>,
}

impl DeadMansSwitch {
    /// Builds an armed switch with the given `timeout` and `trigger`
    /// capability, immediately starting the countdown.
    #[must_use]
    pub fn new(timeout: Duration, trigger: Arc<dyn WatchdogTrigger>) -> Self {
        let shared = Arc::new(Shared { timeout, trigger, inner: Mutex::new(Inner { state: WatchdogState::Armed, armed_at: Some(Instant::now()), handle: None }) });
        let handle = spawn_timer(&shared);
        if let Ok(mut inner) = shared.inner.lock() {
            inner.handle = Some(handle);
        }
        Self { shared }
    }

    /// Rearms the timer to a full `timeout`. No-op if TRIGGERED or STOPPED
    /// (§4.8, §8 P8).
    pub fn reset(&self) {
        let Ok(mut inner) = self.shared.inner.lock() else { return };
        if matches!(inner.state, WatchdogState::Triggered | WatchdogState::Stopped) {
            return;
        }
        if let Some(handle) = inner.handle.take() {
            handle.abort();
        }
        inner.state = WatchdogState::Armed;
        inner.armed_at = Some(Instant::now());
        inner.handle = Some(spawn_timer(&self.shared));
    }

    /// The only path out of TRIGGERED. Invoked exclusively by the
    /// identified RESUME command handler; rearms the timer.
    pub fn clear_triggered(&self) {
        let Ok(mut inner) = self.shared.inner.lock() else { return };
        if inner.state != WatchdogState::Triggered {
            return;
        }
        inner.state = WatchdogState::Armed;
        inner.armed_at = Some(Instant::now());
        inner.handle = Some(spawn_timer(&self.shared));
    }

    /// Halts the timer without triggering. §5: "the edge watchdog is
    /// explicitly stopped to prevent a false trigger during shutdown."
    pub fn stop(&self) {
        let Ok(mut inner) = self.shared.inner.lock() else { return };
        if let Some(handle) = inner.handle.take() {
            handle.abort();
        }
        inner.state = WatchdogState::Stopped;
        inner.armed_at = None;
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> WatchdogState {
        self.shared.inner.lock().map_or(WatchdogState::Stopped, |inner| inner.state)
    }

    /// Milliseconds remaining before `expire` fires, or `0` if not ARMED.
    #[must_use]
    pub fn remaining_ms(&self) -> u64 {
        let Ok(inner) = self.shared.inner.lock() else { return 0 };
        let (WatchdogState::Armed, Some(armed_at)) = (inner.state, inner.armed_at) else {
            return 0;
        };
        let elapsed = armed_at.elapsed();
        u64::try_from(self.shared.timeout.saturating_sub(elapsed).as_millis()).unwrap_or(u64::MAX)
    }
}

impl Drop for DeadMansSwitch {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.shared.inner.lock() {
            if let Some(handle) = inner.handle.take() {
                handle.abort();
            }
        }
    }
}
