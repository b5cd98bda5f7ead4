// ── Recurring poll cycles ──
//
// Two independent timer loops bound to the session lifecycle: a fast
// cycle (stats + events) and an optional sampling cycle (sensor
// inventory). Each tick spawns its refresh as a detached task, so a
// slow response never delays the next tick's scheduling. `start` and
// `stop` are idempotent — repeated session transitions can never
// accumulate timers.

use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::monitor::Monitor;

struct RunningCycles {
    cancel: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

/// Owner of the recurring refresh timers.
pub(crate) struct PollScheduler {
    running: Mutex<Option<RunningCycles>>,
}

impl PollScheduler {
    pub(crate) fn new() -> Self {
        Self {
            running: Mutex::new(None),
        }
    }

    /// Start the poll cycles. No-op when already running.
    pub(crate) fn start(
        &self,
        monitor: Monitor,
        fast_period: Duration,
        sample_period: Option<Duration>,
    ) {
        let mut guard = self.running.lock().expect("scheduler lock poisoned");
        if guard.is_some() {
            debug!("poll cycles already running");
            return;
        }

        let cancel = CancellationToken::new();
        let mut handles = Vec::with_capacity(2);

        handles.push(tokio::spawn(fast_cycle(
            monitor.clone(),
            fast_period,
            cancel.clone(),
        )));

        if let Some(period) = sample_period {
            handles.push(tokio::spawn(sample_cycle(monitor, period, cancel.clone())));
        }

        debug!(?fast_period, ?sample_period, "poll cycles started");
        *guard = Some(RunningCycles { cancel, handles });
    }

    /// Cancel future ticks. Safe to call when already stopped.
    ///
    /// In-flight refreshes are not aborted; their late completions
    /// apply to the store through the usual guarded paths.
    pub(crate) fn stop(&self) {
        let mut guard = self.running.lock().expect("scheduler lock poisoned");
        if let Some(running) = guard.take() {
            running.cancel.cancel();
            // Loop tasks exit on their next poll; nothing to await here.
            drop(running.handles);
            debug!("poll cycles stopped");
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running
            .lock()
            .expect("scheduler lock poisoned")
            .is_some()
    }
}

/// Fast cycle: dashboard stats + events, refreshed concurrently per tick.
async fn fast_cycle(monitor: Monitor, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.tick().await; // initial load happens at login, not here

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                let m = monitor.clone();
                tokio::spawn(async move { m.refresh_fast().await });
            }
        }
    }
}

/// Sampling cycle: sensor inventory refresh.
async fn sample_cycle(monitor: Monitor, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.tick().await;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                let m = monitor.clone();
                tokio::spawn(async move { m.refresh_sensors().await });
            }
        }
    }
}
