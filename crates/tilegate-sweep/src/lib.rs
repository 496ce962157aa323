//! Background expiry sweeper for the Tilegate token store.
//!
//! The sweeper owns the *schedule*, never the data: on a fixed cadence
//! it locks the shared [`TokenStore`] and runs
//! [`sweep`](TokenStore::sweep) to evict expired tokens. The store stays
//! correct without it (validation re-checks expiry inline); the sweeper
//! exists so that abandoned tokens do not accumulate in memory for the
//! lifetime of the process.
//!
//! # Scheduling
//!
//! The interval is relative, re-armed after each run completes — a slow
//! sweep delays the next one rather than overlapping it. By default the
//! first run happens immediately on spawn.
//!
//! ```text
//! Scheduled ──(interval elapses)──→ Running ──(sweep done)──→ Scheduled
//!     │                                                          │
//!     └──────────────────(stop / handle dropped)────────────────→ Stopped
//! ```
//!
//! # Shutdown
//!
//! [`ExpirySweeper::stop`] is graceful: a sweep already in progress
//! finishes, no further runs are scheduled, and the call resolves once
//! the task has exited. Dropping the handle without calling `stop` also
//! terminates the task, since the shutdown channel closes.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tilegate_store::TokenStore;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the expiry sweeper.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Pause between the end of one sweep and the start of the next.
    ///
    /// This bounds how long an expired token can linger in memory.
    /// Default: one hour.
    pub interval: Duration,
    /// Run the first sweep immediately on spawn instead of waiting one
    /// interval. Default: true.
    pub run_at_start: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60 * 60),
            run_at_start: true,
        }
    }
}

impl SweepConfig {
    /// Minimum supported interval.
    pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

    /// Create a config for a specific interval with default settings.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            ..Default::default()
        }
    }

    /// Clamp out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`ExpirySweeper::spawn`]. A sub-second
    /// interval would turn the sweeper into a busy loop over the store
    /// lock, so it is raised to [`Self::MIN_INTERVAL`].
    pub fn validated(mut self) -> Self {
        if self.interval < Self::MIN_INTERVAL {
            warn!(
                interval_ms = self.interval.as_millis() as u64,
                min_ms = Self::MIN_INTERVAL.as_millis() as u64,
                "sweep interval below minimum — clamping"
            );
            self.interval = Self::MIN_INTERVAL;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Where the sweeper currently is in its schedule.
///
/// Construction enters `Scheduled` directly; `Stopped` is terminal and
/// reached only through shutdown — the sweeper never stops itself, and
/// has no retry or backoff logic because a sweep cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweeperState {
    /// Waiting for the next run to come due.
    Scheduled,
    /// A sweep is executing right now.
    Running,
    /// Shut down; no further runs will happen.
    Stopped,
}

// ---------------------------------------------------------------------------
// Sweeper handle
// ---------------------------------------------------------------------------

/// Handle to a running expiry sweeper task.
pub struct ExpirySweeper {
    shutdown: watch::Sender<bool>,
    state: watch::Receiver<SweeperState>,
    sweeps: Arc<AtomicU64>,
    handle: JoinHandle<()>,
}

impl ExpirySweeper {
    /// Spawns the sweeper task over a shared store.
    ///
    /// Must be called from within a tokio runtime. The task holds its
    /// own clone of the `Arc`, so the caller's handle stays usable.
    pub fn spawn(store: Arc<Mutex<TokenStore>>, config: SweepConfig) -> Self {
        let config = config.validated();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (state_tx, state_rx) = watch::channel(SweeperState::Scheduled);
        let sweeps = Arc::new(AtomicU64::new(0));

        debug!(
            interval_secs = config.interval.as_secs(),
            run_at_start = config.run_at_start,
            "expiry sweeper started"
        );

        let handle = tokio::spawn(run(
            store,
            config,
            state_tx,
            Arc::clone(&sweeps),
            shutdown_rx,
        ));

        Self {
            shutdown: shutdown_tx,
            state: state_rx,
            sweeps,
            handle,
        }
    }

    /// The sweeper's current position in its schedule.
    pub fn state(&self) -> SweeperState {
        *self.state.borrow()
    }

    /// How many sweeps have completed so far.
    pub fn sweeps_completed(&self) -> u64 {
        self.sweeps.load(Ordering::Relaxed)
    }

    /// A watch on the sweeper's state that outlives the handle.
    ///
    /// Useful for observing the transition to [`SweeperState::Stopped`]
    /// after [`stop`](Self::stop) has consumed the handle.
    pub fn state_watch(&self) -> watch::Receiver<SweeperState> {
        self.state.clone()
    }

    /// Stops the sweeper and waits for the task to exit.
    ///
    /// A sweep already in progress runs to completion; no further runs
    /// are scheduled. Returns the total number of completed sweeps.
    pub async fn stop(self) -> u64 {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
        self.sweeps.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// Task body
// ---------------------------------------------------------------------------

async fn run(
    store: Arc<Mutex<TokenStore>>,
    config: SweepConfig,
    state: watch::Sender<SweeperState>,
    sweeps: Arc<AtomicU64>,
    mut shutdown: watch::Receiver<bool>,
) {
    if !config.run_at_start {
        tokio::select! {
            _ = time::sleep(config.interval) => {}
            _ = shutdown.changed() => {
                state.send_replace(SweeperState::Stopped);
                debug!("expiry sweeper stopped before first run");
                return;
            }
        }
    }

    loop {
        state.send_replace(SweeperState::Running);
        let removed = store.lock().await.sweep(Instant::now());
        sweeps.fetch_add(1, Ordering::Relaxed);
        if removed > 0 {
            info!(removed, "evicted expired login tokens");
        } else {
            trace!("sweep found no expired tokens");
        }
        state.send_replace(SweeperState::Scheduled);

        // Re-arm relative to completion, so a slow sweep pushes the
        // next one out instead of piling up. `changed()` also fires
        // when the handle is dropped and the channel closes.
        tokio::select! {
            _ = time::sleep(config.interval) => {}
            _ = shutdown.changed() => break,
        }
    }

    state.send_replace(SweeperState::Stopped);
    debug!("expiry sweeper stopped");
}
