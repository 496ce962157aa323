//! Integration tests for the expiry sweeper.
//!
//! Uses `tokio::time::pause()` (via `start_paused`) so intervals resolve
//! instantly when the test advances the clock. The store's expiry
//! instants come from the real monotonic clock, which tokio does not
//! mock, so tests that need an *expired* token pair a zero lifetime with
//! a millisecond-scale real sleep.

use std::sync::Arc;
use std::time::Duration;

use tilegate_store::{StoreConfig, TokenStore};
use tilegate_sweep::{ExpirySweeper, SweepConfig, SweeperState};
use tokio::sync::Mutex;

// =========================================================================
// Helpers
// =========================================================================

fn shared_store(lifetime: Duration) -> Arc<Mutex<TokenStore>> {
    Arc::new(Mutex::new(TokenStore::new(StoreConfig::with_lifetime(
        lifetime,
    ))))
}

fn config_1m() -> SweepConfig {
    SweepConfig::with_interval(Duration::from_secs(60))
}

/// Lets the spawned sweeper task run without advancing paused time.
async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

// =========================================================================
// SweepConfig
// =========================================================================

#[test]
fn test_default_config_is_hourly_and_immediate() {
    let cfg = SweepConfig::default();
    assert_eq!(cfg.interval, Duration::from_secs(3600));
    assert!(cfg.run_at_start);
}

#[test]
fn test_validated_clamps_subsecond_interval() {
    let cfg = SweepConfig::with_interval(Duration::from_millis(5)).validated();
    assert_eq!(cfg.interval, SweepConfig::MIN_INTERVAL);
}

#[test]
fn test_validated_keeps_sane_interval() {
    let cfg = config_1m().validated();
    assert_eq!(cfg.interval, Duration::from_secs(60));
}

// =========================================================================
// Startup behavior
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_spawn_runs_first_sweep_immediately() {
    let store = shared_store(Duration::from_secs(3600));
    let sweeper = ExpirySweeper::spawn(Arc::clone(&store), config_1m());

    settle().await;

    assert!(sweeper.sweeps_completed() >= 1);
    assert_eq!(sweeper.state(), SweeperState::Scheduled);
    sweeper.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_spawn_without_run_at_start_waits_one_interval() {
    let store = shared_store(Duration::from_secs(3600));
    let sweeper = ExpirySweeper::spawn(
        Arc::clone(&store),
        SweepConfig {
            run_at_start: false,
            ..config_1m()
        },
    );

    settle().await;
    assert_eq!(sweeper.sweeps_completed(), 0, "no sweep before the interval");
    assert_eq!(sweeper.state(), SweeperState::Scheduled);

    tokio::time::sleep(Duration::from_secs(61)).await;
    settle().await;

    assert_eq!(sweeper.sweeps_completed(), 1);
    sweeper.stop().await;
}

// =========================================================================
// Periodic re-arming
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_sweeper_rearms_after_each_run() {
    let store = shared_store(Duration::from_secs(3600));
    let sweeper = ExpirySweeper::spawn(Arc::clone(&store), config_1m());

    settle().await;
    let after_start = sweeper.sweeps_completed();
    assert_eq!(after_start, 1);

    for expected in 2..=4 {
        tokio::time::sleep(Duration::from_secs(61)).await;
        settle().await;
        assert!(
            sweeper.sweeps_completed() >= expected,
            "expected at least {expected} sweeps after {} intervals",
            expected - 1
        );
    }
    sweeper.stop().await;
}

// =========================================================================
// Eviction through the sweeper
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_sweeper_evicts_expired_tokens() {
    // Zero lifetime: the token is expired by the time the sweeper's
    // first (immediate) run observes the real clock.
    let store = shared_store(Duration::ZERO);
    let credential = {
        let mut guard = store.lock().await;
        let (_, credential) = guard.issue("bob").expect("issue should succeed");
        credential
    };
    std::thread::sleep(Duration::from_millis(2));

    let sweeper = ExpirySweeper::spawn(Arc::clone(&store), config_1m());
    settle().await;

    let guard = store.lock().await;
    assert!(guard.is_empty(), "expired token should have been evicted");
    assert!(!guard.validate(&credential).authenticated);
    drop(guard);
    sweeper.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_sweeper_leaves_live_tokens_alone() {
    let store = shared_store(Duration::from_secs(3600));
    let credential = {
        let mut guard = store.lock().await;
        guard.issue("bob").expect("issue should succeed").1
    };

    let sweeper = ExpirySweeper::spawn(Arc::clone(&store), config_1m());
    settle().await;
    tokio::time::sleep(Duration::from_secs(181)).await;
    settle().await;

    let guard = store.lock().await;
    assert_eq!(guard.len(), 1);
    assert!(guard.validate(&credential).authenticated);
    drop(guard);
    sweeper.stop().await;
}

// =========================================================================
// Shutdown
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_stop_resolves_and_reports_runs() {
    let store = shared_store(Duration::from_secs(3600));
    let sweeper = ExpirySweeper::spawn(store, config_1m());
    settle().await;

    let total = sweeper.stop().await;

    assert!(total >= 1);
}

#[tokio::test(start_paused = true)]
async fn test_stop_transitions_state_to_stopped() {
    let store = shared_store(Duration::from_secs(3600));
    let sweeper = ExpirySweeper::spawn(store, config_1m());
    let state = sweeper.state_watch();
    settle().await;

    sweeper.stop().await;

    assert_eq!(*state.borrow(), SweeperState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_stop_before_first_run_is_clean() {
    let store = shared_store(Duration::from_secs(3600));
    let sweeper = ExpirySweeper::spawn(
        store,
        SweepConfig {
            run_at_start: false,
            ..config_1m()
        },
    );
    let state = sweeper.state_watch();
    settle().await;

    let total = sweeper.stop().await;

    assert_eq!(total, 0);
    assert_eq!(*state.borrow(), SweeperState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_terminates_the_task() {
    // Shutdown without an explicit stop(): dropping the handle closes
    // the shutdown channel, which the task treats as a stop signal.
    let store = shared_store(Duration::from_secs(3600));
    let sweeper = ExpirySweeper::spawn(Arc::clone(&store), config_1m());
    let state = sweeper.state_watch();
    settle().await;
    assert_eq!(*state.borrow(), SweeperState::Scheduled);

    drop(sweeper);
    settle().await;

    assert_eq!(*state.borrow(), SweeperState::Stopped);

    // Advance well past several intervals: the task must not come back.
    tokio::time::sleep(Duration::from_secs(600)).await;
    settle().await;
    assert_eq!(*state.borrow(), SweeperState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_no_sweeps_after_stop() {
    let store = shared_store(Duration::from_secs(3600));
    let sweeper = ExpirySweeper::spawn(Arc::clone(&store), config_1m());
    settle().await;
    let state = sweeper.state_watch();

    sweeper.stop().await;

    // Advance well past several intervals: the task stays gone.
    tokio::time::sleep(Duration::from_secs(600)).await;
    settle().await;
    assert_eq!(*state.borrow(), SweeperState::Stopped);
}
