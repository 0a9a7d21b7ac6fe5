//! Integration tests exercising arbitration, dispatch, and hand-off with
//! mock window/session backends in one test process.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use solo_term_broker::{claim_role, notify_leader, resolve_identity, Config, HandOff, LeaderLoop};
use solo_term_channel::{SharedChannel, DEFAULT_REGION_SIZE};
use solo_term_types::{ChannelNames, Identity, Role};
use solo_term_window::mock::{MockSessions, MockSessionsHandle, MockWindows};
use solo_term_window::DEFAULT_WINDOW_KEY;
use tokio::sync::watch;

/// A synthetic identity unique to this test process and call site, so
/// tests can run in parallel without colliding on OS object names.
fn test_identity(tag: &str) -> Identity {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    Identity::from_raw(&format!("broker_{tag}_{}_{n}", std::process::id()))
}

/// A leader loop over a freshly claimed channel, plus its observer handle.
fn leader_for(identity: &Identity, interval: Duration) -> (LeaderLoop, MockSessionsHandle) {
    let channel = claim_role(identity, DEFAULT_REGION_SIZE).unwrap();
    assert_eq!(channel.role(), Role::Leader);
    let sessions = MockSessions::new();
    let handle = sessions.handle();
    (LeaderLoop::new(channel, Box::new(sessions), interval), handle)
}

fn follower_for(identity: &Identity) -> SharedChannel {
    let channel = claim_role(identity, DEFAULT_REGION_SIZE).unwrap();
    assert_eq!(channel.role(), Role::Follower);
    channel
}

#[test]
fn end_to_end_handoff() {
    let identity = test_identity("handoff");
    let (mut leader, sessions) = leader_for(&identity, Duration::from_millis(50));

    let follower = follower_for(&identity);
    let windows = MockWindows::new();
    let outcome = notify_leader(&follower, &windows, DEFAULT_WINDOW_KEY).unwrap();
    assert_eq!(outcome, HandOff::SignalRaised);

    // Next leader tick dispatches exactly once.
    assert!(leader.tick().unwrap());
    assert_eq!(sessions.created(), 1);

    // No intervening raise: the following tick is a no-op.
    assert!(!leader.tick().unwrap());
    assert_eq!(sessions.created(), 1);
}

#[test]
fn window_activation_takes_precedence() {
    let identity = test_identity("window");
    let (mut leader, sessions) = leader_for(&identity, Duration::from_millis(50));

    let follower = follower_for(&identity);
    let windows = MockWindows::new();
    windows.handle().add_window(DEFAULT_WINDOW_KEY);

    let outcome = notify_leader(&follower, &windows, DEFAULT_WINDOW_KEY).unwrap();
    assert_eq!(outcome, HandOff::WindowRaised);
    assert_eq!(windows.handle().raised(), vec![DEFAULT_WINDOW_KEY]);

    // The channel was never touched: nothing for the leader to dispatch.
    assert_eq!(leader.channel().peek_signal(), 0);
    assert!(!leader.tick().unwrap());
    assert_eq!(sessions.created(), 0);
}

#[test]
fn concurrent_raises_coalesce_into_one_dispatch() {
    let identity = test_identity("coalesce");
    let (mut leader, sessions) = leader_for(&identity, Duration::from_millis(50));

    let follower_a = follower_for(&identity);
    let follower_b = follower_for(&identity);
    let windows = MockWindows::new();

    assert_eq!(
        notify_leader(&follower_a, &windows, DEFAULT_WINDOW_KEY).unwrap(),
        HandOff::SignalRaised
    );
    assert_eq!(
        notify_leader(&follower_b, &windows, DEFAULT_WINDOW_KEY).unwrap(),
        HandOff::SignalRaised
    );

    assert!(leader.tick().unwrap());
    assert!(!leader.tick().unwrap());
    assert_eq!(sessions.created(), 1);
}

#[test]
fn handoff_dropped_while_mutex_busy() {
    let identity = test_identity("busy");
    let (leader, _sessions) = leader_for(&identity, Duration::from_millis(50));

    let follower = follower_for(&identity);
    let windows = MockWindows::new();

    let names = ChannelNames::for_identity(&identity);
    let mutex = named_lock::NamedLock::create(&names.mutex).unwrap();
    let guard = mutex.lock().unwrap();

    let outcome = notify_leader(&follower, &windows, DEFAULT_WINDOW_KEY).unwrap();
    assert_eq!(outcome, HandOff::Dropped);
    assert_eq!(leader.channel().peek_signal(), 0);
    drop(guard);
}

#[test]
fn initial_session_created_before_loop() {
    let identity = test_identity("initial");
    let (mut leader, sessions) = leader_for(&identity, Duration::from_millis(50));

    leader.create_initial_session().unwrap();
    assert_eq!(sessions.created(), 1);

    // An idle tick must not create more.
    assert!(!leader.tick().unwrap());
    assert_eq!(sessions.created(), 1);
}

#[test]
fn new_leader_elected_after_teardown() {
    let identity = test_identity("reelect");
    let (leader, _sessions) = leader_for(&identity, Duration::from_millis(50));
    let follower = follower_for(&identity);
    assert!(follower.try_raise_signal().unwrap());
    drop(follower);
    drop(leader);

    // Last handle gone: the next opener is a fresh leader over a
    // zero-filled region.
    let channel = claim_role(&identity, DEFAULT_REGION_SIZE).unwrap();
    assert_eq!(channel.role(), Role::Leader);
    assert_eq!(channel.peek_signal(), 0);
}

#[test]
fn identity_override_from_config() {
    let mut config = Config::default();
    config.identity.user = Some("ci runner@2".to_string());
    let identity = resolve_identity(&config).unwrap();
    assert_eq!(identity.as_str(), "ci_runner_2");
}

#[test]
fn os_identity_resolves() {
    // Whatever the OS account is, derivation must be deterministic.
    let config = Config::default();
    let a = resolve_identity(&config).unwrap();
    let b = resolve_identity(&config).unwrap();
    assert_eq!(a, b);
}

#[tokio::test(start_paused = true)]
async fn run_loop_dispatches_and_stops() {
    let identity = test_identity("runloop");
    let (mut leader, sessions) = leader_for(&identity, Duration::from_millis(100));

    let follower = follower_for(&identity);
    assert!(follower.try_raise_signal().unwrap());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let driver = async {
        tokio::time::sleep(Duration::from_millis(350)).await;
        shutdown_tx.send(true).unwrap();
    };

    let (run_result, ()) = tokio::join!(leader.run(shutdown_rx), driver);
    run_result.unwrap();

    // The raise before the loop started is dispatched exactly once across
    // all ticks that ran.
    assert_eq!(sessions.created(), 1);
}
