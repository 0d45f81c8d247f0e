mod common;

use common::{session, FakeDaemon};
use lttng_rotation::{registry, CancelToken, Channel, ChannelStatus, Condition, Pull};
use std::time::Duration;

const INTERVAL: Duration = Duration::from_millis(1);

#[test]
fn subscribe_twice_keeps_one_subscription() {
    let daemon = FakeDaemon::new();
    let mut channel = Channel::open(&daemon, INTERVAL).unwrap();
    let condition = Condition::rotation_completed(session("alpha"));

    channel.subscribe(&condition).unwrap();
    channel.subscribe(&condition).unwrap();
    assert_eq!(channel.subscriptions(), [condition.clone()]);
    assert_eq!(daemon.state().subscribed.len(), 1);

    channel.unsubscribe(&condition).unwrap();
    assert!(channel.subscriptions().is_empty());
    assert_eq!(
        channel.unsubscribe(&condition),
        Err(ChannelStatus::UnknownCondition)
    );
}

#[test]
fn close_releases_subscriptions_once() {
    let daemon = FakeDaemon::new();
    let mut channel = Channel::open(&daemon, INTERVAL).unwrap();
    let subscription = registry::register(&daemon, &mut channel, &session("alpha")).unwrap();
    assert_eq!(subscription.session(), &session("alpha"));
    assert_eq!(daemon.state().subscribed, [subscription.condition()]);

    channel.close();
    let state = daemon.state();
    assert!(state.subscribed.is_empty());
    assert_eq!(state.closed, 1);
}

#[test]
fn register_twice_is_not_an_error() {
    let daemon = FakeDaemon::new();
    let mut channel = Channel::open(&daemon, INTERVAL).unwrap();

    registry::register(&daemon, &mut channel, &session("alpha")).unwrap();
    registry::register(&daemon, &mut channel, &session("alpha")).unwrap();

    let state = daemon.state();
    assert_eq!(state.triggers.len(), 1);
    assert_eq!(state.subscribed.len(), 1);
}

#[test]
fn idle_wait_observes_cancellation() {
    let daemon = FakeDaemon::new();
    let cancel = CancelToken::new();
    daemon.stop_when_idle(&cancel);
    let mut channel = Channel::open(&daemon, INTERVAL).unwrap();

    assert!(matches!(
        channel.next_notification(&cancel).unwrap(),
        Pull::Cancelled
    ));
}

#[test]
fn pending_notification_is_pulled() {
    let daemon = FakeDaemon::new();
    daemon.push_rotation("alpha", "/data/alpha/chunk-1");
    let mut channel = Channel::open(&daemon, INTERVAL).unwrap();

    match channel.next_notification(&CancelToken::new()).unwrap() {
        Pull::Notification(n) => {
            assert_eq!(n.condition().session(), Some(&session("alpha")));
        }
        other => panic!("unexpected pull: {other:?}"),
    }
    assert!(daemon.state().events.is_empty());
}
