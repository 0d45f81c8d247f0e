//! Client side of the daemon's notification endpoint.

use crate::condition::{Condition, Trigger};
use crate::daemon::{Daemon, NotificationChannel};
use crate::notification::Notification;
use crate::shutdown::CancelToken;
use crate::status::ChannelStatus;
use crate::Error;
use std::{thread, time::Duration};
use tracing::debug;

/// Result of one wait on the channel.
#[derive(Debug)]
pub enum Pull {
    Notification(Notification),
    /// The daemon discarded notifications it could not queue.
    Dropped,
    /// The wait was interrupted by a signal.
    Interrupted,
    /// The cancel token fired before anything arrived.
    Cancelled,
}

/// Owns the connection and every subscription made on it.
///
/// The connection is released exactly once, when the value is closed or
/// dropped.
pub struct Channel<C: NotificationChannel> {
    inner: C,
    subscriptions: Vec<Condition>,
    poll_interval: Duration,
}

impl<C: NotificationChannel> Channel<C> {
    pub fn open<D>(daemon: &D, poll_interval: Duration) -> Result<Self, Error>
    where
        D: Daemon<Channel = C>,
    {
        let inner = daemon.open_channel()?;
        debug!("notification channel opened");
        Ok(Self {
            inner,
            subscriptions: vec![],
            poll_interval,
        })
    }

    /// Subscribes to `condition`; an existing subscription counts as success.
    pub fn subscribe(&mut self, condition: &Condition) -> Result<(), ChannelStatus> {
        match self.inner.subscribe(condition) {
            ChannelStatus::Ok => {}
            ChannelStatus::AlreadySubscribed => {
                debug!(?condition, "already subscribed");
            }
            status => return Err(status),
        }
        if !self.subscriptions.contains(condition) {
            self.subscriptions.push(condition.clone());
        }
        Ok(())
    }

    /// Subscribes to a registered trigger's condition; an existing
    /// subscription counts as success. Released with the channel.
    pub fn subscribe_trigger(&mut self, trigger: &Trigger) -> Result<(), ChannelStatus> {
        match self.inner.subscribe_trigger(trigger) {
            ChannelStatus::Ok => Ok(()),
            ChannelStatus::AlreadySubscribed => {
                debug!(trigger = trigger.name(), "already subscribed");
                Ok(())
            }
            status => Err(status),
        }
    }

    pub fn unsubscribe(&mut self, condition: &Condition) -> Result<(), ChannelStatus> {
        self.subscriptions.retain(|c| c != condition);
        match self.inner.unsubscribe(condition) {
            ChannelStatus::Ok => Ok(()),
            status => Err(status),
        }
    }

    pub fn subscriptions(&self) -> &[Condition] {
        &self.subscriptions
    }

    /// Waits for the next notification.
    ///
    /// The channel is polled every `poll_interval` and the blocking pull is
    /// only issued once a notification is pending, so `cancel` is observed
    /// within one interval.
    pub fn next_notification(&mut self, cancel: &CancelToken) -> Result<Pull, Error> {
        loop {
            if cancel.is_cancelled() {
                return Ok(Pull::Cancelled);
            }
            match self.inner.has_pending_notification() {
                Ok(true) => break,
                Ok(false) => thread::sleep(self.poll_interval),
                Err(status) => return interpret(status),
            }
        }
        match self.inner.next_notification() {
            Ok(notification) => Ok(Pull::Notification(notification)),
            Err(status) => interpret(status),
        }
    }

    pub fn close(self) {
        drop(self);
    }
}

impl<C: NotificationChannel> Drop for Channel<C> {
    fn drop(&mut self) {
        for condition in self.subscriptions.drain(..) {
            let status = self.inner.unsubscribe(&condition);
            if status != ChannelStatus::Ok {
                debug!(?condition, %status, "unsubscribe failed");
            }
        }
        debug!("notification channel closed");
    }
}

fn interpret(status: ChannelStatus) -> Result<Pull, Error> {
    match status {
        ChannelStatus::NotificationsDropped => Ok(Pull::Dropped),
        ChannelStatus::Interrupted => Ok(Pull::Interrupted),
        ChannelStatus::Closed => Err(Error::ChannelClosed),
        ChannelStatus::Ok
        | ChannelStatus::Error
        | ChannelStatus::AlreadySubscribed
        | ChannelStatus::UnknownCondition
        | ChannelStatus::Invalid
        | ChannelStatus::UnsupportedVersion => Err(Error::Channel(status)),
    }
}
