//! Control-plane surface of the session daemon.

use crate::condition::{Condition, Trigger};
use crate::notification::Notification;
use crate::status::{ChannelStatus, ErrorCode};
use crate::Error;

pub trait Daemon {
    type Channel: NotificationChannel;

    /// Connects to the daemon's notification endpoint.
    fn open_channel(&self) -> Result<Self::Channel, Error>;

    fn register_trigger(&self, trigger: &Trigger) -> Result<(), ErrorCode>;

    /// Every trigger currently registered, by any client.
    fn list_triggers(&self) -> Result<Vec<Trigger>, ErrorCode>;
}

/// A live connection to the notification endpoint.
///
/// Dropping the value releases the connection.
pub trait NotificationChannel {
    fn subscribe(&mut self, condition: &Condition) -> ChannelStatus;

    fn unsubscribe(&mut self, condition: &Condition) -> ChannelStatus;

    /// Subscribes to the condition of a registered trigger, found by name.
    ///
    /// The subscription lasts as long as the channel.
    fn subscribe_trigger(&mut self, trigger: &Trigger) -> ChannelStatus;

    /// Checks for a queued notification without blocking.
    fn has_pending_notification(&mut self) -> Result<bool, ChannelStatus>;

    /// Blocks until a notification arrives or the channel reports a status.
    fn next_notification(&mut self) -> Result<Notification, ChannelStatus>;
}
