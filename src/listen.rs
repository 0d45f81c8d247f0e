//! Follows every registered trigger that notifies, whatever its condition.

use crate::channel::{Channel, Pull};
use crate::condition::Trigger;
use crate::daemon::Daemon;
use crate::notification::{Evaluation, Notification};
use crate::shutdown::CancelToken;
use crate::status::ConditionType;
use crate::Error;
use std::{io::Write, time::Duration};
use tracing::debug;

/// Registered triggers whose action is, or contains, a notification.
pub fn notify_triggers<D: Daemon>(daemon: &D) -> Result<Vec<Trigger>, Error> {
    let triggers = daemon.list_triggers().map_err(Error::ListTriggers)?;
    debug!(registered = triggers.len(), "listed triggers");
    Ok(triggers
        .into_iter()
        .filter(|t| t.action().notifies())
        .collect())
}

/// One-line description of any notification.
pub fn describe(notification: &Notification) -> String {
    let evaluation = notification.evaluation();
    if let Evaluation::EventRuleHit { trigger_name } = evaluation {
        return format!("Event rule \"{trigger_name}\" notification");
    }
    match evaluation.kind() {
        ConditionType::SessionConsumedSize => "Consumed size notification".into(),
        ConditionType::BufferUsageLow | ConditionType::BufferUsageHigh => {
            "Buffer usage notification".into()
        }
        ConditionType::SessionRotationOngoing => "Session rotation ongoing notification".into(),
        ConditionType::SessionRotationCompleted => {
            "Session rotation completed notification".into()
        }
        ConditionType::EventRuleHit => "Event rule notification".into(),
        ConditionType::Unknown => "Unknown notification type".into(),
    }
}

/// Subscribes to every notify trigger and describes each notification until
/// `cancel` fires. Returns at once when no trigger notifies.
pub fn run<D: Daemon>(
    daemon: &D,
    poll_interval: Duration,
    cancel: &CancelToken,
    out: &mut impl Write,
) -> Result<(), Error> {
    let mut channel = Channel::open(daemon, poll_interval)?;
    let triggers = notify_triggers(daemon)?;
    for trigger in &triggers {
        let name = trigger.name().unwrap_or_default();
        channel
            .subscribe_trigger(trigger)
            .map_err(|status| Error::SubscribeTrigger {
                trigger: name.to_owned(),
                status,
            })?;
        writeln!(out, "Subscribed to notification of trigger \"{name}\"")?;
    }
    if triggers.is_empty() {
        writeln!(out, "No triggers with a notify action found.")?;
        return Ok(());
    }
    out.flush()?;

    while !cancel.is_cancelled() {
        match channel.next_notification(cancel)? {
            Pull::Notification(notification) => writeln!(out, "{}", describe(&notification))?,
            Pull::Dropped => writeln!(out, "Dropped notification")?,
            Pull::Interrupted => debug!("wait interrupted"),
            Pull::Cancelled => break,
        }
        out.flush()?;
    }
    channel.close();
    Ok(())
}
