//! Per-session trigger registration and subscription.

use crate::channel::Channel;
use crate::condition::{Action, Condition, SessionName, Trigger};
use crate::daemon::Daemon;
use crate::status::ErrorCode;
use crate::Error;
use tracing::debug;

/// A session whose rotation completions are delivered on the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    session: SessionName,
}

impl Subscription {
    pub fn session(&self) -> &SessionName {
        &self.session
    }

    pub fn condition(&self) -> Condition {
        Condition::rotation_completed(self.session.clone())
    }
}

/// Makes the daemon watch `session` for completed rotations and subscribes
/// `channel` to them.
///
/// A trigger left registered by an earlier run is reused. The local trigger
/// is released on return; the daemon keeps its own copy.
pub fn register<D: Daemon>(
    daemon: &D,
    channel: &mut Channel<D::Channel>,
    session: &SessionName,
) -> Result<Subscription, Error> {
    let trigger = Trigger::new(
        Condition::rotation_completed(session.clone()),
        Action::Notify,
    );

    match daemon.register_trigger(&trigger) {
        Ok(()) => debug!(%session, "rotation completed trigger registered"),
        Err(ErrorCode::TriggerExists) => {
            debug!(%session, "rotation completed trigger already registered")
        }
        Err(code) => {
            return Err(Error::Register {
                session: session.clone(),
                code,
            })
        }
    }

    channel
        .subscribe(trigger.condition())
        .map_err(|status| Error::Subscribe {
            session: session.clone(),
            status,
        })?;

    Ok(Subscription {
        session: session.clone(),
    })
}
