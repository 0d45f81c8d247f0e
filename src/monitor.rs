//! Setup, polling and shutdown of a rotation watch.

use crate::channel::{Channel, Pull};
use crate::config::Config;
use crate::daemon::{Daemon, NotificationChannel};
use crate::dispatch::{self, RotationReport};
use crate::registry::{self, Subscription};
use crate::shutdown::CancelToken;
use crate::{Error, SessionName};
use std::io::Write;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Setup,
    Polling,
    ShuttingDown,
    Closed,
}

pub struct Monitor<C: NotificationChannel> {
    channel: Channel<C>,
    subscriptions: Vec<Subscription>,
    state: State,
}

impl<C: NotificationChannel> Monitor<C> {
    /// Opens the channel and registers every session in order.
    ///
    /// Stops at the first failure; sessions registered before it keep their
    /// daemon-side triggers.
    pub fn setup<D>(daemon: &D, config: &Config) -> Result<Self, Error>
    where
        D: Daemon<Channel = C>,
    {
        debug!(state = ?State::Setup, sessions = config.sessions.len());
        let mut channel = Channel::open(daemon, config.poll_interval)?;
        let mut subscriptions: Vec<Subscription> = Vec::with_capacity(config.sessions.len());
        for session in &config.sessions {
            let subscription = registry::register(daemon, &mut channel, session)?;
            if !subscriptions.contains(&subscription) {
                subscriptions.push(subscription);
            }
        }
        Ok(Self {
            channel,
            subscriptions,
            state: State::Setup,
        })
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn sessions(&self) -> impl Iterator<Item = &SessionName> {
        self.subscriptions.iter().map(Subscription::session)
    }

    /// Reports every completed rotation until `cancel` fires.
    ///
    /// Each notification is released once `f` has seen its report.
    pub fn poll(
        &mut self,
        cancel: &CancelToken,
        mut f: impl FnMut(&RotationReport) -> Result<(), Error>,
    ) -> Result<(), Error> {
        self.transition(State::Polling);
        while !cancel.is_cancelled() {
            match self.channel.next_notification(cancel)? {
                Pull::Notification(notification) => {
                    let report = dispatch::decode(&notification)?;
                    debug!(session = %report.session, id = report.rotation_id, "rotation completed");
                    f(&report)?;
                }
                Pull::Dropped => warn!("session daemon dropped notifications"),
                // loop condition re-checks the token
                Pull::Interrupted => debug!("wait interrupted"),
                Pull::Cancelled => break,
            }
        }
        self.transition(State::ShuttingDown);
        Ok(())
    }

    pub fn close(mut self) {
        self.transition(State::Closed);
        self.channel.close();
    }

    fn transition(&mut self, next: State) {
        debug!(from = ?self.state, to = ?next, "monitor state");
        self.state = next;
    }
}

/// Runs a watch from setup to shutdown, writing the startup line and one line
/// per completed rotation to `out`.
pub fn run<D: Daemon>(
    daemon: &D,
    config: &Config,
    cancel: &CancelToken,
    out: &mut impl Write,
) -> Result<(), Error> {
    let mut monitor = Monitor::setup(daemon, config)?;
    writeln!(out, "{}", dispatch::banner(monitor.sessions(), config.color))?;
    out.flush()?;
    info!("watching for rotations");

    monitor.poll(cancel, |report| {
        writeln!(out, "{report}")?;
        out.flush()?;
        Ok(())
    })?;
    monitor.close();
    Ok(())
}
