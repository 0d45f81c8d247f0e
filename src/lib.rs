//! Watch LTTng tracing sessions and report every completed rotation.
//!
//! The session daemon is reached through the [`Daemon`] and
//! [`NotificationChannel`] traits. [`monitor`] watches named sessions for
//! completed rotations; [`listen`] follows every registered notify trigger.
//! With the `lttng` feature enabled on Linux,
//! [`Lttng`] implements them on top of `liblttng-ctl`.

use std::io;

pub mod channel;
pub mod condition;
pub mod config;
pub mod daemon;
pub mod dispatch;
pub mod listen;
pub mod monitor;
pub mod notification;
pub mod registry;
pub mod shutdown;
pub mod status;

pub use channel::{Channel, Pull};
pub use condition::{Action, Condition, SessionName, Trigger};
pub use config::Config;
pub use daemon::{Daemon, NotificationChannel};
pub use dispatch::RotationReport;
pub use monitor::{Monitor, State};
pub use notification::{ArchiveLocation, Evaluation, Notification, RelayProtocol};
pub use registry::Subscription;
pub use shutdown::CancelToken;
pub use status::{ChannelStatus, ConditionType, ErrorCode};

#[cfg(all(target_os = "linux", feature = "lttng"))]
pub use linux::{Lttng, LttngChannel};

#[cfg(all(target_os = "linux", feature = "lttng"))]
mod linux;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to create notification channel, is a session daemon running?")]
    Connection,
    #[error("session name must not be empty")]
    EmptySessionName,
    #[error("failed to register rotation completed trigger for session {session}: {code}")]
    Register { session: SessionName, code: ErrorCode },
    #[error("failed to subscribe to rotation completed condition of session {session}: {status}")]
    Subscribe {
        session: SessionName,
        status: ChannelStatus,
    },
    #[error("failed to list triggers: {0}")]
    ListTriggers(ErrorCode),
    #[error("failed to subscribe to notification of trigger \"{trigger}\": {status}")]
    SubscribeTrigger {
        trigger: String,
        status: ChannelStatus,
    },
    #[error("notification channel was closed by peer")]
    ChannelClosed,
    #[error("notification channel: {0}")]
    Channel(ChannelStatus),
    #[error("unexpected condition type: {0}")]
    UnexpectedCondition(ConditionType),
    #[error("unexpected evaluation type for a rotation completed condition: {0}")]
    UnexpectedEvaluation(ConditionType),
    #[error("notification condition carries no session name")]
    MissingSessionName,
    #[error("unsupported trace archive location: {0}")]
    UnsupportedLocation(ArchiveLocation),
    #[error("invalid value {value:?} for {name}")]
    InvalidConfig { name: &'static str, value: String },
    #[cfg(target_os = "linux")]
    #[error("signal handling: {0}")]
    Signal(#[from] nix::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}
