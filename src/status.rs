//! Closed status types reported by the session daemon.

use std::fmt;

/// Outcome of an operation on a notification channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelStatus {
    Ok,
    /// The daemon-side queue overflowed and notifications were discarded.
    NotificationsDropped,
    /// A signal was delivered while waiting.
    Interrupted,
    Error,
    Closed,
    AlreadySubscribed,
    UnknownCondition,
    Invalid,
    UnsupportedVersion,
}

impl ChannelStatus {
    /// Statuses after which the channel is still usable.
    pub fn is_recoverable(self) -> bool {
        matches!(
            self,
            Self::NotificationsDropped | Self::Interrupted | Self::AlreadySubscribed
        )
    }
}

impl fmt::Display for ChannelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ok => "ok",
            Self::NotificationsDropped => "notifications dropped",
            Self::Interrupted => "interrupted",
            Self::Error => "communication error",
            Self::Closed => "closed",
            Self::AlreadySubscribed => "already subscribed",
            Self::UnknownCondition => "unknown condition",
            Self::Invalid => "invalid",
            Self::UnsupportedVersion => "unsupported protocol version",
        })
    }
}

/// Control-plane error codes that trigger registration can fail with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    TriggerExists,
    InvalidTrigger,
    Invalid,
    NoSessionDaemon,
    PermissionDenied,
    Fatal,
    OutOfMemory,
    Unknown,
    Other(i32),
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TriggerExists => f.write_str("trigger already registered"),
            Self::InvalidTrigger => f.write_str("invalid trigger"),
            Self::Invalid => f.write_str("invalid parameter"),
            Self::NoSessionDaemon => f.write_str("no session daemon available"),
            Self::PermissionDenied => f.write_str("permission denied"),
            Self::Fatal => f.write_str("fatal error"),
            Self::OutOfMemory => f.write_str("not enough memory"),
            Self::Unknown => f.write_str("unknown error"),
            Self::Other(code) => write!(f, "error code {code}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionType {
    SessionConsumedSize,
    BufferUsageHigh,
    BufferUsageLow,
    SessionRotationOngoing,
    SessionRotationCompleted,
    EventRuleHit,
    Unknown,
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SessionConsumedSize => "session consumed size",
            Self::BufferUsageHigh => "buffer usage high",
            Self::BufferUsageLow => "buffer usage low",
            Self::SessionRotationOngoing => "session rotation ongoing",
            Self::SessionRotationCompleted => "session rotation completed",
            Self::EventRuleHit => "event rule hit",
            Self::Unknown => "unknown",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transient_statuses_are_recoverable() {
        let recoverable = [
            ChannelStatus::NotificationsDropped,
            ChannelStatus::Interrupted,
            ChannelStatus::AlreadySubscribed,
        ];
        let fatal = [
            ChannelStatus::Error,
            ChannelStatus::Closed,
            ChannelStatus::UnknownCondition,
            ChannelStatus::Invalid,
            ChannelStatus::UnsupportedVersion,
        ];
        assert!(recoverable.iter().all(|s| s.is_recoverable()));
        assert!(!fatal.iter().any(|s| s.is_recoverable()));
    }

    #[test]
    fn other_error_code_shows_raw_value() {
        assert_eq!(ErrorCode::Other(133).to_string(), "error code 133");
        assert_eq!(
            ErrorCode::TriggerExists.to_string(),
            "trigger already registered"
        );
    }
}
