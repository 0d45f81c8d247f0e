//! Turns raw notifications into user-facing reports.

use crate::condition::SessionName;
use crate::notification::{ArchiveLocation, Evaluation, Notification};
use crate::status::ConditionType;
use crate::Error;
use std::{fmt, path::PathBuf};

const HIGHLIGHT: &str = "\x1b[97m";
const RESET: &str = "\x1b[0m";

/// A trace chunk that finished writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationReport {
    pub session: SessionName,
    pub rotation_id: u64,
    pub path: PathBuf,
}

impl fmt::Display for RotationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Completed trace archive chunk for session {} available at: {}",
            self.session,
            self.path.display()
        )
    }
}

/// Only rotation completions written to the local filesystem are accepted.
/// Anything else was never subscribed to, or cannot be reported as a path.
pub fn decode(notification: &Notification) -> Result<RotationReport, Error> {
    let condition = notification.condition();
    if condition.kind() != ConditionType::SessionRotationCompleted {
        return Err(Error::UnexpectedCondition(condition.kind()));
    }
    let session = condition.session().ok_or(Error::MissingSessionName)?;

    let Evaluation::SessionRotationCompleted { id, location } = notification.evaluation() else {
        return Err(Error::UnexpectedEvaluation(notification.evaluation().kind()));
    };
    match location {
        ArchiveLocation::Local { absolute_path } => Ok(RotationReport {
            session: session.clone(),
            rotation_id: *id,
            path: absolute_path.clone(),
        }),
        relay @ ArchiveLocation::Relay { .. } => Err(Error::UnsupportedLocation(relay.clone())),
    }
}

/// Startup line listing the monitored sessions.
pub fn banner<'a>(sessions: impl IntoIterator<Item = &'a SessionName>, color: bool) -> String {
    let names = sessions
        .into_iter()
        .map(|s| {
            if color {
                format!("{HIGHLIGHT}{s}{RESET}")
            } else {
                s.to_string()
            }
        })
        .collect::<Vec<_>>();
    let plural = if names.len() == 1 { "" } else { "s" };
    format!(
        "Monitoring session{plural} {} for rotations",
        names.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::notification::RelayProtocol;

    fn session(name: &str) -> SessionName {
        SessionName::new(name).unwrap()
    }

    fn completed(name: &str, location: ArchiveLocation) -> Notification {
        Notification::new(
            Condition::rotation_completed(session(name)),
            Evaluation::SessionRotationCompleted { id: 7, location },
        )
    }

    #[test]
    fn local_rotation_is_reported() {
        let n = completed(
            "alpha",
            ArchiveLocation::Local {
                absolute_path: "/data/alpha/chunk-1".into(),
            },
        );
        let report = decode(&n).unwrap();
        assert_eq!(report.session, session("alpha"));
        assert_eq!(report.rotation_id, 7);
        let line = report.to_string();
        assert!(line.contains("alpha"));
        assert!(line.contains("/data/alpha/chunk-1"));
    }

    #[test]
    fn relay_location_is_rejected() {
        let n = completed(
            "alpha",
            ArchiveLocation::Relay {
                host: "relay".into(),
                control_port: 5342,
                data_port: 5343,
                protocol: RelayProtocol::Tcp,
                relative_path: "alpha/chunk-1".into(),
            },
        );
        assert!(matches!(
            decode(&n),
            Err(Error::UnsupportedLocation(ArchiveLocation::Relay { .. }))
        ));
    }

    #[test]
    fn other_condition_types_are_rejected() {
        let n = Notification::new(
            Condition::rotation_ongoing(session("alpha")),
            Evaluation::SessionRotationOngoing { id: 1 },
        );
        assert!(matches!(
            decode(&n),
            Err(Error::UnexpectedCondition(
                ConditionType::SessionRotationOngoing
            ))
        ));
    }

    #[test]
    fn mismatched_evaluation_is_rejected() {
        let n = Notification::new(
            Condition::rotation_completed(session("alpha")),
            Evaluation::Other(ConditionType::BufferUsageHigh),
        );
        assert!(matches!(
            decode(&n),
            Err(Error::UnexpectedEvaluation(ConditionType::BufferUsageHigh))
        ));
    }

    #[test]
    fn condition_without_session_is_rejected() {
        let n = Notification::new(
            Condition::new(ConditionType::SessionRotationCompleted, None),
            Evaluation::SessionRotationCompleted {
                id: 1,
                location: ArchiveLocation::Local {
                    absolute_path: "/tmp/x".into(),
                },
            },
        );
        assert!(matches!(decode(&n), Err(Error::MissingSessionName)));
    }

    #[test]
    fn banner_pluralizes() {
        let one = [session("alpha")];
        assert_eq!(banner(&one, false), "Monitoring session alpha for rotations");

        let two = [session("alpha"), session("beta")];
        assert_eq!(
            banner(&two, false),
            "Monitoring sessions alpha, beta for rotations"
        );
        assert_eq!(
            banner(&one, true),
            "Monitoring session \x1b[97malpha\x1b[0m for rotations"
        );
    }
}
