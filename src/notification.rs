//! Events delivered on a notification channel.

use crate::condition::Condition;
use crate::status::ConditionType;
use std::{fmt, path::PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    condition: Condition,
    evaluation: Evaluation,
}

impl Notification {
    pub fn new(condition: Condition, evaluation: Evaluation) -> Self {
        Self {
            condition,
            evaluation,
        }
    }

    /// The condition that was matched.
    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// Details of this particular match.
    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    SessionRotationCompleted { id: u64, location: ArchiveLocation },
    SessionRotationOngoing { id: u64 },
    EventRuleHit { trigger_name: String },
    Other(ConditionType),
}

impl Evaluation {
    pub fn kind(&self) -> ConditionType {
        match self {
            Self::SessionRotationCompleted { .. } => ConditionType::SessionRotationCompleted,
            Self::SessionRotationOngoing { .. } => ConditionType::SessionRotationOngoing,
            Self::EventRuleHit { .. } => ConditionType::EventRuleHit,
            Self::Other(kind) => *kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayProtocol {
    Tcp,
}

impl fmt::Display for RelayProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp => f.write_str("tcp"),
        }
    }
}

/// Where a completed trace chunk was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveLocation {
    Local {
        absolute_path: PathBuf,
    },
    Relay {
        host: String,
        control_port: u16,
        data_port: u16,
        protocol: RelayProtocol,
        relative_path: String,
    },
}

impl fmt::Display for ArchiveLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local { absolute_path } => write!(f, "{}", absolute_path.display()),
            Self::Relay {
                host,
                control_port,
                data_port,
                protocol,
                relative_path,
            } => write!(
                f,
                "{protocol}://{host}:{control_port}:{data_port}/{}",
                relative_path.trim_start_matches('/')
            ),
        }
    }
}
