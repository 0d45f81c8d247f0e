//! Interest declarations registered with the session daemon.

use crate::status::ConditionType;
use crate::Error;
use std::{fmt, str::FromStr};

/// Name of a tracing session. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionName(String);

impl SessionName {
    pub fn new(name: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptySessionName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SessionName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for SessionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A predicate over daemon state that a client can be notified about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Condition {
    kind: ConditionType,
    session: Option<SessionName>,
}

impl Condition {
    pub fn new(kind: ConditionType, session: Option<SessionName>) -> Self {
        Self { kind, session }
    }

    pub fn rotation_completed(session: SessionName) -> Self {
        Self::new(ConditionType::SessionRotationCompleted, Some(session))
    }

    pub fn rotation_ongoing(session: SessionName) -> Self {
        Self::new(ConditionType::SessionRotationOngoing, Some(session))
    }

    pub fn kind(&self) -> ConditionType {
        self.kind
    }

    pub fn session(&self) -> Option<&SessionName> {
        self.session.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Notify,
    /// Several actions run in order.
    Group(Vec<Action>),
    /// Session control actions (start, stop, rotate, snapshot).
    Other,
}

impl Action {
    /// Whether the action, or any action of a group, notifies clients.
    pub fn notifies(&self) -> bool {
        match self {
            Self::Notify => true,
            Self::Group(actions) => actions.iter().any(|a| matches!(a, Self::Notify)),
            Self::Other => false,
        }
    }
}

/// A condition bound to the action the daemon takes when it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    name: Option<String>,
    condition: Condition,
    action: Action,
}

impl Trigger {
    pub fn new(condition: Condition, action: Action) -> Self {
        Self {
            name: None,
            condition,
            action,
        }
    }

    /// A trigger as listed by the daemon, which names every registered trigger.
    pub fn named(name: impl Into<String>, condition: Condition, action: Action) -> Self {
        Self {
            name: Some(name.into()),
            condition,
            action,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    pub fn action(&self) -> &Action {
        &self.action
    }
}
