//! In-memory session daemon used by the integration tests.

#![allow(dead_code)]

use lttng_rotation::{
    ArchiveLocation, CancelToken, ChannelStatus, Condition, Daemon, Error, ErrorCode, Evaluation,
    Notification, NotificationChannel, SessionName, Trigger,
};
use std::{
    cell::{RefCell, RefMut},
    collections::VecDeque,
    rc::Rc,
};

#[derive(Default)]
pub struct Shared {
    pub unreachable: bool,
    pub triggers: Vec<Condition>,
    pub register_calls: Vec<String>,
    pub register_failures: Vec<(String, ErrorCode)>,
    pub subscribe_failures: Vec<(String, ChannelStatus)>,
    pub subscribed: Vec<Condition>,
    /// Triggers as the daemon lists them, including registered ones.
    pub listed: Vec<Trigger>,
    pub list_failure: Option<ErrorCode>,
    pub subscribed_triggers: Vec<String>,
    pub trigger_subscribe_failures: Vec<(String, ChannelStatus)>,
    pub events: VecDeque<Result<Notification, ChannelStatus>>,
    pub opened: usize,
    pub closed: usize,
    pub cancel_when_idle: Option<CancelToken>,
}

#[derive(Clone, Default)]
pub struct FakeDaemon(Rc<RefCell<Shared>>);

impl FakeDaemon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RefMut<'_, Shared> {
        self.0.borrow_mut()
    }

    /// Cancels `token` as soon as the event queue runs dry.
    pub fn stop_when_idle(&self, token: &CancelToken) {
        self.state().cancel_when_idle = Some(token.clone());
    }

    pub fn push(&self, notification: Notification) {
        self.state().events.push_back(Ok(notification));
    }

    pub fn push_status(&self, status: ChannelStatus) {
        self.state().events.push_back(Err(status));
    }

    pub fn push_rotation(&self, session: &str, path: &str) {
        self.push(rotation(session, path));
    }

    pub fn add_trigger(&self, trigger: Trigger) {
        self.state().listed.push(trigger);
    }
}

pub fn session(name: &str) -> SessionName {
    SessionName::new(name).unwrap()
}

pub fn rotation(name: &str, path: &str) -> Notification {
    Notification::new(
        Condition::rotation_completed(session(name)),
        Evaluation::SessionRotationCompleted {
            id: 1,
            location: ArchiveLocation::Local {
                absolute_path: path.into(),
            },
        },
    )
}

fn session_of(condition: &Condition) -> String {
    condition
        .session()
        .map(ToString::to_string)
        .unwrap_or_default()
}

impl Daemon for FakeDaemon {
    type Channel = FakeChannel;

    fn open_channel(&self) -> Result<FakeChannel, Error> {
        let mut state = self.state();
        if state.unreachable {
            return Err(Error::Connection);
        }
        state.opened += 1;
        Ok(FakeChannel(self.0.clone()))
    }

    fn register_trigger(&self, trigger: &Trigger) -> Result<(), ErrorCode> {
        let mut state = self.state();
        let name = session_of(trigger.condition());
        state.register_calls.push(name.clone());
        if let Some((_, code)) = state.register_failures.iter().find(|(s, _)| *s == name) {
            return Err(*code);
        }
        if state.triggers.contains(trigger.condition()) {
            return Err(ErrorCode::TriggerExists);
        }
        state.triggers.push(trigger.condition().clone());
        let listed = Trigger::named(
            format!("rotation-{name}"),
            trigger.condition().clone(),
            trigger.action().clone(),
        );
        state.listed.push(listed);
        Ok(())
    }

    fn list_triggers(&self) -> Result<Vec<Trigger>, ErrorCode> {
        let state = self.state();
        match state.list_failure {
            Some(code) => Err(code),
            None => Ok(state.listed.clone()),
        }
    }
}

pub struct FakeChannel(Rc<RefCell<Shared>>);

impl NotificationChannel for FakeChannel {
    fn subscribe(&mut self, condition: &Condition) -> ChannelStatus {
        let mut state = self.0.borrow_mut();
        let name = session_of(condition);
        if let Some((_, status)) = state.subscribe_failures.iter().find(|(s, _)| *s == name) {
            return *status;
        }
        if state.subscribed.contains(condition) {
            return ChannelStatus::AlreadySubscribed;
        }
        state.subscribed.push(condition.clone());
        ChannelStatus::Ok
    }

    fn unsubscribe(&mut self, condition: &Condition) -> ChannelStatus {
        let mut state = self.0.borrow_mut();
        let before = state.subscribed.len();
        state.subscribed.retain(|c| c != condition);
        if state.subscribed.len() == before {
            ChannelStatus::UnknownCondition
        } else {
            ChannelStatus::Ok
        }
    }

    fn subscribe_trigger(&mut self, trigger: &Trigger) -> ChannelStatus {
        let mut state = self.0.borrow_mut();
        let Some(name) = trigger.name() else {
            return ChannelStatus::Invalid;
        };
        if let Some((_, status)) = state
            .trigger_subscribe_failures
            .iter()
            .find(|(t, _)| t == name)
        {
            return *status;
        }
        if !state.listed.iter().any(|t| t.name() == Some(name)) {
            return ChannelStatus::UnknownCondition;
        }
        if state.subscribed_triggers.iter().any(|t| t == name) {
            return ChannelStatus::AlreadySubscribed;
        }
        state.subscribed_triggers.push(name.to_owned());
        ChannelStatus::Ok
    }

    fn has_pending_notification(&mut self) -> Result<bool, ChannelStatus> {
        let state = self.0.borrow();
        if !state.events.is_empty() {
            return Ok(true);
        }
        if let Some(token) = &state.cancel_when_idle {
            token.cancel();
        }
        Ok(false)
    }

    fn next_notification(&mut self) -> Result<Notification, ChannelStatus> {
        self.0
            .borrow_mut()
            .events
            .pop_front()
            .unwrap_or(Err(ChannelStatus::Closed))
    }
}

impl Drop for FakeChannel {
    fn drop(&mut self) {
        self.0.borrow_mut().closed += 1;
    }
}
