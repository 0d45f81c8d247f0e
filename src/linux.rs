use crate::condition::{Action, Condition, SessionName, Trigger};
use crate::daemon::{Daemon, NotificationChannel};
use crate::notification::{ArchiveLocation, Evaluation, Notification, RelayProtocol};
use crate::status::{ChannelStatus, ConditionType, ErrorCode};
use crate::Error;
use std::{
    ffi::{self, CStr, CString, OsStr},
    os::unix::ffi::OsStrExt,
    path::PathBuf,
    ptr,
};
use tracing::{debug, warn};

#[allow(
    non_upper_case_globals,
    non_snake_case,
    dead_code,
    non_camel_case_types
)]
mod lttng;

#[link(name = "lttng-ctl")]
unsafe extern "C" {}

/// Native object released with its matching destroy function.
struct Owned<T> {
    ptr: *mut T,
    destroy: unsafe extern "C" fn(*mut T),
}

impl<T> Owned<T> {
    fn new(ptr: *mut T, destroy: unsafe extern "C" fn(*mut T)) -> Option<Self> {
        if ptr.is_null() {
            None
        } else {
            Some(Self { ptr, destroy })
        }
    }
}

impl<T> Drop for Owned<T> {
    fn drop(&mut self) {
        unsafe { (self.destroy)(self.ptr) }
    }
}

/// The local LTTng session daemon, reached through liblttng-ctl.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lttng;

impl Daemon for Lttng {
    type Channel = LttngChannel;

    fn open_channel(&self) -> Result<LttngChannel, Error> {
        let h = unsafe {
            lttng::lttng_notification_channel_create(
                lttng::lttng_session_daemon_notification_endpoint,
            )
        };
        if h.is_null() {
            return Err(Error::Connection);
        }
        Ok(LttngChannel { h })
    }

    fn register_trigger(&self, trigger: &Trigger) -> Result<(), ErrorCode> {
        let condition = native_condition(trigger.condition()).ok_or(ErrorCode::Invalid)?;
        let action = match trigger.action() {
            Action::Notify => Owned::new(
                unsafe { lttng::lttng_action_notify_create() },
                lttng::lttng_action_destroy,
            ),
            Action::Group(_) | Action::Other => return Err(ErrorCode::InvalidTrigger),
        }
        .ok_or(ErrorCode::OutOfMemory)?;
        let native = Owned::new(
            unsafe { lttng::lttng_trigger_create(condition.ptr, action.ptr) },
            lttng::lttng_trigger_destroy,
        )
        .ok_or(ErrorCode::InvalidTrigger)?;

        let ret = unsafe { lttng::lttng_register_trigger(native.ptr) };
        if ret == 0 {
            return Ok(());
        }
        debug!(code = -ret, message = %strerror(ret), "lttng_register_trigger");
        Err(error_code(-ret))
    }

    fn list_triggers(&self) -> Result<Vec<Trigger>, ErrorCode> {
        let list = TriggerList::fetch()?;
        let triggers = list.iter()?.map(read_trigger).collect();
        Ok(triggers)
    }
}

/// Snapshot of the triggers registered with the daemon.
struct TriggerList(Owned<lttng::lttng_triggers>);

impl TriggerList {
    fn fetch() -> Result<Self, ErrorCode> {
        let mut raw = ptr::null_mut();
        let ret = unsafe { lttng::lttng_list_triggers(&mut raw) };
        // Older releases report success as 0, newer ones as LTTNG_OK.
        if ret != 0 && ret != lttng::LTTNG_OK {
            let code = ret.abs();
            debug!(code, message = %strerror(-code), "lttng_list_triggers");
            return Err(error_code(code));
        }
        Owned::new(raw, lttng::lttng_triggers_destroy)
            .map(Self)
            .ok_or(ErrorCode::Fatal)
    }

    fn iter(&self) -> Result<impl Iterator<Item = *const lttng::lttng_trigger> + '_, ErrorCode> {
        let mut count = 0;
        let status = unsafe { lttng::lttng_triggers_get_count(self.0.ptr, &mut count) };
        if status != lttng::LTTNG_TRIGGER_STATUS_OK {
            warn!(status, "lttng_triggers_get_count failed");
            return Err(ErrorCode::Fatal);
        }
        Ok((0..count)
            .map(move |i| unsafe { lttng::lttng_triggers_get_at_index(self.0.ptr, i) })
            .filter(|t| !t.is_null()))
    }
}

fn read_trigger(trigger: *const lttng::lttng_trigger) -> Trigger {
    let condition = unsafe { lttng::lttng_trigger_get_const_condition(trigger) };
    let kind = if condition.is_null() {
        ConditionType::Unknown
    } else {
        condition_type(unsafe { lttng::lttng_condition_get_type(condition) })
    };
    let session = match kind {
        ConditionType::SessionRotationCompleted | ConditionType::SessionRotationOngoing => {
            read_session_name(condition)
        }
        _ => None,
    };
    let condition = Condition::new(kind, session);
    let action = read_action(unsafe { lttng::lttng_trigger_get_const_action(trigger) });
    match trigger_name(trigger) {
        Some(name) => Trigger::named(name, condition, action),
        None => Trigger::new(condition, action),
    }
}

fn trigger_name(trigger: *const lttng::lttng_trigger) -> Option<String> {
    let mut name = ptr::null();
    let status = unsafe { lttng::lttng_trigger_get_name(trigger, &mut name) };
    if status != lttng::LTTNG_TRIGGER_STATUS_OK {
        return None;
    }
    unsafe { owned_string(name) }
}

fn read_action(action: *const lttng::lttng_action) -> Action {
    if action.is_null() {
        return Action::Other;
    }
    match unsafe { lttng::lttng_action_get_type(action) } {
        lttng::LTTNG_ACTION_TYPE_NOTIFY => Action::Notify,
        lttng::LTTNG_ACTION_TYPE_GROUP => {
            let mut count = 0;
            let status = unsafe { lttng::lttng_action_group_get_count(action, &mut count) };
            if status != lttng::LTTNG_ACTION_STATUS_OK {
                warn!(status, "lttng_action_group_get_count failed");
                return Action::Group(vec![]);
            }
            Action::Group(
                (0..count)
                    .map(|i| read_action(unsafe {
                        lttng::lttng_action_group_get_at_index_const(action, i)
                    }))
                    .collect(),
            )
        }
        _ => Action::Other,
    }
}

pub struct LttngChannel {
    h: *mut lttng::lttng_notification_channel,
}

impl Drop for LttngChannel {
    fn drop(&mut self) {
        unsafe {
            lttng::lttng_notification_channel_destroy(self.h);
        }
    }
}

unsafe impl Send for LttngChannel {}

impl NotificationChannel for LttngChannel {
    fn subscribe(&mut self, condition: &Condition) -> ChannelStatus {
        let Some(native) = native_condition(condition) else {
            return ChannelStatus::Invalid;
        };
        channel_status(unsafe { lttng::lttng_notification_channel_subscribe(self.h, native.ptr) })
    }

    fn unsubscribe(&mut self, condition: &Condition) -> ChannelStatus {
        let Some(native) = native_condition(condition) else {
            return ChannelStatus::Invalid;
        };
        channel_status(unsafe {
            lttng::lttng_notification_channel_unsubscribe(self.h, native.ptr)
        })
    }

    fn subscribe_trigger(&mut self, trigger: &Trigger) -> ChannelStatus {
        let Some(name) = trigger.name() else {
            return ChannelStatus::Invalid;
        };
        // Subscribe with the daemon's copy of the condition; only rotation
        // conditions can be rebuilt locally.
        let list = match TriggerList::fetch() {
            Ok(list) => list,
            Err(code) => {
                warn!(%code, "cannot list triggers");
                return ChannelStatus::Error;
            }
        };
        let found = match list.iter() {
            Ok(mut triggers) => triggers.find(|&t| trigger_name(t).as_deref() == Some(name)),
            Err(_) => return ChannelStatus::Error,
        };
        let Some(native) = found else {
            return ChannelStatus::UnknownCondition;
        };
        let condition = unsafe { lttng::lttng_trigger_get_const_condition(native) };
        if condition.is_null() {
            return ChannelStatus::Invalid;
        }
        channel_status(unsafe { lttng::lttng_notification_channel_subscribe(self.h, condition) })
    }

    fn has_pending_notification(&mut self) -> Result<bool, ChannelStatus> {
        let mut pending = false;
        let status = unsafe {
            lttng::lttng_notification_channel_has_pending_notification(self.h, &mut pending)
        };
        match channel_status(status) {
            ChannelStatus::Ok => Ok(pending),
            status => Err(status),
        }
    }

    fn next_notification(&mut self) -> Result<Notification, ChannelStatus> {
        let mut raw = ptr::null_mut();
        let status =
            unsafe { lttng::lttng_notification_channel_get_next_notification(self.h, &mut raw) };
        match channel_status(status) {
            ChannelStatus::Ok => {}
            status => return Err(status),
        }
        let notification =
            Owned::new(raw, lttng::lttng_notification_destroy).ok_or(ChannelStatus::Error)?;
        read_notification(&notification)
    }
}

fn native_condition(condition: &Condition) -> Option<Owned<lttng::lttng_condition>> {
    let ptr = unsafe {
        match condition.kind() {
            ConditionType::SessionRotationCompleted => {
                lttng::lttng_condition_session_rotation_completed_create()
            }
            ConditionType::SessionRotationOngoing => {
                lttng::lttng_condition_session_rotation_ongoing_create()
            }
            _ => return None,
        }
    };
    let native = Owned::new(ptr, lttng::lttng_condition_destroy)?;
    if let Some(session) = condition.session() {
        // Interior NULs cannot cross the C boundary; report as invalid.
        let name = CString::new(session.as_str()).ok()?;
        let status = unsafe {
            lttng::lttng_condition_session_rotation_set_session_name(native.ptr, name.as_ptr())
        };
        if status != lttng::LTTNG_CONDITION_STATUS_OK {
            return None;
        }
    }
    Some(native)
}

/// Copies a native notification into an owned value.
fn read_notification(
    notification: &Owned<lttng::lttng_notification>,
) -> Result<Notification, ChannelStatus> {
    let condition = unsafe { lttng::lttng_notification_get_condition(notification.ptr) };
    let evaluation = unsafe { lttng::lttng_notification_get_evaluation(notification.ptr) };
    if condition.is_null() || evaluation.is_null() {
        warn!("notification without condition or evaluation");
        return Err(ChannelStatus::Invalid);
    }

    let kind = condition_type(unsafe { lttng::lttng_condition_get_type(condition) });
    let session = match kind {
        ConditionType::SessionRotationCompleted | ConditionType::SessionRotationOngoing => {
            read_session_name(condition)
        }
        _ => None,
    };

    let evaluation = match condition_type(unsafe { lttng::lttng_evaluation_get_type(evaluation) })
    {
        ConditionType::SessionRotationCompleted => Evaluation::SessionRotationCompleted {
            id: read_rotation_id(evaluation)?,
            location: read_location(evaluation)?,
        },
        ConditionType::SessionRotationOngoing => Evaluation::SessionRotationOngoing {
            id: read_rotation_id(evaluation)?,
        },
        ConditionType::EventRuleHit => Evaluation::EventRuleHit {
            trigger_name: read_hit_trigger_name(evaluation)?,
        },
        other => Evaluation::Other(other),
    };

    Ok(Notification::new(Condition::new(kind, session), evaluation))
}

fn read_session_name(condition: *const lttng::lttng_condition) -> Option<SessionName> {
    let mut name = ptr::null();
    let status =
        unsafe { lttng::lttng_condition_session_rotation_get_session_name(condition, &mut name) };
    if status != lttng::LTTNG_CONDITION_STATUS_OK {
        return None;
    }
    unsafe { owned_string(name) }.and_then(|name| SessionName::new(name).ok())
}

fn read_rotation_id(evaluation: *const lttng::lttng_evaluation) -> Result<u64, ChannelStatus> {
    let mut id = 0;
    check(
        unsafe { lttng::lttng_evaluation_session_rotation_get_id(evaluation, &mut id) },
        lttng::LTTNG_EVALUATION_STATUS_OK,
        "lttng_evaluation_session_rotation_get_id",
    )?;
    Ok(id)
}

fn read_hit_trigger_name(
    evaluation: *const lttng::lttng_evaluation,
) -> Result<String, ChannelStatus> {
    let mut name = ptr::null();
    check(
        unsafe { lttng::lttng_evaluation_event_rule_get_trigger_name(evaluation, &mut name) },
        lttng::LTTNG_EVALUATION_STATUS_OK,
        "lttng_evaluation_event_rule_get_trigger_name",
    )?;
    unsafe { required_string(name, "trigger name") }
}

fn read_location(
    evaluation: *const lttng::lttng_evaluation,
) -> Result<ArchiveLocation, ChannelStatus> {
    let mut location = ptr::null();
    check(
        unsafe {
            lttng::lttng_evaluation_session_rotation_completed_get_location(evaluation, &mut location)
        },
        lttng::LTTNG_EVALUATION_STATUS_OK,
        "lttng_evaluation_session_rotation_completed_get_location",
    )?;
    if location.is_null() {
        warn!("rotation completed without an archive location");
        return Err(ChannelStatus::Invalid);
    }

    match unsafe { lttng::lttng_trace_archive_location_get_type(location) } {
        lttng::LTTNG_TRACE_ARCHIVE_LOCATION_TYPE_LOCAL => {
            let mut path = ptr::null();
            check(
                unsafe {
                    lttng::lttng_trace_archive_location_local_get_absolute_path(location, &mut path)
                },
                LOCATION_OK,
                "lttng_trace_archive_location_local_get_absolute_path",
            )?;
            if path.is_null() {
                warn!("local archive location without a path");
                return Err(ChannelStatus::Invalid);
            }
            let bytes = unsafe { CStr::from_ptr(path) }.to_bytes();
            Ok(ArchiveLocation::Local {
                absolute_path: PathBuf::from(OsStr::from_bytes(bytes)),
            })
        }
        lttng::LTTNG_TRACE_ARCHIVE_LOCATION_TYPE_RELAY => {
            let (mut host, mut relative_path) = (ptr::null(), ptr::null());
            let (mut control_port, mut data_port, mut protocol) = (0, 0, 0);
            unsafe {
                check(
                    lttng::lttng_trace_archive_location_relay_get_host(location, &mut host),
                    LOCATION_OK,
                    "lttng_trace_archive_location_relay_get_host",
                )?;
                check(
                    lttng::lttng_trace_archive_location_relay_get_control_port(
                        location,
                        &mut control_port,
                    ),
                    LOCATION_OK,
                    "lttng_trace_archive_location_relay_get_control_port",
                )?;
                check(
                    lttng::lttng_trace_archive_location_relay_get_data_port(
                        location,
                        &mut data_port,
                    ),
                    LOCATION_OK,
                    "lttng_trace_archive_location_relay_get_data_port",
                )?;
                check(
                    lttng::lttng_trace_archive_location_relay_get_protocol_type(
                        location,
                        &mut protocol,
                    ),
                    LOCATION_OK,
                    "lttng_trace_archive_location_relay_get_protocol_type",
                )?;
                check(
                    lttng::lttng_trace_archive_location_relay_get_relative_path(
                        location,
                        &mut relative_path,
                    ),
                    LOCATION_OK,
                    "lttng_trace_archive_location_relay_get_relative_path",
                )?;
            }
            let protocol = match protocol {
                lttng::LTTNG_TRACE_ARCHIVE_LOCATION_RELAY_PROTOCOL_TYPE_TCP => RelayProtocol::Tcp,
                other => {
                    warn!(protocol = other, "unknown relay protocol");
                    return Err(ChannelStatus::Invalid);
                }
            };
            Ok(ArchiveLocation::Relay {
                host: unsafe { required_string(host, "relay host") }?,
                control_port,
                data_port,
                protocol,
                relative_path: unsafe { required_string(relative_path, "relay path") }?,
            })
        }
        other => {
            warn!(location_type = other, "unknown trace archive location type");
            Err(ChannelStatus::Invalid)
        }
    }
}

const LOCATION_OK: ffi::c_int = lttng::LTTNG_TRACE_ARCHIVE_LOCATION_STATUS_OK;

/// Fails unless `status` is the `ok` value of the call's status enum.
fn check(status: ffi::c_int, ok: ffi::c_int, call: &'static str) -> Result<(), ChannelStatus> {
    if status == ok {
        Ok(())
    } else {
        warn!(call, status, "lttng call failed");
        Err(ChannelStatus::Invalid)
    }
}

unsafe fn owned_string(s: *const ffi::c_char) -> Option<String> {
    if s.is_null() {
        return None;
    }
    Some(CStr::from_ptr(s).to_string_lossy().into_owned())
}

/// Like `owned_string`, but a missing string makes the notification invalid.
unsafe fn required_string(
    s: *const ffi::c_char,
    what: &'static str,
) -> Result<String, ChannelStatus> {
    unsafe { owned_string(s) }.ok_or_else(|| {
        warn!(what, "missing string in notification");
        ChannelStatus::Invalid
    })
}

fn strerror(code: ffi::c_int) -> String {
    unsafe { owned_string(lttng::lttng_strerror(code)) }.unwrap_or_default()
}

fn channel_status(raw: ffi::c_int) -> ChannelStatus {
    match raw {
        lttng::LTTNG_NOTIFICATION_CHANNEL_STATUS_OK => ChannelStatus::Ok,
        lttng::LTTNG_NOTIFICATION_CHANNEL_STATUS_NOTIFICATIONS_DROPPED => {
            ChannelStatus::NotificationsDropped
        }
        lttng::LTTNG_NOTIFICATION_CHANNEL_STATUS_INTERRUPTED => ChannelStatus::Interrupted,
        lttng::LTTNG_NOTIFICATION_CHANNEL_STATUS_CLOSED => ChannelStatus::Closed,
        lttng::LTTNG_NOTIFICATION_CHANNEL_STATUS_ALREADY_SUBSCRIBED => {
            ChannelStatus::AlreadySubscribed
        }
        lttng::LTTNG_NOTIFICATION_CHANNEL_STATUS_UNKNOWN_CONDITION => {
            ChannelStatus::UnknownCondition
        }
        lttng::LTTNG_NOTIFICATION_CHANNEL_STATUS_INVALID => ChannelStatus::Invalid,
        lttng::LTTNG_NOTIFICATION_CHANNEL_STATUS_UNSUPPORTED_VERSION => {
            ChannelStatus::UnsupportedVersion
        }
        lttng::LTTNG_NOTIFICATION_CHANNEL_STATUS_ERROR => ChannelStatus::Error,
        other => {
            warn!(status = other, "unrecognized notification channel status");
            ChannelStatus::Error
        }
    }
}

fn condition_type(raw: ffi::c_int) -> ConditionType {
    match raw {
        lttng::LTTNG_CONDITION_TYPE_SESSION_CONSUMED_SIZE => ConditionType::SessionConsumedSize,
        lttng::LTTNG_CONDITION_TYPE_BUFFER_USAGE_HIGH => ConditionType::BufferUsageHigh,
        lttng::LTTNG_CONDITION_TYPE_BUFFER_USAGE_LOW => ConditionType::BufferUsageLow,
        lttng::LTTNG_CONDITION_TYPE_SESSION_ROTATION_ONGOING => {
            ConditionType::SessionRotationOngoing
        }
        lttng::LTTNG_CONDITION_TYPE_SESSION_ROTATION_COMPLETED => {
            ConditionType::SessionRotationCompleted
        }
        lttng::LTTNG_CONDITION_TYPE_EVENT_RULE_HIT => ConditionType::EventRuleHit,
        _ => ConditionType::Unknown,
    }
}

/// `code` is the positive `lttng_error_code`.
fn error_code(code: ffi::c_int) -> ErrorCode {
    match code {
        lttng::LTTNG_ERR_TRIGGER_EXISTS => ErrorCode::TriggerExists,
        lttng::LTTNG_ERR_INVALID_TRIGGER => ErrorCode::InvalidTrigger,
        lttng::LTTNG_ERR_INVALID => ErrorCode::Invalid,
        lttng::LTTNG_ERR_NO_SESSIOND => ErrorCode::NoSessionDaemon,
        lttng::LTTNG_ERR_EPERM => ErrorCode::PermissionDenied,
        lttng::LTTNG_ERR_FATAL => ErrorCode::Fatal,
        lttng::LTTNG_ERR_NOMEM => ErrorCode::OutOfMemory,
        lttng::LTTNG_ERR_UNK => ErrorCode::Unknown,
        other => ErrorCode::Other(other),
    }
}
