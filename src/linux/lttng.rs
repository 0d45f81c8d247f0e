//! Raw declarations for the parts of liblttng-ctl used by this crate.

use libc::{c_char, c_int, c_uint};

#[repr(C)]
pub struct lttng_endpoint {
    _private: [u8; 0],
}
#[repr(C)]
pub struct lttng_notification_channel {
    _private: [u8; 0],
}
#[repr(C)]
pub struct lttng_notification {
    _private: [u8; 0],
}
#[repr(C)]
pub struct lttng_condition {
    _private: [u8; 0],
}
#[repr(C)]
pub struct lttng_evaluation {
    _private: [u8; 0],
}
#[repr(C)]
pub struct lttng_action {
    _private: [u8; 0],
}
#[repr(C)]
pub struct lttng_trigger {
    _private: [u8; 0],
}
#[repr(C)]
pub struct lttng_triggers {
    _private: [u8; 0],
}
#[repr(C)]
pub struct lttng_trace_archive_location {
    _private: [u8; 0],
}

pub type lttng_notification_channel_status = c_int;
pub const LTTNG_NOTIFICATION_CHANNEL_STATUS_NOTIFICATIONS_DROPPED: c_int = 1;
pub const LTTNG_NOTIFICATION_CHANNEL_STATUS_INTERRUPTED: c_int = 2;
pub const LTTNG_NOTIFICATION_CHANNEL_STATUS_OK: c_int = 0;
pub const LTTNG_NOTIFICATION_CHANNEL_STATUS_ERROR: c_int = -1;
pub const LTTNG_NOTIFICATION_CHANNEL_STATUS_CLOSED: c_int = -2;
pub const LTTNG_NOTIFICATION_CHANNEL_STATUS_ALREADY_SUBSCRIBED: c_int = -3;
pub const LTTNG_NOTIFICATION_CHANNEL_STATUS_UNKNOWN_CONDITION: c_int = -4;
pub const LTTNG_NOTIFICATION_CHANNEL_STATUS_INVALID: c_int = -5;
pub const LTTNG_NOTIFICATION_CHANNEL_STATUS_UNSUPPORTED_VERSION: c_int = -6;

pub type lttng_condition_type = c_int;
pub const LTTNG_CONDITION_TYPE_UNKNOWN: c_int = -1;
pub const LTTNG_CONDITION_TYPE_SESSION_CONSUMED_SIZE: c_int = 100;
pub const LTTNG_CONDITION_TYPE_BUFFER_USAGE_HIGH: c_int = 101;
pub const LTTNG_CONDITION_TYPE_BUFFER_USAGE_LOW: c_int = 102;
pub const LTTNG_CONDITION_TYPE_SESSION_ROTATION_ONGOING: c_int = 103;
pub const LTTNG_CONDITION_TYPE_SESSION_ROTATION_COMPLETED: c_int = 104;
pub const LTTNG_CONDITION_TYPE_EVENT_RULE_HIT: c_int = 105;

pub type lttng_condition_status = c_int;
pub const LTTNG_CONDITION_STATUS_OK: c_int = 0;

pub type lttng_evaluation_status = c_int;
pub const LTTNG_EVALUATION_STATUS_OK: c_int = 0;

pub type lttng_trigger_status = c_int;
pub const LTTNG_TRIGGER_STATUS_OK: c_int = 0;

pub type lttng_action_type = c_int;
pub const LTTNG_ACTION_TYPE_UNKNOWN: c_int = -1;
pub const LTTNG_ACTION_TYPE_GROUP: c_int = 0;
pub const LTTNG_ACTION_TYPE_NOTIFY: c_int = 1;

pub type lttng_action_status = c_int;
pub const LTTNG_ACTION_STATUS_OK: c_int = 0;

pub type lttng_trace_archive_location_type = c_int;
pub const LTTNG_TRACE_ARCHIVE_LOCATION_TYPE_UNKNOWN: c_int = 0;
pub const LTTNG_TRACE_ARCHIVE_LOCATION_TYPE_LOCAL: c_int = 1;
pub const LTTNG_TRACE_ARCHIVE_LOCATION_TYPE_RELAY: c_int = 2;

pub type lttng_trace_archive_location_status = c_int;
pub const LTTNG_TRACE_ARCHIVE_LOCATION_STATUS_OK: c_int = 0;

pub type lttng_trace_archive_location_relay_protocol_type = c_int;
pub const LTTNG_TRACE_ARCHIVE_LOCATION_RELAY_PROTOCOL_TYPE_TCP: c_int = 0;

pub type lttng_error_code = c_int;
pub const LTTNG_OK: c_int = 10;
pub const LTTNG_ERR_UNK: c_int = 11;
pub const LTTNG_ERR_NO_SESSIOND: c_int = 19;
pub const LTTNG_ERR_FATAL: c_int = 25;
pub const LTTNG_ERR_NOMEM: c_int = 26;
pub const LTTNG_ERR_EPERM: c_int = 32;
pub const LTTNG_ERR_INVALID: c_int = 97;
pub const LTTNG_ERR_INVALID_TRIGGER: c_int = 125;
pub const LTTNG_ERR_TRIGGER_EXISTS: c_int = 126;

unsafe extern "C" {
    pub static lttng_session_daemon_notification_endpoint: *mut lttng_endpoint;

    pub fn lttng_notification_channel_create(
        endpoint: *mut lttng_endpoint,
    ) -> *mut lttng_notification_channel;
    pub fn lttng_notification_channel_get_next_notification(
        channel: *mut lttng_notification_channel,
        notification: *mut *mut lttng_notification,
    ) -> lttng_notification_channel_status;
    pub fn lttng_notification_channel_has_pending_notification(
        channel: *mut lttng_notification_channel,
        notification_pending: *mut bool,
    ) -> lttng_notification_channel_status;
    pub fn lttng_notification_channel_subscribe(
        channel: *mut lttng_notification_channel,
        condition: *const lttng_condition,
    ) -> lttng_notification_channel_status;
    pub fn lttng_notification_channel_unsubscribe(
        channel: *mut lttng_notification_channel,
        condition: *const lttng_condition,
    ) -> lttng_notification_channel_status;
    pub fn lttng_notification_channel_destroy(channel: *mut lttng_notification_channel);

    pub fn lttng_notification_get_condition(
        notification: *mut lttng_notification,
    ) -> *const lttng_condition;
    pub fn lttng_notification_get_evaluation(
        notification: *mut lttng_notification,
    ) -> *const lttng_evaluation;
    pub fn lttng_notification_destroy(notification: *mut lttng_notification);

    pub fn lttng_condition_get_type(condition: *const lttng_condition) -> lttng_condition_type;
    pub fn lttng_condition_destroy(condition: *mut lttng_condition);
    pub fn lttng_condition_session_rotation_ongoing_create() -> *mut lttng_condition;
    pub fn lttng_condition_session_rotation_completed_create() -> *mut lttng_condition;
    pub fn lttng_condition_session_rotation_get_session_name(
        condition: *const lttng_condition,
        session_name: *mut *const c_char,
    ) -> lttng_condition_status;
    pub fn lttng_condition_session_rotation_set_session_name(
        condition: *mut lttng_condition,
        session_name: *const c_char,
    ) -> lttng_condition_status;

    pub fn lttng_evaluation_get_type(evaluation: *const lttng_evaluation) -> lttng_condition_type;
    pub fn lttng_evaluation_session_rotation_get_id(
        evaluation: *const lttng_evaluation,
        id: *mut u64,
    ) -> lttng_evaluation_status;
    pub fn lttng_evaluation_session_rotation_completed_get_location(
        evaluation: *const lttng_evaluation,
        location: *mut *const lttng_trace_archive_location,
    ) -> lttng_evaluation_status;
    pub fn lttng_evaluation_event_rule_get_trigger_name(
        evaluation: *const lttng_evaluation,
        name: *mut *const c_char,
    ) -> lttng_evaluation_status;

    pub fn lttng_action_notify_create() -> *mut lttng_action;
    pub fn lttng_action_destroy(action: *mut lttng_action);
    pub fn lttng_action_get_type(action: *const lttng_action) -> lttng_action_type;
    pub fn lttng_action_group_get_count(
        group: *const lttng_action,
        count: *mut c_uint,
    ) -> lttng_action_status;
    pub fn lttng_action_group_get_at_index_const(
        group: *const lttng_action,
        index: c_uint,
    ) -> *const lttng_action;

    pub fn lttng_trigger_create(
        condition: *mut lttng_condition,
        action: *mut lttng_action,
    ) -> *mut lttng_trigger;
    pub fn lttng_trigger_destroy(trigger: *mut lttng_trigger);
    pub fn lttng_register_trigger(trigger: *mut lttng_trigger) -> c_int;
    pub fn lttng_trigger_get_name(
        trigger: *const lttng_trigger,
        name: *mut *const c_char,
    ) -> lttng_trigger_status;
    pub fn lttng_trigger_get_const_condition(
        trigger: *const lttng_trigger,
    ) -> *const lttng_condition;
    pub fn lttng_trigger_get_const_action(trigger: *const lttng_trigger) -> *const lttng_action;

    pub fn lttng_list_triggers(triggers: *mut *mut lttng_triggers) -> lttng_error_code;
    pub fn lttng_triggers_get_count(
        triggers: *const lttng_triggers,
        count: *mut c_uint,
    ) -> lttng_trigger_status;
    pub fn lttng_triggers_get_at_index(
        triggers: *const lttng_triggers,
        index: c_uint,
    ) -> *const lttng_trigger;
    pub fn lttng_triggers_destroy(triggers: *mut lttng_triggers);

    pub fn lttng_trace_archive_location_get_type(
        location: *const lttng_trace_archive_location,
    ) -> lttng_trace_archive_location_type;
    pub fn lttng_trace_archive_location_local_get_absolute_path(
        location: *const lttng_trace_archive_location,
        absolute_path: *mut *const c_char,
    ) -> lttng_trace_archive_location_status;
    pub fn lttng_trace_archive_location_relay_get_host(
        location: *const lttng_trace_archive_location,
        relay_host: *mut *const c_char,
    ) -> lttng_trace_archive_location_status;
    pub fn lttng_trace_archive_location_relay_get_control_port(
        location: *const lttng_trace_archive_location,
        control_port: *mut u16,
    ) -> lttng_trace_archive_location_status;
    pub fn lttng_trace_archive_location_relay_get_data_port(
        location: *const lttng_trace_archive_location,
        data_port: *mut u16,
    ) -> lttng_trace_archive_location_status;
    pub fn lttng_trace_archive_location_relay_get_protocol_type(
        location: *const lttng_trace_archive_location,
        protocol: *mut lttng_trace_archive_location_relay_protocol_type,
    ) -> lttng_trace_archive_location_status;
    pub fn lttng_trace_archive_location_relay_get_relative_path(
        location: *const lttng_trace_archive_location,
        relative_path: *mut *const c_char,
    ) -> lttng_trace_archive_location_status;

    pub fn lttng_strerror(code: c_int) -> *const c_char;
}
