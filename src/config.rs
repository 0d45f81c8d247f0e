use crate::condition::SessionName;
use crate::Error;
use std::{
    env::{self, VarError},
    time::Duration,
};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Overrides [`DEFAULT_POLL_INTERVAL`], in milliseconds.
pub const POLL_INTERVAL_ENV: &str = "LTTNG_ROTATION_POLL_INTERVAL_MS";

#[derive(Debug, Clone)]
pub struct Config {
    pub sessions: Vec<SessionName>,
    /// Upper bound on how long a shutdown request can go unnoticed.
    pub poll_interval: Duration,
    /// Highlight session names in the startup line.
    pub color: bool,
}

impl Config {
    pub fn new(sessions: Vec<SessionName>) -> Self {
        Self {
            sessions,
            poll_interval: DEFAULT_POLL_INTERVAL,
            color: false,
        }
    }

    pub fn from_env(sessions: Vec<SessionName>) -> Result<Self, Error> {
        Ok(Self::new(sessions).with_poll_interval(poll_interval_from_env()?))
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Poll interval from [`POLL_INTERVAL_ENV`], or the default when unset.
pub fn poll_interval_from_env() -> Result<Duration, Error> {
    poll_interval_from(env::var(POLL_INTERVAL_ENV))
}

fn poll_interval_from(var: Result<String, VarError>) -> Result<Duration, Error> {
    match var {
        Ok(value) => parse_interval(&value),
        Err(VarError::NotPresent) => Ok(DEFAULT_POLL_INTERVAL),
        Err(VarError::NotUnicode(value)) => Err(Error::InvalidConfig {
            name: POLL_INTERVAL_ENV,
            value: value.to_string_lossy().into_owned(),
        }),
    }
}

fn parse_interval(value: &str) -> Result<Duration, Error> {
    match value.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(Error::InvalidConfig {
            name: POLL_INTERVAL_ENV,
            value: value.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_must_be_positive_milliseconds() {
        assert_eq!(parse_interval("250").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_interval(" 5 ").unwrap(), Duration::from_millis(5));
        assert!(matches!(
            parse_interval("0"),
            Err(Error::InvalidConfig { .. })
        ));
        assert!(matches!(
            parse_interval("fast"),
            Err(Error::InvalidConfig { .. })
        ));
    }

    #[test]
    fn unset_variable_uses_default() {
        assert_eq!(
            poll_interval_from(Err(VarError::NotPresent)).unwrap(),
            DEFAULT_POLL_INTERVAL
        );
        assert_eq!(
            poll_interval_from(Ok("20".into())).unwrap(),
            Duration::from_millis(20)
        );
    }

    #[test]
    fn non_unicode_variable_is_rejected() {
        use std::{ffi::OsString, os::unix::ffi::OsStringExt};

        let raw = OsString::from_vec(vec![b'5', 0xff]);
        assert!(matches!(
            poll_interval_from(Err(VarError::NotUnicode(raw))),
            Err(Error::InvalidConfig {
                name: POLL_INTERVAL_ENV,
                ..
            })
        ));
    }

    #[test]
    fn defaults() {
        let config = Config::new(vec![SessionName::new("alpha").unwrap()]);
        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
        assert!(!config.color);
    }
}
