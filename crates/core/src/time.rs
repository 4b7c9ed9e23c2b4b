//! Common time periods in milliseconds.

use std::time::Duration;

pub const ONE_SECOND_IN_MS: u64 = 1000;
pub const ONE_MINUTE_IN_MS: u64 = 60 * ONE_SECOND_IN_MS;
pub const ONE_HOUR_IN_MS: u64 = 60 * ONE_MINUTE_IN_MS;
pub const ONE_DAY_IN_MS: u64 = 24 * ONE_HOUR_IN_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    OneSecond,
    OneMinute,
    OneHour,
    OneDay,
}

impl Period {
    pub const fn as_millis(self) -> u64 {
        match self {
            Self::OneSecond => ONE_SECOND_IN_MS,
            Self::OneMinute => ONE_MINUTE_IN_MS,
            Self::OneHour => ONE_HOUR_IN_MS,
            Self::OneDay => ONE_DAY_IN_MS,
        }
    }

    pub const fn as_duration(self) -> Duration {
        Duration::from_millis(self.as_millis())
    }
}
