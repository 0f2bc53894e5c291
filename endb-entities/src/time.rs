use std::{fmt, ops};

use time::{format_description::well_known::Rfc3339, Duration, OffsetDateTime};

/// Unix timestamp with seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc().unix_timestamp())
    }

    pub const fn from_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    pub const fn into_seconds(self) -> i64 {
        self.0
    }
}

/// Unix timestamp with milliseconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimestampMs(i64);

impl TimestampMs {
    pub fn now() -> Self {
        Self((OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64)
    }

    pub const fn from_milliseconds(milliseconds: i64) -> Self {
        Self(milliseconds)
    }

    pub const fn into_milliseconds(self) -> i64 {
        self.0
    }

    pub const fn from_seconds(seconds: i64) -> Self {
        Self(seconds * 1000)
    }

    pub const fn into_seconds(self) -> i64 {
        self.0.div_euclid(1000)
    }
}

impl From<Timestamp> for TimestampMs {
    fn from(from: Timestamp) -> Self {
        Self::from_seconds(from.into_seconds())
    }
}

impl From<TimestampMs> for Timestamp {
    fn from(from: TimestampMs) -> Self {
        Self::from_seconds(from.into_seconds())
    }
}

impl ops::Add<Duration> for TimestampMs {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs.whole_milliseconds() as i64)
    }
}

impl ops::Sub<Duration> for TimestampMs {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self {
        Self(self.0 - rhs.whole_milliseconds() as i64)
    }
}

impl ops::Add<Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs.whole_seconds())
    }
}

impl ops::Sub<Duration> for Timestamp {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self {
        Self(self.0 - rhs.whole_seconds())
    }
}

fn fmt_rfc3339(f: &mut fmt::Formatter, odt: Option<OffsetDateTime>, raw: i64) -> fmt::Result {
    match odt.and_then(|dt| dt.format(&Rfc3339).ok()) {
        Some(formatted) => f.write_str(&formatted),
        None => write!(f, "{raw}"),
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_rfc3339(f, OffsetDateTime::from_unix_timestamp(self.0).ok(), self.0)
    }
}

impl fmt::Display for TimestampMs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let odt = OffsetDateTime::from_unix_timestamp_nanos(i128::from(self.0) * 1_000_000).ok();
        fmt_rfc3339(f, odt, self.0)
    }
}
