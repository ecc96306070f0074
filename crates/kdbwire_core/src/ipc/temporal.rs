//! Conversion of stored temporal offsets into absolute points and time-of-day wrappers.
//!
//! Every temporal wire type stores a number relative to 2000-01-01T00:00:00Z in a fixed unit.
//! Offsets that fall outside the range `chrono` can represent (nulls and infinities on the wire)
//! saturate to [`DateTime::MIN_UTC`] or [`DateTime::MAX_UTC`].

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

/// Seconds between the Unix epoch and the protocol epoch.
pub const EPOCH_UNIX_SECS: i64 = 946_684_800;

const NANOS_PER_SEC: i128 = 1_000_000_000;
const NANOS_PER_MILLI: i128 = 1_000_000;
const SECS_PER_DAY: i128 = 86_400;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// The protocol epoch, 2000-01-01T00:00:00Z.
pub fn epoch() -> DateTime<Utc> {
	from_epoch_nanos(0)
}

/// Timestamp: nanoseconds since the epoch.
pub fn timestamp(nanos: i64) -> DateTime<Utc> {
	from_epoch_nanos(i128::from(nanos))
}

/// Date: whole days since the epoch.
pub fn date(days: i32) -> DateTime<Utc> {
	from_epoch_nanos(i128::from(days) * SECS_PER_DAY * NANOS_PER_SEC)
}

/// Datetime: fractional days since the epoch, truncated to milliseconds.
pub fn datetime(days: f64) -> DateTime<Utc> {
	let millis = (MILLIS_PER_DAY * days) as i64;
	from_epoch_nanos(i128::from(millis) * NANOS_PER_MILLI)
}

/// Timespan: a signed nanosecond duration.
pub fn timespan(nanos: i64) -> TimeDelta {
	TimeDelta::nanoseconds(nanos)
}

fn from_epoch_nanos(offset: i128) -> DateTime<Utc> {
	let unix = i128::from(EPOCH_UNIX_SECS) * NANOS_PER_SEC + offset;
	let secs = unix.div_euclid(NANOS_PER_SEC);
	let subsec = unix.rem_euclid(NANOS_PER_SEC) as u32;

	i64::try_from(secs)
		.ok()
		.and_then(|secs| DateTime::<Utc>::from_timestamp(secs, subsec))
		.unwrap_or(if offset < 0 { DateTime::<Utc>::MIN_UTC } else { DateTime::<Utc>::MAX_UTC })
}

/// Month count since 2000.01.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(i32);

impl Month {
	/// Wrap a stored month offset.
	pub fn from_offset(months: i32) -> Self {
		Self(months)
	}

	/// Stored month offset.
	pub fn offset(self) -> i32 {
		self.0
	}

	/// Calendar year.
	pub fn year(self) -> i32 {
		2000 + self.0.div_euclid(12)
	}

	/// Calendar month, `1..=12`.
	pub fn month(self) -> u32 {
		self.0.rem_euclid(12) as u32 + 1
	}
}

impl fmt::Display for Month {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:04}.{:02}m", self.year(), self.month())
	}
}

/// Minute of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Minute(TimeDelta);

impl Minute {
	/// Convert a stored minute count.
	pub fn from_minutes(minutes: i32) -> Self {
		Self(TimeDelta::minutes(i64::from(minutes)))
	}

	/// Offset from midnight.
	pub fn duration(self) -> TimeDelta {
		self.0
	}
}

impl fmt::Display for Minute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let parts = ClockParts::of(self.0);
		write!(f, "{}{:02}:{:02}", parts.sign, parts.hours, parts.minutes)
	}
}

/// Second of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Second(TimeDelta);

impl Second {
	/// Convert a stored second count.
	pub fn from_seconds(seconds: i32) -> Self {
		Self(TimeDelta::seconds(i64::from(seconds)))
	}

	/// Offset from midnight.
	pub fn duration(self) -> TimeDelta {
		self.0
	}
}

impl fmt::Display for Second {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let parts = ClockParts::of(self.0);
		write!(f, "{}{:02}:{:02}:{:02}", parts.sign, parts.hours, parts.minutes, parts.seconds)
	}
}

/// Millisecond time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay(TimeDelta);

impl TimeOfDay {
	/// Convert a stored millisecond count.
	pub fn from_millis(millis: i32) -> Self {
		Self(TimeDelta::milliseconds(i64::from(millis)))
	}

	/// Offset from midnight.
	pub fn duration(self) -> TimeDelta {
		self.0
	}
}

impl fmt::Display for TimeOfDay {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let parts = ClockParts::of(self.0);
		write!(f, "{}{:02}:{:02}:{:02}.{:03}", parts.sign, parts.hours, parts.minutes, parts.seconds, parts.millis)
	}
}

struct ClockParts {
	sign: &'static str,
	hours: u64,
	minutes: u64,
	seconds: u64,
	millis: u64,
}

impl ClockParts {
	fn of(delta: TimeDelta) -> Self {
		let total = delta.num_milliseconds();
		let abs = total.unsigned_abs();
		Self {
			sign: if total < 0 { "-" } else { "" },
			hours: abs / 3_600_000,
			minutes: abs / 60_000 % 60,
			seconds: abs / 1_000 % 60,
			millis: abs % 1_000,
		}
	}
}
