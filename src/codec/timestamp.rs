//! Timestamp codec
//!
//! A [`Timestamp`] is an instant stored as whole milliseconds since the Unix
//! epoch, bounded to 1970..2100. [`Precision`] describes how a token variant
//! renders it: decimal seconds with two fractional digits, or integer
//! milliseconds.
//!
//! Encoding is lossy for [`Precision::Centiseconds`]. Tokens therefore round
//! their timestamp with [`Precision::round`] when it is set, so the value that
//! gets signed is exactly the value that a parser will recover.

use crate::error::{Error, Result};
use crate::limits::{MAX_TIMESTAMP_MILLIS, MIN_TIMESTAMP_MILLIS};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A point in time, in milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    millis: i64,
}

impl Timestamp {
    /// Current wall-clock time, rounded to the nearest millisecond
    pub fn now() -> Self {
        Precision::Milliseconds.now()
    }

    /// Create from milliseconds since the Unix epoch
    pub fn from_unix_millis(millis: i64) -> Result<Self> {
        validate_bounds(millis)?;
        Ok(Self { millis })
    }

    /// Create from (fractional) seconds since the Unix epoch, rounded to the
    /// nearest millisecond
    pub fn from_unix_seconds(seconds: f64) -> Result<Self> {
        Precision::Milliseconds.from_unix_seconds(seconds)
    }

    /// Milliseconds since the Unix epoch
    pub fn unix_millis(self) -> i64 {
        self.millis
    }

    /// Move back in time, clamping at the epoch
    pub fn saturating_sub(self, duration: Duration) -> Self {
        let delta = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
        Self {
            millis: self
                .millis
                .saturating_sub(delta)
                .max(MIN_TIMESTAMP_MILLIS),
        }
    }

    /// Move forward in time, clamping at the upper bound
    pub fn saturating_add(self, duration: Duration) -> Self {
        let delta = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
        Self {
            millis: self
                .millis
                .saturating_add(delta)
                .min(MAX_TIMESTAMP_MILLIS),
        }
    }

    /// Signed number of milliseconds from `earlier` to `self`
    pub(crate) fn millis_since(self, earlier: Timestamp) -> i64 {
        // Both values are bounded, so the difference cannot overflow
        self.millis - earlier.millis
    }
}

/// How a token variant renders its timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    /// Decimal seconds with exactly two fractional digits (`1487063344.58`)
    Centiseconds,
    /// Integer milliseconds (`1487063344580`)
    Milliseconds,
}

impl Precision {
    const fn millis_per_unit(self) -> i64 {
        match self {
            Precision::Centiseconds => 10,
            Precision::Milliseconds => 1,
        }
    }

    /// Round to the nearest representable instant
    pub fn round(self, timestamp: Timestamp) -> Timestamp {
        let unit = self.millis_per_unit();
        // MAX_TIMESTAMP_MILLIS is a multiple of every unit, so rounding stays in bounds
        Timestamp {
            millis: (timestamp.millis + unit / 2) / unit * unit,
        }
    }

    /// Current wall-clock time, rounded once from nanoseconds
    pub fn now(self) -> Timestamp {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let unit = self.millis_per_unit() as u128;
        let unit_nanos = unit * 1_000_000;
        let millis = (since_epoch.as_nanos() + unit_nanos / 2) / unit_nanos * unit;

        Timestamp {
            millis: i64::try_from(millis)
                .unwrap_or(MAX_TIMESTAMP_MILLIS)
                .min(MAX_TIMESTAMP_MILLIS),
        }
    }

    /// Create from (fractional) seconds since the Unix epoch, rounded once
    ///
    /// Going through [`Timestamp::from_unix_seconds`] and then [`round`](Self::round)
    /// rounds twice, which can carry `1.0049996` up to `1.01`.
    pub fn from_unix_seconds(self, seconds: f64) -> Result<Timestamp> {
        if !seconds.is_finite() {
            return Err(Error::FormatInvalidTimestamp(seconds.to_string()));
        }

        let unit = self.millis_per_unit() as f64;
        let millis = (seconds * 1000.0 / unit).round() * unit;
        if millis < MIN_TIMESTAMP_MILLIS as f64 || millis > MAX_TIMESTAMP_MILLIS as f64 {
            return Err(Error::TimestampOutOfBounds {
                value: millis as i64,
                min: MIN_TIMESTAMP_MILLIS,
                max: MAX_TIMESTAMP_MILLIS,
            });
        }

        Ok(Timestamp {
            millis: millis as i64,
        })
    }

    /// Render the canonical string form
    pub fn encode(self, timestamp: Timestamp) -> String {
        match self {
            Precision::Centiseconds => {
                let centis = self.round(timestamp).millis / 10;
                format!("{}.{:02}", centis / 100, centis % 100)
            }
            Precision::Milliseconds => timestamp.millis.to_string(),
        }
    }

    /// Parse the canonical string form
    ///
    /// Anything that would not re-encode to the same string (signs, spaces,
    /// leading zeros, missing or extra fractional digits) is rejected.
    pub fn decode(self, value: &str) -> Result<Timestamp> {
        let invalid = || Error::FormatInvalidTimestamp(value.to_string());

        let millis = match self {
            Precision::Centiseconds => {
                let (whole, fraction) = value.split_once('.').ok_or_else(invalid)?;
                if fraction.len() != 2 || !is_digits(whole) || !is_digits(fraction) {
                    return Err(invalid());
                }

                let whole: i64 = whole.parse().map_err(|_| invalid())?;
                let fraction: i64 = fraction.parse().map_err(|_| invalid())?;
                whole
                    .checked_mul(1000)
                    .and_then(|millis| millis.checked_add(fraction * 10))
                    .ok_or_else(invalid)?
            }
            Precision::Milliseconds => {
                if !is_digits(value) {
                    return Err(invalid());
                }
                value.parse().map_err(|_| invalid())?
            }
        };

        let timestamp = Timestamp::from_unix_millis(millis)?;
        if self.encode(timestamp) != value {
            return Err(invalid());
        }

        Ok(timestamp)
    }
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Check if timestamp is within acceptable bounds
fn validate_bounds(millis: i64) -> Result<()> {
    if !(MIN_TIMESTAMP_MILLIS..=MAX_TIMESTAMP_MILLIS).contains(&millis) {
        return Err(Error::TimestampOutOfBounds {
            value: millis,
            min: MIN_TIMESTAMP_MILLIS,
            max: MAX_TIMESTAMP_MILLIS,
        });
    }
    Ok(())
}
