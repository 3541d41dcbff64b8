//! Token validation configuration and outcomes
//!
//! Validation runs two independent checks, in this order:
//!
//! 1. **Freshness**: the token's age must not exceed [`ValidationConfig::max_age`]
//! 2. **Integrity**: the recomputed signature must equal the stored one
//!
//! The outcome is a [`Validation`] value rather than an error so callers can
//! tell an expired token from a tampered one with a plain `match`.
//! [`Validation::into_result`] turns it into a `Result` for `?`-style call sites.

use crate::codec::Timestamp;
use crate::error::{Error, Result};
use crate::limits::DEFAULT_MAX_AGE_SECONDS;
use std::time::Duration;

/// Maximum token age
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxAge {
    /// Skip the freshness check
    Unlimited,

    /// Reject tokens older than this
    Limited(Duration),

    /// Reject every token
    Exhausted,
}

impl MaxAge {
    /// The seconds value that disables the freshness check
    pub const NO_EXPIRY_SECONDS: f64 = -1.0;

    /// Create from seconds
    ///
    /// Exactly [`NO_EXPIRY_SECONDS`](Self::NO_EXPIRY_SECONDS) and positive
    /// infinity mean [`MaxAge::Unlimited`]. Any other negative value, or NaN,
    /// means [`MaxAge::Exhausted`]. Zero, including `-0.0`, is a zero max age.
    pub fn from_seconds(seconds: f64) -> Self {
        if seconds == Self::NO_EXPIRY_SECONDS {
            return MaxAge::Unlimited;
        }
        if seconds.is_nan() || seconds < 0.0 {
            return MaxAge::Exhausted;
        }

        Duration::try_from_secs_f64(seconds.abs())
            .map(MaxAge::Limited)
            .unwrap_or(MaxAge::Unlimited)
    }

    fn exceeded_by(&self, age_millis: i64) -> bool {
        match self {
            MaxAge::Unlimited => false,
            MaxAge::Exhausted => true,
            MaxAge::Limited(max_age) => {
                age_millis > 0 && age_millis as u128 > max_age.as_millis()
            }
        }
    }
}

impl Default for MaxAge {
    fn default() -> Self {
        MaxAge::Limited(Duration::from_secs(DEFAULT_MAX_AGE_SECONDS))
    }
}

/// Configuration for token validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationConfig {
    max_age: MaxAge,
}

impl ValidationConfig {
    /// Create a new validation config with defaults (max age 30 minutes)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum token age
    pub fn max_age(mut self, max_age: Duration) -> Self {
        self.max_age = MaxAge::Limited(max_age);
        self
    }

    /// Set maximum token age in seconds; see [`MaxAge::from_seconds`]
    pub fn max_age_seconds(mut self, seconds: f64) -> Self {
        self.max_age = MaxAge::from_seconds(seconds);
        self
    }

    /// Disable the freshness check
    pub fn no_expiry(mut self) -> Self {
        self.max_age = MaxAge::Unlimited;
        self
    }

    /// The configured maximum age
    pub fn get_max_age(&self) -> MaxAge {
        self.max_age
    }

    /// Freshness check; `Some` carries the failure
    pub(crate) fn check_freshness(&self, issued_at: Timestamp, now: Timestamp) -> Option<Validation> {
        if !self.max_age.exceeded_by(now.millis_since(issued_at)) {
            return None;
        }

        let max_age = match self.max_age {
            MaxAge::Limited(max_age) => max_age,
            MaxAge::Unlimited | MaxAge::Exhausted => Duration::ZERO,
        };
        Some(Validation::Expired {
            issued_at,
            now,
            max_age,
        })
    }
}

/// Outcome of validating a token
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// Fresh and untampered
    Valid,

    /// Older than the configured maximum age
    Expired {
        issued_at: Timestamp,
        now: Timestamp,
        max_age: Duration,
    },

    /// Signature missing or not matching the payload and timestamp
    IntegrityFailed,
}

impl Validation {
    /// Whether the token passed both checks
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    /// Convert into a `Result`, mapping failures to
    /// [`Error::TokenExpired`] and [`Error::SignatureInvalid`]
    pub fn into_result(self) -> Result<()> {
        match self {
            Validation::Valid => Ok(()),
            Validation::Expired {
                issued_at,
                now,
                max_age,
            } => Err(Error::TokenExpired {
                issued_at: issued_at.unix_millis(),
                now: now.unix_millis(),
                max_age: u64::try_from(max_age.as_millis()).unwrap_or(u64::MAX),
            }),
            Validation::IntegrityFailed => Err(Error::SignatureInvalid),
        }
    }
}
