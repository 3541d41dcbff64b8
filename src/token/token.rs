//! Validation shared by every token variant
//!
//! Both [`FieldToken`](crate::FieldToken) and
//! [`IdentityToken`](crate::IdentityToken) carry a payload, an issuance
//! timestamp, an optional signature, and the [`Key`] that produced it. The
//! [`TimeToken`] trait exposes those parts and derives freshness and
//! integrity checks from them, so the validation order lives in one place.

use crate::algorithm::Message;
use crate::codec::Timestamp;
use crate::error::Result;
use crate::keys::Key;
use crate::validation::{Validation, ValidationConfig};

/// A signed, time-limited token
///
/// # Examples
///
/// ```ignore
/// use timetoken::*;
///
/// let token = FieldToken::parse(token_str, Key::new("secret")?)?;
///
/// match token.check(&ValidationConfig::default()) {
///     Validation::Valid => println!("user: {:?}", token.field(0)),
///     Validation::Expired { .. } => println!("link expired"),
///     Validation::IntegrityFailed => println!("tampered"),
/// }
/// ```
pub trait TimeToken {
    /// The key used to sign and verify
    fn key(&self) -> &Key;

    /// When the token was issued, once known
    fn issued_at(&self) -> Option<Timestamp>;

    /// The stored signature, if signed or parsed
    fn signature(&self) -> Option<&str>;

    /// The canonical signature input for the current payload and timestamp
    ///
    /// `None` when there is no timestamp yet.
    fn signing_message(&self) -> Option<Message>;

    /// Check freshness, then integrity, against the current time
    ///
    /// Never mutates the token.
    fn check(&self, config: &ValidationConfig) -> Validation {
        self.check_at(config, Timestamp::now())
    }

    /// Check freshness, then integrity, as of `now`
    fn check_at(&self, config: &ValidationConfig, now: Timestamp) -> Validation {
        let (Some(issued_at), Some(message)) = (self.issued_at(), self.signing_message()) else {
            tracing::debug!(reason = "missing timestamp", "token validation failed");
            return Validation::IntegrityFailed;
        };

        if let Some(expired) = config.check_freshness(issued_at, now) {
            tracing::debug!(
                reason = "expired",
                issued_at = issued_at.unix_millis(),
                now = now.unix_millis(),
                "token validation failed"
            );
            return expired;
        }

        let Some(signature) = self.signature() else {
            tracing::debug!(reason = "unsigned", "token validation failed");
            return Validation::IntegrityFailed;
        };

        match self.key().verify(&message, signature) {
            Ok(()) => Validation::Valid,
            Err(e) => {
                tracing::debug!(reason = %e, "token validation failed");
                Validation::IntegrityFailed
            }
        }
    }

    /// Like [`check`](Self::check), failing with
    /// [`Error::TokenExpired`](crate::Error::TokenExpired) or
    /// [`Error::SignatureInvalid`](crate::Error::SignatureInvalid)
    fn validate(&self, config: &ValidationConfig) -> Result<()> {
        self.check(config).into_result()
    }

    /// Like [`check_at`](Self::check_at), as a `Result`
    fn validate_at(&self, config: &ValidationConfig, now: Timestamp) -> Result<()> {
        self.check_at(config, now).into_result()
    }
}
