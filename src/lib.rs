//! # timetoken - Stateless, Time-Limited Bearer Tokens
//!
//! **timetoken** issues and verifies compact tokens that carry everything needed to
//! check them: payload, issuance time, and a signature made with a shared secret.
//! There is no server-side storage, so tokens suit signed links and short-lived
//! API grants where a database-backed session would be overkill.
//!
//! ## Overview
//!
//! A token is valid when two checks pass:
//!
//! 1. **Freshness**: the time since issuance does not exceed a configured maximum age
//! 2. **Integrity**: the signature recomputed from payload, timestamp, and secret
//!    matches the one carried in the token
//!
//! Freshness is checked first, so a token that is both stale and tampered with
//! reports as expired.
//!
//! ## Token Variants
//!
//! Two variants implement the common [`TimeToken`] trait:
//!
//! ```text
//! FieldToken      user42_download_1487063344.58.<56 hex signature>
//!                 caller-supplied fields, seconds with 2 decimals
//!
//! IdentityToken   1487063344580_<32 hex uuid>_<56 hex signature>
//!                 generated v4 UUID, integer milliseconds
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use timetoken::*;
//!
//! let key = Key::new("shared-secret")?;
//!
//! // Issue
//! let mut token = FieldToken::new(key.clone());
//! token.push("user42")?.push("download")?;
//! token.sign()?;
//! let wire = token.serialize()?;
//!
//! // Verify
//! let token = FieldToken::parse(&wire, key)?;
//! match token.check(&ValidationConfig::default()) {
//!     Validation::Valid => println!("hello {:?}", token.field(0)),
//!     Validation::Expired { .. } => println!("link expired"),
//!     Validation::IntegrityFailed => println!("tampered"),
//! }
//! ```
//!
//! ## Signature Algorithms
//!
//! Both algorithms produce a 224-bit digest rendered as 56 lowercase hex characters:
//!
//! - **`HS224`** (default): HMAC-SHA224 keyed with the secret
//! - **`SHA224-PREFIX`**: SHA-224 over the secret spliced into the message. Use this only
//!   to verify tokens issued by the legacy scheme; it is weaker than HMAC.
//!
//! ## Security
//!
//! ### Payloads Are Not Confidential
//!
//! Fields and identifiers travel in the clear. Only their integrity is protected.
//!
//! ### Empty Secrets
//!
//! [`Key::new`] rejects empty secrets. [`Key::danger_empty_secret`] exists only to keep
//! verifying legacy tokens and must not be used to issue new ones.
//!
//! ### Timing Attack Protection
//!
//! Signature verification uses constant-time comparison via the
//! [`constant_time_eq`](https://crates.io/crates/constant_time_eq) crate.
//!
//! ### Separator Characters
//!
//! The wire format does not escape. [`FieldToken::push`] rejects empty values and values
//! containing `_`, which would otherwise be split apart when the token is parsed.

// Core modules
pub mod error;
pub(crate) mod limits;

// Encoding
pub mod codec;

// Signing
pub mod algorithm;
pub mod keys;

// Validation
pub mod validation;

// Token types
pub mod token;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use algorithm::SignatureAlgorithm;
pub use codec::{Precision, Timestamp};
pub use error::{Error, ErrorKind, Result};
pub use keys::Key;
pub use token::{FieldToken, IdentityToken, TimeToken};
pub use validation::{MaxAge, Validation, ValidationConfig};

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_full_flow_field_token() {
        let key = Key::new("my-secret-key").unwrap();

        let mut token = FieldToken::new(key.clone());
        token.push("user123").unwrap().push("read").unwrap();
        token.sign().unwrap();
        let wire = token.serialize().unwrap();

        let parsed = FieldToken::parse(&wire, key).unwrap();
        assert_eq!(parsed.fields(), ["user123", "read"]);
        assert!(parsed.validate(&ValidationConfig::default()).is_ok());
    }

    #[test]
    fn test_full_flow_identity_token() {
        let key = Key::new("my-secret-key").unwrap();

        let wire = IdentityToken::issue(key.clone()).unwrap().to_string();
        let parsed = IdentityToken::parse(&wire, key).unwrap();

        assert!(parsed.validate(&ValidationConfig::default()).is_ok());
    }

    #[test]
    fn test_variants_share_validation() {
        let key = Key::new("shared").unwrap();
        let stale = Timestamp::now().saturating_sub(Duration::from_secs(3600));

        let mut field = FieldToken::new(key.clone());
        field.push("x").unwrap().set_timestamp(stale);
        field.sign().unwrap();
        let identity = IdentityToken::issue_at(key, stale).unwrap();

        let tokens: [&dyn TimeToken; 2] = [&field, &identity];
        for token in tokens {
            assert!(matches!(
                token.check(&ValidationConfig::default()),
                Validation::Expired { .. }
            ));
            assert_eq!(
                token.check(&ValidationConfig::new().no_expiry()),
                Validation::Valid
            );
        }
    }

    #[test]
    fn test_wrong_key_fails_integrity() {
        let mut token = FieldToken::new(Key::new("issuer").unwrap());
        token.push("x").unwrap();
        token.sign().unwrap();
        let wire = token.serialize().unwrap();

        let parsed = FieldToken::parse(&wire, Key::new("someone-else").unwrap()).unwrap();
        let err = parsed.validate(&ValidationConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Integrity);
    }
}
