//! Identity tokens
//!
//! Wire format: `EPOCH_MILLIS_UUID_SIGNATURE`, three `_`-separated parts with
//! no `.` segment. The payload is a random v4 UUID generated at issuance, so
//! callers never supply identity. The signature covers
//! `uuid + secret + millis` under the legacy scheme, and `uuid + millis`
//! keyed with the secret under HMAC.

use crate::algorithm::Message;
use crate::codec::fields::{join, split};
use crate::codec::{Precision, Timestamp};
use crate::error::{Error, Result};
use crate::keys::Key;
use crate::limits::{IDENTIFIER_HEX_LENGTH, MAX_TOKEN_LENGTH};
use crate::token::TimeToken;
use std::fmt;
use uuid::Uuid;

/// A self-identifying token: random identifier plus millisecond timestamp
///
/// Issued tokens are signed immediately, so there is no unsigned state.
///
/// # Examples
///
/// ```ignore
/// use timetoken::*;
///
/// let key = Key::new("SECRET")?;
/// let wire = IdentityToken::issue(key.clone())?.to_string();
///
/// let token = IdentityToken::parse(&wire, key)?;
/// token.validate(&ValidationConfig::new().no_expiry())?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityToken {
    key: Key,
    id: Uuid,
    issued_at: Timestamp,
    signature: String,
}

impl IdentityToken {
    /// Timestamps are carried as integer milliseconds
    pub const PRECISION: Precision = Precision::Milliseconds;

    /// Issue a fresh token stamped with the current time
    pub fn issue(key: Key) -> Result<Self> {
        Self::issue_at(key, Timestamp::now())
    }

    /// Issue a fresh token stamped with `issued_at`
    pub fn issue_at(key: Key, issued_at: Timestamp) -> Result<Self> {
        require_secret(&key)?;

        let id = Uuid::new_v4();
        let issued_at = Self::PRECISION.round(issued_at);
        let signature = key.sign(&signing_message(&id, issued_at))?;
        tracing::trace!(%id, "issued identity token");

        Ok(Self {
            key,
            id,
            issued_at,
            signature,
        })
    }

    /// Parse a token from its wire form
    ///
    /// The signature is stored as-is and not checked until
    /// [`TimeToken::validate`] is called.
    pub fn parse(token: &str, key: Key) -> Result<Self> {
        require_secret(&key)?;

        Self::parse_parts(token, key).map_err(|e| {
            tracing::debug!(error = %e, "rejected identity token");
            e
        })
    }

    fn parse_parts(token: &str, key: Key) -> Result<Self> {
        if token.len() > MAX_TOKEN_LENGTH {
            return Err(Error::TokenTooLarge {
                size: token.len(),
                max: MAX_TOKEN_LENGTH,
            });
        }

        let parts = split(token);
        let [millis, id, signature] = parts.as_slice() else {
            return Err(Error::FormatFieldCount {
                found: parts.len(),
                expected: "3".into(),
            });
        };

        Ok(Self {
            key,
            id: parse_identifier(id)?,
            issued_at: Self::PRECISION.decode(millis)?,
            signature: signature.to_string(),
        })
    }

    /// The random identifier
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Export the wire form
    pub fn serialize(&self) -> String {
        join([
            Self::PRECISION.encode(self.issued_at),
            self.id.simple().to_string(),
            self.signature.clone(),
        ])
    }
}

impl fmt::Display for IdentityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl TimeToken for IdentityToken {
    fn key(&self) -> &Key {
        &self.key
    }

    fn issued_at(&self) -> Option<Timestamp> {
        Some(self.issued_at)
    }

    fn signature(&self) -> Option<&str> {
        Some(&self.signature)
    }

    fn signing_message(&self) -> Option<Message> {
        Some(signing_message(&self.id, self.issued_at))
    }
}

fn signing_message(id: &Uuid, issued_at: Timestamp) -> Message {
    Message::new()
        .text(id.simple().to_string())
        .secret()
        .text(IdentityToken::PRECISION.encode(issued_at))
}

fn require_secret(key: &Key) -> Result<()> {
    if key.is_empty() {
        return Err(Error::SecretMissing);
    }
    Ok(())
}

/// Accept only the 32-character lowercase hex form, which is what gets signed
fn parse_identifier(value: &str) -> Result<Uuid> {
    let canonical = value.len() == IDENTIFIER_HEX_LENGTH
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
    if !canonical {
        return Err(Error::FormatInvalidIdentifier(value.to_string()));
    }

    Uuid::try_parse(value).map_err(|_| Error::FormatInvalidIdentifier(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::SignatureAlgorithm;
    use crate::validation::{Validation, ValidationConfig};
    use std::time::Duration;

    const ID: &str = "0123456789abcdef0123456789abcdef";

    fn key() -> Key {
        Key::new("SECRET").unwrap()
    }

    #[test]
    fn test_issue_and_parse() {
        let token = IdentityToken::issue(key()).unwrap();
        let wire = token.to_string();

        let parsed = IdentityToken::parse(&wire, key()).unwrap();
        assert_eq!(parsed, token);
        assert_eq!(parsed.serialize(), wire);
        assert_eq!(parsed.check(&ValidationConfig::new().no_expiry()), Validation::Valid);
    }

    #[test]
    fn test_wire_shape() {
        let token = IdentityToken::issue(key()).unwrap();
        let wire = token.serialize();
        let parts: Vec<&str> = wire.split('_').collect();

        assert_eq!(parts.len(), 3);
        assert!(parts[0].bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(parts[1].len(), 32);
        assert_eq!(parts[2].len(), 56);
        assert!(!wire.contains('.'));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = IdentityToken::issue(key()).unwrap();
        let b = IdentityToken::issue(key()).unwrap();
        assert_ne!(a.id(), b.id());
        assert_ne!(a.signature(), b.signature());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            IdentityToken::parse("1234321_00000000_11111111", key()),
            Err(Error::FormatInvalidIdentifier(_))
        ));
        assert!(matches!(
            IdentityToken::parse("1234321_0000000011111111", key()),
            Err(Error::FormatFieldCount { found: 2, .. })
        ));
        assert!(matches!(
            IdentityToken::parse(&format!("1234321_{ID}_sig_extra"), key()),
            Err(Error::FormatFieldCount { found: 4, .. })
        ));
        assert!(matches!(
            IdentityToken::parse(&format!("12.5_{ID}_sig"), key()),
            Err(Error::FormatInvalidTimestamp(_))
        ));
        assert!(matches!(
            IdentityToken::parse(&format!("1234321_{}_sig", ID.to_uppercase()), key()),
            Err(Error::FormatInvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_secret_required() {
        assert!(matches!(
            IdentityToken::issue(Key::danger_empty_secret()),
            Err(Error::SecretMissing)
        ));
        assert!(matches!(
            IdentityToken::parse(&format!("1234321_{ID}_sig"), Key::danger_empty_secret()),
            Err(Error::SecretMissing)
        ));
    }

    #[test]
    fn test_legacy_signature() {
        let key = key().algorithm(SignatureAlgorithm::Sha224Prefix);
        // sha224(b"0123456789abcdef0123456789abcdefSECRET1487063344580")
        let wire = format!(
            "1487063344580_{ID}_3a4dbe43d5b8a9310dbb187e82682e279e841e913d774e25940c57c3"
        );

        let token = IdentityToken::parse(&wire, key).unwrap();
        assert!(token.validate(&ValidationConfig::new().no_expiry()).is_ok());
    }

    #[test]
    fn test_wrong_secret() {
        let wire = IdentityToken::issue(key()).unwrap().serialize();
        let token = IdentityToken::parse(&wire, Key::new("TERCES").unwrap()).unwrap();
        assert!(matches!(
            token.validate(&ValidationConfig::new().no_expiry()),
            Err(Error::SignatureInvalid)
        ));
    }

    #[test]
    fn test_expiry() {
        let issued_at = Timestamp::now().saturating_sub(Duration::from_secs(2));
        let token = IdentityToken::issue_at(key(), issued_at).unwrap();

        assert!(matches!(
            token.validate(&ValidationConfig::new().max_age(Duration::from_secs(1))),
            Err(Error::TokenExpired { .. })
        ));
        assert!(token.validate(&ValidationConfig::new().max_age_seconds(-1.0)).is_ok());
    }
}
