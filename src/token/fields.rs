//! Ordered-field tokens
//!
//! Wire format: `field1_field2_..._fieldN_TIMESTAMP.SIGNATURE`, where
//! `TIMESTAMP` is decimal seconds with two fractional digits and `SIGNATURE`
//! is 56 lowercase hex characters.

use crate::algorithm::Message;
use crate::codec::fields::{append, check_field, join, split, SIGNATURE_SEPARATOR};
use crate::codec::{Precision, Timestamp};
use crate::error::{Error, Result};
use crate::keys::Key;
use crate::limits::{MAX_TOKEN_LENGTH, SIGNED_SUFFIX_LENGTH};
use crate::token::TimeToken;
use std::fmt;

/// A token whose payload is an ordered list of caller-supplied fields
///
/// A token moves through three states: new (no timestamp, no signature),
/// timestamped, and signed. Parsing lands directly in the signed state.
/// Mutating a signed token keeps the old signature, so the change is caught
/// by validation rather than silently accepted.
///
/// # Examples
///
/// ```ignore
/// use timetoken::*;
///
/// let key = Key::new("secret")?;
///
/// let mut token = FieldToken::new(key.clone());
/// token.push("user42")?.push("download")?;
/// token.sign()?;
/// let wire = token.serialize()?;
///
/// let parsed = FieldToken::parse(&wire, key)?;
/// parsed.validate(&ValidationConfig::default())?;
/// assert_eq!(parsed.field(0), Some("user42"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldToken {
    key: Key,
    fields: Vec<String>,
    issued_at: Option<Timestamp>,
    signature: Option<String>,
}

impl FieldToken {
    /// Timestamps are carried as decimal seconds with two fractional digits
    pub const PRECISION: Precision = Precision::Centiseconds;

    /// Create an empty, unsigned token
    pub fn new(key: Key) -> Self {
        Self {
            key,
            fields: Vec::new(),
            issued_at: None,
            signature: None,
        }
    }

    /// Parse a token from its wire form
    ///
    /// The signature is split off at the last `.`. It is stored as-is and not
    /// checked until [`TimeToken::validate`] is called.
    pub fn parse(token: &str, key: Key) -> Result<Self> {
        Self::parse_parts(token, key).map_err(|e| {
            tracing::debug!(error = %e, "rejected field token");
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

        let (body, signature) = token
            .rsplit_once(SIGNATURE_SEPARATOR)
            .ok_or(Error::FormatMissingSignature)?;

        let parts = split(body);
        let (timestamp, fields) = match parts.split_last() {
            Some((timestamp, fields)) if !fields.is_empty() => (*timestamp, fields),
            _ => {
                return Err(Error::FormatFieldCount {
                    found: parts.len(),
                    expected: "at least 2".into(),
                })
            }
        };
        let issued_at = Self::PRECISION.decode(timestamp)?;

        if let Some(index) = fields.iter().position(|field| field.is_empty()) {
            return Err(Error::FormatEmptyField { index });
        }

        Ok(Self {
            key,
            fields: fields.iter().map(|field| field.to_string()).collect(),
            issued_at: Some(issued_at),
            signature: Some(signature.to_string()),
        })
    }

    /// Append a field
    ///
    /// Fails for empty values and values containing `_`, which could not be
    /// recovered by [`parse`](Self::parse), and with [`Error::TokenTooLarge`]
    /// once the signed token would no longer fit the parse limit.
    pub fn push(&mut self, value: impl fmt::Display) -> Result<&mut Self> {
        let value = value.to_string();
        check_field(&value)?;

        // Joined length after the push: every field plus one separator each
        let body = self.fields.iter().map(String::len).sum::<usize>()
            + self.fields.len()
            + value.len();
        let size = body + SIGNED_SUFFIX_LENGTH;
        if size > MAX_TOKEN_LENGTH {
            return Err(Error::TokenTooLarge {
                size,
                max: MAX_TOKEN_LENGTH,
            });
        }

        self.fields.push(value);
        Ok(self)
    }

    /// All fields, in order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The field at `index`
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Set the issuance time, rounded to centiseconds
    pub fn set_timestamp(&mut self, timestamp: Timestamp) -> &mut Self {
        self.issued_at = Some(Self::PRECISION.round(timestamp));
        self
    }

    /// Set the issuance time to now
    pub fn stamp_now(&mut self) -> &mut Self {
        self.issued_at = Some(Self::PRECISION.now());
        self
    }

    /// Compute and store the signature, stamping the token first if needed
    pub fn sign(&mut self) -> Result<&str> {
        if self.issued_at.is_none() {
            self.stamp_now();
        }

        let message = self.signing_message().ok_or(Error::TimestampMissing)?;
        let signature = self.key.sign(&message)?;
        tracing::trace!(fields = self.fields.len(), "signed field token");

        Ok(self.signature.insert(signature).as_str())
    }

    /// Drop fields, timestamp, and signature; the key is kept
    pub fn reset(&mut self) {
        self.fields.clear();
        self.issued_at = None;
        self.signature = None;
    }

    /// Export the signed wire form
    ///
    /// Fails with [`Error::TokenUnsigned`] before [`sign`](Self::sign), and
    /// with [`Error::TokenTooLarge`] when [`parse`](Self::parse) would refuse
    /// the result.
    pub fn serialize(&self) -> Result<String> {
        let signature = self.signature.as_deref().ok_or(Error::TokenUnsigned)?;
        let body = self.serialize_unsigned()?;
        let token = format!("{body}{SIGNATURE_SEPARATOR}{signature}");

        if token.len() > MAX_TOKEN_LENGTH {
            return Err(Error::TokenTooLarge {
                size: token.len(),
                max: MAX_TOKEN_LENGTH,
            });
        }
        Ok(token)
    }

    /// Export fields and timestamp without the signature
    pub fn serialize_unsigned(&self) -> Result<String> {
        let issued_at = self.issued_at.ok_or(Error::TimestampMissing)?;
        Ok(self.body(issued_at))
    }

    fn body(&self, issued_at: Timestamp) -> String {
        append(&join(&self.fields), &Self::PRECISION.encode(issued_at))
    }
}

impl TimeToken for FieldToken {
    fn key(&self) -> &Key {
        &self.key
    }

    fn issued_at(&self) -> Option<Timestamp> {
        self.issued_at
    }

    fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    fn signing_message(&self) -> Option<Message> {
        self.issued_at
            .map(|issued_at| Message::new().secret().text(self.body(issued_at)))
    }
}
