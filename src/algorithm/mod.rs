//! Signature algorithms
//!
//! Every algorithm renders a 224-bit digest as 56 lowercase hex characters,
//! so switching algorithms never changes the wire format:
//!
//! - [`SignatureAlgorithm::HmacSha224`] (default): HMAC-SHA224 keyed with the secret
//! - [`SignatureAlgorithm::Sha224Prefix`]: SHA-224 over the secret spliced into
//!   the message, bit-compatible with tokens issued by the legacy scheme

mod traits;

pub mod sha224;

pub use sha224::{HmacSha224, Sha224Prefix};
pub use traits::{get_algorithm, Algorithm, DynAlgorithm};

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Algorithm identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SignatureAlgorithm {
    /// HMAC with SHA-224
    #[default]
    HmacSha224,

    /// SHA-224 with the secret spliced into the hashed message
    Sha224Prefix,
}

impl SignatureAlgorithm {
    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            SignatureAlgorithm::HmacSha224 => "HS224",
            SignatureAlgorithm::Sha224Prefix => "SHA224-PREFIX",
        }
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "HS224" => Ok(SignatureAlgorithm::HmacSha224),
            "SHA224-PREFIX" => Ok(SignatureAlgorithm::Sha224Prefix),
            _ => Err(Error::AlgorithmUnsupported(s.to_string())),
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One piece of a [`Message`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Piece {
    Secret,
    Text(String),
}

/// The canonical input to a signature
///
/// An ordered list of text pieces with a marker for where the secret sits.
/// Prefix-style hashing feeds the secret in at the marker; HMAC uses the
/// secret as its key and only hashes the text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pieces: Vec<Piece>,
}

impl Message {
    /// Create an empty message
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the position of the secret
    pub fn secret(mut self) -> Self {
        self.pieces.push(Piece::Secret);
        self
    }

    /// Append text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.pieces.push(Piece::Text(text.into()));
        self
    }

    pub(crate) fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub(crate) fn texts(&self) -> impl Iterator<Item = &str> {
        self.pieces.iter().filter_map(|piece| match piece {
            Piece::Text(text) => Some(text.as_str()),
            Piece::Secret => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!(
            "HS224".parse::<SignatureAlgorithm>().unwrap(),
            SignatureAlgorithm::HmacSha224
        );
        assert_eq!(
            "SHA224-PREFIX".parse::<SignatureAlgorithm>().unwrap(),
            SignatureAlgorithm::Sha224Prefix
        );
        assert!(matches!(
            "HS256".parse::<SignatureAlgorithm>(),
            Err(Error::AlgorithmUnsupported(_))
        ));
    }

    #[test]
    fn test_algorithm_display() {
        assert_eq!(SignatureAlgorithm::HmacSha224.to_string(), "HS224");
        assert_eq!(SignatureAlgorithm::Sha224Prefix.to_string(), "SHA224-PREFIX");
        assert_eq!(SignatureAlgorithm::default(), SignatureAlgorithm::HmacSha224);
    }

    #[test]
    fn test_message_texts_skip_secret() {
        let message = Message::new().text("id").secret().text("1000");
        assert_eq!(message.texts().collect::<Vec<_>>(), vec!["id", "1000"]);
        assert_eq!(message.pieces().len(), 3);
    }
}
