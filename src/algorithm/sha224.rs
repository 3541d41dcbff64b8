use crate::algorithm::{Algorithm, Message, Piece};
use crate::error::{Error, Result};

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha224};

/// SHA-224 over the message with the secret spliced in at its marker
///
/// This is a hash-prefix MAC, weaker than HMAC. Use it to stay
/// bit-compatible with tokens issued by the legacy scheme.
pub struct Sha224Prefix;

/// HMAC with SHA-224
pub struct HmacSha224;

impl Algorithm for Sha224Prefix {
    fn name(&self) -> &'static str {
        "SHA224-PREFIX"
    }

    fn sign(&self, message: &Message, secret: &[u8]) -> Result<String> {
        let mut hasher = Sha224::new();
        for piece in message.pieces() {
            match piece {
                Piece::Secret => hasher.update(secret),
                Piece::Text(text) => hasher.update(text.as_bytes()),
            }
        }
        Ok(hex::encode(hasher.finalize()))
    }
}

impl Algorithm for HmacSha224 {
    fn name(&self) -> &'static str {
        "HS224"
    }

    fn sign(&self, message: &Message, secret: &[u8]) -> Result<String> {
        let mut mac = Hmac::<Sha224>::new_from_slice(secret)
            .map_err(|e| Error::ConfigurationInvalid(format!("HMAC key rejected: {e}")))?;
        for text in message.texts() {
            mac.update(text.as_bytes());
        }
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}
