use crate::algorithm::{Message, SignatureAlgorithm};
use crate::error::{Error, Result};

use constant_time_eq::constant_time_eq;

/// Core algorithm trait that all token signature algorithms implement
///
/// Implementations only produce signatures. Verification recomputes the
/// signature and compares in constant time.
pub trait Algorithm {
    /// The algorithm identifier (e.g., "HS224")
    fn name(&self) -> &'static str;

    /// Compute the lowercase hex signature of `message` under `secret`
    fn sign(&self, message: &Message, secret: &[u8]) -> Result<String>;

    /// Verify a signature with constant-time comparison
    fn verify(&self, message: &Message, signature: &str, secret: &[u8]) -> Result<()> {
        let expected = self.sign(message, secret)?;

        if expected.len() != signature.len() {
            return Err(Error::SignatureInvalid);
        }

        if constant_time_eq(expected.as_bytes(), signature.as_bytes()) {
            Ok(())
        } else {
            Err(Error::SignatureInvalid)
        }
    }
}

/// Type alias for boxed algorithm trait objects
pub type DynAlgorithm = Box<dyn Algorithm + Send + Sync>;

/// Get the implementation for the given algorithm ID
pub fn get_algorithm(algorithm: SignatureAlgorithm) -> DynAlgorithm {
    match algorithm {
        SignatureAlgorithm::HmacSha224 => Box::new(super::sha224::HmacSha224),
        SignatureAlgorithm::Sha224Prefix => Box::new(super::sha224::Sha224Prefix),
    }
}
