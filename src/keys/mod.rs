//! Key material for signing and verifying tokens
//!
//! A [`Key`] bundles the shared secret with the [`SignatureAlgorithm`] used
//! on both sides. It is supplied per token and never serialized.
use crate::algorithm::{get_algorithm, Message, SignatureAlgorithm};
use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Shared secret plus signature algorithm
#[derive(Clone, PartialEq, Eq)]
pub struct Key {
    secret: Arc<[u8]>,
    algorithm: SignatureAlgorithm,
}

impl Key {
    /// Create a key from a non-empty secret, using the default algorithm
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(Error::SecretMissing);
        }

        Ok(Self {
            secret: secret.into(),
            algorithm: SignatureAlgorithm::default(),
        })
    }

    /// Key with an empty secret (use with extreme caution!)
    ///
    /// Signatures made with it are guessable by anyone. This only exists so
    /// that tokens issued with an empty secret by the legacy scheme can still
    /// be verified while they are phased out.
    pub fn danger_empty_secret() -> Self {
        Self {
            secret: Arc::from(Vec::new()),
            algorithm: SignatureAlgorithm::Sha224Prefix,
        }
    }

    /// Select the signature algorithm
    pub fn algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// The configured signature algorithm
    pub fn signature_algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    /// Whether the secret is empty
    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }

    pub(crate) fn sign(&self, message: &Message) -> Result<String> {
        get_algorithm(self.algorithm).sign(message, &self.secret)
    }

    pub(crate) fn verify(&self, message: &Message, signature: &str) -> Result<()> {
        get_algorithm(self.algorithm).verify(message, signature, &self.secret)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}
