//! Errors for timetoken

use thiserror::Error;

/// Timetoken Errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Invalid token format: no '.' separating the signature")]
    FormatMissingSignature,

    #[error("Invalid token format: expected {expected} '_'-separated parts, found {found}")]
    FormatFieldCount { found: usize, expected: String },

    #[error("Invalid token format: field {index} is empty")]
    FormatEmptyField { index: usize },

    #[error("Invalid timestamp '{0}'")]
    FormatInvalidTimestamp(String),

    #[error("Invalid identifier '{0}': expected 32 hexadecimal characters")]
    FormatInvalidIdentifier(String),

    #[error("Invalid field '{value}': {reason}")]
    FieldInvalid { value: String, reason: String },

    #[error("Timestamp out of bounds: {value} (valid range: {min} to {max})")]
    TimestampOutOfBounds { value: i64, min: i64, max: i64 },

    // ============================================================================
    // State Errors
    // ============================================================================
    #[error("Token has no timestamp")]
    TimestampMissing,

    #[error("Can't export unsigned token")]
    TokenUnsigned,

    // ============================================================================
    // Validation Errors
    // ============================================================================
    #[error("Token expired: issued at {issued_at}ms, max age {max_age}ms (now: {now}ms)")]
    TokenExpired {
        issued_at: i64,
        now: i64,
        max_age: u64,
    },

    #[error("Signature verification failed")]
    SignatureInvalid,

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Secret string not given")]
    SecretMissing,

    #[error("Algorithm '{0}' is not supported")]
    AlgorithmUnsupported(String),

    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),
}

/// The category an [`Error`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed wire string or field value.
    Format,
    /// Operation invoked on a token that is not in the required state.
    State,
    /// Freshness check failed.
    Expired,
    /// Signature check failed.
    Integrity,
    /// Missing or unusable key material.
    Configuration,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::TokenTooLarge { .. }
            | Error::FormatMissingSignature
            | Error::FormatFieldCount { .. }
            | Error::FormatEmptyField { .. }
            | Error::FormatInvalidTimestamp(_)
            | Error::FormatInvalidIdentifier(_)
            | Error::FieldInvalid { .. }
            | Error::TimestampOutOfBounds { .. } => ErrorKind::Format,
            Error::TimestampMissing | Error::TokenUnsigned => ErrorKind::State,
            Error::TokenExpired { .. } => ErrorKind::Expired,
            Error::SignatureInvalid => ErrorKind::Integrity,
            Error::SecretMissing
            | Error::AlgorithmUnsupported(_)
            | Error::ConfigurationInvalid(_) => ErrorKind::Configuration,
        }
    }
}

/// Result type alias for timetoken operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::FormatMissingSignature.kind(), ErrorKind::Format);
        assert_eq!(
            Error::FormatInvalidTimestamp("abc".into()).kind(),
            ErrorKind::Format
        );
        assert_eq!(Error::TokenUnsigned.kind(), ErrorKind::State);
        assert_eq!(
            Error::TokenExpired {
                issued_at: 0,
                now: 10,
                max_age: 1
            }
            .kind(),
            ErrorKind::Expired
        );
        assert_eq!(Error::SignatureInvalid.kind(), ErrorKind::Integrity);
        assert_eq!(Error::SecretMissing.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::TokenUnsigned.to_string(),
            "Can't export unsigned token"
        );
        assert_eq!(
            Error::FormatFieldCount {
                found: 1,
                expected: "at least 2".into()
            }
            .to_string(),
            "Invalid token format: expected at least 2 '_'-separated parts, found 1"
        );
    }
}
