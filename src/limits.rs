//! Size limit constants and defaults for input validation

/// Maximum length for a token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Room a field token needs after its fields: `_`, the widest timestamp
/// (`4102444800.00`), `.`, and a 56 character signature
pub(crate) const SIGNED_SUFFIX_LENGTH: usize = 1 + 13 + 1 + 56;

/// Length of an identity token identifier rendered as simple hex
pub(crate) const IDENTIFIER_HEX_LENGTH: usize = 32;

// ============================================================================
// Timestamp bounds
// ============================================================================

/// Minimum valid timestamp in milliseconds (1970-01-01 00:00:00 UTC)
pub(crate) const MIN_TIMESTAMP_MILLIS: i64 = 0;

/// Maximum valid timestamp in milliseconds (2100-01-01 00:00:00 UTC)
/// 4102444800 seconds since Unix epoch
pub(crate) const MAX_TIMESTAMP_MILLIS: i64 = 4_102_444_800_000;

// ============================================================================
// Validation defaults
// ============================================================================

/// Default maximum token age (1800 seconds = 30 minutes)
pub(crate) const DEFAULT_MAX_AGE_SECONDS: u64 = 1800;
