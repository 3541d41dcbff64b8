//! Field codec
//!
//! Joins an ordered sequence of opaque string fields into one
//! `_`-delimited segment and splits it back. The codec does not escape:
//! fields containing the separator cannot round-trip, which is why
//! [`check_field`] exists.

use crate::error::{Error, Result};

/// Separates payload fields (and the timestamp) from each other
pub const FIELD_SEPARATOR: char = '_';

/// Separates the signed body from the signature
pub const SIGNATURE_SEPARATOR: char = '.';

/// Append `b` to `a`, separated by [`FIELD_SEPARATOR`]
///
/// An empty `a` yields `b` unchanged, so the first field never gets a
/// leading separator.
pub fn append(a: &str, b: &str) -> String {
    if a.is_empty() {
        return b.to_string();
    }

    let mut out = String::with_capacity(a.len() + 1 + b.len());
    out.push_str(a);
    out.push(FIELD_SEPARATOR);
    out.push_str(b);
    out
}

/// Join fields in order, built by repeated [`append`] from an empty string
pub fn join<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .fold(String::new(), |acc, field| append(&acc, field.as_ref()))
}

/// Split on every occurrence of [`FIELD_SEPARATOR`]
pub fn split(segment: &str) -> Vec<&str> {
    segment.split(FIELD_SEPARATOR).collect()
}

/// Reject values that would not survive a [`join`] / [`split`] round trip
pub(crate) fn check_field(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::FieldInvalid {
            value: value.to_string(),
            reason: "field must not be empty".into(),
        });
    }

    if value.contains(FIELD_SEPARATOR) {
        return Err(Error::FieldInvalid {
            value: value.to_string(),
            reason: format!("field must not contain '{FIELD_SEPARATOR}'"),
        });
    }

    Ok(())
}
