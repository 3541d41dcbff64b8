//! Canonical encodings shared by signing and the wire format

pub mod fields;
pub mod timestamp;

pub use fields::{append, join, split, FIELD_SEPARATOR, SIGNATURE_SEPARATOR};
pub use timestamp::{Precision, Timestamp};
