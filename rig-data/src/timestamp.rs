//! Decimal timestamp normalization.
//!
//! Record files store timestamps as decimal seconds with whatever fractional
//! precision the recording tool produced (`"1403636579.763555584"`,
//! `"12.5"`, ...). Everything downstream works on a fixed-width integer count
//! of nanoseconds, so the text is converted exactly, without going through
//! floating point.

use thiserror::Error;

/// Number of fractional decimal digits in a nanosecond count.
pub const NANOS_DIGITS: usize = 9;

/// Scale factors indexed by the number of missing fractional digits.
const POW10: [u64; NANOS_DIGITS + 1] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

/// Errors that can occur while normalizing a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("Empty timestamp")]
    Empty,

    #[error("Malformed timestamp: {0:?}")]
    Malformed(String),

    #[error("Timestamp {text:?} has {digits} fractional digits (at most 9 are supported)")]
    ExcessPrecision { text: String, digits: usize },

    #[error("Timestamp out of range: {0:?}")]
    Overflow(String),
}

/// Convert a decimal timestamp string into nanoseconds.
///
/// With a decimal point, the integer and fractional digits are concatenated
/// and scaled by `10^(9 - fractional_digits)`, so `"1.5"` becomes
/// `1_500_000_000`. More than nine fractional digits is rejected rather than
/// truncated.
///
/// Without a decimal point the value is taken as already being a nanosecond
/// count and is returned unscaled.
pub fn parse_timestamp_ns(text: &str) -> Result<u64, TimestampError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TimestampError::Empty);
    }

    let malformed = || TimestampError::Malformed(text.to_string());
    let overflow = || TimestampError::Overflow(text.to_string());

    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text, None),
    };

    if !is_digits(integer) {
        return Err(malformed());
    }

    let Some(fraction) = fraction else {
        return integer.parse::<u64>().map_err(|_| overflow());
    };

    // A second '.' lands in the fractional part and fails here.
    if !is_digits(fraction) || (integer.is_empty() && fraction.is_empty()) {
        return Err(malformed());
    }

    if fraction.len() > NANOS_DIGITS {
        return Err(TimestampError::ExcessPrecision {
            text: text.to_string(),
            digits: fraction.len(),
        });
    }

    let digits = format!("{integer}{fraction}");
    let value: u64 = digits.parse().map_err(|_| overflow())?;

    value
        .checked_mul(POW10[NANOS_DIGITS - fraction.len()])
        .ok_or_else(overflow)
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}
