//! Quantities
//!
//! A quantity is read from a form input as text. Browsers coerce that text to a
//! number before it is encoded, so [`Quantity::coerce`] follows the same rules:
//! surrounding whitespace is ignored, empty text is zero, `0x`/`0o`/`0b`
//! prefixes select a radix and anything unparseable becomes `NaN`.
//!
//! [`parse_quantity`] is the strict counterpart used when invalid input should
//! be rejected before anything is sent.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Magnitude from which browsers print numbers in exponent form.
const EXPONENT_THRESHOLD: f64 = 1e21;

/// What to do with quantity text that is not a whole, non-negative number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuantityPolicy {
    /// Send the coerced value as-is and let the server decide.
    #[default]
    Forward,

    /// Reject the submission before any request is made.
    Block,
}

/// Errors returned when quantity text is not a valid item count.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuantityError {
    /// The input was empty or only whitespace.
    #[error("quantity is required")]
    Empty,

    /// The input could not be read as a number.
    #[error("quantity {0:?} is not a number")]
    NotANumber(String),

    /// The input was a number with a fractional part.
    #[error("quantity {0:?} must be a whole number")]
    Fractional(String),

    /// The input was below zero.
    #[error("quantity {0:?} cannot be negative")]
    Negative(String),

    /// The input was larger than any cart could hold.
    #[error("quantity {0:?} is too large")]
    TooLarge(String),
}

/// A quantity as it will appear in a request payload.
///
/// The wrapped value may be fractional, negative or `NaN` when it came from
/// [`Quantity::coerce`]; such values are encoded exactly as a browser would
/// encode them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity(f64);

impl Quantity {
    /// The quantity sent when a form has no quantity input.
    pub const ZERO: Self = Self(0.0);

    /// Coerce raw input text to a number without validating it.
    pub fn coerce(raw: &str) -> Self {
        Self(coerce_number(raw))
    }

    /// Parse raw input text as a non-negative whole count.
    ///
    /// # Errors
    ///
    /// Returns a [`QuantityError`] describing why the text is not a count.
    pub fn parse(raw: &str) -> Result<Self, QuantityError> {
        parse_quantity(raw).map(Self::from)
    }

    /// Read raw input text under the given policy.
    ///
    /// # Errors
    ///
    /// Returns a [`QuantityError`] only under [`QuantityPolicy::Block`].
    pub fn read(raw: &str, policy: QuantityPolicy) -> Result<Self, QuantityError> {
        match policy {
            QuantityPolicy::Forward => Ok(Self::coerce(raw)),
            QuantityPolicy::Block => Self::parse(raw),
        }
    }

    /// Returns the raw numeric value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns `true` when the value survives JSON encoding as a number.
    pub fn is_number(self) -> bool {
        self.0.is_finite()
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<u32> for Quantity {
    fn from(count: u32) -> Self {
        Self(f64::from(count))
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0;

        if !value.is_finite() {
            return serializer.serialize_none();
        }

        // Shortest round-trip digits padded with zeros, as `JSON.stringify` prints them.
        if value.fract() == 0.0
            && value.abs() < EXPONENT_THRESHOLD
            && let Ok(whole) = value.to_string().parse::<i128>()
        {
            return serializer.serialize_i128(whole);
        }

        serializer.serialize_f64(value)
    }
}

/// Parse raw input text as a non-negative whole count.
///
/// # Errors
///
/// Returns a [`QuantityError`] when the text is empty, not numeric,
/// fractional, negative or out of range.
pub fn parse_quantity(raw: &str) -> Result<u32, QuantityError> {
    let trimmed = raw.trim_matches(is_js_whitespace);

    if trimmed.is_empty() {
        return Err(QuantityError::Empty);
    }

    let value = coerce_number(trimmed);

    if !value.is_finite() {
        return Err(QuantityError::NotANumber(trimmed.to_string()));
    }

    if value.fract() != 0.0 {
        return Err(QuantityError::Fractional(trimmed.to_string()));
    }

    if value.is_sign_negative() && value != 0.0 {
        return Err(QuantityError::Negative(trimmed.to_string()));
    }

    if value > f64::from(u32::MAX) {
        return Err(QuantityError::TooLarge(trimmed.to_string()));
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value is a whole number checked to fit in u32"
    )]
    Ok(value as u32)
}

/// Whitespace a browser strips before reading a number.
///
/// Differs from [`char::is_whitespace`]: U+FEFF is stripped, U+0085 is not.
fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim_matches(is_js_whitespace);

    if trimmed.is_empty() {
        return 0.0;
    }

    if let Some(value) = parse_radix(trimmed) {
        return value;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // Rust accepts spellings like "inf" and "NaN" that a browser does not.
    if trimmed
        .chars()
        .any(|c| !(c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')))
    {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix(text: &str) -> Option<f64> {
    let (digits, radix) = if let Some(digits) = strip_prefix_ignore_case(text, "0x") {
        (digits, 16)
    } else if let Some(digits) = strip_prefix_ignore_case(text, "0o") {
        (digits, 8)
    } else if let Some(digits) = strip_prefix_ignore_case(text, "0b") {
        (digits, 2)
    } else {
        return None;
    };

    if digits.is_empty() {
        return Some(f64::NAN);
    }

    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|digit| acc * f64::from(radix) + f64::from(digit))
    });

    Some(value.unwrap_or(f64::NAN))
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;

    if head.eq_ignore_ascii_case(prefix) {
        text.get(prefix.len()..)
    } else {
        None
    }
}
