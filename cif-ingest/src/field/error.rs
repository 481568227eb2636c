//! Field decoding errors.
//!
//! A decode failure is always local to one column group. The reader that
//! owns the field decides what the failure means for the rest of the file.

/// Why a single field failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeFailure {
    /// Text differs from the exact template the field requires.
    #[error("does not match required text {expected:?}")]
    TemplateMismatch { expected: &'static str },

    /// Text is not in the field's enumerated set of values.
    #[error("not one of the permitted choices {choices:?}")]
    NotAChoice { choices: &'static [&'static str] },

    /// Single character is not one of the legal flags.
    #[error("not one of the allowed flags {allowed:?}")]
    InvalidFlag { allowed: &'static str },

    /// Digits were required.
    #[error("not a number")]
    NotANumber,

    /// Not a valid `HHMM` time of day.
    #[error("not a valid time")]
    InvalidTime,

    /// Not a valid calendar date.
    #[error("not a valid date")]
    InvalidDate,

    /// Days-run pattern is not seven 0/1 digits.
    #[error("not a 7-digit days run pattern of 0s and 1s")]
    InvalidDaysRun,

    /// Composite or fixed-format field of the wrong length.
    #[error("expected {expected} characters, found {found}")]
    WrongLength { expected: usize, found: usize },

    /// Keyed record used a key with no decoder.
    #[error("no field is keyed by this name")]
    UnknownKey,
}

/// A single field failed to decode.
///
/// Carries the field name and the offending text alongside the reason, so a
/// caller can report the failure without access to the layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field '{field}' cannot decode {text:?}: {reason}")]
pub struct DecodeError {
    field: String,
    text: String,
    reason: DecodeFailure,
}

impl DecodeError {
    /// Create a decode error for the named field.
    pub fn new(field: impl Into<String>, text: impl Into<String>, reason: DecodeFailure) -> Self {
        Self {
            field: field.into(),
            text: text.into(),
            reason,
        }
    }

    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The text that could not be decoded.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Why decoding failed.
    pub fn reason(&self) -> &DecodeFailure {
        &self.reason
    }
}
