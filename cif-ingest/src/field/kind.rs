//! Field descriptions and their decoders.

use super::{DateFormat, DaysRun, DecodeError, DecodeFailure, Value, time};

/// How a field's characters are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Must equal the template exactly. Produces no value.
    Literal(&'static str),
    /// Positional filler. Never inspected, produces no value.
    Filler,
    /// Raw characters, padding kept.
    Text,
    /// Raw characters with trailing padding removed.
    VarText,
    /// Raw characters restricted to an enumerated set.
    Choice(&'static [&'static str]),
    /// ASCII digits, possibly space padded. Signs are not digits.
    Integer { optional: bool },
    /// One character from a set of legal flags.
    Flag(&'static str),
    /// `HHMM`.
    Time { optional: bool },
    /// `HHMM` plus an `H` half-minute marker column.
    HalfMinuteTime { optional: bool },
    Date(DateFormat),
    /// Seven `0`/`1` digits, Monday first.
    Days,
    /// Six 2-character activity codes.
    Activities,
    /// Ten 3-character station codes, each followed by one filler column.
    RouteingGroup,
}

/// One fixed-width column group of a record.
///
/// Width is fixed when the field is built and never inferred from content.
///
/// # Examples
///
/// ```
/// use cif_ingest::field::{Field, Value};
///
/// let speed = Field::integer("Speed", 3).optional();
/// assert_eq!(speed.decode("075").unwrap(), Some(Value::Integer(75)));
/// assert_eq!(speed.decode("   ").unwrap(), None);
///
/// let status = Field::flag("Train Status", " BFPST12345");
/// assert!(status.decode("X").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    name: &'static str,
    width: usize,
    kind: FieldKind,
}

impl Field {
    const fn new(name: &'static str, width: usize, kind: FieldKind) -> Self {
        Self { name, width, kind }
    }

    /// A field that must match `template` exactly; its width is the template's.
    pub const fn literal(name: &'static str, template: &'static str) -> Self {
        Self::new(name, template.len(), FieldKind::Literal(template))
    }

    pub const fn filler(name: &'static str, width: usize) -> Self {
        Self::new(name, width, FieldKind::Filler)
    }

    pub const fn text(name: &'static str, width: usize) -> Self {
        Self::new(name, width, FieldKind::Text)
    }

    pub const fn var_text(name: &'static str, width: usize) -> Self {
        Self::new(name, width, FieldKind::VarText)
    }

    pub const fn choice(name: &'static str, width: usize, choices: &'static [&'static str]) -> Self {
        Self::new(name, width, FieldKind::Choice(choices))
    }

    pub const fn integer(name: &'static str, width: usize) -> Self {
        Self::new(name, width, FieldKind::Integer { optional: false })
    }

    pub const fn flag(name: &'static str, flags: &'static str) -> Self {
        Self::new(name, 1, FieldKind::Flag(flags))
    }

    pub const fn time(name: &'static str) -> Self {
        Self::new(name, 4, FieldKind::Time { optional: false })
    }

    pub const fn half_minute_time(name: &'static str) -> Self {
        Self::new(name, 5, FieldKind::HalfMinuteTime { optional: false })
    }

    pub const fn date(name: &'static str, format: DateFormat) -> Self {
        Self::new(name, format.width(), FieldKind::Date(format))
    }

    pub const fn days(name: &'static str) -> Self {
        Self::new(name, 7, FieldKind::Days)
    }

    pub const fn activities(name: &'static str) -> Self {
        Self::new(name, 12, FieldKind::Activities)
    }

    pub const fn routeing_group(name: &'static str) -> Self {
        Self::new(name, 40, FieldKind::RouteingGroup)
    }

    /// Let an all-blank column decode to absent.
    ///
    /// Only integers and times have a blank form; other kinds are returned
    /// unchanged.
    pub const fn optional(self) -> Self {
        let kind = match self.kind {
            FieldKind::Integer { .. } => FieldKind::Integer { optional: true },
            FieldKind::Time { .. } => FieldKind::Time { optional: true },
            FieldKind::HalfMinuteTime { .. } => FieldKind::HalfMinuteTime { optional: true },
            other => other,
        };
        Self::new(self.name, self.width, kind)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Whether decoding this field produces an emittable value.
    pub fn emits(&self) -> bool {
        !matches!(self.kind, FieldKind::Literal(_) | FieldKind::Filler)
    }

    /// Database column name: lower case, runs of other characters as `_`.
    pub fn column_name(&self) -> String {
        let mut column = String::with_capacity(self.name.len());
        for c in self.name.chars() {
            if c.is_ascii_alphanumeric() {
                column.push(c.to_ascii_lowercase());
            } else if !column.ends_with('_') {
                column.push('_');
            }
        }
        column
    }

    /// Decode the field's text.
    ///
    /// `Ok(None)` means either the field emits nothing or an optional field
    /// was blank.
    pub fn decode(&self, text: &str) -> Result<Option<Value>, DecodeError> {
        self.decode_value(text)
            .map_err(|reason| DecodeError::new(self.name, text, reason))
    }

    fn decode_value(&self, text: &str) -> Result<Option<Value>, DecodeFailure> {
        let value = match self.kind {
            FieldKind::Literal(expected) => {
                if text != expected {
                    return Err(DecodeFailure::TemplateMismatch { expected });
                }
                return Ok(None);
            }
            FieldKind::Filler => return Ok(None),
            FieldKind::Text => Value::Text(text.to_owned()),
            FieldKind::VarText => Value::Text(text.trim_end().to_owned()),
            FieldKind::Choice(choices) => {
                if !choices.iter().any(|choice| *choice == text) {
                    return Err(DecodeFailure::NotAChoice { choices });
                }
                Value::Text(text.to_owned())
            }
            FieldKind::Integer { optional } => {
                if optional && is_blank(text) {
                    return Ok(None);
                }
                let digits = text.trim_matches(' ');
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(DecodeFailure::NotANumber);
                }
                let n = digits.parse::<i64>().map_err(|_| DecodeFailure::NotANumber)?;
                Value::Integer(n)
            }
            FieldKind::Flag(allowed) => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if allowed.contains(c) => Value::Flag(c),
                    _ => return Err(DecodeFailure::InvalidFlag { allowed }),
                }
            }
            FieldKind::Time { optional } => {
                if optional && is_blank(text) {
                    return Ok(None);
                }
                Value::Time(time::decode_hhmm(text)?)
            }
            FieldKind::HalfMinuteTime { optional } => {
                if optional && is_blank(text) {
                    return Ok(None);
                }
                Value::Time(time::decode_hhmm_half(text)?)
            }
            FieldKind::Date(format) => Value::Date(format.decode(text)?),
            FieldKind::Days => Value::Days(DaysRun::decode(text)?),
            FieldKind::Activities => Value::Codes(split_codes(text, self.width, 2, 2)?),
            FieldKind::RouteingGroup => Value::Codes(split_codes(text, self.width, 4, 3)?),
        };
        Ok(Some(value))
    }
}

fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c == ' ')
}

/// Split a block into codes of `code_width` characters taken every `stride`.
fn split_codes(
    text: &str,
    width: usize,
    stride: usize,
    code_width: usize,
) -> Result<Vec<String>, DecodeFailure> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() != width {
        return Err(DecodeFailure::WrongLength {
            expected: width,
            found: chars.len(),
        });
    }
    Ok(chars
        .chunks(stride)
        .map(|chunk| chunk[..code_width].iter().collect())
        .collect())
}
