//! Date columns.

use chrono::NaiveDate;

use super::DecodeFailure;
use super::time::parse_two_digits;

/// Column text standing for an open-ended date.
const NEVER: &str = "999999";

/// Two-digit years at or above this belong to the 1900s.
const CENTURY_PIVOT: u32 = 60;

/// First year of the supplement format's two-digit year count.
const SUPPLEMENT_EPOCH: i32 = 1956;

/// The ways a date is laid out in a column.
///
/// The six-column forms decode `999999` to [`NaiveDate::MAX`], which stands
/// for "never ends".
///
/// # Examples
///
/// ```
/// use cif_ingest::field::DateFormat;
/// use chrono::NaiveDate;
///
/// let d = DateFormat::DayMonthYear.decode("010101").unwrap();
/// assert_eq!(d, NaiveDate::from_ymd_opt(2001, 1, 1).unwrap());
///
/// assert_eq!(DateFormat::YearMonthDay.decode("999999").unwrap(), NaiveDate::MAX);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `DDMMYY`; two-digit years windowed at 1960.
    DayMonthYear,
    /// `YYMMDD`; two-digit years windowed at 1960.
    YearMonthDay,
    /// `YYMMDD` with the year counted from 1956.
    YearMonthDaySince1956,
    /// `DD/MM/YYYY`.
    Slashed,
}

impl DateFormat {
    /// Column width of this format.
    pub const fn width(self) -> usize {
        match self {
            DateFormat::Slashed => 10,
            _ => 6,
        }
    }

    /// Decode a date in this format.
    pub fn decode(self, text: &str) -> Result<NaiveDate, DecodeFailure> {
        if !text.is_ascii() {
            return Err(DecodeFailure::InvalidDate);
        }
        if text.len() != self.width() {
            return Err(DecodeFailure::WrongLength {
                expected: self.width(),
                found: text.len(),
            });
        }

        let bytes = text.as_bytes();
        let (year, month, day) = match self {
            DateFormat::Slashed => {
                if bytes[2] != b'/' || bytes[5] != b'/' {
                    return Err(DecodeFailure::InvalidDate);
                }
                let day = two(&bytes[0..2])?;
                let month = two(&bytes[3..5])?;
                let century = two(&bytes[6..8])?;
                let year = two(&bytes[8..10])?;
                ((century * 100 + year) as i32, month, day)
            }
            _ if text == NEVER => return Ok(NaiveDate::MAX),
            DateFormat::DayMonthYear => {
                let day = two(&bytes[0..2])?;
                let month = two(&bytes[2..4])?;
                (windowed(two(&bytes[4..6])?), month, day)
            }
            DateFormat::YearMonthDay => {
                let year = windowed(two(&bytes[0..2])?);
                (year, two(&bytes[2..4])?, two(&bytes[4..6])?)
            }
            DateFormat::YearMonthDaySince1956 => {
                let year = SUPPLEMENT_EPOCH + two(&bytes[0..2])? as i32;
                (year, two(&bytes[2..4])?, two(&bytes[4..6])?)
            }
        };

        NaiveDate::from_ymd_opt(year, month, day).ok_or(DecodeFailure::InvalidDate)
    }
}

fn two(bytes: &[u8]) -> Result<u32, DecodeFailure> {
    parse_two_digits(bytes).ok_or(DecodeFailure::InvalidDate)
}

fn windowed(year: u32) -> i32 {
    if year >= CENTURY_PIVOT {
        1900 + year as i32
    } else {
        2000 + year as i32
    }
}
