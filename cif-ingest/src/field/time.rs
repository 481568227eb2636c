//! Time-of-day columns.
//!
//! CIF gives times as `HHMM`. Working timetable times add a fifth column
//! holding `H` when the time is half a minute past the printed minute.

use chrono::NaiveTime;

use super::DecodeFailure;

/// Decode an `HHMM` time.
pub(super) fn decode_hhmm(text: &str) -> Result<NaiveTime, DecodeFailure> {
    check_length(text, 4)?;
    hours_minutes(text.as_bytes(), 0)
}

/// Decode an `HHMM` time followed by `H` (half minute) or a space.
pub(super) fn decode_hhmm_half(text: &str) -> Result<NaiveTime, DecodeFailure> {
    check_length(text, 5)?;
    let bytes = text.as_bytes();
    let second = match bytes[4] {
        b'H' => 30,
        b' ' => 0,
        _ => return Err(DecodeFailure::InvalidTime),
    };
    hours_minutes(bytes, second)
}

fn check_length(text: &str, expected: usize) -> Result<(), DecodeFailure> {
    if !text.is_ascii() {
        return Err(DecodeFailure::InvalidTime);
    }
    if text.len() != expected {
        return Err(DecodeFailure::WrongLength {
            expected,
            found: text.len(),
        });
    }
    Ok(())
}

fn hours_minutes(bytes: &[u8], second: u32) -> Result<NaiveTime, DecodeFailure> {
    let hour = parse_two_digits(&bytes[0..2]).ok_or(DecodeFailure::InvalidTime)?;
    let minute = parse_two_digits(&bytes[2..4]).ok_or(DecodeFailure::InvalidTime)?;
    NaiveTime::from_hms_opt(hour, minute, second).ok_or(DecodeFailure::InvalidTime)
}

/// Parse two ASCII digit bytes into a u32.
pub(super) fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::Timelike;
    use proptest::prelude::*;

    proptest! {
        /// Every valid HHMM decodes to the same hour and minute
        #[test]
        fn hhmm_roundtrip(h in 0u32..24, m in 0u32..60) {
            let t = decode_hhmm(&format!("{:02}{:02}", h, m)).unwrap();
            prop_assert_eq!((t.hour(), t.minute(), t.second()), (h, m, 0));
        }

        /// The half-minute marker only ever adds thirty seconds
        #[test]
        fn half_marker_adds_thirty_seconds(h in 0u32..24, m in 0u32..60) {
            let whole = decode_hhmm_half(&format!("{:02}{:02} ", h, m)).unwrap();
            let half = decode_hhmm_half(&format!("{:02}{:02}H", h, m)).unwrap();
            prop_assert_eq!(half - whole, chrono::Duration::seconds(30));
        }

        /// Hours past 23 never decode
        #[test]
        fn late_hours_rejected(h in 24u32..100, m in 0u32..60) {
            let text = format!("{:02}{:02}", h, m);
            prop_assert!(decode_hhmm(&text).is_err());
        }
    }
}
