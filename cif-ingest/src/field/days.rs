//! Days-run pattern type.

use std::fmt;

use chrono::Weekday;
use serde::Serialize;

use super::DecodeFailure;

/// The days of the week a schedule or association applies on.
///
/// CIF writes this as seven `0`/`1` digits, Monday first.
///
/// # Examples
///
/// ```
/// use cif_ingest::field::DaysRun;
/// use chrono::Weekday;
///
/// let days = DaysRun::decode("1000001").unwrap();
/// assert!(days.runs_on(Weekday::Mon));
/// assert!(days.runs_on(Weekday::Sun));
/// assert!(!days.runs_on(Weekday::Wed));
///
/// // Six digits is not a days-run pattern
/// assert!(DaysRun::decode("100000").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DaysRun([bool; 7]);

impl DaysRun {
    /// Decode a seven-digit days-run pattern.
    pub fn decode(text: &str) -> Result<Self, DecodeFailure> {
        let bytes = text.as_bytes();
        if bytes.len() != 7 {
            return Err(DecodeFailure::InvalidDaysRun);
        }

        let mut days = [false; 7];
        for (day, &b) in days.iter_mut().zip(bytes) {
            *day = match b {
                b'1' => true,
                b'0' => false,
                _ => return Err(DecodeFailure::InvalidDaysRun),
            };
        }
        Ok(DaysRun(days))
    }

    /// Whether the pattern includes the given weekday.
    pub fn runs_on(&self, day: Weekday) -> bool {
        self.0[day.num_days_from_monday() as usize]
    }

    /// The flags in Monday-first order.
    pub fn as_array(&self) -> [bool; 7] {
        self.0
    }
}

impl fmt::Debug for DaysRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DaysRun({})", self)
    }
}

impl fmt::Display for DaysRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &day in &self.0 {
            f.write_str(if day { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monday_and_sunday() {
        let days = DaysRun::decode("1000001").unwrap();
        assert_eq!(
            days.as_array(),
            [true, false, false, false, false, false, true]
        );
    }

    #[test]
    fn weekdays_only() {
        let days = DaysRun::decode("1111100").unwrap();
        assert!(days.runs_on(Weekday::Fri));
        assert!(!days.runs_on(Weekday::Sat));
        assert!(!days.runs_on(Weekday::Sun));
    }

    #[test]
    fn reject_wrong_length() {
        assert_eq!(
            DaysRun::decode("100000"),
            Err(DecodeFailure::InvalidDaysRun)
        );
        assert!(DaysRun::decode("10000011").is_err());
        assert!(DaysRun::decode("").is_err());
    }

    #[test]
    fn reject_other_digits() {
        assert!(DaysRun::decode("1000002").is_err());
        assert!(DaysRun::decode("100 001").is_err());
        assert!(DaysRun::decode("       ").is_err());
    }

    #[test]
    fn display() {
        let days = DaysRun::decode("0110100").unwrap();
        assert_eq!(days.to_string(), "0110100");
    }

    #[test]
    fn debug() {
        let days = DaysRun::decode("1111111").unwrap();
        assert_eq!(format!("{:?}", days), "DaysRun(1111111)");
    }

    #[test]
    fn serializes_as_array() {
        let days = DaysRun::decode("1000000").unwrap();
        assert_eq!(
            serde_json::to_string(&days).unwrap(),
            "[true,false,false,false,false,false,false]"
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any 0/1 pattern decodes and displays back unchanged
        #[test]
        fn roundtrip(s in "[01]{7}") {
            let days = DaysRun::decode(&s).unwrap();
            prop_assert_eq!(days.to_string(), s);
        }

        /// Wrong-length patterns are rejected
        #[test]
        fn wrong_length_rejected(s in "[01]{0,6}|[01]{8,12}") {
            prop_assert!(DaysRun::decode(&s).is_err());
        }
    }
}
