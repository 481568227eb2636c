//! Decoded field values.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use super::DaysRun;

/// One decoded, emittable column value.
///
/// Absent values (blank optional columns) are `None` in a [`Row`], never a
/// zero or empty variant of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Integer(i64),
    Flag(char),
    Boolean(bool),
    Time(NaiveTime),
    Date(NaiveDate),
    Days(DaysRun),
    /// Fixed-size block of short codes (activities, routeing group stations).
    Codes(Vec<String>),
}

/// The emittable values of one record, in layout order.
pub type Row = Vec<Option<Value>>;

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<char> {
        match self {
            Value::Flag(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            Value::Time(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_variant() {
        let t = NaiveTime::from_hms_opt(12, 34, 30).unwrap();
        assert_eq!(Value::Time(t).as_time(), Some(t));
        assert_eq!(Value::Time(t).as_date(), None);

        assert_eq!(Value::Text("C12345".into()).as_text(), Some("C12345"));
        assert_eq!(Value::Flag('C').as_flag(), Some('C'));
        assert_eq!(Value::Integer(75).as_integer(), Some(75));
        assert_eq!(Value::Integer(75).as_text(), None);
    }

    #[test]
    fn serializes_untagged() {
        let row: Row = vec![
            Some(Value::Text("PADTON ".into())),
            None,
            Some(Value::Integer(3)),
            Some(Value::Flag('P')),
            Some(Value::Boolean(true)),
            Some(Value::Time(NaiveTime::from_hms_opt(12, 34, 30).unwrap())),
            Some(Value::Date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())),
            Some(Value::Codes(vec!["T ".into(), "  ".into()])),
        ];
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"["PADTON ",null,3,"P",true,"12:34:30","2024-03-15",["T ","  "]]"#
        );
    }
}
