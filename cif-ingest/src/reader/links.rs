//! Additional links reader.
//!
//! Each line describes one non-rail link between stations as comma
//! separated `KEY=VALUE` pairs, in any order and with any key left out.

use crate::field::{DateFormat, DecodeError, DecodeFailure, Field, Row};
use crate::sink::RowSink;

use super::{LineReader, ReadError};

const RECORD: &str = "Additional Link";
const TABLE: &str = "alf";

const MODES: &[&str] = &[
    "BUS", "TUBE", "WALK", "FERRY", "METRO", "TRAM", "TAXI", "TRANSFER",
];

/// Keys in the order their values appear in an emitted row.
static FIELDS: [(&str, Field); 10] = [
    ("M", Field::choice("Mode", 8, MODES)),
    ("O", Field::text("Origin", 3)),
    ("D", Field::text("Destination", 3)),
    ("T", Field::integer("Link Time", 3)),
    ("S", Field::time("Start Time")),
    ("E", Field::time("End Time")),
    ("P", Field::integer("Priority", 1)),
    ("F", Field::date("Start Date", DateFormat::Slashed)),
    ("U", Field::date("End Date", DateFormat::Slashed)),
    ("R", Field::days("Days of Week")),
];

/// Reads an additional links file into a [`RowSink`].
///
/// # Examples
///
/// ```
/// use cif_ingest::field::Value;
/// use cif_ingest::reader::{AdditionalLinkReader, LineReader};
/// use cif_ingest::sink::MemorySink;
///
/// let mut reader = AdditionalLinkReader::new(MemorySink::new());
/// reader.process("M=WALK,O=EUS,D=KGX,T=15\n").unwrap();
///
/// let row = &reader.sink().rows()[0].values;
/// assert_eq!(row[0], Some(Value::Text("WALK".into())));
/// assert_eq!(row[3], Some(Value::Integer(15)));
/// assert_eq!(row[4], None);
/// ```
#[derive(Debug)]
pub struct AdditionalLinkReader<S> {
    sink: S,
}

impl<S: RowSink> AdditionalLinkReader<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Column names of an emitted row.
    pub fn columns() -> impl Iterator<Item = String> {
        FIELDS.iter().map(|(_, field)| field.column_name())
    }

    fn decode(line: &str) -> Result<Row, ReadError> {
        let mut row: Row = vec![None; FIELDS.len()];
        for pair in line.split(',') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let position = FIELDS
                .iter()
                .position(|(k, _)| *k == key)
                .ok_or_else(|| ReadError::MalformedField {
                    record: RECORD,
                    source: DecodeError::new(key, value, DecodeFailure::UnknownKey),
                })?;
            row[position] = FIELDS[position]
                .1
                .decode(value)
                .map_err(|source| ReadError::MalformedField {
                    record: RECORD,
                    source,
                })?;
        }
        Ok(row)
    }
}

impl<S: RowSink> LineReader for AdditionalLinkReader<S> {
    fn process(&mut self, line: &str) -> Result<(), ReadError> {
        let line = line.trim_end();
        if line.is_empty() {
            return Ok(());
        }
        let row = Self::decode(line)?;
        self.sink.emit(TABLE, row)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReadError> {
        self.sink.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{DaysRun, Value};
    use crate::sink::MemorySink;
    use chrono::{NaiveDate, NaiveTime};

    fn read(line: &str) -> Result<Row, ReadError> {
        let mut reader = AdditionalLinkReader::new(MemorySink::new());
        reader.process(line)?;
        Ok(reader.into_sink().into_rows().remove(0).values)
    }

    #[test]
    fn complete_line() {
        let row = read(
            "M=TUBE,O=EUS,D=KGX,T=10,S=0600,E=2330,P=1,F=01/01/2024,U=31/12/2024,R=1111100\r\n",
        )
        .unwrap();
        assert_eq!(
            row,
            vec![
                Some(Value::Text("TUBE".into())),
                Some(Value::Text("EUS".into())),
                Some(Value::Text("KGX".into())),
                Some(Value::Integer(10)),
                Some(Value::Time(NaiveTime::from_hms_opt(6, 0, 0).unwrap())),
                Some(Value::Time(NaiveTime::from_hms_opt(23, 30, 0).unwrap())),
                Some(Value::Integer(1)),
                Some(Value::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())),
                Some(Value::Date(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap())),
                Some(Value::Days(DaysRun::decode("1111100").unwrap())),
            ]
        );
    }

    #[test]
    fn keys_in_any_order_with_one_missing() {
        let row = read("D=KGX,T=5,M=WALK,R=1111111,O=STP,P=2,U=31/12/2024,F=01/01/2024,E=2359")
            .unwrap();
        assert_eq!(row.len(), 10);
        assert_eq!(row[0], Some(Value::Text("WALK".into())));
        assert_eq!(row[1], Some(Value::Text("STP".into())));
        assert_eq!(row[2], Some(Value::Text("KGX".into())));
        assert_eq!(row[3], Some(Value::Integer(5)));
        // Start time was left out
        assert_eq!(row[4], None);
        assert_eq!(
            row[5],
            Some(Value::Time(NaiveTime::from_hms_opt(23, 59, 0).unwrap()))
        );
    }

    #[test]
    fn unknown_mode() {
        let err = read("M=HOVERCRAFT,O=EUS,D=KGX,T=5").unwrap_err();
        let ReadError::MalformedField { record, source } = err else {
            panic!("expected malformed field");
        };
        assert_eq!(record, "Additional Link");
        assert_eq!(source.field(), "Mode");
        assert_eq!(source.text(), "HOVERCRAFT");
    }

    #[test]
    fn unknown_key() {
        let err = read("M=WALK,X=1").unwrap_err();
        let ReadError::MalformedField { source, .. } = err else {
            panic!("expected malformed field");
        };
        assert_eq!(source.field(), "X");
        assert_eq!(source.reason(), &DecodeFailure::UnknownKey);
    }

    #[test]
    fn pair_without_equals_is_unknown_key() {
        assert!(read("M=WALK,junk").is_err());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let mut reader = AdditionalLinkReader::new(MemorySink::new());
        reader.process("\n").unwrap();
        reader.finish().unwrap();
        assert!(reader.sink().rows().is_empty());
        assert_eq!(reader.sink().flushes(), 1);
    }

    #[test]
    fn column_names() {
        let columns: Vec<_> = AdditionalLinkReader::<MemorySink>::columns().collect();
        assert_eq!(columns[0], "mode");
        assert_eq!(columns[3], "link_time");
        assert_eq!(columns[9], "days_of_week");
    }
}
